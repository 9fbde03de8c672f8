// End-of-event reduction of the hits collections into the three output
// tables, written row by row to a `RowSink`.

use crate::hits::{HitsCollection, PhotocathodeHit, ScintillatorHit};
use crate::units::MM;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::{self, Write};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScintillatorHitRow {
    #[serde(rename = "eventID")]
    pub event_id: i32,
    #[serde(rename = "trackID")]
    pub track_id: i32,
    #[serde(rename = "parentID")]
    pub parent_id: i32,
    pub particle_name: String,
    pub process_name: String,
    pub volume_name: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub time: f64,
    pub kinetic_energy: f64,
    pub energy_deposit: f64,
}

impl ScintillatorHitRow {
    pub fn from_hit(event_id: i32, hit: &ScintillatorHit) -> Self {
        ScintillatorHitRow {
            event_id,
            track_id: hit.track_id,
            parent_id: hit.parent_id,
            particle_name: hit.particle_name.clone(),
            process_name: hit.process_name.clone(),
            volume_name: hit.volume_name.clone(),
            x: hit.position.x / MM,
            y: hit.position.y / MM,
            z: hit.position.z / MM,
            time: hit.time,
            kinetic_energy: hit.kinetic_energy,
            energy_deposit: hit.energy_deposit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSummaryRow {
    #[serde(rename = "eventID")]
    pub event_id: i32,
    pub primary_track_count: i32,
    pub secondary_track_count: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotocathodeHitRow {
    #[serde(rename = "eventID")]
    pub event_id: i32,
    pub detector_copy_index: i32,
    pub time: f64, // ns
}

impl PhotocathodeHitRow {
    pub fn from_hit(event_id: i32, hit: &PhotocathodeHit) -> Self {
        PhotocathodeHitRow {
            event_id,
            detector_copy_index: hit.copy_index,
            time: hit.time_ns,
        }
    }
}

/// A row of one of the three output tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "table")]
pub enum Row {
    Hits(ScintillatorHitRow),
    EventSummary(EventSummaryRow),
    PhotocathodeHits(PhotocathodeHitRow),
}

/// Destination for output rows.
pub trait RowSink {
    fn append_row(&mut self, row: Row) -> io::Result<()>;
}

/// Keeps every row in memory, in arrival order.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    pub rows: Vec<Row>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn summaries(&self) -> impl Iterator<Item = &EventSummaryRow> {
        self.rows.iter().filter_map(|row| match row {
            Row::EventSummary(summary) => Some(summary),
            _ => None,
        })
    }

    pub fn photocathode_hits(&self) -> impl Iterator<Item = &PhotocathodeHitRow> {
        self.rows.iter().filter_map(|row| match row {
            Row::PhotocathodeHits(hit) => Some(hit),
            _ => None,
        })
    }
}

impl RowSink for MemorySink {
    fn append_row(&mut self, row: Row) -> io::Result<()> {
        self.rows.push(row);
        Ok(())
    }
}

/// Writes one JSON object per row, newline separated.
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        JsonLinesSink { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RowSink for JsonLinesSink<W> {
    fn append_row(&mut self, row: Row) -> io::Result<()> {
        serde_json::to_writer(&mut self.writer, &row)?;
        self.writer.write_all(b"\n")
    }
}

/// Count distinct tracks in the scintillator hits, split by primaries
/// (parent 0) and secondaries.
pub fn summarize_event(event_id: i32, hits: &[ScintillatorHit]) -> EventSummaryRow {
    let mut seen = HashSet::new();
    let mut primary_track_count = 0;
    let mut secondary_track_count = 0;
    for hit in hits {
        if !seen.insert(hit.track_id) {
            continue;
        }
        if hit.parent_id == 0 {
            primary_track_count += 1;
        } else {
            secondary_track_count += 1;
        }
    }
    EventSummaryRow {
        event_id,
        primary_track_count,
        secondary_track_count,
    }
}

/// Emit an event's rows: the summary and scintillator hits (only when the
/// scintillator saw anything), then the photocathode hits.
pub fn end_of_event(event_id: i32, hits: &HitsCollection, sink: &mut dyn RowSink) -> io::Result<()> {
    if !hits.scintillator.is_empty() {
        sink.append_row(Row::EventSummary(summarize_event(event_id, &hits.scintillator)))?;
        for hit in &hits.scintillator {
            sink.append_row(Row::Hits(ScintillatorHitRow::from_hit(event_id, hit)))?;
        }
    }
    for hit in &hits.photocathode {
        sink.append_row(Row::PhotocathodeHits(PhotocathodeHitRow::from_hit(event_id, hit)))?;
    }
    Ok(())
}
