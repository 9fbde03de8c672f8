// A hand-built event pushed through a worker: scintillator and photocathode
// steps in, output rows out.
use ls_detector::analysis::{EventSummaryRow, Row};
use ls_detector::step::{ParticleKind, Step, StepPoint, StepStatus, TrackInfo};
use ls_detector::units::{EV, KEV, MEV};
use ls_detector::volume::VolumeId;
use ls_detector::{Config, DetectionOutcome, DetectorSession, JsonLinesSink, MemorySink, World};
use nalgebra::Point3;

fn session() -> DetectorSession {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut session = DetectorSession::new(Config {
        seed: 11,
        ..Config::default()
    })
    .unwrap();
    session.rebuild_if_dirty().unwrap();
    session
}

fn step_in(
    world: &World,
    volume: VolumeId,
    track: TrackInfo,
    energy_deposit: f64,
    is_first_step: bool,
) -> Step {
    let store = world.store();
    let pre = StepPoint::new(Point3::new(200.0, 0.0, 0.0), 0.7, 1.17 * MEV, StepStatus::GeomBoundary)
        .located_in(store, volume);
    let post = StepPoint::new(Point3::new(204.0, 1.0, 0.0), 0.72, 1.0 * MEV, StepStatus::PostStep)
        .located_in(store, volume);
    Step {
        track,
        pre,
        post,
        energy_deposit,
        is_first_step,
    }
}

fn scintillator_steps(world: &World) -> Vec<Step> {
    let ls = world.detector_units()[0].scintillator.unwrap();
    vec![
        // Gamma crossing into the fill, Compton scattering
        step_in(world, ls, TrackInfo::primary(1, ParticleKind::Gamma), 150.0 * KEV, false),
        // Recoil electron: first step, then continued deposition
        step_in(world, ls, TrackInfo::secondary(5, 1, ParticleKind::Electron, "compt"), 30.0 * KEV, true),
        step_in(world, ls, TrackInfo::secondary(5, 1, ParticleKind::Electron, "compt"), 120.0 * KEV, false),
        // Transport step without deposit: not recorded
        step_in(world, ls, TrackInfo::primary(1, ParticleKind::Gamma), 0.0, false),
        // Scintillation photon in the fill: not recorded
        step_in(world, ls, TrackInfo::secondary(9, 5, ParticleKind::OpticalPhoton, "Scintillation"), 0.0, true),
    ]
}

fn photon_at_cathode(world: &World, copy_index: usize, track_id: i32) -> Step {
    let cathode = world.detector_units()[copy_index].photocathode.unwrap();
    let mut step = step_in(
        world,
        cathode,
        TrackInfo::secondary(track_id, 5, ParticleKind::OpticalPhoton, "Scintillation"),
        0.0,
        false,
    );
    step.pre.kinetic_energy = 2.9 * EV;
    step.post.kinetic_energy = 2.9 * EV;
    step.post.global_time = 18.5;
    step
}

#[test]
fn test_scintillator_event_rows() {
    let session = session();
    let world = session.world().unwrap();
    let mut worker = session.worker(0);
    worker.begin_event(3);

    let outcomes: Vec<_> = scintillator_steps(world)
        .iter()
        .map(|step| worker.process_step(step))
        .collect();
    assert_eq!(
        outcomes,
        [
            DetectionOutcome::Recorded,
            DetectionOutcome::Recorded,
            DetectionOutcome::Recorded,
            DetectionOutcome::Ignored,
            DetectionOutcome::Ignored,
        ]
    );
    assert!(outcomes.iter().all(|o| !o.kills_track()));

    let mut sink = MemorySink::new();
    let hits = worker.end_event(&mut sink).unwrap();
    assert_eq!(hits.scintillator.len(), 3);
    assert!((hits.total_energy_deposit() - 300.0 * KEV).abs() < 1e-12);

    let summaries: Vec<_> = sink.summaries().cloned().collect();
    assert_eq!(
        summaries,
        [EventSummaryRow {
            event_id: 3,
            primary_track_count: 1,
            secondary_track_count: 1,
        }]
    );
    let hit_rows: Vec<_> = sink
        .rows
        .iter()
        .filter_map(|row| match row {
            Row::Hits(hit) => Some(hit),
            _ => None,
        })
        .collect();
    assert_eq!(hit_rows.len(), 3);
    assert!(hit_rows.iter().all(|row| row.event_id == 3 && row.volume_name == "LS"));
    assert_eq!(hit_rows[0].process_name, "primary");
    assert_eq!(hit_rows[1].process_name, "compt");
    assert_eq!(hit_rows[1].x, 204.0);
    assert_eq!(hit_rows[1].kinetic_energy, 1.0);
}

#[test]
fn test_photocathode_rows_follow_detections() {
    let session = session();
    let world = session.world().unwrap();
    let mut worker = session.worker(2);
    worker.begin_event(8);

    let mut detected = [0usize; 2];
    for track_id in 0..400 {
        let copy_index = (track_id % 2) as usize;
        let outcome = worker.process_step(&photon_at_cathode(world, copy_index, 100 + track_id));
        assert!(outcome.kills_track());
        if outcome == DetectionOutcome::Detected {
            detected[copy_index] += 1;
        }
    }
    assert!(detected[0] > 0 && detected[1] > 0);

    let mut sink = JsonLinesSink::new(Vec::new());
    let hits = worker.end_event(&mut sink).unwrap();
    assert_eq!(hits.photocathode_counts(), detected);

    let text = String::from_utf8(sink.into_inner()).unwrap();
    let rows: Vec<serde_json::Value> = text
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    // Photocathode rows only; no scintillator hits means no summary
    assert_eq!(rows.len(), detected[0] + detected[1]);
    for row in &rows {
        assert_eq!(row["table"], "PhotocathodeHits");
        assert_eq!(row["eventID"], 8);
        assert_eq!(row["time"], 18.5);
    }
    let movable = rows
        .iter()
        .filter(|row| row["detectorCopyIndex"] == 1)
        .count();
    assert_eq!(movable, detected[1]);
}

#[test]
fn test_events_do_not_share_hits() {
    let session = session();
    let world = session.world().unwrap();
    let mut worker = session.worker(0);
    let mut sink = MemorySink::new();

    worker.begin_event(0);
    for step in scintillator_steps(world) {
        worker.process_step(&step);
    }
    let first = worker.end_event(&mut sink).unwrap();

    worker.begin_event(1);
    assert!(worker.hits().is_empty());
    let second = worker.end_event(&mut sink).unwrap();

    assert_eq!(first.scintillator.len(), 3);
    assert!(second.is_empty());
    assert_eq!(sink.summaries().count(), 1);
}
