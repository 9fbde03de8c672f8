use crate::analysis::{end_of_event, RowSink};
use crate::commands::DetectorCommand;
use crate::config::Config;
use crate::dimensions::DetectorDimensions;
use crate::error::{CommandError, ConfigurationError};
use crate::fast_rng::FastRng;
use crate::hits::HitsCollection;
use crate::materials::{MaterialCatalog, MaterialDatabase};
use crate::parameters::GeometryParameters;
use crate::sensitive::{bind_sensitive_regions, DetectionOutcome, EventContext, SensitiveRegistry};
use crate::step::Step;
use crate::world::{World, WorldAssembler};
use log::{debug, info};
use std::io;
use std::mem;

/// Owns everything the detector needs between runs: configuration, the
/// material catalog, the geometry parameters and the current world with its
/// sensitive-region bindings.
///
/// Parameter changes only mark the geometry dirty. [`rebuild_if_dirty`]
/// must be called on the control thread before each run; it replaces the
/// world and the bindings together.
///
/// [`rebuild_if_dirty`]: DetectorSession::rebuild_if_dirty
#[derive(Debug)]
pub struct DetectorSession {
    config: Config,
    catalog: MaterialCatalog,
    assembler: WorldAssembler,
    params: GeometryParameters,
    world: Option<World>,
    registry: SensitiveRegistry,
    next_generation: u64,
}

impl DetectorSession {
    pub fn new(config: Config) -> Result<Self, ConfigurationError> {
        Self::with_database(config, MaterialDatabase::standard())
    }

    /// Initialise the material catalog from `database`. Any missing element
    /// or material is fatal and reported here, before any geometry exists.
    pub fn with_database(
        config: Config,
        database: MaterialDatabase,
    ) -> Result<Self, ConfigurationError> {
        let catalog = MaterialCatalog::initialize(database)?;
        let assembler = WorldAssembler::new(DetectorDimensions::STANDARD)
            .with_overlap_check(config.overlap_samples());
        let params = GeometryParameters::new(config.distance, config.angle);
        info!(
            "detector session ready: distance {} mm, angle {} deg, seed {}",
            config.distance,
            config.angle.to_degrees(),
            config.seed
        );
        Ok(DetectorSession {
            config,
            catalog,
            assembler,
            params,
            world: None,
            registry: SensitiveRegistry::new(),
            next_generation: 0,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn catalog(&self) -> &MaterialCatalog {
        &self.catalog
    }

    pub fn parameters(&self) -> &GeometryParameters {
        &self.params
    }

    pub fn set_angle(&mut self, angle: f64) {
        self.params.set_angle(angle);
    }

    pub fn set_distance(&mut self, distance: f64) {
        self.params.set_distance(distance);
    }

    /// Parse and apply one parameter-control command line.
    pub fn apply_command(&mut self, line: &str) -> Result<DetectorCommand, CommandError> {
        let command = DetectorCommand::parse(line)?;
        command.apply(&mut self.params);
        debug!("applied '{}'", command);
        Ok(command)
    }

    /// True when the next run needs a new world.
    pub fn needs_rebuild(&self) -> bool {
        self.world.is_none() || self.params.is_dirty()
    }

    /// Rebuild the world and rebind the sensitive regions if the parameters
    /// changed since the last build (or nothing has been built yet).
    /// Returns whether a rebuild happened.
    pub fn rebuild_if_dirty(&mut self) -> Result<bool, ConfigurationError> {
        if !self.needs_rebuild() {
            return Ok(false);
        }
        let world = self
            .assembler
            .construct(&self.catalog, &self.params, self.next_generation)?;
        self.registry = bind_sensitive_regions(world.store(), world.detector_units());
        debug!(
            "generation {}: {} sensitive regions bound",
            world.generation(),
            self.registry.len()
        );
        self.world = Some(world);
        self.params.mark_clean();
        self.next_generation += 1;
        Ok(true)
    }

    /// The current world, once built.
    pub fn world(&self) -> Option<&World> {
        self.world.as_ref()
    }

    pub fn registry(&self) -> &SensitiveRegistry {
        &self.registry
    }

    /// Event-processing state for one worker thread, with its own random
    /// stream derived from the session seed.
    pub fn worker(&self, worker_id: usize) -> WorkerContext<'_> {
        WorkerContext {
            worker_id,
            registry: &self.registry,
            rng: FastRng::for_worker(self.config.seed, worker_id),
            event_id: None,
            hits: HitsCollection::new(),
        }
    }
}

/// Per-worker event loop state. The hits of the current event stay here
/// until [`WorkerContext::end_event`] hands them over.
#[derive(Debug)]
pub struct WorkerContext<'a> {
    worker_id: usize,
    registry: &'a SensitiveRegistry,
    rng: FastRng,
    event_id: Option<i32>,
    hits: HitsCollection,
}

impl<'a> WorkerContext<'a> {
    pub fn worker_id(&self) -> usize {
        self.worker_id
    }

    pub fn begin_event(&mut self, event_id: i32) {
        self.event_id = Some(event_id);
        self.hits.clear();
    }

    /// Route one step to the sensitive detector of its volume.
    pub fn process_step(&mut self, step: &Step) -> DetectionOutcome {
        let mut ctx = EventContext {
            rng: &mut self.rng,
            hits: &mut self.hits,
        };
        self.registry.dispatch(step, &mut ctx)
    }

    pub fn hits(&self) -> &HitsCollection {
        &self.hits
    }

    /// Write the event's rows to `sink` and return its hits.
    pub fn end_event(&mut self, sink: &mut dyn RowSink) -> io::Result<HitsCollection> {
        let hits = mem::take(&mut self.hits);
        if let Some(event_id) = self.event_id.take() {
            end_of_event(event_id, &hits, sink)?;
        }
        Ok(hits)
    }
}
