// Liquid-scintillator / PMT detector pair around a Co-60 source: materials,
// parameterised geometry, sensitive-region binding and photocathode response.
pub mod units;
pub mod utilities;

pub mod data;
pub mod element;
pub mod error;
pub mod material;
pub mod materials;
pub mod optical;

pub mod bounding_box;
pub mod dimensions;
pub mod parameters;
pub mod solid;
pub mod transform;
pub mod volume;

pub mod detector_unit;
pub mod world;

pub mod fast_rng;
pub mod hits;
pub mod photon_detection;
pub mod scintillator_sd;
pub mod sensitive;
pub mod step;

pub mod analysis;
pub mod commands;
pub mod config;
pub mod session;

pub use analysis::{JsonLinesSink, MemorySink, Row, RowSink};
pub use commands::DetectorCommand;
pub use config::Config;
pub use detector_unit::{build_detector_unit, build_pmt, DetectorUnitHandles};
pub use dimensions::DetectorDimensions;
pub use element::Element;
pub use error::{CommandError, ConfigurationError};
pub use fast_rng::FastRng;
pub use hits::{HitsCollection, PhotocathodeHit, ScintillatorHit};
pub use material::Material;
pub use materials::{MaterialCatalog, MaterialDatabase, MaterialRole};
pub use parameters::GeometryParameters;
pub use photon_detection::{sample_detection, PhotocathodeDetector};
pub use sensitive::{bind_sensitive_regions, DetectionOutcome, SensitiveDetector, SensitiveRegistry};
pub use session::{DetectorSession, WorkerContext};
pub use step::{ParticleKind, Step, StepPoint, StepStatus, TrackInfo};
pub use utilities::interpolate_linear;
pub use world::{World, WorldAssembler};
