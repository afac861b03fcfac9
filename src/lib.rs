pub mod clock;
pub mod config;
pub mod error;
pub mod input;
pub mod logger;
pub mod render;
pub mod signal;
pub mod simulation;
pub mod status;
pub mod sweep;
pub mod worker;

pub use clock::{AnimationClock, ClockState, FixedTimestep};
pub use config::{Preset, SimulationConfig};
pub use error::{Error, Result};
pub use render::{plan_phasor_frame, plan_waveform_frame, Layout, PhasorGeometry, WaveformGeometry};
pub use signal::{instantaneous_value, phasor_angle, PhasorVector, SimulationParameters};
pub use simulation::{Command, RenderedFrame, Simulation};
pub use sweep::{sample, SampledWaveform, WaveformSample};
pub use worker::{worker_thread, Response};
