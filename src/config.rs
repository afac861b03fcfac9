// Simulation configuration
// Every constant that differs between the compact and wide variants lives here,
// loaded from JSON and overridden from the command line in main.rs

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// Bounds enforced by validate(); outside them the sampler, the axis ticks or the
// animation pacer would blow up
pub const MIN_SAMPLE_STEP: f64 = 1e-3;
pub const MIN_TICK_RATE_HZ: f64 = 0.5;
pub const MAX_TICK_RATE_HZ: f64 = 1000.0;
pub const MIN_AXIS_TICK_INTERVAL: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalConfig {
    pub default_frequency_hz: f64,
    pub default_phase_offset_deciradians: i32,
    pub default_peak_amplitude: f64,
    pub amplitude_min: f64,
    pub amplitude_max: f64,
    // Peak amplitude is multiplied by this before it reaches the screen
    pub amplitude_scale: f64,
    pub sample_step: f64,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            default_frequency_hz: 50.0,
            default_phase_offset_deciradians: 0,
            default_peak_amplitude: 10.0,
            amplitude_min: 1.0,
            amplitude_max: 19.0,
            amplitude_scale: 10.0,
            sample_step: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    pub tick_rate_hz: f64,
    pub max_catch_up_ticks: u32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            tick_rate_hz: 60.0,
            max_catch_up_ticks: 8,
        }
    }
}

impl ClockConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.tick_rate_hz)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub phasor_margin: f32,
    pub arrow_length: f32,
    pub arrow_delta_radians: f64,
    // x where the horizontal axis starts
    pub axis_start: f32,
    // x of the vertical axis, also t = 0 on the trace
    pub axis_left: f32,
    pub right_margin: f32,
    // value v is drawn at v * height / vertical_units from the midline
    pub vertical_units: f32,
    pub tick_interval: f64,
    pub tick_half_length: f32,
    pub marker_half_length: f32,
    pub phasor_height_fraction: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            phasor_margin: 5.0,
            arrow_length: 10.0,
            arrow_delta_radians: 0.06,
            axis_start: 10.0,
            axis_left: 20.0,
            right_margin: 10.0,
            vertical_units: 400.0,
            tick_interval: 20.0,
            tick_half_length: 2.0,
            marker_half_length: 2.0,
            phasor_height_fraction: 0.4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 500.0,
            title: String::from("AC Simulation"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            file: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    Compact,
    Wide,
}

impl Default for Preset {
    fn default() -> Self {
        Preset::Compact
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub signal: SignalConfig,
    pub clock: ClockConfig,
    pub render: RenderConfig,
    pub window: WindowConfig,
    pub log: LogConfig,
}

impl SimulationConfig {
    pub fn from_preset(preset: Preset) -> Self {
        match preset {
            Preset::Compact => Self::default(),
            Preset::Wide => Self {
                signal: SignalConfig {
                    default_frequency_hz: 20.0,
                    default_peak_amplitude: 100.0,
                    amplitude_max: 190.0,
                    amplitude_scale: 1.0,
                    ..SignalConfig::default()
                },
                ..Self::default()
            },
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let signal = &self.signal;
        if !(signal.sample_step >= MIN_SAMPLE_STEP && signal.sample_step <= 360.0) {
            return Err(Error::InvalidConfig(format!(
                "sample_step must be in [{}, 360], got {}",
                MIN_SAMPLE_STEP, signal.sample_step
            )));
        }
        if !(signal.amplitude_min > 0.0 && signal.amplitude_min <= signal.amplitude_max)
            || !signal.amplitude_max.is_finite()
        {
            return Err(Error::InvalidConfig(format!(
                "amplitude range [{}, {}] is empty or not positive",
                signal.amplitude_min, signal.amplitude_max
            )));
        }
        if !signal.amplitude_scale.is_finite() {
            return Err(Error::InvalidConfig("amplitude_scale must be finite".into()));
        }
        // Keeps the tick interval non-zero and the loop responsive
        if !(self.clock.tick_rate_hz >= MIN_TICK_RATE_HZ && self.clock.tick_rate_hz <= MAX_TICK_RATE_HZ) {
            return Err(Error::InvalidConfig(format!(
                "tick_rate_hz must be in [{}, {}], got {}",
                MIN_TICK_RATE_HZ, MAX_TICK_RATE_HZ, self.clock.tick_rate_hz
            )));
        }
        if !(self.render.vertical_units > 0.0 && self.render.vertical_units.is_finite()) {
            return Err(Error::InvalidConfig(format!(
                "vertical_units must be positive, got {}",
                self.render.vertical_units
            )));
        }
        if !(self.render.tick_interval >= MIN_AXIS_TICK_INTERVAL && self.render.tick_interval <= 360.0) {
            return Err(Error::InvalidConfig(format!(
                "tick_interval must be in [{}, 360], got {}",
                MIN_AXIS_TICK_INTERVAL, self.render.tick_interval
            )));
        }
        if !(self.render.phasor_height_fraction > 0.0 && self.render.phasor_height_fraction < 1.0) {
            return Err(Error::InvalidConfig(
                "phasor_height_fraction must be between 0 and 1".into(),
            ));
        }
        Ok(())
    }
}
