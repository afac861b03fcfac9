// AC voltage signal model
// u(t) and the phasor angle for a point t along the fixed 360 unit window

use std::f64::consts::{PI, TAU};

use num_complex::Complex64;

use crate::config::SignalConfig;

/// Length of the time axis in time units. Frequency decides how many periods fit in it.
pub const CYCLE: f64 = 360.0;

/// Snapshot of the user-adjustable parameters. Replaced as a whole on every edit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationParameters {
    pub frequency_hz: f64,
    pub phase_offset_deciradians: i32,
    pub peak_amplitude: f64,
    pub amplitude_scale: f64,
}

impl SimulationParameters {
    // Amplitude is clamped into the configured range, anything at or below the
    // floor (including negative or NaN input) ends up on the floor
    pub fn new(
        frequency_hz: f64,
        phase_offset_deciradians: i32,
        peak_amplitude: f64,
        config: &SignalConfig,
    ) -> Self {
        let frequency_hz = if frequency_hz.is_finite() && frequency_hz > 0.0 {
            frequency_hz
        } else {
            0.0
        };
        let peak_amplitude = if peak_amplitude.is_nan() || peak_amplitude <= config.amplitude_min {
            config.amplitude_min
        } else {
            peak_amplitude.min(config.amplitude_max)
        };

        Self {
            frequency_hz,
            phase_offset_deciradians,
            peak_amplitude,
            amplitude_scale: config.amplitude_scale,
        }
    }

    pub fn from_config(config: &SignalConfig) -> Self {
        Self::new(
            config.default_frequency_hz,
            config.default_phase_offset_deciradians,
            config.default_peak_amplitude,
            config,
        )
    }

    pub fn phase_offset_radians(&self) -> f64 {
        f64::from(self.phase_offset_deciradians) / 10.0
    }

    // Length of one true period along the time axis, None for a flat signal
    pub fn period_length(&self) -> Option<f64> {
        (self.frequency_hz > 0.0).then(|| CYCLE / self.frequency_hz)
    }
}

pub fn phasor_angle(t: f64, frequency_hz: f64) -> f64 {
    t / CYCLE * frequency_hz * 2.0 * PI
}

// Negated so a rising angle moves the trace upwards on a y-down screen
pub fn instantaneous_value(t: f64, params: &SimulationParameters) -> f64 {
    let argument = phasor_angle(t, params.frequency_hz) + params.phase_offset_radians();
    -argument.sin() * params.peak_amplitude * params.amplitude_scale
}

/// Unit phasor for the current frame, angle normalised into [0, 2π).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhasorVector {
    pub angle_radians: f64,
    pub head_x: f64,
    pub head_y: f64,
}

impl PhasorVector {
    pub fn at(t: f64, frequency_hz: f64) -> Self {
        let angle_radians = phasor_angle(t, frequency_hz).rem_euclid(TAU);
        let head = Complex64::from_polar(1.0, angle_radians);
        Self {
            angle_radians,
            head_x: head.re,
            head_y: head.im,
        }
    }
}
