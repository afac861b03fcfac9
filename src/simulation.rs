// Owned simulation state
// The animation worker holds the only Simulation; the GUI talks to it through Command

use log::{debug, info};

use crate::clock::{AnimationClock, ClockState};
use crate::config::SimulationConfig;
use crate::render::{plan_phasor_frame, plan_waveform_frame, Layout, PhasorGeometry, WaveformGeometry};
use crate::signal::SimulationParameters;
use crate::sweep::{sample, SampledWaveform};

// Requests from the GUI, applied on the animation thread between ticks
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SetParameters {
        frequency_hz: f64,
        phase_offset_deciradians: i32,
        peak_amplitude: f64,
    },
    ToggleRun,
    SetTimeDegrees(f64),
    Resize {
        width: f32,
        height: f32,
    },
}

/// One fully planned frame, handed to the drawing backend as a unit.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedFrame {
    pub clock: ClockState,
    pub params: SimulationParameters,
    pub layout: Layout,
    pub phasor: PhasorGeometry,
    pub waveform: WaveformGeometry,
}

pub struct Simulation {
    config: SimulationConfig,
    params: SimulationParameters,
    clock: AnimationClock,
    waveform: SampledWaveform,
    layout: Layout,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Self {
        let params = SimulationParameters::from_config(&config.signal);
        let waveform = sample(&params, config.signal.sample_step);
        let layout = Layout::from_window(config.window.width, config.window.height, &config.render);
        Self {
            config,
            params,
            clock: AnimationClock::new(),
            waveform,
            layout,
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn params(&self) -> SimulationParameters {
        self.params
    }

    pub fn clock(&self) -> ClockState {
        self.clock.state()
    }

    pub fn waveform(&self) -> &SampledWaveform {
        &self.waveform
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    // Returns the stored (clamped) parameters so the caller can correct its input fields
    pub fn set_parameters(
        &mut self,
        frequency_hz: f64,
        phase_offset_deciradians: i32,
        peak_amplitude: f64,
    ) -> SimulationParameters {
        let params = SimulationParameters::new(
            frequency_hz,
            phase_offset_deciradians,
            peak_amplitude,
            &self.config.signal,
        );
        if params.peak_amplitude != peak_amplitude {
            debug!(
                "peak amplitude {} clamped to {}",
                peak_amplitude, params.peak_amplitude
            );
        }
        info!(
            "parameters: f = {} Hz, phase = {} drad, peak = {}",
            params.frequency_hz, params.phase_offset_deciradians, params.peak_amplitude
        );

        self.clock.reset();
        self.params = params;
        self.waveform = sample(&params, self.config.signal.sample_step);
        params
    }

    pub fn toggle_run(&mut self) -> bool {
        self.clock.toggle()
    }

    pub fn set_time_degrees(&mut self, value: f64) {
        self.clock.set_time_degrees(value);
    }

    // Layout only, the samples are kept
    pub fn on_resize(&mut self, width: f32, height: f32) {
        let layout = Layout::from_window(width, height, &self.config.render);
        if layout != self.layout {
            debug!("resized to {}x{}", layout.window.width, layout.window.height);
            self.layout = layout;
        }
    }

    pub fn tick(&mut self) -> bool {
        self.clock.tick()
    }

    pub fn render_frame(&self) -> RenderedFrame {
        let clock = self.clock.state();
        let render = &self.config.render;
        RenderedFrame {
            clock,
            params: self.params,
            layout: self.layout,
            phasor: plan_phasor_frame(&clock, &self.params, self.layout.phasor, render),
            waveform: plan_waveform_frame(&self.waveform, &clock, self.layout.waveform, render),
        }
    }

    // Parameter edits report back the values that were actually stored
    pub fn apply(&mut self, command: Command) -> Option<SimulationParameters> {
        debug!("applying {:?}", command);
        match command {
            Command::SetParameters {
                frequency_hz,
                phase_offset_deciradians,
                peak_amplitude,
            } => Some(self.set_parameters(frequency_hz, phase_offset_deciradians, peak_amplitude)),
            Command::ToggleRun => {
                self.toggle_run();
                None
            }
            Command::SetTimeDegrees(value) => {
                self.set_time_degrees(value);
                None
            }
            Command::Resize { width, height } => {
                self.on_resize(width, height);
                None
            }
        }
    }
}
