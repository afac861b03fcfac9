mod gui;

use std::path::PathBuf;
use std::sync::mpsc::channel;
use std::thread;

use clap::{Parser, ValueEnum};
use log::info;

use phasor_sweep::config::{Preset, SimulationConfig};
use phasor_sweep::error::{Error, Result};
use phasor_sweep::{logger, worker_thread};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PresetArg {
    Compact,
    Wide,
}

impl From<PresetArg> for Preset {
    fn from(value: PresetArg) -> Self {
        match value {
            PresetArg::Compact => Preset::Compact,
            PresetArg::Wide => Preset::Wide,
        }
    }
}

/// Phasor and AC waveform simulation
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// JSON config file, replaces the preset
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "compact")]
    preset: PresetArg,

    /// Starting frequency in Hz
    #[arg(long)]
    frequency: Option<f64>,

    /// Starting phase offset in deciradians
    #[arg(long, allow_hyphen_values = true)]
    phase_offset: Option<i32>,

    /// Starting peak amplitude
    #[arg(long, allow_hyphen_values = true)]
    amplitude: Option<f64>,

    #[arg(long)]
    sample_step: Option<f64>,

    #[arg(long)]
    log_file: Option<PathBuf>,

    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn into_config(self) -> Result<SimulationConfig> {
        let mut config = match &self.config {
            Some(path) => SimulationConfig::load(path)?,
            None => SimulationConfig::from_preset(self.preset.into()),
        };

        let signal = &mut config.signal;
        if let Some(frequency) = self.frequency {
            signal.default_frequency_hz = frequency;
        }
        if let Some(phase) = self.phase_offset {
            signal.default_phase_offset_deciradians = phase;
        }
        if let Some(amplitude) = self.amplitude {
            signal.default_peak_amplitude = amplitude;
        }
        if let Some(step) = self.sample_step {
            signal.sample_step = step;
        }
        if self.log_file.is_some() {
            config.log.file = self.log_file;
        }
        if let Some(level) = self.log_level {
            config.log.level = level;
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let config = Cli::parse().into_config()?;
    logger::init(&config.log)?;
    info!("starting {}", config.window.title);

    let (cmd_sender, cmd_receiver) = channel();
    let (rsp_sender, rsp_receiver) = channel();
    let worker_config = config.clone();
    let worker = thread::spawn(move || worker_thread(worker_config, cmd_receiver, rsp_sender));

    // Returns once the window closes, which drops the command sender and ends the worker
    let gui_result = gui::run_gui(&config, cmd_sender, rsp_receiver);

    worker.join().map_err(|_| Error::WorkerPanicked)??;
    gui_result
}
