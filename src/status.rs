// Frame rate readout
// FpsCounter lives on the animation thread, Status on the GUI side

use std::time::{Duration, Instant};

// Counts consumed ticks and reports them once per wall-clock second
#[derive(Debug, Clone)]
pub struct FpsCounter {
    window_start: Instant,
    ticks: u32,
}

impl FpsCounter {
    pub fn new(now: Instant) -> Self {
        Self {
            window_start: now,
            ticks: 0,
        }
    }

    pub fn record_tick(&mut self) {
        self.ticks += 1;
    }

    // Some(fps) once a full second has passed since the last report
    pub fn poll(&mut self, now: Instant) -> Option<u32> {
        if now.duration_since(self.window_start) < Duration::from_secs(1) {
            return None;
        }
        self.window_start += Duration::from_secs(1);
        Some(std::mem::take(&mut self.ticks))
    }
}

pub struct Status {
    pub base_title: String,
    pub fps: Option<u32>,
}

impl Status {
    pub fn new(base_title: &str) -> Self {
        Self {
            base_title: base_title.to_string(),
            fps: None,
        }
    }

    pub fn update(&mut self, fps: u32) {
        self.fps = Some(fps);
    }

    pub fn window_title(&self) -> String {
        match self.fps {
            Some(fps) => format!("{} | {} fps", self.base_title, fps),
            None => self.base_title.clone(),
        }
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::new("AC Simulation")
    }
}
