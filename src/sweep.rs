// Samples one full 360 unit sweep of the signal
// Recomputed from scratch whenever the parameters change

use crate::signal::{instantaneous_value, SimulationParameters, CYCLE};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveformSample {
    pub t: f64,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SampledWaveform {
    pub params: SimulationParameters,
    pub step: f64,
    pub samples: Vec<WaveformSample>,
}

impl SampledWaveform {
    pub fn empty(params: SimulationParameters, step: f64) -> Self {
        Self {
            params,
            step,
            samples: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    // Number of samples with t <= elapsed. Samples are sorted by t.
    pub fn revealed(&self, elapsed: f64) -> usize {
        self.samples
            .partition_point(|sample| sample.t <= elapsed + REVEAL_EPSILON)
    }

    // Index of the sample closest to t, or None when t lies off the sampled window
    // by more than half a step
    pub fn nearest(&self, t: f64) -> Option<usize> {
        if self.samples.is_empty() || !t.is_finite() || self.step <= 0.0 {
            return None;
        }
        let index = ((t / self.step).round().max(0.0) as usize).min(self.samples.len() - 1);
        ((self.samples[index].t - t).abs() <= self.step / 2.0).then_some(index)
    }
}

const REVEAL_EPSILON: f64 = 1e-9;

// t is computed as i * step, never accumulated, so equal inputs give bit-equal output.
// Both ends of the window are included; the final step is shortened when the step
// does not divide 360.
pub fn sample(params: &SimulationParameters, step: f64) -> SampledWaveform {
    if !(step.is_finite() && step > 0.0) {
        return SampledWaveform::empty(*params, step);
    }

    // The epsilon keeps 360 / 0.1 from rounding up to an extra duplicate sample
    let steps = (CYCLE / step - 1e-9).ceil() as usize;
    let samples = (0..=steps)
        .map(|i| {
            let t = (i as f64 * step).min(CYCLE);
            WaveformSample {
                t,
                value: instantaneous_value(t, params),
            }
        })
        .collect();

    SampledWaveform {
        params: *params,
        step,
        samples,
    }
}
