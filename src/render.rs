// Render planning
// Turns clock + parameters + sampled wave into plain geometry, the GUI only strokes it.
// Coordinates are local to each panel with y pointing down.

use crate::clock::ClockState;
use crate::config::RenderConfig;
use crate::signal::{PhasorVector, SimulationParameters, CYCLE};
use crate::sweep::SampledWaveform;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

impl Segment {
    pub fn new(from: Point, to: Point) -> Self {
        Self { from, to }
    }
}

// Which side of the anchor the text goes on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelAlign {
    Above,
    Below,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub anchor: Point,
    pub align: LabelAlign,
}

/// Window split: phasor square on top, waveform strip below it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub window: Size,
    pub phasor: Size,
    pub waveform: Size,
}

impl Layout {
    pub fn from_window(width: f32, height: f32, config: &RenderConfig) -> Self {
        let width = width.max(0.0);
        let height = height.max(0.0);
        let side = height * config.phasor_height_fraction;
        Self {
            window: Size::new(width, height),
            phasor: Size::new(side, side),
            waveform: Size::new(width, height - side),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PhasorGeometry {
    pub center: Point,
    pub radius: f32,
    pub vector: PhasorVector,
    pub needle: Segment,
    pub arrowhead: [Point; 3],
}

#[derive(Debug, Clone, PartialEq)]
pub struct PeriodMarker {
    pub t: f64,
    pub tick: Segment,
    pub label: Label,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WaveformGeometry {
    pub axes: [Segment; 2],
    pub trace: Vec<Segment>,
    pub ticks: Vec<Segment>,
    pub labels: Vec<Label>,
    pub period_marker: Option<PeriodMarker>,
}

fn on_circle(center: Point, radius: f32, angle: f64) -> Point {
    // Screen y is inverted so positive angles turn counter-clockwise
    Point::new(
        center.x + radius * angle.cos() as f32,
        center.y - radius * angle.sin() as f32,
    )
}

pub fn plan_phasor_frame(
    clock: &ClockState,
    params: &SimulationParameters,
    viewport: Size,
    config: &RenderConfig,
) -> PhasorGeometry {
    let center = Point::new(viewport.width / 2.0, viewport.height / 2.0);
    let radius = (viewport.width.min(viewport.height) / 2.0 - config.phasor_margin).max(0.0);

    let vector = PhasorVector::at(clock.elapsed_angle_degrees, params.frequency_hz);
    let tip = Point::new(
        center.x + radius * vector.head_x as f32,
        center.y - radius * vector.head_y as f32,
    );

    // Clockwise on screen, the winding egui expects for convex polygons
    let back = (radius - config.arrow_length).max(0.0);
    let arrowhead = [
        tip,
        on_circle(center, back, vector.angle_radians - config.arrow_delta_radians),
        on_circle(center, back, vector.angle_radians + config.arrow_delta_radians),
    ];

    PhasorGeometry {
        center,
        radius,
        vector,
        needle: Segment::new(center, tip),
        arrowhead,
    }
}

// Maps the sweep domain and signal values onto a waveform panel of a given size
struct WaveformScale {
    left: f32,
    span: f32,
    half: f32,
    units_to_px: f32,
}

impl WaveformScale {
    fn new(viewport: Size, config: &RenderConfig) -> Self {
        Self {
            left: config.axis_left,
            span: (viewport.width - config.axis_left - config.right_margin).max(0.0),
            half: viewport.height / 2.0,
            units_to_px: viewport.height / config.vertical_units,
        }
    }

    fn x(&self, t: f64) -> f32 {
        self.left + (t / CYCLE) as f32 * self.span
    }

    fn y(&self, value: f64) -> f32 {
        self.half + value as f32 * self.units_to_px
    }
}

pub fn plan_waveform_frame(
    waveform: &SampledWaveform,
    clock: &ClockState,
    viewport: Size,
    config: &RenderConfig,
) -> WaveformGeometry {
    let scale = WaveformScale::new(viewport, config);
    let half = scale.half;
    let inset = viewport.height / 80.0;

    let axes = [
        Segment::new(
            Point::new(config.axis_start, half),
            Point::new(viewport.width, half),
        ),
        Segment::new(
            Point::new(config.axis_left, inset),
            Point::new(config.axis_left, viewport.height - inset),
        ),
    ];

    // Only the part of the sweep the clock has passed is drawn
    let revealed = waveform.revealed(clock.elapsed_angle_degrees);
    let trace = waveform.samples[..revealed]
        .windows(2)
        .map(|pair| {
            Segment::new(
                Point::new(scale.x(pair[0].t), scale.y(pair[0].value)),
                Point::new(scale.x(pair[1].t), scale.y(pair[1].value)),
            )
        })
        .collect();

    let mut ticks = Vec::new();
    let mut labels = vec![
        Label {
            text: String::from("u"),
            anchor: Point::new(config.axis_left + 4.0, inset),
            align: LabelAlign::Right,
        },
        Label {
            text: String::from("t"),
            anchor: Point::new(viewport.width - config.right_margin, half - 4.0),
            align: LabelAlign::Above,
        },
    ];

    let steps = (CYCLE / config.tick_interval + 1e-9).floor() as usize;
    for k in 1..=steps {
        let t = k as f64 * config.tick_interval;
        let x = scale.x(t);
        ticks.push(Segment::new(
            Point::new(x, half + config.tick_half_length),
            Point::new(x, half - config.tick_half_length),
        ));
        labels.push(Label {
            text: format!("{}", t),
            anchor: Point::new(x, half + config.tick_half_length + 2.0),
            align: LabelAlign::Below,
        });
    }

    let period_marker = waveform
        .params
        .period_length()
        // A period shorter than one step cannot be resolved on the sampled axis
        .filter(|period| *period >= waveform.step && *period <= CYCLE)
        .and_then(|period| waveform.nearest(period))
        .map(|index| {
            let t = waveform.samples[index].t;
            let x = scale.x(t);
            PeriodMarker {
                t,
                tick: Segment::new(
                    Point::new(x, half - config.marker_half_length),
                    Point::new(x, half + config.marker_half_length),
                ),
                label: Label {
                    text: String::from("T"),
                    anchor: Point::new(x, half - 4.0),
                    align: LabelAlign::Above,
                },
            }
        });

    WaveformGeometry {
        axes,
        trace,
        ticks,
        labels,
        period_marker,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SignalConfig;
    use crate::sweep::sample;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    fn params(frequency_hz: f64) -> SimulationParameters {
        SimulationParameters::new(frequency_hz, 0, 10.0, &SignalConfig::default())
    }

    fn at(elapsed: f64) -> ClockState {
        ClockState {
            elapsed_angle_degrees: elapsed,
            running: true,
        }
    }

    #[test]
    fn layout_splits_window() {
        let layout = Layout::from_window(800.0, 500.0, &RenderConfig::default());
        assert_eq!(layout.phasor, Size::new(200.0, 200.0));
        assert_eq!(layout.waveform, Size::new(800.0, 300.0));
    }

    #[test]
    fn phasor_radius_uses_smaller_side() {
        let geometry = plan_phasor_frame(&at(0.0), &params(1.0), Size::new(300.0, 200.0), &RenderConfig::default());
        assert_eq!(geometry.center, Point::new(150.0, 100.0));
        assert_eq!(geometry.radius, 95.0);
    }

    #[test]
    fn needle_points_right_at_zero() {
        let geometry = plan_phasor_frame(&at(0.0), &params(50.0), Size::new(200.0, 200.0), &RenderConfig::default());
        assert_eq!(geometry.needle.from, Point::new(100.0, 100.0));
        assert_abs_diff_eq!(geometry.needle.to.x, 195.0, epsilon = 1e-4);
        assert_abs_diff_eq!(geometry.needle.to.y, 100.0, epsilon = 1e-4);
    }

    #[test]
    fn quarter_turn_points_up_on_screen() {
        // frequency 1: t = 90 is a quarter turn
        let geometry = plan_phasor_frame(&at(90.0), &params(1.0), Size::new(200.0, 200.0), &RenderConfig::default());
        assert_abs_diff_eq!(geometry.vector.angle_radians, FRAC_PI_2, epsilon = 1e-12);
        assert_abs_diff_eq!(geometry.needle.to.x, 100.0, epsilon = 1e-4);
        assert_abs_diff_eq!(geometry.needle.to.y, 5.0, epsilon = 1e-4);
    }

    #[test]
    fn arrowhead_flanks_the_tip() {
        let config = RenderConfig::default();
        let geometry = plan_phasor_frame(&at(0.0), &params(1.0), Size::new(200.0, 200.0), &config);
        let [tip, right, left] = geometry.arrowhead;
        assert_eq!(tip, geometry.needle.to);
        // symmetric about the horizontal needle
        assert_abs_diff_eq!(left.x, right.x, epsilon = 1e-4);
        assert_abs_diff_eq!(left.y - 100.0, 100.0 - right.y, epsilon = 1e-4);
        assert!(left.y < 100.0 && right.y > 100.0);
        assert!(left.x < tip.x);
    }

    #[test]
    fn arrowhead_winds_clockwise_on_screen() {
        let config = RenderConfig::default();
        for elapsed in [0.0, 30.0, 95.0, 181.0, 300.0] {
            let geometry = plan_phasor_frame(&at(elapsed), &params(1.0), Size::new(200.0, 200.0), &config);
            let [a, b, c] = geometry.arrowhead;
            // Shoelace sum is positive for clockwise order when y points down
            let doubled_area = (b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y);
            assert!(doubled_area > 0.0, "counter-clockwise at t = {elapsed}");
        }
    }

    #[test]
    fn nothing_revealed_at_zero() {
        let wave = sample(&params(50.0), 0.1);
        let geometry = plan_waveform_frame(&wave, &at(0.0), Size::new(800.0, 300.0), &RenderConfig::default());
        assert!(geometry.trace.is_empty());
    }

    #[test]
    fn reveal_grows_with_elapsed_time() {
        let wave = sample(&params(50.0), 0.1);
        let config = RenderConfig::default();
        let mut previous = 0;
        for elapsed in 0..=360 {
            let geometry = plan_waveform_frame(&wave, &at(elapsed as f64), Size::new(800.0, 300.0), &config);
            assert!(geometry.trace.len() >= previous);
            previous = geometry.trace.len();
        }
        assert_eq!(previous, wave.len() - 1);
    }

    #[test]
    fn trace_spans_the_plot_area() {
        let wave = sample(&params(50.0), 0.1);
        let config = RenderConfig::default();
        let geometry = plan_waveform_frame(&wave, &at(360.0), Size::new(800.0, 300.0), &config);
        assert_eq!(geometry.trace.first().unwrap().from.x, 20.0);
        assert_abs_diff_eq!(geometry.trace.last().unwrap().to.x, 790.0, epsilon = 1e-3);
    }

    #[test]
    fn values_scale_with_height() {
        // frequency 1, peak 10 * scale 10: quarter period hits -100 units
        let wave = sample(&params(1.0), 1.0);
        let geometry = plan_waveform_frame(&wave, &at(90.0), Size::new(800.0, 400.0), &RenderConfig::default());
        let last = geometry.trace.last().unwrap().to;
        assert_abs_diff_eq!(last.y, 200.0 - 100.0, epsilon = 1e-3);
    }

    #[test]
    fn axes_and_ticks() {
        let wave = sample(&params(50.0), 0.1);
        let geometry = plan_waveform_frame(&wave, &at(0.0), Size::new(800.0, 320.0), &RenderConfig::default());
        assert_eq!(geometry.axes[0], Segment::new(Point::new(10.0, 160.0), Point::new(800.0, 160.0)));
        assert_eq!(geometry.axes[1], Segment::new(Point::new(20.0, 4.0), Point::new(20.0, 316.0)));
        assert_eq!(geometry.ticks.len(), 18);
        assert!(geometry.labels.iter().any(|label| label.text == "20"));
        assert!(geometry.labels.iter().any(|label| label.text == "360"));
    }

    #[test]
    fn period_marker_lands_on_one_period() {
        let wave = sample(&params(50.0), 0.1);
        let geometry = plan_waveform_frame(&wave, &at(0.0), Size::new(800.0, 300.0), &RenderConfig::default());
        let marker = geometry.period_marker.expect("marker");
        assert_abs_diff_eq!(marker.t, 7.2, epsilon = 1e-9);
        assert_eq!(marker.label.text, "T");
        assert_abs_diff_eq!(marker.tick.from.x, 20.0 + 7.2 / 360.0 * 770.0, epsilon = 1e-3);
    }

    #[test]
    fn no_marker_when_period_exceeds_window() {
        let wave = sample(&params(0.5), 0.1);
        let geometry = plan_waveform_frame(&wave, &at(0.0), Size::new(800.0, 300.0), &RenderConfig::default());
        assert!(geometry.period_marker.is_none());
    }

    #[test]
    fn no_marker_when_period_is_below_the_step() {
        // 360 / 10000 = 0.036, shorter than the 0.1 step
        let wave = sample(&params(10_000.0), 0.1);
        let geometry = plan_waveform_frame(&wave, &at(0.0), Size::new(800.0, 300.0), &RenderConfig::default());
        assert!(geometry.period_marker.is_none());
    }

    #[test]
    fn marker_at_one_step_is_kept_off_the_axis() {
        // 360 / 3600 = 0.1, exactly one step
        let wave = sample(&params(3600.0), 0.1);
        let geometry = plan_waveform_frame(&wave, &at(0.0), Size::new(800.0, 300.0), &RenderConfig::default());
        let marker = geometry.period_marker.expect("marker");
        assert!(marker.t > 0.0);
        assert_abs_diff_eq!(marker.t, 0.1, epsilon = 1e-9);
    }

    #[test]
    fn empty_waveform_still_has_axes() {
        let wave = SampledWaveform::empty(params(50.0), 0.1);
        let geometry = plan_waveform_frame(&wave, &at(200.0), Size::new(800.0, 300.0), &RenderConfig::default());
        assert!(geometry.trace.is_empty());
        assert!(geometry.period_marker.is_none());
        assert_eq!(geometry.axes.len(), 2);
        assert!(!geometry.ticks.is_empty());
    }
}
