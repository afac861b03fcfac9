// GUI shell
// Widgets and painting only. Every state change goes to the animation worker as a
// Command, and whatever it plans comes back as a RenderedFrame to be stroked here.

use std::sync::mpsc::{Receiver, Sender, TryRecvError};

use eframe::{egui, App, CreationContext, NativeOptions};
use egui::{Align2, Color32, FontId, Painter, Pos2, Sense, Shape, Stroke, Vec2};
use egui_plot::{Line, Plot, PlotPoints, VLine}; // Gives x,y readout when the cursor hovers the plot
use log::{debug, warn};

use phasor_sweep::clock::ClockState;
use phasor_sweep::config::SimulationConfig;
use phasor_sweep::error::{Error, Result};
use phasor_sweep::input::{self, NumericKind};
use phasor_sweep::render::{Label, LabelAlign, PhasorGeometry, Point, Segment, Size, WaveformGeometry};
use phasor_sweep::signal::SimulationParameters;
use phasor_sweep::simulation::{Command, RenderedFrame};
use phasor_sweep::status::Status;
use phasor_sweep::sweep::{sample, SampledWaveform};
use phasor_sweep::worker::Response;

const TRACE: Color32 = Color32::from_rgb(0, 123, 255);
const MARKER: Color32 = Color32::from_rgb(0, 150, 110);
const BACKGROUND: Color32 = Color32::from_gray(244);
const INK: Color32 = Color32::BLACK;

// Defining the panes in the gui
#[derive(PartialEq)]
enum Pane {
    Simulation,
    Samples,
}

impl Default for Pane {
    fn default() -> Self {
        Pane::Simulation
    }
}

// Text behind the three parameter fields
#[derive(Default)]
struct ParameterFields {
    frequency: String,
    phase_offset: String,
    amplitude: String,
}

impl ParameterFields {
    fn fill(&mut self, params: &SimulationParameters) {
        self.frequency = format!("{}", params.frequency_hz);
        self.phase_offset = params.phase_offset_deciradians.to_string();
        self.amplitude = format!("{}", params.peak_amplitude);
    }
}

pub struct PhasorApp {
    current_pane: Pane,
    commands: Sender<Command>,
    responses: Receiver<Response>,
    frame: Option<RenderedFrame>,
    params: Option<SimulationParameters>,
    // Local copy for the plot pane, the worker keeps its own
    samples: Option<SampledWaveform>,
    sample_step: f64,
    fields: ParameterFields,
    time_slider: f64,
    slider_held: bool,
    last_size: Option<Vec2>,
    status: Status,
    disconnected: bool,
}

impl PhasorApp {
    fn new(
        config: &SimulationConfig,
        commands: Sender<Command>,
        responses: Receiver<Response>,
    ) -> Self {
        Self {
            current_pane: Pane::default(),
            commands,
            responses,
            frame: None,
            params: None,
            samples: None,
            sample_step: config.signal.sample_step,
            fields: ParameterFields::default(),
            time_slider: 0.0,
            slider_held: false,
            last_size: None,
            status: Status::new(&config.window.title),
            disconnected: false,
        }
    }

    fn send(&mut self, command: Command) {
        if self.disconnected {
            return;
        }
        if self.commands.send(command).is_err() {
            warn!("animation worker is gone, dropping command");
            self.disconnected = true;
        }
    }

    // Drain everything the worker produced since the last repaint, keep the newest frame
    fn poll_worker(&mut self, ctx: &egui::Context) {
        loop {
            match self.responses.try_recv() {
                Ok(Response::Frame(frame)) => self.frame = Some(*frame),
                Ok(Response::Parameters(params)) => {
                    self.fields.fill(&params);
                    self.samples = Some(sample(&params, self.sample_step));
                    self.params = Some(params);
                }
                Ok(Response::Fps(fps)) => {
                    self.status.update(fps);
                    ctx.send_viewport_cmd(egui::ViewportCommand::Title(self.status.window_title()));
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if !self.disconnected {
                        warn!("animation worker stopped");
                    }
                    self.disconnected = true;
                    break;
                }
            }
        }
    }

    fn submit_parameters(&mut self) {
        let Some(current) = self.params else {
            return;
        };
        let command = Command::SetParameters {
            frequency_hz: input::parse_f64(&self.fields.frequency, current.frequency_hz),
            phase_offset_deciradians: input::parse_i32(
                &self.fields.phase_offset,
                current.phase_offset_deciradians,
            ),
            peak_amplitude: input::parse_f64(&self.fields.amplitude, current.peak_amplitude),
        };
        debug!("submitting {:?}", command);
        self.send(command);
    }

    fn draw_controls(&mut self, ui: &mut egui::Ui, clock: ClockState) {
        let label = if clock.running { "Stop" } else { "Start" };
        if ui.add_sized([60.0, 20.0], egui::Button::new(label)).clicked() {
            self.send(Command::ToggleRun);
        }

        // Follow the clock unless the user is holding the slider
        if !self.slider_held {
            self.time_slider = clock.elapsed_angle_degrees;
        }
        let slider = ui.add(
            egui::Slider::new(&mut self.time_slider, 0.0..=360.0)
                .step_by(1.0)
                .text("t"),
        );
        self.slider_held = slider.dragged();
        if slider.changed() {
            self.send(Command::SetTimeDegrees(self.time_slider));
        }

        let mut submitted = false;
        egui::Grid::new("parameters")
            .num_columns(2)
            .spacing([10.0, 10.0])
            .show(ui, |ui| {
                ui.label("Frequency");
                submitted |= number_field(ui, &mut self.fields.frequency, NumericKind::Unsigned);
                ui.end_row();

                ui.label("Phase offset");
                submitted |= number_field(ui, &mut self.fields.phase_offset, NumericKind::Signed);
                ui.end_row();

                ui.label("û");
                submitted |= number_field(ui, &mut self.fields.amplitude, NumericKind::Decimal);
                ui.end_row();
            });
        if submitted {
            self.submit_parameters();
        }
    }

    fn draw_simulation(&mut self, ui: &mut egui::Ui) {
        let available = ui.available_size();
        if self.last_size != Some(available) {
            self.last_size = Some(available);
            self.send(Command::Resize {
                width: available.x,
                height: available.y,
            });
        }

        let Some(frame) = self.frame.take() else {
            ui.label("Waiting for the animation loop...");
            return;
        };

        let phasor_size = to_vec2(frame.layout.phasor);
        ui.horizontal(|ui| {
            let controls_size = Vec2::new((available.x - phasor_size.x).max(0.0), phasor_size.y);
            ui.allocate_ui(controls_size, |ui| {
                ui.vertical(|ui| self.draw_controls(ui, frame.clock));
            });
            let (response, painter) = ui.allocate_painter(phasor_size, Sense::hover());
            paint_phasor(&painter, response.rect.min, &frame.phasor);
        });

        let (response, painter) = ui.allocate_painter(to_vec2(frame.layout.waveform), Sense::hover());
        paint_waveform(&painter, response.rect.min, &frame.waveform);

        self.frame = Some(frame);
    }

    fn draw_samples(&mut self, ui: &mut egui::Ui) {
        let Some(waveform) = &self.samples else {
            ui.label("No samples yet");
            return;
        };
        let elapsed = self
            .frame
            .as_ref()
            .map_or(0.0, |frame| frame.clock.elapsed_angle_degrees);

        ui.label(format!(
            "{} samples, step {}, f = {} Hz",
            waveform.len(),
            waveform.step,
            waveform.params.frequency_hz
        ));

        let points: Vec<[f64; 2]> = waveform.samples.iter().map(|s| [s.t, s.value]).collect();
        Plot::new("sampled_waveform").show(ui, |plot_ui| {
            plot_ui.line(Line::new(PlotPoints::from(points)).color(TRACE).name("u(t)"));
            plot_ui.vline(VLine::new(elapsed).color(MARKER).name("t"));
        });
    }
}

impl App for PhasorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_worker(ctx);

        egui::SidePanel::left("side_panel").show(ctx, |ui| {
            ui.heading("Menu");

            if ui.button("Simulation").clicked() {
                self.current_pane = Pane::Simulation;
            }
            if ui.button("Samples").clicked() {
                self.current_pane = Pane::Samples;
            }
            if self.disconnected {
                ui.colored_label(Color32::from_rgb(230, 100, 100), "Animation stopped");
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| match self.current_pane {
            Pane::Simulation => self.draw_simulation(ui),
            Pane::Samples => self.draw_samples(ui),
        });

        ctx.request_repaint();
    }
}

// Single line numeric field, true when Enter was pressed in it
fn number_field(ui: &mut egui::Ui, text: &mut String, kind: NumericKind) -> bool {
    let response = ui.add(egui::TextEdit::singleline(text).desired_width(60.0));
    if response.changed() && input::sanitize(kind, text) {
        debug!("rejected non-numeric input");
    }
    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter))
}

fn to_vec2(size: Size) -> Vec2 {
    Vec2::new(size.width, size.height)
}

fn to_pos(origin: Pos2, point: Point) -> Pos2 {
    Pos2::new(origin.x + point.x, origin.y + point.y)
}

fn paint_segment(painter: &Painter, origin: Pos2, segment: &Segment, stroke: Stroke) {
    painter.line_segment([to_pos(origin, segment.from), to_pos(origin, segment.to)], stroke);
}

fn paint_label(painter: &Painter, origin: Pos2, label: &Label, color: Color32) {
    let align = match label.align {
        LabelAlign::Above => Align2::CENTER_BOTTOM,
        LabelAlign::Below => Align2::CENTER_TOP,
        LabelAlign::Right => Align2::LEFT_TOP,
    };
    painter.text(
        to_pos(origin, label.anchor),
        align,
        &label.text,
        FontId::proportional(11.0),
        color,
    );
}

fn paint_phasor(painter: &Painter, origin: Pos2, phasor: &PhasorGeometry) {
    painter.rect_filled(painter.clip_rect(), 0.0, BACKGROUND);
    painter.circle_stroke(to_pos(origin, phasor.center), phasor.radius, Stroke::new(1.0, INK));
    paint_segment(painter, origin, &phasor.needle, Stroke::new(1.5, TRACE));
    let head = phasor.arrowhead.iter().map(|p| to_pos(origin, *p)).collect();
    painter.add(Shape::convex_polygon(head, TRACE, Stroke::NONE));
}

fn paint_waveform(painter: &Painter, origin: Pos2, waveform: &WaveformGeometry) {
    painter.rect_filled(painter.clip_rect(), 0.0, BACKGROUND);

    let ink = Stroke::new(1.0, INK);
    for segment in waveform.axes.iter().chain(&waveform.ticks) {
        paint_segment(painter, origin, segment, ink);
    }
    for label in &waveform.labels {
        paint_label(painter, origin, label, INK);
    }

    // Consecutive segments share endpoints, so the trace goes out as one polyline
    if let Some(first) = waveform.trace.first() {
        let points: Vec<Pos2> = std::iter::once(first.from)
            .chain(waveform.trace.iter().map(|segment| segment.to))
            .map(|p| to_pos(origin, p))
            .collect();
        painter.add(Shape::line(points, Stroke::new(1.5, TRACE)));
    }

    if let Some(marker) = &waveform.period_marker {
        paint_segment(painter, origin, &marker.tick, Stroke::new(1.0, MARKER));
        paint_label(painter, origin, &marker.label, MARKER);
    }
}

// Outputting the gui
pub fn run_gui(
    config: &SimulationConfig,
    commands: Sender<Command>,
    responses: Receiver<Response>,
) -> Result<()> {
    let native_options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height])
            .with_title(config.window.title.clone()),
        ..Default::default()
    };

    let app = PhasorApp::new(config, commands, responses);
    eframe::run_native(
        &config.window.title,
        native_options,
        Box::new(move |cc: &CreationContext| {
            cc.egui_ctx.set_visuals(egui::Visuals::light());
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| Error::Gui(e.to_string()))
}
