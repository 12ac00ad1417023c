use birdbrain::simulation::controller::GenerationController;
use birdbrain::simulation::scheduler::{ScheduleMode, SpeedMode};
use birdbrain::simulation::snapshot::Snapshot;
use egui_macroquad::egui;
use egui_plot::{Line, Plot, PlotPoints};

/// Ticks per scheduler firing when training headless.
const HEADLESS_TICKS_PER_FIRE: usize = 10_000;

/// What the user asked for this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    /// Start a new run with the given speed and scheduling.
    Start(SpeedMode, ScheduleMode),
    /// Stop the current run.
    Stop,
}

pub struct UIState {
    pub panel_width: f32,
    pub rendering_enabled: bool,
    pub status_message: Option<String>,
    request: Option<Request>,
}

impl UIState {
    pub fn new() -> Self {
        Self {
            panel_width: 280.0,
            rendering_enabled: true,
            status_message: None,
            request: None,
        }
    }

    pub fn take_request(&mut self) -> Option<Request> {
        self.request.take()
    }
}

pub fn draw_ui(state: &mut UIState, controller: Option<&GenerationController>) {
    egui_macroquad::ui(|egui_ctx| {
        egui::SidePanel::right("control_panel")
            .exact_width(state.panel_width)
            .resizable(false)
            .show(egui_ctx, |ui| {
                ui.heading("Birdbrain");
                ui.separator();

                match controller {
                    None => {
                        if ui.button("▶ Start learning").clicked() {
                            state.request =
                                Some(Request::Start(SpeedMode::Standard, ScheduleMode::RealTime));
                        }
                    }
                    Some(_) => {
                        ui.horizontal(|ui| {
                            if ui.button("⏩ Accelerate").clicked() {
                                state.request = Some(Request::Start(
                                    SpeedMode::Accelerated,
                                    ScheduleMode::RealTime,
                                ));
                            }
                            if ui.button("⏹ Stop").clicked() {
                                state.request = Some(Request::Stop);
                            }
                        });
                        if ui.button("🚀 Train headless").clicked() {
                            state.request = Some(Request::Start(
                                SpeedMode::Standard,
                                ScheduleMode::Batch {
                                    ticks_per_fire: HEADLESS_TICKS_PER_FIRE,
                                },
                            ));
                        }
                    }
                }

                ui.checkbox(&mut state.rendering_enabled, "Render frames");

                if let Some(ref msg) = state.status_message {
                    ui.label(msg);
                }

                if let Some(controller) = controller {
                    ui.separator();
                    draw_status(ui, &controller.snapshot());
                    ui.separator();
                    draw_best_age_plot(ui, controller);
                }
            });
    });

    egui_macroquad::draw();
}

fn draw_status(ui: &mut egui::Ui, snapshot: &Snapshot) {
    ui.label(format!("Generation: {}", snapshot.generation));
    ui.label(format!("Agents alive: {}", snapshot.alive));
    ui.label(format!("Best progress: {:.1} s", snapshot.highscore_secs));
    ui.label(format!("Current progress: {:.1} s", snapshot.elapsed_secs));
    ui.label(format!("Best age: {} ticks", snapshot.best_age));
}

fn draw_best_age_plot(ui: &mut egui::Ui, controller: &GenerationController) {
    let history = controller.history();
    if history.is_empty() {
        ui.label("Waiting for the first generation to finish...");
        return;
    }

    let points: PlotPoints = history
        .iter()
        .map(|summary| [f64::from(summary.generation), summary.best_age as f64])
        .collect();

    Plot::new("best_age_plot")
        .height(180.0)
        .show_axes([true, true])
        .label_formatter(|_name, value| {
            format!("generation: {:.0}\nbest age: {:.0}", value.x, value.y)
        })
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(points));
        });
}
