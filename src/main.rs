use birdbrain::simulation::controller::GenerationController;
use birdbrain::simulation::params::Params;
use macroquad::prelude::*;
use std::path::Path;
use std::time::Instant;
use tracing::{error, info, warn};

mod graphics;
mod ui;

const CONFIG_PATH: &str = "birdbrain.json";

#[macroquad::main("Birdbrain")]
async fn main() {
    init_tracing();

    let params = load_params();
    let mut ui_state = ui::UIState::new();
    let mut controller: Option<GenerationController> = None;

    info!("Starting birdbrain");

    loop {
        match ui_state.take_request() {
            Some(ui::Request::Start(speed_mode, schedule)) => {
                if let Some(mut old) = controller.take() {
                    old.kill();
                }
                let run_params = Params {
                    speed_mode,
                    schedule,
                    ..params.clone()
                };
                match GenerationController::new(run_params) {
                    Ok(mut new_controller) => {
                        new_controller.start_game();
                        controller = Some(new_controller);
                        ui_state.status_message = None;
                    }
                    Err(e) => {
                        error!("failed to start run: {e}");
                        ui_state.status_message = Some(format!("Error: {e}"));
                    }
                }
            }
            Some(ui::Request::Stop) => {
                if let Some(mut old) = controller.take() {
                    old.kill();
                }
            }
            None => {}
        }

        clear_background(WHITE);

        if let Some(ref mut controller) = controller {
            controller.pump(Instant::now());

            if ui_state.rendering_enabled {
                let snapshot = controller.snapshot();
                graphics::draw_obstacles(&snapshot, &params, ui_state.panel_width);
                graphics::draw_agents(&snapshot, &params, ui_state.panel_width);
            }
        }

        ui::draw_ui(&mut ui_state, controller.as_ref());

        next_frame().await
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn load_params() -> Params {
    if !Path::new(CONFIG_PATH).exists() {
        return Params::default();
    }
    match Params::load_from_file(CONFIG_PATH) {
        Ok(params) => {
            info!("loaded configuration from {CONFIG_PATH}");
            params
        }
        Err(e) => {
            warn!("ignoring {CONFIG_PATH}: {e}");
            Params::default()
        }
    }
}
