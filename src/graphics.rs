use birdbrain::simulation::params::Params;
use birdbrain::simulation::snapshot::Snapshot;
use macroquad::prelude::*;

const AGENT_RADIUS: f32 = 6.0;

/// Maps canvas coordinates onto the part of the window left of the side panel.
struct Viewport {
    scale_x: f32,
    scale_y: f32,
}

impl Viewport {
    fn new(params: &Params, panel_width: f32) -> Self {
        let usable_width = (screen_width() - panel_width).max(1.0);
        Self {
            scale_x: usable_width / params.canvas_width,
            scale_y: screen_height() / params.canvas_height,
        }
    }

    fn point(&self, x: f32, y: f32) -> (f32, f32) {
        (x * self.scale_x, y * self.scale_y)
    }

    fn length(&self, value: f32) -> f32 {
        value * self.scale_x.min(self.scale_y)
    }
}

pub fn draw_obstacles(snapshot: &Snapshot, params: &Params, panel_width: f32) {
    let viewport = Viewport::new(params, panel_width);
    for rect in &snapshot.obstacles {
        let (x, y) = viewport.point(rect.x, rect.y);
        let (right, bottom) = viewport.point(rect.x + rect.width, rect.y + rect.height);
        draw_rectangle(x, y, right - x, bottom - y, BLACK);
    }
}

pub fn draw_agents(snapshot: &Snapshot, params: &Params, panel_width: f32) {
    let viewport = Viewport::new(params, panel_width);
    let radius = viewport.length(AGENT_RADIUS);
    for agent in &snapshot.agents {
        let (x, y) = viewport.point(agent.x, agent.y);
        draw_circle(x, y, radius, Color::from_rgba(24, 58, 193, 128));
    }
}
