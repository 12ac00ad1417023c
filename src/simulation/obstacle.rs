//! Scrolling obstacles and pair generation.

use geo::{Coord, Intersects, Rect};
use rand::Rng;

use super::params::Params;

/// One half of an obstacle pair: an axis-aligned rectangle scrolling left.
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
    /// Set once the obstacle has scrolled past the left boundary.
    pub dead: bool,
}

impl Obstacle {
    /// Creates a live obstacle.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            dead: false,
        }
    }

    /// Scrolls one unit left, flagging the obstacle dead once its trailing edge is off-canvas.
    pub fn update(&mut self) {
        self.x -= 1.0;
        if self.trailing_edge() < 0.0 {
            self.dead = true;
        }
    }

    /// Right edge.
    pub fn trailing_edge(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge; for the top half of a pair this is where the gap begins.
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Bounding rectangle.
    pub fn rect(&self) -> Rect<f32> {
        Rect::new(
            Coord { x: self.x, y: self.y },
            Coord {
                x: self.trailing_edge(),
                y: self.bottom(),
            },
        )
    }

    /// Point-in-rectangle test, inclusive on all four edges.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        self.rect().intersects(&Coord { x, y })
    }
}

/// Spawns a complementary pair at the right edge of the canvas.
///
/// The top half is anchored at `y = 0` with a random height in
/// `[min, H - gap - min)`; the bottom half takes the remainder below the gap.
pub fn generate_pair<R: Rng + ?Sized>(params: &Params, rng: &mut R) -> [Obstacle; 2] {
    let min = params.min_obstacle_height;
    let height = params.canvas_height;
    let span = height - params.gap_size - 2.0 * min;

    let top_height = min + rng.random::<f32>() * span;
    let bottom_height = height - top_height - params.gap_size;

    let x = params.canvas_width;
    [
        Obstacle::new(x, 0.0, params.obstacle_width, top_height),
        Obstacle::new(x, height - bottom_height, params.obstacle_width, bottom_height),
    ]
}
