//! Read-only view of the simulation for renderers and status displays.

/// Position of a live agent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentView {
    /// Horizontal position.
    pub x: f32,
    /// Vertical position.
    pub y: f32,
}

/// Rectangle of a live obstacle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleRect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
}

/// Everything needed to draw one frame and its status text.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Current generation number (1 for the first).
    pub generation: u32,
    /// Frames elapsed in the current generation.
    pub frame: u64,
    /// Live agents.
    pub agents: Vec<AgentView>,
    /// Live obstacles.
    pub obstacles: Vec<ObstacleRect>,
    /// Number of agents still alive.
    pub alive: usize,
    /// Longest wall-clock survival of any finished generation, in seconds.
    pub highscore_secs: f64,
    /// Wall-clock time spent in the current generation, in seconds.
    pub elapsed_secs: f64,
    /// Highest age in ticks reached by any agent so far.
    pub best_age: u64,
}

/// Outcome of one finished generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationSummary {
    /// Generation number.
    pub generation: u32,
    /// Highest age reached in the generation.
    pub best_age: u64,
    /// Mean age at death.
    pub mean_age: f64,
    /// Wall-clock duration in seconds.
    pub elapsed_secs: f64,
}
