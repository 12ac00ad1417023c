//! Agent physics and decision making.
//!
//! An agent is a point at a fixed horizontal position falling under constant
//! gravity. Each tick its network decides whether to jump.

use ndarray::Array1;
use rand::Rng;

use super::mutation::MutationPolicy;
use super::network::{Network, NeuralNetwork};
use super::params::{OUTPUT_SIZE, Params};

/// How an agent's brain came to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Freshly initialised random network.
    Fresh,
    /// Mutated copy of a parent's network.
    Offspring,
}

/// A simulated flyer with a neural network brain.
#[derive(Debug, Clone)]
pub struct Agent {
    /// Horizontal position, constant for the agent's lifetime.
    pub x: f32,
    /// Vertical position; grows downwards.
    pub y: f32,
    /// Vertical velocity.
    pub velocity: f32,
    /// Ticks survived.
    pub age: u64,
    /// Selection weight, assigned when the generation goes extinct.
    pub fitness: f64,
    /// Cleared on collision or when leaving the canvas.
    pub alive: bool,
    /// Whether the brain was freshly created or inherited.
    pub origin: Origin,
    /// Network controlling the jump decision.
    pub brain: NeuralNetwork,
}

impl Agent {
    /// Creates an agent, inheriting a mutated copy of `parent` when given.
    pub fn new<R: Rng + ?Sized>(
        params: &Params,
        parent: Option<&NeuralNetwork>,
        rng: &mut R,
    ) -> Self {
        match parent {
            Some(parent) => {
                let mut agent = Self::with_brain(params, parent.copy(), Origin::Offspring);
                agent.mutate(&params.mutation, rng);
                agent
            }
            None => Self::with_brain(
                params,
                NeuralNetwork::new(params.input_size(), params.hidden_size, OUTPUT_SIZE),
                Origin::Fresh,
            ),
        }
    }

    /// Creates an agent at the start position around an existing brain.
    pub fn with_brain(params: &Params, brain: NeuralNetwork, origin: Origin) -> Self {
        Self {
            x: params.agent_x,
            y: params.agent_start_y,
            velocity: 0.0,
            age: 0,
            fitness: 0.0,
            alive: true,
            origin,
            brain,
        }
    }

    /// Advances physics by one tick, then lets the brain decide.
    ///
    /// The position is not clamped; leaving the canvas is detected by the
    /// controller as a death.
    pub fn update(
        &mut self,
        next_obstacle_x: f32,
        gap_top_y: f32,
        gap_bottom_y: f32,
        params: &Params,
    ) {
        self.age += 1;
        self.velocity = (self.velocity + params.gravity).min(params.terminal_velocity);
        self.y += self.velocity;
        self.think(next_obstacle_x, gap_top_y, gap_bottom_y, params);
    }

    /// Runs the brain on the current senses and jumps if `output[1] > output[0]`.
    ///
    /// Returns whether the agent jumped.
    pub fn think(
        &mut self,
        next_obstacle_x: f32,
        gap_top_y: f32,
        gap_bottom_y: f32,
        params: &Params,
    ) -> bool {
        let inputs = self.sense(next_obstacle_x, gap_top_y, gap_bottom_y, params);
        let output = self.brain.predict(&inputs);
        let jump = output[1] > output[0];
        if jump {
            self.jump(params);
        }
        jump
    }

    /// Builds the network input vector, each value rounded to two decimals.
    ///
    /// Layout: `[distance?, gap_top, gap_bottom, y, velocity]`, where the
    /// horizontal distance is only present with `sense_obstacle_distance`.
    pub fn sense(
        &self,
        next_obstacle_x: f32,
        gap_top_y: f32,
        gap_bottom_y: f32,
        params: &Params,
    ) -> Array1<f32> {
        let mut inputs = Vec::with_capacity(params.input_size());
        if params.sense_obstacle_distance {
            inputs.push(((self.x - next_obstacle_x) / params.canvas_width).abs());
        }
        inputs.extend([
            gap_top_y / params.canvas_height,
            gap_bottom_y / params.canvas_height,
            self.y / params.canvas_height,
            self.velocity / params.velocity_scale,
        ]);
        inputs.into_iter().map(round2).collect()
    }

    /// Overrides the velocity with the jump impulse.
    pub fn jump(&mut self, params: &Params) {
        self.velocity = params.jump_velocity;
    }

    /// Perturbs the brain's parameters according to `policy`.
    pub fn mutate<R: Rng + ?Sized>(&mut self, policy: &MutationPolicy, rng: &mut R) {
        self.brain.mutate(|w| policy.perturb(w, rng));
    }

    /// Marks the agent as dead.
    pub fn kill(&mut self) {
        self.alive = false;
    }
}

fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}
