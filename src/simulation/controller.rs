//! Generation lifecycle: spawning, ticking, collisions and selection.
//!
//! A generation moves through Spawning → Running → Extinct and loops back to
//! Spawning. [`GenerationController::update`] is the single tick transition;
//! the scheduler only decides how often it runs.

use chrono::{DateTime, TimeDelta, Utc};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::collections::VecDeque;
use std::time::Instant;
use tracing::{debug, info, trace};

use super::agent::Agent;
use super::obstacle::{Obstacle, generate_pair};
use super::params::{ConfigError, Params};
use super::scheduler::{ScheduleMode, TickScheduler};
use super::selection;
use super::snapshot::{AgentView, GenerationSummary, ObstacleRect, Snapshot};

/// All mutable simulation state of a run.
#[derive(Debug, Clone, Default)]
pub struct GenerationState {
    /// Generation counter; 0 until the first `start_game`.
    pub generation: u32,
    /// Frames elapsed in the current generation.
    pub frame: u64,
    /// Live agents.
    pub agents: Vec<Agent>,
    /// Live obstacles, in spawn order (top half before bottom half).
    pub obstacles: Vec<Obstacle>,
    /// Agents that died in the current generation; sorted by fitness after extinction.
    pub dead: Vec<Agent>,
    /// Longest wall-clock duration of any finished generation.
    pub highscore: TimeDelta,
    /// When the current generation started.
    pub generation_start: Option<DateTime<Utc>>,
    /// Highest age in ticks reached by any agent so far.
    pub best_age: u64,
    /// Finished generations, oldest first.
    pub history: VecDeque<GenerationSummary>,
}

/// Owns a training run and drives it one tick at a time.
#[derive(Debug)]
pub struct GenerationController {
    /// Simulation state.
    pub state: GenerationState,
    params: Params,
    scheduler: TickScheduler,
    rng: SmallRng,
}

impl GenerationController {
    /// Validates `params` and creates an idle controller. Call
    /// [`start_game`](Self::start_game) to spawn the first generation.
    pub fn new(params: Params) -> Result<Self, ConfigError> {
        params.validate()?;

        let seed = params.seed.unwrap_or_else(rand::random);
        let scheduler = TickScheduler::new(
            params.active_tick_rate(),
            params.schedule,
            params.max_catch_up,
        );

        Ok(Self {
            state: GenerationState::default(),
            params,
            scheduler,
            rng: SmallRng::seed_from_u64(seed),
        })
    }

    /// Run configuration.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Whether scheduled ticks are firing.
    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    /// Finished generations, oldest first.
    pub fn history(&self) -> &VecDeque<GenerationSummary> {
        &self.state.history
    }

    /// Begins the next generation.
    ///
    /// Breeds the population from the previous generation's dead pool, or
    /// creates it fresh when there is none, and restarts the scheduler.
    pub fn start_game(&mut self) {
        let now = Utc::now();
        let state = &mut self.state;

        state.generation += 1;
        let previous = state
            .generation_start
            .map_or(TimeDelta::zero(), |start| now - start);
        state.highscore = state.highscore.max(previous);
        state.generation_start = Some(now);
        state.frame = 0;

        self.scheduler.stop();

        state.obstacles = generate_pair(&self.params, &mut self.rng).into();
        state.agents = spawn_population(&self.params, &state.dead, &mut self.rng);

        info!(
            generation = state.generation,
            population = state.agents.len(),
            parents = state.dead.len(),
            "generation started"
        );
        state.dead.clear();

        self.scheduler.start(Instant::now());
    }

    /// Stops scheduled ticking. State is kept and [`update`](Self::update)
    /// can still be called directly.
    pub fn kill(&mut self) {
        self.scheduler.stop();
    }

    /// Advances the simulation by one tick.
    pub fn update(&mut self) {
        let params = &self.params;
        let state = &mut self.state;

        state.frame += 1;
        if state.frame % params.obstacle_interval == 0 {
            let pair = generate_pair(params, &mut self.rng);
            trace!(frame = state.frame, gap_top = pair[0].bottom(), "obstacle pair spawned");
            state.obstacles.extend(pair);
        }

        for obstacle in &mut state.obstacles {
            obstacle.update();
        }

        let obstacles = &state.obstacles;
        state.agents.par_iter_mut().for_each(|agent| {
            let (next_x, gap_top, gap_bottom) = next_gap(obstacles, agent.x, params);
            agent.update(next_x, gap_top, gap_bottom, params);
        });

        state.obstacles.retain(|obstacle| !obstacle.dead);

        detect_collisions(&mut state.agents, &state.obstacles, params);

        let (dead, alive): (Vec<_>, Vec<_>) = std::mem::take(&mut state.agents)
            .into_iter()
            .partition(|agent| !agent.alive);
        state.agents = alive;
        state.dead.extend(dead);

        if state.agents.is_empty() {
            self.finish_generation();
            self.start_game();
        }
    }

    /// Runs every tick the scheduler reports as due at `now`.
    ///
    /// In batch mode generations may end and restart inside one call. In
    /// real-time mode a restart discards the rest of the due ticks, since they
    /// belong to the cancelled schedule. Returns the number of ticks executed.
    pub fn pump(&mut self, now: Instant) -> usize {
        let due = self.scheduler.due_ticks(now);
        let stop_on_restart = self.scheduler.mode() == ScheduleMode::RealTime;
        let generation = self.state.generation;

        for ran in 1..=due {
            self.update();
            if stop_on_restart && self.state.generation != generation {
                return ran;
            }
        }
        due
    }

    /// Runs `ticks` ticks synchronously, independent of the scheduler.
    pub fn run_ticks(&mut self, ticks: usize) {
        for _ in 0..ticks {
            self.update();
        }
    }

    /// Read-only view of the current frame.
    pub fn snapshot(&self) -> Snapshot {
        let state = &self.state;
        Snapshot {
            generation: state.generation,
            frame: state.frame,
            agents: state
                .agents
                .iter()
                .map(|agent| AgentView {
                    x: agent.x,
                    y: agent.y,
                })
                .collect(),
            obstacles: state
                .obstacles
                .iter()
                .map(|obstacle| ObstacleRect {
                    x: obstacle.x,
                    y: obstacle.y,
                    width: obstacle.width,
                    height: obstacle.height,
                })
                .collect(),
            alive: state.agents.len(),
            highscore_secs: seconds(state.highscore),
            elapsed_secs: state
                .generation_start
                .map_or(0.0, |start| seconds(Utc::now() - start)),
            best_age: state.best_age,
        }
    }

    /// Scores and sorts the dead pool and records the generation summary.
    fn finish_generation(&mut self) {
        let state = &mut self.state;
        selection::score(&mut state.dead);

        let best_age = state.dead.iter().map(|agent| agent.age).max().unwrap_or(0);
        let mean_age = if state.dead.is_empty() {
            0.0
        } else {
            state.dead.iter().map(|agent| agent.age as f64).sum::<f64>()
                / state.dead.len() as f64
        };
        let elapsed = state
            .generation_start
            .map_or(TimeDelta::zero(), |start| Utc::now() - start);

        state.best_age = state.best_age.max(best_age);

        let summary = GenerationSummary {
            generation: state.generation,
            best_age,
            mean_age,
            elapsed_secs: seconds(elapsed),
        };
        debug!(
            generation = summary.generation,
            best_age = summary.best_age,
            mean_age = summary.mean_age,
            elapsed_secs = summary.elapsed_secs,
            "generation extinct"
        );

        state.history.push_back(summary);
        while state.history.len() > self.params.history_len {
            state.history.pop_front();
        }
    }
}

/// Creates a full population, bred from `pool` when it is non-empty.
fn spawn_population<R: Rng + ?Sized>(params: &Params, pool: &[Agent], rng: &mut R) -> Vec<Agent> {
    (0..params.population)
        .map(|_| {
            let parent = if pool.is_empty() {
                None
            } else {
                selection::select_parent(pool, rng).map(|agent| &agent.brain)
            };
            Agent::new(params, parent, rng)
        })
        .collect()
}

/// Gap of the first obstacle whose trailing edge is still ahead of `x`.
///
/// With nothing ahead, the whole canvas height is open at the right edge.
fn next_gap(obstacles: &[Obstacle], x: f32, params: &Params) -> (f32, f32, f32) {
    obstacles
        .iter()
        .find(|obstacle| obstacle.trailing_edge() > x)
        .map_or((params.canvas_width, 0.0, params.canvas_height), |obstacle| {
            let gap_top = obstacle.bottom();
            (obstacle.x, gap_top, gap_top + params.gap_size)
        })
}

/// Kills agents outside the canvas or inside an obstacle; all bounds inclusive.
pub fn detect_collisions(agents: &mut [Agent], obstacles: &[Obstacle], params: &Params) {
    for agent in agents.iter_mut() {
        let out_of_bounds = agent.y <= 0.0 || agent.y >= params.canvas_height;
        if out_of_bounds || obstacles.iter().any(|obstacle| obstacle.contains(agent.x, agent.y)) {
            agent.kill();
        }
    }
}

fn seconds(delta: TimeDelta) -> f64 {
    delta.num_milliseconds() as f64 / 1000.0
}
