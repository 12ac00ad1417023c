//! Mutation policy applied to the weights of bred agents.
//!
//! The network only knows how to apply a transform to each of its parameters;
//! the probability and the noise distribution live here.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::params::ConfigError;

/// Distribution of the offset added to a selected weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Noise {
    /// Offset drawn uniformly from `[0, max_offset)`.
    Uniform {
        /// Upper bound of the offset.
        max_offset: f32,
    },
    /// Standard normal sample (Box–Muller) multiplied by `scale`.
    Gaussian {
        /// Standard deviation of the offset.
        scale: f32,
    },
}

impl Noise {
    /// Draws one offset.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        match *self {
            Noise::Uniform { max_offset } => rng.random::<f32>() * max_offset,
            Noise::Gaussian { scale } => gaussian(rng) * scale,
        }
    }
}

/// Per-weight mutation probability and noise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MutationPolicy {
    /// Independent probability that a weight is perturbed.
    pub probability: f64,
    /// Offset distribution for perturbed weights.
    pub noise: Noise,
}

impl MutationPolicy {
    /// Returns `weight`, perturbed with probability [`Self::probability`].
    #[inline]
    pub fn perturb<R: Rng + ?Sized>(&self, weight: f32, rng: &mut R) -> f32 {
        if rng.random::<f64>() < self.probability {
            weight + self.noise.sample(rng)
        } else {
            weight
        }
    }

    pub(super) fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.probability) {
            return Err(ConfigError::Invalid(
                "mutation probability must be within [0, 1]",
            ));
        }
        let magnitude = match self.noise {
            Noise::Uniform { max_offset } => max_offset,
            Noise::Gaussian { scale } => scale,
        };
        if !magnitude.is_finite() || magnitude < 0.0 {
            return Err(ConfigError::Invalid(
                "mutation magnitude must be finite and non-negative",
            ));
        }
        Ok(())
    }
}

/// Standard normal sample via the Box–Muller transform.
pub fn gaussian<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    // 1 - u keeps the logarithm argument in (0, 1]
    let u1 = 1.0 - rng.random::<f32>();
    let u2 = rng.random::<f32>();
    (-2.0 * u1.ln()).sqrt() * (std::f32::consts::TAU * u2).cos()
}
