#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use birdbrain::simulation::mutation::{MutationPolicy, Noise, gaussian};
use rand::SeedableRng;
use rand::rngs::SmallRng;

#[test]
fn test_gaussian_sample_moments() {
    let mut rng = SmallRng::seed_from_u64(42);
    let n = 20_000;
    let samples: Vec<f32> = (0..n).map(|_| gaussian(&mut rng)).collect();

    let mean = samples.iter().sum::<f32>() / n as f32;
    let variance = samples.iter().map(|s| (s - mean).powi(2)).sum::<f32>() / n as f32;

    assert!(mean.abs() < 0.05, "mean {mean}");
    assert!((variance - 1.0).abs() < 0.1, "variance {variance}");
    assert!(samples.iter().all(|s| s.is_finite()));
}

#[test]
fn test_uniform_noise_is_non_negative_and_bounded() {
    let mut rng = SmallRng::seed_from_u64(5);
    let noise = Noise::Uniform { max_offset: 0.5 };
    for _ in 0..1000 {
        let offset = noise.sample(&mut rng);
        assert!((0.0..0.5).contains(&offset));
    }
}

#[test]
fn test_certain_mutation_always_perturbs() {
    let mut rng = SmallRng::seed_from_u64(9);
    let policy = MutationPolicy {
        probability: 1.0,
        noise: Noise::Uniform { max_offset: 0.5 },
    };
    let perturbed = (0..200)
        .filter(|_| policy.perturb(1.0, &mut rng) != 1.0)
        .count();
    // an offset can round to zero only if it is below f32 resolution at 1.0
    assert!(perturbed >= 199);
}

#[test]
fn test_mutation_rate_is_respected() {
    let mut rng = SmallRng::seed_from_u64(13);
    let policy = MutationPolicy {
        probability: 0.1,
        noise: Noise::Gaussian { scale: 0.3 },
    };
    let trials = 20_000;
    let perturbed = (0..trials)
        .filter(|_| policy.perturb(0.0, &mut rng) != 0.0)
        .count();
    let rate = perturbed as f64 / trials as f64;
    assert!((rate - 0.1).abs() < 0.02, "observed rate {rate}");
}
