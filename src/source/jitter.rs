//! Random pause helpers shared by the timed sources.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::time::Duration;

/// Build a small fast RNG, seeded for reproducibility when asked.
pub(crate) fn rng_from(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    }
}

/// Draw a pause uniformly from `[0, cap)`, at millisecond granularity.
///
/// A cap under one millisecond yields no pause at all, which is what the
/// fast-path tests use.
pub(crate) fn uniform_pause(rng: &mut SmallRng, cap: Duration) -> Duration {
    let cap_ms = cap.as_millis() as u64;
    if cap_ms == 0 {
        return Duration::ZERO;
    }
    Duration::from_millis(rng.random_range(0..cap_ms))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pause_stays_under_cap() {
        let mut rng = rng_from(Some(7));
        let cap = Duration::from_millis(50);
        for _ in 0..1000 {
            assert!(uniform_pause(&mut rng, cap) < cap);
        }
    }

    #[test]
    fn test_zero_cap_never_pauses() {
        let mut rng = rng_from(Some(7));
        assert_eq!(uniform_pause(&mut rng, Duration::ZERO), Duration::ZERO);
        // Sub-millisecond caps round down to no pause.
        assert_eq!(
            uniform_pause(&mut rng, Duration::from_micros(500)),
            Duration::ZERO
        );
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let mut a = rng_from(Some(42));
        let mut b = rng_from(Some(42));
        let cap = Duration::from_millis(1000);
        for _ in 0..100 {
            assert_eq!(uniform_pause(&mut a, cap), uniform_pause(&mut b, cap));
        }
    }
}
