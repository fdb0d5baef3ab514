//! Placeholder image selection for the simulated generator.

use rand::Rng;
use rand::seq::SliceRandom;
use std::time::Duration;

use crate::config::ImageConfig;

/// The fixed pool of landscape photos returned as "generated" images.
pub const PLACEHOLDER_IMAGES: &[&str] = &[
    "https://images.unsplash.com/photo-1547036967-23d11aacaee0?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&h=600",
    "https://images.unsplash.com/photo-1506905925346-21bda4d32df4?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&h=600",
    "https://images.unsplash.com/photo-1519681393784-d120267933ba?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&h=600",
    "https://images.unsplash.com/photo-1446776877081-d282a0f896e2?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&h=600",
    "https://images.unsplash.com/photo-1464822759844-d150df665cd4?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&h=600",
];

/// Pick one placeholder uniformly at random.
///
/// Returns `None` only if the pool is empty.
pub fn pick_placeholder() -> Option<&'static str> {
    let mut rng = rand::thread_rng();
    PLACEHOLDER_IMAGES.choose(&mut rng).copied()
}

/// Draw the artificial generation latency uniformly from the configured range.
pub fn simulated_delay(config: &ImageConfig) -> Duration {
    let (lo, hi) = (config.min_delay_ms, config.max_delay_ms);
    if lo >= hi {
        return Duration::from_millis(lo);
    }
    Duration::from_millis(rand::thread_rng().gen_range(lo..=hi))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_has_five_images() {
        assert_eq!(PLACEHOLDER_IMAGES.len(), 5);
    }

    #[test]
    fn pick_returns_pool_member() {
        for _ in 0..50 {
            let url = pick_placeholder().unwrap_or_default();
            assert!(PLACEHOLDER_IMAGES.contains(&url));
        }
    }

    #[test]
    fn default_delay_within_two_to_five_seconds() {
        let config = ImageConfig::default();
        for _ in 0..50 {
            let d = simulated_delay(&config);
            assert!(d >= Duration::from_millis(2_000));
            assert!(d <= Duration::from_millis(5_000));
        }
    }

    #[test]
    fn zero_range_has_no_delay() {
        let config = ImageConfig {
            min_delay_ms: 0,
            max_delay_ms: 0,
        };
        assert_eq!(simulated_delay(&config), Duration::ZERO);
    }
}
