//! Simulated response latency.

use std::time::Duration;

use rand::Rng;

/// How long a virtual handler takes before applying its effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Latency {
    /// Complete immediately.
    #[default]
    None,
    /// Always wait the same amount of time.
    Fixed(Duration),
    /// Wait a random duration in `min..=max`.
    Uniform { min: Duration, max: Duration },
}

impl Latency {
    /// A uniform range; bounds are swapped if given in the wrong order.
    #[must_use]
    pub fn uniform(min: Duration, max: Duration) -> Self {
        if min <= max {
            Self::Uniform { min, max }
        } else {
            Self::Uniform { min: max, max: min }
        }
    }

    /// Draw one duration.
    #[must_use]
    pub fn sample(&self) -> Duration {
        match *self {
            Self::None => Duration::ZERO,
            Self::Fixed(delay) => delay,
            Self::Uniform { min, max } if min >= max => min,
            Self::Uniform { min, max } => rand::thread_rng().gen_range(min..=max),
        }
    }

    /// Sleep for one sampled duration.
    pub async fn wait(&self) {
        let delay = self.sample();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_sample_zero_for_none() {
        assert_eq!(Latency::None.sample(), Duration::ZERO);
    }

    #[test]
    fn should_sample_exact_value_for_fixed() {
        let delay = Duration::from_millis(120);
        assert_eq!(Latency::Fixed(delay).sample(), delay);
    }

    #[test]
    fn should_sample_within_uniform_bounds() {
        let min = Duration::from_millis(100);
        let max = Duration::from_millis(200);
        let latency = Latency::uniform(min, max);
        for _ in 0..100 {
            let delay = latency.sample();
            assert!(delay >= min && delay <= max, "{delay:?} out of range");
        }
    }

    #[test]
    fn should_swap_reversed_uniform_bounds() {
        let latency = Latency::uniform(Duration::from_secs(2), Duration::from_secs(1));
        assert_eq!(
            latency,
            Latency::Uniform {
                min: Duration::from_secs(1),
                max: Duration::from_secs(2),
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn should_sleep_for_fixed_delay() {
        let started = tokio::time::Instant::now();
        Latency::Fixed(Duration::from_millis(250)).wait().await;
        assert!(started.elapsed() >= Duration::from_millis(250));
    }
}
