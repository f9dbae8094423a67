//! Wall-clock timestamps stamped on handler outcomes.

use std::time::Duration;

use chrono::{DateTime, Utc};

/// UTC timestamp marking when a handler started or completed.
pub type Timestamp = DateTime<Utc>;

#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Time elapsed from `start` to `end`, zero if the clock went backwards.
#[must_use]
pub fn elapsed_between(start: Timestamp, end: Timestamp) -> Duration {
    (end - start).to_std().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;

    use super::*;

    #[test]
    fn should_never_go_backwards() {
        let first = now();
        assert!(now() >= first);
    }

    #[test]
    fn should_measure_elapsed_time() {
        let start = now();
        let end = start + TimeDelta::milliseconds(250);
        assert_eq!(elapsed_between(start, end), Duration::from_millis(250));
    }

    #[test]
    fn should_clamp_negative_elapsed_time_to_zero() {
        let start = now();
        let end = start - TimeDelta::seconds(1);
        assert_eq!(elapsed_between(start, end), Duration::ZERO);
    }
}
