use web_time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the Unix epoch, as a float.
///
/// Equivalent of `Date.now()` on every target. A clock set before the epoch
/// reads as zero.
pub fn wall_clock_ms() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wall_clock_is_after_epoch() {
        // 2020-01-01T00:00:00Z
        assert!(wall_clock_ms() > 1_577_836_800_000.0);
    }

    #[test]
    fn wall_clock_does_not_go_backwards_between_reads() {
        let a = wall_clock_ms();
        let b = wall_clock_ms();
        assert!(b >= a);
    }
}
