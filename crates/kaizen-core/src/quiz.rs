pub mod error;
pub mod history;
pub mod session;

/// Percentage of correct answers, rounded half up.
#[must_use]
pub fn score_percent(correct: u32, total: u32) -> u8 {
    if total == 0 {
        return 0;
    }
    let correct = u64::from(correct.min(total));
    let total = u64::from(total);
    let score = (correct * 200 + total) / (2 * total);
    u8::try_from(score).unwrap_or(100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_rounding() {
        assert_eq!(score_percent(2, 3), 67);
        assert_eq!(score_percent(1, 3), 33);
        assert_eq!(score_percent(1, 8), 13);
        assert_eq!(score_percent(5, 5), 100);
        assert_eq!(score_percent(0, 4), 0);
        assert_eq!(score_percent(0, 0), 0);
        assert_eq!(score_percent(9, 4), 100);
    }
}
