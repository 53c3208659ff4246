use serde::Deserialize;

use crate::error::ThresholdError;

/// Percentage of correct answers needed to pass.
pub const DEFAULT_PASS_THRESHOLD: u8 = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "u8")]
pub struct PassThreshold(u8);

impl PassThreshold {
    pub fn new(percent: u8) -> Result<Self, ThresholdError> {
        if percent == 0 || percent > 100 {
            return Err(ThresholdError(percent));
        }
        Ok(Self(percent))
    }

    #[must_use]
    pub fn percent(self) -> u8 {
        self.0
    }

    /// `correct / total >= threshold`, evaluated without floating point.
    #[must_use]
    pub fn passes(self, correct: u32, total: u32) -> bool {
        if total == 0 {
            return false;
        }
        u64::from(correct) * 100 >= u64::from(self.0) * u64::from(total)
    }
}

impl Default for PassThreshold {
    fn default() -> Self {
        Self(DEFAULT_PASS_THRESHOLD)
    }
}

impl TryFrom<u8> for PassThreshold {
    type Error = ThresholdError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct QuizConfig {
    /// # Minimum percentage of correct answers
    #[serde(default)]
    pub pass_threshold: PassThreshold,
}
