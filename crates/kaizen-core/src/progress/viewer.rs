//! Completion estimates for content viewers.

use kaizen_model::progress::COMPLETE;
use std::time::Duration;

fn ratio_percent(part: Duration, whole: Duration) -> u8 {
    if whole.is_zero() {
        return 0;
    }
    let percent = part.as_millis().saturating_mul(100) / whole.as_millis().max(1);
    u8::try_from(percent.min(u128::from(COMPLETE))).unwrap_or(COMPLETE)
}

/// Furthest playback position of a video. Seeking backwards never lowers it.
#[derive(Debug, Clone, Copy)]
pub struct VideoWatch {
    duration: Duration,
    furthest: Duration,
}

impl VideoWatch {
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            furthest: Duration::ZERO,
        }
    }

    pub fn seen_until(&mut self, position: Duration) {
        self.furthest = self.furthest.max(position.min(self.duration));
    }

    #[must_use]
    pub fn percentage(&self) -> u8 {
        ratio_percent(self.furthest, self.duration)
    }
}

/// Time spent on a document, counted against the dwell time required to complete it.
#[derive(Debug, Clone, Copy)]
pub struct DocumentDwell {
    required: Duration,
    dwelled: Duration,
}

impl DocumentDwell {
    #[must_use]
    pub fn new(required: Duration) -> Self {
        Self {
            required,
            dwelled: Duration::ZERO,
        }
    }

    pub fn add(&mut self, dwell: Duration) {
        self.dwelled = self.dwelled.saturating_add(dwell);
    }

    #[must_use]
    pub fn percentage(&self) -> u8 {
        if self.required.is_zero() {
            return COMPLETE;
        }
        ratio_percent(self.dwelled, self.required)
    }
}
