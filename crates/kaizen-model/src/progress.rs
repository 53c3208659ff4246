use serde::{Deserialize, Serialize};

use crate::module::ModuleRef;

pub const COMPLETE: u8 = 100;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ModuleProgress {
    #[serde(flatten)]
    pub module: ModuleRef,
    pub percentage: u8,
}

impl ModuleProgress {
    #[must_use]
    pub fn new(module: ModuleRef, percentage: u8) -> Self {
        Self {
            module,
            percentage: percentage.min(COMPLETE),
        }
    }

    #[must_use]
    pub fn completed(&self) -> bool {
        self.percentage >= COMPLETE
    }
}

#[derive(Serialize, Debug, Clone, Copy)]
pub struct ProgressUpdate {
    pub percentage: u8,
}
