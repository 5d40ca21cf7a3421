//! Per-session throttle counters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Typed view of the throttle keys kept in a caller's session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThrottleState {
    /// Verification requests since the last reset
    pub max_counter: u32,

    /// Number of times the session has entered lockout
    pub block_count: u32,

    /// Start of the current lockout, if any
    pub lockout_start_time: Option<DateTime<Utc>>,
}

impl ThrottleState {
    pub fn new(max_counter: u32, block_count: u32) -> Self {
        Self {
            max_counter,
            block_count,
            lockout_start_time: None,
        }
    }

    pub fn is_in_lockout(&self) -> bool {
        self.lockout_start_time.is_some()
    }
}
