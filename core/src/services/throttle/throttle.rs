//! Attempt throttle
//!
//! Two counters live in the caller's session: `max_counter` counts
//! verification requests and `block_count` counts lockout escalations.
//! Reaching the request threshold starts a timed lockout; reaching the
//! escalation threshold blocks the account for good.

use chrono::{DateTime, Duration, Utc};

use og_shared::OtpConfig;

use crate::domain::entities::throttle_state::ThrottleState;

/// Thresholds for the throttle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThrottleConfig {
    /// Requests allowed before a lockout starts
    pub lock_threshold: u32,
    /// Lockout escalations allowed before the account is blocked
    pub block_threshold: u32,
    /// Lockout length in minutes
    pub lockout_duration_minutes: i64,
}

impl ThrottleConfig {
    pub fn from_config(config: &OtpConfig) -> Self {
        Self {
            lock_threshold: config.max_request_timeout,
            block_threshold: config.block_count,
            lockout_duration_minutes: config.lockout_duration_minutes,
        }
    }
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self::from_config(&OtpConfig::default())
    }
}

/// What the throttle allows for the current request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrottleDecision {
    /// Escalation threshold reached; the account must be blocked
    Block,
    /// In lockout with time remaining
    Locked { remaining: Duration },
    /// Lockout just elapsed; counters were reset
    LockoutElapsed,
    /// The request may be evaluated; `max_counter` was incremented
    Allowed,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AttemptThrottle {
    config: ThrottleConfig,
}

impl AttemptThrottle {
    pub fn new(config: ThrottleConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ThrottleConfig {
        &self.config
    }

    /// `true` iff `block_threshold <= block_count`
    pub fn is_blocked(block_count: u32, block_threshold: u32) -> bool {
        block_threshold <= block_count
    }

    /// `true` iff `max_counter >= lock_threshold`
    pub fn is_locked(max_counter: u32, lock_threshold: u32) -> bool {
        max_counter >= lock_threshold
    }

    /// Start a lockout at `now` and count the escalation. No-op while a
    /// lockout is already running.
    pub fn enter_lockout(state: &mut ThrottleState, now: DateTime<Utc>) {
        if state.lockout_start_time.is_none() {
            state.lockout_start_time = Some(now);
            state.block_count += 1;
        }
    }

    /// Time left in the lockout. Zero or negative means it has elapsed.
    pub fn remaining_lockout(
        lockout_start: DateTime<Utc>,
        duration_minutes: i64,
        now: DateTime<Utc>,
    ) -> Duration {
        let passed = (now - lockout_start).num_seconds();
        Duration::seconds(duration_minutes * 60 - passed)
    }

    /// Clear the request counter and the lockout timestamp
    pub fn reset_after_lockout_expiry(state: &mut ThrottleState) {
        state.max_counter = 0;
        state.lockout_start_time = None;
    }

    /// Apply the throttle rules to `state` for one incoming request.
    ///
    /// Mutates `state`; the caller persists it back to the session.
    pub fn check(&self, state: &mut ThrottleState, now: DateTime<Utc>) -> ThrottleDecision {
        if Self::is_blocked(state.block_count, self.config.block_threshold) {
            return ThrottleDecision::Block;
        }

        if Self::is_locked(state.max_counter, self.config.lock_threshold) {
            Self::enter_lockout(state, now);
            let start = state.lockout_start_time.unwrap_or(now);
            let remaining =
                Self::remaining_lockout(start, self.config.lockout_duration_minutes, now);
            if remaining > Duration::zero() {
                return ThrottleDecision::Locked { remaining };
            }
            Self::reset_after_lockout_expiry(state);
            return ThrottleDecision::LockoutElapsed;
        }

        state.max_counter += 1;
        ThrottleDecision::Allowed
    }
}
