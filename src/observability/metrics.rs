//! Metrics for the reload subsystem.
//!
//! # Metrics
//! - `reload_jobs_total` (counter): terminal outcomes, by `outcome` label
//! - `reload_actions_fired_total` (counter): actions dispatched
//! - `spurious_notifications_total` (counter): value-unchanged pairs suppressed
//! - `malformed_notifications_total` (counter): payloads skipped at parse
//!
//! # Design Decisions
//! - Low-overhead updates (atomic increments)
//! - No exporter here; the embedding engine installs the recorder

use crate::reload::controller::ReloadOutcome;

/// Record the terminal outcome of one reload job.
pub fn record_reload_outcome(outcome: ReloadOutcome) {
    ::metrics::counter!("reload_jobs_total", "outcome" => outcome.as_str()).increment(1);
}

/// Record one reload action dispatched by the change dispatcher.
pub fn record_action_fired() {
    ::metrics::counter!("reload_actions_fired_total").increment(1);
}

/// Record a notification suppressed because the value did not change.
pub fn record_spurious_notification() {
    ::metrics::counter!("spurious_notifications_total").increment(1);
}

/// Record a payload skipped because it did not parse.
pub fn record_malformed_notification() {
    ::metrics::counter!("malformed_notifications_total").increment(1);
}
