// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Error taxonomy for the scheduler and its actions.

use simian_geom::GeomError;
use thiserror::Error;

/// Failure raised by an action callback or an actuator.
///
/// Boxed so actuators can surface their own error types unchanged; the
/// scheduler never inspects it, only wraps it with the action name and tick.
pub type ActionError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors emitted by the scheduler.
#[derive(Debug, Error)]
pub enum MonkeyError {
    /// A weighted action was registered with a weight that is not a finite
    /// positive number. The cumulative table is left untouched.
    #[error("invalid weight {0}: weights must be finite and greater than zero")]
    InvalidWeight(f64),
    /// An interval action was registered with an interval of zero ticks.
    #[error("invalid interval: intervals must be at least one tick")]
    InvalidInterval,
    /// A bounded run was requested with zero iterations.
    #[error("invalid iteration count: a bounded run needs at least one iteration")]
    InvalidIterations,
    /// A bounded scalar draw was requested with an empty range.
    #[error("invalid bound {0}: draws need an upper bound greater than zero")]
    InvalidBound(i64),
    /// Geometry derived from caller input was invalid.
    #[error(transparent)]
    Geometry(#[from] GeomError),
    /// An invoked action failed; the run loop stops at the first failure.
    #[error("action `{name}` failed on tick {tick}")]
    Action {
        /// Registered name of the failing action.
        name: &'static str,
        /// 1-based tick during which the action ran.
        tick: u64,
        /// Error returned by the action.
        #[source]
        source: ActionError,
    },
}

impl MonkeyError {
    /// Returns `true` for errors caused by invalid registration or run input.
    pub fn is_configuration(&self) -> bool {
        !matches!(self, Self::Action { .. })
    }
}

/// Failures raised by the built-in gesture actions themselves, as opposed to
/// the actuator delivering them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GestureError {
    /// A visible alert reported no buttons, so it cannot be dismissed.
    #[error("alert {alert} has no buttons")]
    AlertWithoutButtons {
        /// Index of the alert in the actuator's report.
        alert: usize,
    },
}
