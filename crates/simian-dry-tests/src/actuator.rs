// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Actuator fakes.

use std::collections::VecDeque;

use simian_core::{ActionError, Actuator, Gesture, Orientation};
use thiserror::Error;

/// A gesture as an actuator received it.
#[derive(Debug, Clone, PartialEq)]
pub struct Performed {
    /// The delivered gesture.
    pub gesture: Gesture,
    /// Device orientation at delivery time.
    pub orientation: Orientation,
}

/// Actuator that records every gesture and replays scripted alert reports.
///
/// # Example
///
/// ```
/// use simian_core::{Driver, Gesture};
/// use simian_dry_tests::RecordingActuator;
///
/// let mut driver = Driver::new(RecordingActuator::new());
/// driver.perform(&Gesture::Shake).unwrap();
/// assert_eq!(driver.actuator().labels(), vec!["shake"]);
/// ```
#[derive(Debug, Default)]
pub struct RecordingActuator {
    performed: Vec<Performed>,
    alerts: VecDeque<Vec<usize>>,
    alert_queries: usize,
}

impl RecordingActuator {
    /// Empty recorder reporting no alerts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues one `alerts()` answer; answers are consumed in order and the
    /// recorder reports no alerts once the queue is empty.
    pub fn with_alerts(mut self, buttons_per_alert: Vec<usize>) -> Self {
        self.alerts.push_back(buttons_per_alert);
        self
    }

    /// Everything performed so far.
    pub fn performed(&self) -> &[Performed] {
        &self.performed
    }

    /// Labels of the performed gestures, in order.
    pub fn labels(&self) -> Vec<&'static str> {
        self.performed.iter().map(|p| p.gesture.label()).collect()
    }

    /// How many times `alerts()` was queried.
    pub fn alert_queries(&self) -> usize {
        self.alert_queries
    }
}

impl Actuator for RecordingActuator {
    fn perform(&mut self, gesture: &Gesture, orientation: Orientation) -> Result<(), ActionError> {
        self.performed.push(Performed {
            gesture: gesture.clone(),
            orientation,
        });
        Ok(())
    }

    fn alerts(&mut self) -> Result<Vec<usize>, ActionError> {
        self.alert_queries += 1;
        Ok(self.alerts.pop_front().unwrap_or_default())
    }
}

/// Error returned by [`FailingActuator`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("injected fault after {succeeded} gestures")]
pub struct InjectedFault {
    /// Gestures delivered before the fault.
    pub succeeded: usize,
}

/// Actuator that accepts `allowed` gestures and fails every one after that.
#[derive(Debug, Clone, Copy)]
pub struct FailingActuator {
    allowed: usize,
    delivered: usize,
}

impl FailingActuator {
    /// Fails on gesture number `allowed + 1`.
    pub fn after(allowed: usize) -> Self {
        Self {
            allowed,
            delivered: 0,
        }
    }

    /// Gestures accepted so far.
    pub fn delivered(&self) -> usize {
        self.delivered
    }
}

impl Actuator for FailingActuator {
    fn perform(&mut self, _gesture: &Gesture, _orientation: Orientation) -> Result<(), ActionError> {
        if self.delivered >= self.allowed {
            return Err(InjectedFault {
                succeeded: self.delivered,
            }
            .into());
        }
        self.delivered += 1;
        Ok(())
    }
}
