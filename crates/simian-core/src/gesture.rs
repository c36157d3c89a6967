// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Abstract gestures and the actuator seam that turns them into real events.
//!
//! The scheduler only decides *what* to do. An [`Actuator`] owns the *how*:
//! translating a [`Gesture`] into platform event injection, blocking until the
//! platform acknowledges it if the underlying API is asynchronous.

use std::time::Duration;

use simian_geom::{Point, Rect};

use crate::error::ActionError;

/// Physical orientation of the device under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Orientation {
    /// Upright.
    #[default]
    Portrait,
    /// Upside down.
    PortraitUpsideDown,
    /// Landscape, rotated to the left.
    LandscapeLeft,
    /// Landscape, rotated to the right.
    LandscapeRight,
    /// Flat, screen up.
    FaceUp,
    /// Flat, screen down.
    FaceDown,
}

impl Orientation {
    /// Every orientation, in the order random picks index into.
    pub const ALL: [Self; 6] = [
        Self::Portrait,
        Self::PortraitUpsideDown,
        Self::LandscapeLeft,
        Self::LandscapeRight,
        Self::FaceUp,
        Self::FaceDown,
    ];
}

/// Hardware buttons an actuator may press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum HardwareButton {
    /// Volume up.
    VolumeUp,
    /// Volume down.
    VolumeDown,
}

/// An abstract synthetic user interaction.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "kind", rename_all = "snake_case")
)]
pub enum Gesture {
    /// One or more fingers tapping `taps` times, each touch held for `hold`.
    Tap {
        /// One location per finger.
        touches: Vec<Point>,
        /// Number of consecutive taps.
        taps: u32,
        /// How long each touch stays down.
        hold: Duration,
    },
    /// A single finger held in place.
    LongPress {
        /// Touch location.
        at: Point,
        /// Press duration.
        hold: Duration,
    },
    /// Press at `from`, move to `to`, lift.
    Drag {
        /// Start location.
        from: Point,
        /// End location.
        to: Point,
        /// Movement speed in points per second.
        velocity: f64,
    },
    /// A fast drag released while still moving.
    Flick {
        /// Start location.
        from: Point,
        /// End location.
        to: Point,
        /// Gesture duration.
        duration: Duration,
    },
    /// Two-finger pinch inside `rect`; `scale < 1` closes, `scale > 1` opens.
    Pinch {
        /// Area the fingers start in.
        rect: Rect,
        /// Final finger distance relative to the initial one.
        scale: f64,
        /// Finger speed.
        velocity: f64,
    },
    /// Two-finger rotation inside `rect`.
    Rotate {
        /// Area the fingers start in.
        rect: Rect,
        /// Rotation in radians.
        angle: f64,
        /// Angular speed.
        velocity: f64,
    },
    /// Rotate the device itself.
    SetOrientation {
        /// Target orientation.
        orientation: Orientation,
    },
    /// Click a hardware button.
    Button {
        /// Button to click.
        button: HardwareButton,
    },
    /// Shake the device.
    Shake,
    /// Lock the device, wait `hold`, then unlock.
    Lock {
        /// Time spent locked.
        hold: Duration,
    },
    /// Tap button `button` of visible alert `alert`.
    TapAlertButton {
        /// Alert index as reported by [`Actuator::alerts`].
        alert: usize,
        /// Button index within that alert.
        button: usize,
    },
}

impl Gesture {
    /// Short stable label for logs and summaries.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Tap { .. } => "tap",
            Self::LongPress { .. } => "long_press",
            Self::Drag { .. } => "drag",
            Self::Flick { .. } => "flick",
            Self::Pinch { scale, .. } if *scale < 1.0 => "pinch_close",
            Self::Pinch { .. } => "pinch_open",
            Self::Rotate { .. } => "rotate",
            Self::SetOrientation { .. } => "orientation",
            Self::Button {
                button: HardwareButton::VolumeUp,
            } => "volume_up",
            Self::Button {
                button: HardwareButton::VolumeDown,
            } => "volume_down",
            Self::Shake => "shake",
            Self::Lock { .. } => "lock",
            Self::TapAlertButton { .. } => "alert_tap",
        }
    }
}

/// Performs gestures on a concrete target.
///
/// Implementations must present a synchronous interface: `perform` returns
/// once the gesture has been delivered (bridging any asynchronous platform
/// acknowledgment internally).
pub trait Actuator {
    /// Deliver `gesture` with the device in `orientation`.
    fn perform(&mut self, gesture: &Gesture, orientation: Orientation) -> Result<(), ActionError>;

    /// Button counts of the alerts currently on screen, in display order.
    fn alerts(&mut self) -> Result<Vec<usize>, ActionError> {
        Ok(Vec::new())
    }
}

impl<A: Actuator + ?Sized> Actuator for &mut A {
    fn perform(&mut self, gesture: &Gesture, orientation: Orientation) -> Result<(), ActionError> {
        (**self).perform(gesture, orientation)
    }

    fn alerts(&mut self) -> Result<Vec<usize>, ActionError> {
        (**self).alerts()
    }
}

impl<A: Actuator + ?Sized> Actuator for Box<A> {
    fn perform(&mut self, gesture: &Gesture, orientation: Orientation) -> Result<(), ActionError> {
        (**self).perform(gesture, orientation)
    }

    fn alerts(&mut self) -> Result<Vec<usize>, ActionError> {
        (**self).alerts()
    }
}

/// Action context pairing an actuator with the device state gestures depend on.
///
/// This is the context type the built-in gesture actions are registered
/// against (`Monkey<Driver<A>>`). Orientation lives here rather than in a
/// process-wide value so concurrent sessions cannot observe each other.
#[derive(Debug, Default)]
pub struct Driver<A> {
    actuator: A,
    orientation: Orientation,
    gestures: u64,
}

impl<A: Actuator> Driver<A> {
    /// Wraps an actuator, starting in portrait.
    pub fn new(actuator: A) -> Self {
        Self {
            actuator,
            orientation: Orientation::Portrait,
            gestures: 0,
        }
    }

    /// Current device orientation.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Number of gestures delivered so far.
    pub fn gestures(&self) -> u64 {
        self.gestures
    }

    /// Shared access to the actuator.
    pub fn actuator(&self) -> &A {
        &self.actuator
    }

    /// Exclusive access to the actuator.
    pub fn actuator_mut(&mut self) -> &mut A {
        &mut self.actuator
    }

    /// Consumes the driver, returning the actuator.
    pub fn into_inner(self) -> A {
        self.actuator
    }

    /// Delivers `gesture` in the current orientation.
    ///
    /// A successful [`Gesture::SetOrientation`] also updates the orientation
    /// used for every later gesture.
    pub fn perform(&mut self, gesture: &Gesture) -> Result<(), ActionError> {
        self.actuator.perform(gesture, self.orientation)?;
        if let Gesture::SetOrientation { orientation } = gesture {
            self.orientation = *orientation;
        }
        self.gestures += 1;
        Ok(())
    }

    /// Button counts of the visible alerts.
    pub fn alerts(&mut self) -> Result<Vec<usize>, ActionError> {
        self.actuator.alerts()
    }
}
