// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Built-in gesture actions, their tuning constants, and preset action sets.
//!
//! Each [`GestureKind`] knows how to draw a concrete [`Gesture`] from a
//! [`Dice`]; registration helpers on `Monkey<Driver<A>>` wrap that draw in an
//! action that hands the result to the driver's actuator.

use std::f64::consts::TAU;
use std::time::Duration;

use simian_geom::SizeFraction;

use crate::dice::Dice;
use crate::error::{GestureError, MonkeyError};
use crate::gesture::{Actuator, Driver, Gesture, HardwareButton, Orientation};
use crate::monkey::{ActionId, Monkey};

/// Ticks between alert checks in the default setup.
pub const DEFAULT_ALERT_INTERVAL: u64 = 100;

/// Hold time for long presses and long-held taps.
pub const LONG_PRESS_HOLD: Duration = Duration::from_millis(500);

/// Duration of a flick.
pub const FLICK_DURATION: Duration = Duration::from_millis(500);

const DRAG_VELOCITY: f64 = 1000.0;
const PINCH_CLOSE_VELOCITY: f64 = 1.0;
const PINCH_OPEN_VELOCITY: f64 = 3.0;
const ROTATE_VELOCITY: f64 = 5.0;
const MAX_PINCH_FACTOR: f64 = 4.0;
const MAX_LOCK_SECONDS: f64 = 3.0;

/// Tuning for the tap action.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct TapOptions {
    /// Probability of tapping 2–3 times instead of once.
    pub multiple_tap_probability: f64,
    /// Probability of tapping with several fingers instead of one.
    pub multiple_touch_probability: f64,
    /// Probability of holding each touch for [`LONG_PRESS_HOLD`].
    pub long_press_probability: f64,
    /// How multi-finger touches are placed. `None` uses the preset's layout,
    /// or [`TouchLayout::Scattered`] outside a preset.
    pub touch_layout: Option<TouchLayout>,
}

/// Placement of the fingers in a multi-touch tap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum TouchLayout {
    /// 2–4 touches anywhere inside one `random_rect()`.
    #[default]
    Scattered,
    /// 2–3 touches from [`Dice::random_clustered_points`]: the first touch
    /// is the cluster centre.
    Clustered,
}

impl Default for TapOptions {
    fn default() -> Self {
        Self {
            multiple_tap_probability: 0.05,
            multiple_touch_probability: 0.05,
            long_press_probability: 0.0,
            touch_layout: None,
        }
    }
}

/// Gestures the built-in actions can generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum GestureKind {
    /// Single or multiple taps, see [`TapOptions`].
    Tap,
    /// One-finger press held for [`LONG_PRESS_HOLD`].
    LongPress,
    /// Drag from a panel-safe point to anywhere in the frame.
    Drag,
    /// Flick from a panel-safe point to anywhere in the frame.
    Flick,
    /// Pinch with scale in `(1/5, 1]`.
    PinchClose,
    /// Pinch with scale in `[1, 5)`.
    PinchOpen,
    /// Two-finger rotation by up to a full turn.
    Rotate,
    /// Uniformly chosen device orientation.
    Orientation,
    /// Volume-up click.
    VolumeUp,
    /// Volume-down click.
    VolumeDown,
    /// Device shake.
    Shake,
    /// Lock for up to three seconds, then unlock.
    Lock,
}

impl GestureKind {
    /// Action name used when registering this gesture.
    pub fn name(self) -> &'static str {
        match self {
            Self::Tap => "tap",
            Self::LongPress => "long_press",
            Self::Drag => "drag",
            Self::Flick => "flick",
            Self::PinchClose => "pinch_close",
            Self::PinchOpen => "pinch_open",
            Self::Rotate => "rotate",
            Self::Orientation => "orientation",
            Self::VolumeUp => "volume_up",
            Self::VolumeDown => "volume_down",
            Self::Shake => "shake",
            Self::Lock => "lock",
        }
    }

    /// Draws a concrete gesture of this kind.
    ///
    /// Only [`GestureKind::Tap`] reads `tap`.
    pub fn draw(self, dice: &mut Dice<'_>, tap: &TapOptions) -> Gesture {
        match self {
            Self::Tap => draw_tap(dice, tap),
            Self::LongPress => Gesture::LongPress {
                at: dice.random_point(),
                hold: LONG_PRESS_HOLD,
            },
            Self::Drag => {
                let from = dice.random_point_avoiding_panels();
                let to = dice.random_point();
                Gesture::Drag {
                    from,
                    to,
                    velocity: DRAG_VELOCITY,
                }
            }
            Self::Flick => {
                let from = dice.random_point_avoiding_panels();
                let to = dice.random_point();
                Gesture::Flick {
                    from,
                    to,
                    duration: FLICK_DURATION,
                }
            }
            Self::PinchClose => {
                let rect = dice.random_rect_with(SizeFraction::HALF);
                let scale = 1.0 / (dice.random_fraction(MAX_PINCH_FACTOR) + 1.0);
                Gesture::Pinch {
                    rect,
                    scale,
                    velocity: PINCH_CLOSE_VELOCITY,
                }
            }
            Self::PinchOpen => {
                let rect = dice.random_rect_with(SizeFraction::HALF);
                let scale = dice.random_fraction(MAX_PINCH_FACTOR) + 1.0;
                Gesture::Pinch {
                    rect,
                    scale,
                    velocity: PINCH_OPEN_VELOCITY,
                }
            }
            Self::Rotate => {
                let rect = dice.random_rect_with(SizeFraction::HALF);
                let angle = dice.random_fraction(TAU);
                Gesture::Rotate {
                    rect,
                    angle,
                    velocity: ROTATE_VELOCITY,
                }
            }
            Self::Orientation => {
                let index = dice.next_u32() as usize % Orientation::ALL.len();
                Gesture::SetOrientation {
                    orientation: Orientation::ALL[index],
                }
            }
            Self::VolumeUp => Gesture::Button {
                button: HardwareButton::VolumeUp,
            },
            Self::VolumeDown => Gesture::Button {
                button: HardwareButton::VolumeDown,
            },
            Self::Shake => Gesture::Shake,
            Self::Lock => Gesture::Lock {
                hold: Duration::from_secs_f64(dice.random_fraction(MAX_LOCK_SECONDS)),
            },
        }
    }
}

// Draw order: tap count, touch count, hold.
fn draw_tap(dice: &mut Dice<'_>, options: &TapOptions) -> Gesture {
    let taps = if dice.chance(options.multiple_tap_probability) {
        dice.next_u32() % 2 + 2
    } else {
        1
    };
    let touches = if dice.chance(options.multiple_touch_probability) {
        match options.touch_layout.unwrap_or_default() {
            TouchLayout::Scattered => {
                let count = dice.next_u32() % 3 + 2;
                let rect = dice.random_rect();
                (0..count).map(|_| dice.random_point_in(&rect)).collect()
            }
            TouchLayout::Clustered => {
                let count = dice.next_u32() % 2 + 2;
                dice.random_clustered_points(count as usize)
            }
        }
    } else {
        vec![dice.random_point()]
    };
    let hold = if dice.chance(options.long_press_probability) {
        LONG_PRESS_HOLD
    } else {
        Duration::ZERO
    };
    Gesture::Tap {
        touches,
        taps,
        hold,
    }
}

/// Named sets of weighted gestures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Preset {
    /// Touch-screen gestures only.
    #[default]
    Touch,
    /// Touch gestures plus device-level events (orientation, buttons, shake, lock).
    Device,
    /// Nothing; only explicitly configured actions run.
    None,
}

const TOUCH_PRESET: &[(GestureKind, f64)] = &[
    (GestureKind::Tap, 25.0),
    (GestureKind::LongPress, 1.0),
    (GestureKind::Drag, 1.0),
    (GestureKind::PinchClose, 1.0),
    (GestureKind::PinchOpen, 1.0),
    (GestureKind::Rotate, 1.0),
];

const DEVICE_PRESET: &[(GestureKind, f64)] = &[
    (GestureKind::Tap, 50.0),
    (GestureKind::Drag, 1.0),
    (GestureKind::Flick, 1.0),
    (GestureKind::PinchClose, 1.0),
    (GestureKind::PinchOpen, 1.0),
    (GestureKind::Orientation, 1.0),
    (GestureKind::VolumeUp, 1.0),
    (GestureKind::VolumeDown, 1.0),
    (GestureKind::Shake, 1.0),
    (GestureKind::Lock, 1.0),
];

impl Preset {
    /// Gestures and weights this preset registers, in registration order.
    pub fn weights(self) -> &'static [(GestureKind, f64)] {
        match self {
            Self::Touch => TOUCH_PRESET,
            Self::Device => DEVICE_PRESET,
            Self::None => &[],
        }
    }

    /// Multi-touch layout taps use under this preset unless configured.
    pub fn touch_layout(self) -> TouchLayout {
        match self {
            Self::Device => TouchLayout::Clustered,
            Self::Touch | Self::None => TouchLayout::Scattered,
        }
    }
}

impl<A: Actuator + 'static> Monkey<Driver<A>> {
    /// Registers a weighted action that draws a `kind` gesture and performs it.
    ///
    /// # Errors
    /// Returns [`MonkeyError::InvalidWeight`] for non-positive or non-finite
    /// weights.
    pub fn add_gesture(
        &mut self,
        kind: GestureKind,
        weight: f64,
        tap: TapOptions,
    ) -> Result<ActionId, MonkeyError> {
        self.add_weighted_action(kind.name(), weight, move |dice, driver: &mut Driver<A>| {
            let gesture = kind.draw(dice, &tap);
            driver.perform(&gesture)
        })
    }

    /// Registers the tap action.
    ///
    /// # Errors
    /// As [`add_gesture`](Self::add_gesture).
    pub fn add_tap_action(
        &mut self,
        weight: f64,
        options: TapOptions,
    ) -> Result<ActionId, MonkeyError> {
        self.add_gesture(GestureKind::Tap, weight, options)
    }

    /// Registers every gesture of `preset` with its default weight.
    ///
    /// Taps use [`Preset::touch_layout`] when `tap.touch_layout` is unset.
    ///
    /// # Errors
    /// Propagates registration errors (none for the built-in weights).
    pub fn add_preset(
        &mut self,
        preset: Preset,
        mut tap: TapOptions,
    ) -> Result<Vec<ActionId>, MonkeyError> {
        tap.touch_layout.get_or_insert(preset.touch_layout());
        preset
            .weights()
            .iter()
            .map(|&(kind, weight)| self.add_gesture(kind, weight, tap))
            .collect()
    }

    /// Registers an interval action that, for every alert the actuator
    /// reports, taps one uniformly chosen button.
    ///
    /// An alert reporting zero buttons fails the action with
    /// [`GestureError::AlertWithoutButtons`].
    ///
    /// # Errors
    /// Returns [`MonkeyError::InvalidInterval`] when `interval` is zero.
    pub fn add_alert_action(&mut self, interval: u64) -> Result<ActionId, MonkeyError> {
        self.add_interval_action("alert", interval, |dice, driver: &mut Driver<A>| {
            for (alert, buttons) in driver.alerts()?.into_iter().enumerate() {
                if buttons == 0 {
                    return Err(GestureError::AlertWithoutButtons { alert }.into());
                }
                let button = dice.random_index(buttons)?;
                driver.perform(&Gesture::TapAlertButton { alert, button })?;
            }
            Ok(())
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::dice::DEFAULT_PANEL_MARGIN;
    use crate::prng::Random;
    use simian_geom::Rect;

    fn portrait() -> Rect {
        Rect::new(0.0, 0.0, 320.0, 480.0).unwrap()
    }

    fn draws(kind: GestureKind, seed: u32, n: usize, tap: &TapOptions) -> Vec<Gesture> {
        let mut random = Random::from_seed(seed);
        let mut dice = Dice::new(&mut random, portrait(), DEFAULT_PANEL_MARGIN);
        (0..n).map(|_| kind.draw(&mut dice, tap)).collect()
    }

    #[test]
    fn pinch_scales_stay_in_range() {
        let tap = TapOptions::default();
        for g in draws(GestureKind::PinchClose, 1, 500, &tap) {
            let Gesture::Pinch { scale, rect, .. } = g else {
                unreachable!()
            };
            assert!(scale > 0.2 && scale <= 1.0, "{scale}");
            assert!(portrait().contains_rect(&rect));
            assert!((rect.width() - 160.0).abs() < 1e-9);
        }
        for g in draws(GestureKind::PinchOpen, 2, 500, &tap) {
            let Gesture::Pinch { scale, .. } = g else {
                unreachable!()
            };
            assert!((1.0..5.0).contains(&scale), "{scale}");
        }
    }

    #[test]
    fn certain_multi_tap_uses_two_to_four_touches() {
        let tap = TapOptions {
            multiple_tap_probability: 1.0,
            multiple_touch_probability: 1.0,
            long_press_probability: 1.0,
            touch_layout: None,
        };
        for g in draws(GestureKind::Tap, 3, 300, &tap) {
            let Gesture::Tap {
                touches,
                taps,
                hold,
            } = g
            else {
                unreachable!()
            };
            assert!((2..=3).contains(&taps));
            assert!((2..=4).contains(&touches.len()));
            assert_eq!(hold, LONG_PRESS_HOLD);
        }
    }

    #[test]
    fn impossible_multi_tap_is_single_finger_once() {
        let tap = TapOptions {
            multiple_tap_probability: 0.0,
            multiple_touch_probability: 0.0,
            long_press_probability: 0.0,
            touch_layout: None,
        };
        for g in draws(GestureKind::Tap, 4, 100, &tap) {
            assert!(matches!(
                g,
                Gesture::Tap { ref touches, taps: 1, hold } if touches.len() == 1 && hold.is_zero()
            ));
        }
    }

    #[test]
    fn clustered_taps_use_two_or_three_touches_around_the_first() {
        let tap = TapOptions {
            multiple_touch_probability: 1.0,
            touch_layout: Some(TouchLayout::Clustered),
            ..TapOptions::default()
        };
        for g in draws(GestureKind::Tap, 8, 300, &tap) {
            let Gesture::Tap { touches, .. } = g else {
                unreachable!()
            };
            assert!((2..=3).contains(&touches.len()));
            let cluster = portrait().sub_square_around(touches[0], SizeFraction::THIRD);
            assert!(touches[1..].iter().all(|p| cluster.contains_point(p)));
        }
    }

    #[test]
    fn device_preset_clusters_taps_unless_configured() {
        assert_eq!(Preset::Device.touch_layout(), TouchLayout::Clustered);
        assert_eq!(Preset::Touch.touch_layout(), TouchLayout::Scattered);
    }

    #[test]
    fn lock_hold_is_under_three_seconds() {
        for g in draws(GestureKind::Lock, 5, 200, &TapOptions::default()) {
            let Gesture::Lock { hold } = g else {
                unreachable!()
            };
            assert!(hold < Duration::from_secs(3));
        }
    }

    #[test]
    fn presets_list_expected_weights() {
        let total: f64 = Preset::Touch.weights().iter().map(|(_, w)| w).sum();
        assert!((total - 30.0).abs() < f64::EPSILON);
        assert_eq!(Preset::Device.weights().len(), 10);
        assert!(Preset::None.weights().is_empty());
    }

    #[test]
    fn labels_match_kind_names() {
        let tap = TapOptions::default();
        for kind in [
            GestureKind::Tap,
            GestureKind::LongPress,
            GestureKind::Drag,
            GestureKind::Flick,
            GestureKind::PinchClose,
            GestureKind::PinchOpen,
            GestureKind::Rotate,
            GestureKind::Orientation,
            GestureKind::VolumeUp,
            GestureKind::VolumeDown,
            GestureKind::Shake,
            GestureKind::Lock,
        ] {
            let gesture = &draws(kind, 6, 1, &tap)[0];
            assert_eq!(gesture.label(), kind.name());
        }
    }
}
