// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared test doubles and fixtures for Simian crates.
#![forbid(unsafe_code)]
//!
//! # Modules
//!
//! - [`actuator`] - Recording and failure-injecting [`Actuator`](simian_core::Actuator) fakes
//! - [`config`] - In-memory config store fake for testing without filesystem
//! - [`frames`] - Common screen frames

pub mod actuator;
pub mod config;
pub mod frames;

pub use actuator::{FailingActuator, InjectedFault, Performed, RecordingActuator};
pub use config::InMemoryConfigStore;
pub use frames::{landscape, portrait};
