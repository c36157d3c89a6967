// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared application services for Simian tools (config storage, run profiles).
//! Keeps the CLI and any future front-ends thin.

pub mod config;
pub mod profile;
