//! Platform-agnostic core logic for IoT firmware
//!
//! This crate contains business logic that can be shared across all
//! supported boards and tiers. It has NO hardware dependencies: boards
//! plug in through the traits in `hal-abstractions`.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]
#![deny(warnings)]

// Must come first so the logging macros are visible to every module
#[macro_use]
mod fmt;

pub mod time;
