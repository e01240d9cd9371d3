//! State module for tracking fetch progress
//!
//! # Components
//!
//! - `TargetState`: Tracks a single target from acceptance to completion

mod target_state;

pub use target_state::TargetState;
