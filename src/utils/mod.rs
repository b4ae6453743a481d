//! Utility Module
//!
//! This module provides various utility functions and types:
//!
//! - [`OrbitControls`]: Camera orbit controller for interactive viewing
//! - [`time`]: Wall clocks and time sources

pub mod orbit_control;
pub mod time;

pub use orbit_control::OrbitControls;
pub use time::{Clock, ManualTimeSource, SystemTimeSource, TimeSource};
