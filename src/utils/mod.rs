//! Utility modules for common functionality.
//!
//! This module contains the logging setup and the drop guard that restores
//! the terminal on every exit path.

pub mod guard;
pub mod logger;
