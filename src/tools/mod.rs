//! The tools module provides helper functions for huffcode.
//!
//! The tools are:
//! - cli: Command line interface and the run time options it produces.
//! - freq_count: Byte frequency counting.
//!
pub mod cli;
pub mod freq_count;
