//! API data models
//!
//! This module contains data structures for the Anthropic Messages API and
//! for the relay's own HTTP surface.

pub mod anthropic;
pub mod diagram;
