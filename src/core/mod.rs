//! Core application modules
//!
//! Configuration, constants, logging, the provider client and the prompt
//! relay itself.

pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod provider;
pub mod providers;
pub mod relay;
