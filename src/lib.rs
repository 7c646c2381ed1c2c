// ABOUTME: Library root for skafos - exposes public types for testing.
// ABOUTME: The main binary is in main.rs.

pub mod arm;
pub mod chain;
pub mod cloud;
pub mod config;
pub mod engine;
pub mod error;
pub mod output;
pub mod steps;
pub mod transport;
pub mod types;
