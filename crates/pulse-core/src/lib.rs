//! # pulse-core
//!
//! Shared types for Pulse, a personal task tracker.
//!
//! This crate provides the vocabulary used across all Pulse crates:
//! - The `Task` entity and its display helpers
//! - The session state published by the auth layer
//! - Task-time parsing and formatting helpers

pub mod entities;
pub mod time;
