//! Adapters: concrete implementations of the generation port.
//!
//! Revision History
//! - 2025-12-10T09:20:00Z: Initial adapters module for the drafting pipeline.

pub mod rig_generation_adapter;

pub use rig_generation_adapter::RigGenerationAdapter;
