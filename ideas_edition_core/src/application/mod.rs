//! Application layer: ports and use cases for the drafting pipeline.

pub mod ports;
pub mod use_cases;

pub use ports::GenerationAdapterPort;
