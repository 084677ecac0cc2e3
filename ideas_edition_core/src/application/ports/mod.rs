//! Application-layer ports (outbound interfaces) for the drafting pipeline.

pub mod generation_adapter_port;

pub use generation_adapter_port::GenerationAdapterPort;
