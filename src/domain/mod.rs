// Port interfaces
pub mod ports;

// Domain-specific error types
pub mod errors;

// Core analysis domain
pub mod types;
