// Gemini plumbing shared by the swing coach:
// - API client and the `TextGenerator` seam the pipeline talks to
// - generateContent request/response structures
// - Configuration loading
// - Shared error types

// Export client module - API client for Gemini
pub mod client;
pub use client::*;

// Export generator module - the text generation seam
pub mod generator;
pub use generator::*;

// Export types module - Request/response data structures
pub mod types;
pub use types::*;

// Export config module - Configuration loading
pub mod config;
pub use config::*;

// Export errors module - Shared error types
pub mod errors;
pub use errors::*;
