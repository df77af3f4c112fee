//! HTTP handlers for the train endpoints.

pub mod trains;
pub use trains::*;
