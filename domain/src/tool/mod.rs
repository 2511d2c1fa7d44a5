//! Capability (tool) domain module
//!
//! - [`entities`]: capability descriptors and tool calls
//! - [`value_objects`]: immutable result and error types
//! - [`traits`]: pure validation logic

pub mod entities;
pub mod traits;
pub mod value_objects;
