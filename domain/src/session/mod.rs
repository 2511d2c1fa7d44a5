//! Model-facing session types

pub mod response;
