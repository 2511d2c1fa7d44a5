//! Use cases

pub mod run_workflow;
