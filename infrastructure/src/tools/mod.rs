//! Capability adapters for the audio-processing tools
//!
//! Each adapter wraps one external capability behind the same contract:
//! validate input, invoke, verify the claimed artifacts on disk, and return
//! a [`ToolResult`](maestro_domain::ToolResult) either way. The
//! [`CapabilityRegistry`] pairs the adapters with their descriptors and
//! implements the executor port.

pub mod generator;
pub mod registry;
pub mod schema;
pub mod separator;
pub mod subprocess;
pub mod transcriber;

pub use generator::MusicGenerator;
pub use registry::CapabilityRegistry;
pub use schema::JsonSchemaToolConverter;
pub use separator::StemSeparator;
pub use transcriber::Transcriber;

use maestro_domain::ToolSpec;

/// The capability specification advertised to the model, in the order the
/// capabilities are presented.
pub fn default_tool_spec() -> ToolSpec {
    ToolSpec::new()
        .register(separator::separate_definition())
        .register(transcriber::transcribe_definition())
        .register(generator::generate_definition())
}
