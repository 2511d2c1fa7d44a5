//! Tool schema conversion port.
//!
//! Separates "which capabilities exist" (domain descriptors) from "how they
//! are serialized for the model API" (infrastructure). The string protocol
//! facing the model lives entirely behind this port.

use maestro_domain::{ToolDefinition, ToolSpec};

/// Port for converting capability descriptors to the model API format.
pub trait ToolSchemaPort: Send + Sync {
    /// Convert a single descriptor to the provider's tool-schema JSON.
    fn tool_to_schema(&self, tool: &ToolDefinition) -> serde_json::Value;

    /// Convert every advertised descriptor, in advertisement order.
    fn all_tools_schema(&self, spec: &ToolSpec) -> Vec<serde_json::Value> {
        spec.all().map(|t| self.tool_to_schema(t)).collect()
    }
}
