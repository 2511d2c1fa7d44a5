//! Tool Executor port
//!
//! Defines the interface the workflow uses to execute capability calls.

use async_trait::async_trait;
use maestro_domain::{ToolCall, ToolResult, ToolSpec};

/// Port for capability execution.
///
/// The contract mirrors the error-handling design of the loop: `execute`
/// is infallible at the type level. Every failure (unknown name, invalid
/// arguments, external-process fault, missing artifact) comes back as a
/// [`ToolResult`] carrying an error, which the loop feeds to the model as
/// data. Implementations must not panic.
#[async_trait]
pub trait ToolExecutorPort: Send + Sync {
    /// The specification of all advertised capabilities
    fn tool_spec(&self) -> &ToolSpec;

    /// Check if a capability is available
    fn has_tool(&self, name: &str) -> bool {
        self.tool_spec().get(name).is_some()
    }

    /// Execute one capability call
    async fn execute(&self, call: &ToolCall) -> ToolResult;
}
