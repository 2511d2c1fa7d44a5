//! Capability Registry
//!
//! The [`CapabilityRegistry`] pairs every advertised descriptor with its
//! adapter and implements [`ToolExecutorPort`]. The model addresses
//! capabilities by string name; the registry resolves the name to a
//! [`Capability`] once and dispatches through an exhaustive `match`, so
//! adding a capability is a compile-checked change.
//!
//! A name the model invents resolves to nothing and comes back as a
//! `{error: "Tool not found: …"}` result, never a crash. The
//! descriptor/handler pairing itself is verified at construction time, so a
//! wiring mistake surfaces at startup rather than mid-run.

use super::{MusicGenerator, StemSeparator, Transcriber, default_tool_spec};
use async_trait::async_trait;
use maestro_application::ToolExecutorPort;
use maestro_domain::{
    Capability, DefaultToolValidator, DomainError, ToolCall, ToolError, ToolResult, ToolSpec,
    ToolValidator,
};
use tracing::warn;

pub struct CapabilityRegistry {
    spec: ToolSpec,
    validator: DefaultToolValidator,
    separator: StemSeparator,
    transcriber: Transcriber,
    generator: MusicGenerator,
}

impl CapabilityRegistry {
    /// Build the registry over the three capability adapters.
    ///
    /// Fails fast if the advertised descriptor set and the handler set do
    /// not pair up exactly. That is a configuration error, not something to
    /// discover when the model calls a half-wired capability.
    pub fn new(
        separator: StemSeparator,
        transcriber: Transcriber,
        generator: MusicGenerator,
    ) -> Result<Self, DomainError> {
        let spec = default_tool_spec();
        Self::verify(&spec)?;
        Ok(Self {
            spec,
            validator: DefaultToolValidator,
            separator,
            transcriber,
            generator,
        })
    }

    /// Check that every capability has a descriptor and every descriptor
    /// names a capability.
    fn verify(spec: &ToolSpec) -> Result<(), DomainError> {
        for capability in Capability::ALL {
            if spec.get(capability.as_str()).is_none() {
                return Err(DomainError::RegistryMismatch(format!(
                    "no descriptor registered for capability '{capability}'"
                )));
            }
        }
        for name in spec.names() {
            if Capability::from_name(name).is_none() {
                return Err(DomainError::RegistryMismatch(format!(
                    "descriptor '{name}' has no matching capability handler"
                )));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl ToolExecutorPort for CapabilityRegistry {
    fn tool_spec(&self) -> &ToolSpec {
        &self.spec
    }

    async fn execute(&self, call: &ToolCall) -> ToolResult {
        let Some(capability) = Capability::from_name(&call.tool_name) else {
            warn!(tool = %call.tool_name, "Model requested an unregistered capability");
            return ToolResult::failure(&call.tool_name, ToolError::not_found(&call.tool_name));
        };

        if let Some(definition) = self.spec.get(&call.tool_name)
            && let Err(message) = self.validator.validate(call, definition)
        {
            return ToolResult::failure(&call.tool_name, ToolError::invalid_argument(message));
        }

        match capability {
            Capability::SeparateStems => self.separator.execute(call).await,
            Capability::AudioToMidi => self.transcriber.execute(call).await,
            Capability::GenerateMusic => self.generator.execute(call).await,
        }
    }
}
