//! Tool dispatcher
//!
//! Merges in-process native tools with tools advertised by external
//! providers into one catalog and one invocation path. Native tools are
//! checked first, then providers in registration order; the first match
//! wins. Invocation never panics: unknown names and provider errors
//! both come back as structured failure results.

use std::sync::Arc;
use taskforce_domain::{NativeTool, ToolCall, ToolDescriptor, ToolError, ToolProvider, ToolResult};
use tracing::{debug, warn};

/// Merged tool catalog and invocation path
#[derive(Default)]
pub struct ToolDispatcher {
    native: Vec<Arc<dyn NativeTool>>,
    providers: Vec<Arc<dyn ToolProvider>>,
}

impl ToolDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an in-process tool. Natives take precedence over any
    /// provider tool with the same name.
    pub fn register_native(mut self, tool: Arc<dyn NativeTool>) -> Self {
        self.native.push(tool);
        self
    }

    /// Register an external provider. Providers are consulted in
    /// registration order.
    pub fn register_provider(mut self, provider: Arc<dyn ToolProvider>) -> Self {
        self.providers.push(provider);
        self
    }

    /// The merged catalog: native tools first, then provider tools in
    /// registration order, first name wins.
    pub async fn catalog(&self) -> Vec<ToolDescriptor> {
        let mut seen = std::collections::HashSet::new();
        let mut catalog = Vec::new();

        for tool in &self.native {
            let descriptor = tool.descriptor();
            if seen.insert(descriptor.name.clone()) {
                catalog.push(descriptor);
            }
        }

        for provider in &self.providers {
            match provider.discover_tools().await {
                Ok(tools) => {
                    for descriptor in tools {
                        if seen.insert(descriptor.name.clone()) {
                            catalog.push(descriptor);
                        }
                    }
                }
                Err(e) => {
                    warn!("Provider '{}' discovery failed: {}", provider.id(), e);
                }
            }
        }

        catalog
    }

    /// The catalog restricted to an agent's allowlist, preserving
    /// catalog order.
    pub async fn catalog_for(&self, allowlist: &[String]) -> Vec<ToolDescriptor> {
        self.catalog()
            .await
            .into_iter()
            .filter(|t| allowlist.iter().any(|name| name == &t.name))
            .collect()
    }

    /// Invoke a tool by name. Resolution follows catalog order; an
    /// unknown name yields a NOT_FOUND failure result.
    pub async fn invoke(&self, name: &str, arguments: serde_json::Value) -> ToolResult {
        if let Some(tool) = self.native.iter().find(|t| t.descriptor().name == name) {
            debug!("Invoking native tool '{}'", name);
            return tool.invoke(&arguments).await;
        }

        for provider in &self.providers {
            if provider.has_tool(name).await {
                debug!("Invoking tool '{}' on provider '{}'", name, provider.id());
                let call = ToolCall::new(name, arguments);
                return match provider.execute(&call).await {
                    Ok(result) => result,
                    Err(e) => {
                        warn!("Provider '{}' failed for '{}': {}", provider.id(), name, e);
                        ToolResult::failure(name, ToolError::execution_failed(e.to_string()))
                    }
                };
            }
        }

        ToolResult::failure(
            name,
            ToolError::not_found(format!("Tool '{}' not found on any provider.", name)),
        )
    }
}
