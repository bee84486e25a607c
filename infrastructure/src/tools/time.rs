//! Current time tool

use async_trait::async_trait;
use chrono::Local;
use serde_json::json;
use taskforce_domain::{NativeTool, ToolDescriptor, ToolResult};

/// Reports the current local date and time
pub struct CurrentTimeTool;

#[async_trait]
impl NativeTool for CurrentTimeTool {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor::new(
            "current_time",
            "Get the current local date and time. Optional strftime 'format' argument.",
        )
        .with_input_schema(json!({
            "type": "object",
            "properties": {
                "format": {
                    "type": "string",
                    "description": "strftime format string, defaults to RFC 3339"
                }
            }
        }))
    }

    async fn invoke(&self, arguments: &serde_json::Value) -> ToolResult {
        let now = Local::now();
        let output = match arguments.get("format").and_then(|v| v.as_str()) {
            Some(format) => now.format(format).to_string(),
            None => now.to_rfc3339(),
        };
        ToolResult::success("current_time", output)
    }
}
