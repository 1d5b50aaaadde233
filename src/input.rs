use serde::Deserialize;

/// Input JSON from the Claude Code hook system (PostToolUse event)
#[derive(Debug, Deserialize)]
pub struct HookInput {
    /// Session identifier, passed through to the error log
    #[serde(default)]
    pub session_id: Option<String>,
    /// Tool parameters (only the file path is relevant here)
    #[serde(default)]
    pub tool_input: Option<ToolInput>,
}

#[derive(Debug, Deserialize)]
pub struct ToolInput {
    #[serde(default)]
    pub file_path: Option<String>,
}

impl HookInput {
    /// The edited file's path, if the event carries one
    pub fn file_path(&self) -> Option<&str> {
        self.tool_input.as_ref()?.file_path.as_deref()
    }
}
