use std::path::PathBuf;

/// Notification kinds that mean the agent is blocked on the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    PermissionPrompt,
    IdlePrompt,
    ElicitationDialog,
}

impl NotificationKind {
    /// `None` for any kind that doesn't need the user (auth_success, unknown types, ...).
    pub fn actionable(notification_type: &str) -> Option<Self> {
        match notification_type {
            "permission_prompt" => Some(NotificationKind::PermissionPrompt),
            "idle_prompt" => Some(NotificationKind::IdlePrompt),
            "elicitation_dialog" => Some(NotificationKind::ElicitationDialog),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::PermissionPrompt => "permission_prompt",
            NotificationKind::IdlePrompt => "idle_prompt",
            NotificationKind::ElicitationDialog => "elicitation_dialog",
        }
    }

    pub fn hook_type(&self) -> String {
        format!("notification_{}", self.as_str())
    }
}

/// Payload Claude Code writes to a hook's stdin.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HookEvent {
    /// Empty ids are normalized to `None`.
    pub session_id: Option<String>,
    pub transcript_path: Option<String>,
    pub cwd: Option<String>,
    pub hook_event_name: Option<String>,
    /// Notification events only.
    pub notification_type: Option<String>,
}

impl HookEvent {
    pub fn transcript_path(&self) -> &str {
        self.transcript_path.as_deref().unwrap_or("")
    }

    /// Directory the session runs in, falling back to the process cwd.
    ///
    /// Claude Code starts hooks in the session's working directory, so the
    /// payload `cwd` and the process cwd name the same project.
    pub fn project_dir(&self) -> Option<PathBuf> {
        self.cwd
            .as_deref()
            .filter(|c| !c.is_empty())
            .map(PathBuf::from)
            .or_else(|| std::env::current_dir().ok())
    }
}

/// Parse hook input. Returns `None` when the payload isn't a JSON object.
/// Missing or non-string fields are treated as absent.
pub fn parse_hook_input(json_str: &str) -> Option<HookEvent> {
    let v: serde_json::Value = serde_json::from_str(json_str).ok()?;
    if !v.is_object() {
        return None;
    }

    let field = |key: &str| v.get(key).and_then(|v| v.as_str()).map(String::from);

    Some(HookEvent {
        session_id: field("session_id").filter(|s| !s.is_empty()),
        transcript_path: field("transcript_path"),
        cwd: field("cwd"),
        hook_event_name: field("hook_event_name"),
        notification_type: field("notification_type"),
    })
}
