pub mod claude_hooks;
pub mod terminal_notifier;
pub mod webhook;

use serde::Serialize;

/// JSON body the Slack app expects on `/claude/hook`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HookPayload {
    pub session_id: String,
    pub message: String,
    pub hook_type: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DesktopNotification {
    pub message: String,
    pub title: String,
    pub subtitle: String,
    /// Notifications sharing a group replace each other instead of piling up.
    pub group: String,
    /// Empty for a silent notification.
    pub sound: String,
}

pub trait Webhook {
    fn post(&self, payload: &HookPayload) -> Result<(), String>;
}

pub trait DesktopNotifier {
    fn notify(&self, notification: &DesktopNotification) -> Result<(), String>;
}
