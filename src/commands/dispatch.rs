use crate::core::logging::DESKTOP_TARGET;
use crate::core::util;
use crate::integrations::{DesktopNotification, DesktopNotifier, HookPayload, Webhook};
use std::path::Path;

/// Subtitle and sound for the desktop channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DesktopAlert {
    pub subtitle: &'static str,
    pub sound: &'static str,
}

/// What a router asks the dispatcher to send.
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatch<'a> {
    pub session_id: &'a str,
    pub message: &'a str,
    pub hook_type: &'a str,
    /// `None` keeps the desktop channel out of it entirely.
    pub desktop: Option<DesktopAlert>,
}

/// Per-channel result. `None` means the channel was not requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchReport {
    pub webhook: Option<bool>,
    pub desktop: Option<bool>,
}

pub struct Dispatcher<'a> {
    webhook: &'a dyn Webhook,
    desktop: &'a dyn DesktopNotifier,
    max_message_length: usize,
    title: String,
    group: String,
}

impl<'a> Dispatcher<'a> {
    pub fn new(
        webhook: &'a dyn Webhook,
        desktop: &'a dyn DesktopNotifier,
        project_dir: Option<&Path>,
        max_message_length: usize,
    ) -> Self {
        let project = project_dir.and_then(util::project_name);
        Dispatcher {
            webhook,
            desktop,
            max_message_length,
            title: util::project_title(project.as_deref()),
            group: project.unwrap_or_else(|| "claude".to_string()),
        }
    }

    /// Attempt each requested channel once. A failing channel never stops the other.
    pub fn dispatch(&self, request: &Dispatch) -> DispatchReport {
        let webhook = self.send_webhook(request);
        log::info!("{} Slack", if webhook { "✅" } else { "❌" });

        let desktop = request.desktop.map(|alert| {
            let ok = self.send_desktop(request.message, alert);
            log::info!("{} macOS", if ok { "✅" } else { "❌" });
            ok
        });

        DispatchReport {
            webhook: Some(webhook),
            desktop,
        }
    }

    fn send_webhook(&self, request: &Dispatch) -> bool {
        let payload = HookPayload {
            session_id: request.session_id.to_string(),
            message: request.message.to_string(),
            hook_type: request.hook_type.to_string(),
        };
        match self.webhook.post(&payload) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("🔌 {}", e);
                false
            }
        }
    }

    fn send_desktop(&self, message: &str, alert: DesktopAlert) -> bool {
        let notification = DesktopNotification {
            message: util::truncate_message(message, self.max_message_length),
            title: self.title.clone(),
            subtitle: alert.subtitle.to_string(),
            group: self.group.clone(),
            sound: alert.sound.to_string(),
        };

        log::info!(target: DESKTOP_TARGET, "🍎 Sending macOS notification");
        log::info!(
            target: DESKTOP_TARGET,
            "   Title: '{}', Subtitle: '{}', Group: '{}', Sound: '{}'",
            notification.title,
            notification.subtitle,
            notification.group,
            notification.sound
        );
        log::debug!(
            target: DESKTOP_TARGET,
            "   Message: {}...",
            util::preview(&notification.message, 50)
        );

        match self.desktop.notify(&notification) {
            Ok(()) => {
                log::info!(target: DESKTOP_TARGET, "✅ macOS notification sent");
                true
            }
            Err(e) => {
                log::warn!(target: DESKTOP_TARGET, "⚠️ macOS notification failed: {}", e);
                false
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{RecordingNotifier, RecordingWebhook};
    use super::*;
    use std::path::PathBuf;

    const NEEDS_INPUT: DesktopAlert = DesktopAlert {
        subtitle: "Needs Input",
        sound: "Glass",
    };

    fn request<'a>(message: &'a str, desktop: Option<DesktopAlert>) -> Dispatch<'a> {
        Dispatch {
            session_id: "test-session-123",
            message,
            hook_type: "stop_needs_input",
            desktop,
        }
    }

    #[test]
    fn test_dispatch_both_channels() {
        let webhook = RecordingWebhook::default();
        let notifier = RecordingNotifier::default();
        let dir = PathBuf::from("/tmp/test-project");
        let dispatcher = Dispatcher::new(&webhook, &notifier, Some(dir.as_path()), 200);

        let report = dispatcher.dispatch(&request("Which database?", Some(NEEDS_INPUT)));

        assert_eq!(report, DispatchReport { webhook: Some(true), desktop: Some(true) });
        assert_eq!(
            webhook.calls.borrow().as_slice(),
            &[HookPayload {
                session_id: "test-session-123".to_string(),
                message: "Which database?".to_string(),
                hook_type: "stop_needs_input".to_string(),
            }]
        );
        let sent = notifier.calls.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].title, "Claude - test-project");
        assert_eq!(sent[0].group, "test-project");
        assert_eq!(sent[0].subtitle, "Needs Input");
        assert_eq!(sent[0].sound, "Glass");
    }

    #[test]
    fn test_only_desktop_message_is_truncated() {
        let webhook = RecordingWebhook::default();
        let notifier = RecordingNotifier::default();
        let dispatcher = Dispatcher::new(&webhook, &notifier, None, 200);
        let long = "word ".repeat(100);

        dispatcher.dispatch(&request(&long, Some(NEEDS_INPUT)));

        assert_eq!(webhook.calls.borrow()[0].message, long);
        let desktop_message = &notifier.calls.borrow()[0].message;
        assert_eq!(desktop_message.chars().count(), 200);
        assert!(desktop_message.ends_with("..."));
    }

    #[test]
    fn test_webhook_failure_does_not_block_desktop() {
        let webhook = RecordingWebhook { fail: true, ..Default::default() };
        let notifier = RecordingNotifier::default();
        let dispatcher = Dispatcher::new(&webhook, &notifier, None, 200);

        let report = dispatcher.dispatch(&request("done", Some(NEEDS_INPUT)));

        assert_eq!(report, DispatchReport { webhook: Some(false), desktop: Some(true) });
        assert_eq!(notifier.calls.borrow().len(), 1);
    }

    #[test]
    fn test_desktop_failure_is_reported_not_raised() {
        let webhook = RecordingWebhook::default();
        let notifier = RecordingNotifier { fail: true, ..Default::default() };
        let dispatcher = Dispatcher::new(&webhook, &notifier, None, 200);

        let report = dispatcher.dispatch(&request("done", Some(NEEDS_INPUT)));

        assert_eq!(report, DispatchReport { webhook: Some(true), desktop: Some(false) });
    }

    #[test]
    fn test_webhook_only() {
        let webhook = RecordingWebhook::default();
        let notifier = RecordingNotifier::default();
        let dispatcher = Dispatcher::new(&webhook, &notifier, None, 200);

        let report = dispatcher.dispatch(&request("done", None));

        assert_eq!(report, DispatchReport { webhook: Some(true), desktop: None });
        assert!(notifier.calls.borrow().is_empty());
    }

    #[test]
    fn test_title_without_project_dir() {
        let webhook = RecordingWebhook::default();
        let notifier = RecordingNotifier::default();
        let root = PathBuf::from("/");
        let dispatcher = Dispatcher::new(&webhook, &notifier, Some(root.as_path()), 200);

        dispatcher.dispatch(&request("done", Some(NEEDS_INPUT)));

        let sent = notifier.calls.borrow();
        assert_eq!(sent[0].title, "Claude");
        assert_eq!(sent[0].group, "claude");
    }
}
