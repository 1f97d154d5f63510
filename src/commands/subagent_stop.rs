use crate::commands::dispatch::{Dispatch, Dispatcher};
use crate::commands::hook::{self, RouteOutcome};
use crate::core::event::HookEvent;

/// Subagent stop hook: Slack only. Subtask completions don't need a desktop alert.
pub fn handle(event: &HookEvent, dispatcher: &Dispatcher) -> RouteOutcome {
    let turn = match hook::latest_turn(event) {
        Ok(turn) => turn,
        Err(reason) => return RouteOutcome::Skipped(reason),
    };

    log::info!("📤 Sending to Slack app...");
    RouteOutcome::Dispatched(dispatcher.dispatch(&Dispatch {
        session_id: turn.session_id,
        message: &turn.message,
        hook_type: "subagent_stop",
        desktop: None,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::dispatch::testing::*;
    use crate::commands::dispatch::DispatchReport;
    use crate::commands::hook::SkipReason;

    #[test]
    fn test_subagent_stop_sends_slack_only() {
        for transcript in [TRANSCRIPT_WITHOUT_ASK, TRANSCRIPT_WITH_ASK] {
            let dir = tempfile::tempdir().unwrap();
            let path = write_transcript(dir.path(), transcript);
            let event = hook_event(&path, None);
            let webhook = RecordingWebhook::default();
            let notifier = RecordingNotifier::default();
            let dispatcher = Dispatcher::new(&webhook, &notifier, None, 200);

            assert_eq!(
                handle(&event, &dispatcher),
                RouteOutcome::Dispatched(DispatchReport { webhook: Some(true), desktop: None })
            );
            let posted = webhook.calls.borrow();
            assert_eq!(posted.len(), 1);
            assert_eq!(posted[0].hook_type, "subagent_stop");
            assert_eq!(posted[0].session_id, "test-session-123");
            assert!(notifier.calls.borrow().is_empty(), "SubagentStop must not send macOS notifications");
        }
    }

    #[test]
    fn test_subagent_stop_without_message_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_transcript(dir.path(), "{\"type\":\"summary\"}\n");
        let event = hook_event(&path, None);
        let webhook = RecordingWebhook::default();
        let notifier = RecordingNotifier::default();
        let dispatcher = Dispatcher::new(&webhook, &notifier, None, 200);

        assert_eq!(handle(&event, &dispatcher), RouteOutcome::Skipped(SkipReason::NoMessage));
        assert!(webhook.calls.borrow().is_empty());
        assert!(notifier.calls.borrow().is_empty());
    }
}
