use crate::commands::dispatch::{DesktopAlert, Dispatch, Dispatcher};
use crate::commands::hook::{self, RouteOutcome};
use crate::core::event::HookEvent;
use crate::core::transcript::{self, ASK_USER_QUESTION};

const NEEDS_INPUT: DesktopAlert = DesktopAlert {
    subtitle: "Needs Input",
    sound: "Glass",
};

const TASK_COMPLETE: DesktopAlert = DesktopAlert {
    subtitle: "Task Complete",
    sound: "Hero",
};

/// Stop hook: always both channels, worded by whether Claude ended on a question.
pub fn handle(event: &HookEvent, dispatcher: &Dispatcher) -> RouteOutcome {
    let turn = match hook::latest_turn(event) {
        Ok(turn) => turn,
        Err(reason) => return RouteOutcome::Skipped(reason),
    };

    let needs_input = transcript::invoked_tool(&turn.entries, ASK_USER_QUESTION);
    let (alert, hook_type) = if needs_input {
        log::info!("✅ Found {} in latest assistant message", ASK_USER_QUESTION);
        (NEEDS_INPUT, "stop_needs_input")
    } else {
        (TASK_COMPLETE, "stop_complete")
    };

    log::info!(
        "📤 Notifying both channels, subtitle: {:?}, hook_type: {:?}",
        alert.subtitle,
        hook_type
    );

    RouteOutcome::Dispatched(dispatcher.dispatch(&Dispatch {
        session_id: turn.session_id,
        message: &turn.message,
        hook_type,
        desktop: Some(alert),
    }))
}
