use crate::commands::dispatch::{DesktopAlert, Dispatch, Dispatcher};
use crate::commands::hook::{self, RouteOutcome, SkipReason};
use crate::core::event::{HookEvent, NotificationKind};

const NEEDS_ATTENTION: DesktopAlert = DesktopAlert {
    subtitle: "Needs Attention",
    sound: "Glass",
};

/// Notification hook: relay only the kinds where Claude is blocked on the user.
pub fn handle(event: &HookEvent, dispatcher: &Dispatcher) -> RouteOutcome {
    let notification_type = event.notification_type.as_deref().unwrap_or("");
    log::info!("🔖 notification_type: {}", notification_type);

    let Some(kind) = NotificationKind::actionable(notification_type) else {
        log::info!("⏭️ Skipping non-actionable notification type: {:?}", notification_type);
        return RouteOutcome::Skipped(SkipReason::NotActionable(notification_type.to_string()));
    };

    let turn = match hook::latest_turn(event) {
        Ok(turn) => turn,
        Err(reason) => return RouteOutcome::Skipped(reason),
    };

    log::info!("📤 Sending notifications for actionable type: {:?}", kind.as_str());

    let hook_type = kind.hook_type();
    RouteOutcome::Dispatched(dispatcher.dispatch(&Dispatch {
        session_id: turn.session_id,
        message: &turn.message,
        hook_type: &hook_type,
        desktop: Some(NEEDS_ATTENTION),
    }))
}
