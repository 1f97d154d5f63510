use crate::commands::dispatch::{DispatchReport, Dispatcher};
use crate::commands::{notification, stop, subagent_stop};
use crate::core::event::{self, HookEvent};
use crate::core::transcript::{self, LogEntry};
use crate::core::config::{self, NotifyConfig};
use crate::core::logging;
use crate::integrations::terminal_notifier::TerminalNotifier;
use crate::integrations::webhook::SlackApp;
use std::io::Read;
use std::panic::UnwindSafe;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookKind {
    Notification,
    Stop,
    SubagentStop,
}

impl HookKind {
    /// Log file stem under `~/.claude/logs`.
    pub fn log_category(&self) -> &'static str {
        match self {
            HookKind::Notification => "notification_hook",
            HookKind::Stop => "stop_hook",
            HookKind::SubagentStop => "subagent_stop_hook",
        }
    }

    fn banner(&self) -> &'static str {
        match self {
            HookKind::Notification => "🔔 NOTIFICATION HOOK TRIGGERED",
            HookKind::Stop => "🛑 STOP HOOK TRIGGERED",
            HookKind::SubagentStop => "🔄 SUBAGENT STOP HOOK TRIGGERED",
        }
    }

    fn handle(&self, event: &HookEvent, dispatcher: &Dispatcher) -> RouteOutcome {
        match self {
            HookKind::Notification => notification::handle(event, dispatcher),
            HookKind::Stop => stop::handle(event, dispatcher),
            HookKind::SubagentStop => subagent_stop::handle(event, dispatcher),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    InvalidInput,
    NotActionable(String),
    NoSessionId,
    /// No assistant message, or its text was blank. Both mean nothing to send.
    NoMessage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    Skipped(SkipReason),
    Dispatched(DispatchReport),
}

/// Everything a router needs from one hook event and its transcript.
#[derive(Debug, PartialEq)]
pub struct LatestTurn<'a> {
    pub session_id: &'a str,
    pub message: String,
    pub entries: Vec<LogEntry>,
}

/// Session id and latest assistant text, or the reason there is nothing to send.
/// The transcript is read once; its entries are handed back for further inspection.
pub fn latest_turn(event: &HookEvent) -> Result<LatestTurn<'_>, SkipReason> {
    let Some(session_id) = event.session_id.as_deref() else {
        log::info!("❌ No session ID, exiting");
        return Err(SkipReason::NoSessionId);
    };

    let entries = transcript::read_transcript(event.transcript_path());
    match transcript::latest_assistant_text(&entries) {
        Some(message) => {
            log::info!("💬 Extracted message: {}...", crate::core::util::preview(&message, 100));
            Ok(LatestTurn {
                session_id,
                message,
                entries,
            })
        }
        None => {
            log::info!("⚠️ No message to send");
            Err(SkipReason::NoMessage)
        }
    }
}

fn read_hook_input(hook_input_source: &str) -> Option<String> {
    if hook_input_source != "stdin" {
        return Some(hook_input_source.to_string());
    }
    let mut buf = String::new();
    match std::io::stdin().read_to_string(&mut buf) {
        Ok(_) => Some(buf),
        Err(e) => {
            log::warn!("Failed to read hook input from stdin: {}", e);
            None
        }
    }
}

/// Entry point for the hook subcommands. Never fails; the caller exits 0 either way.
pub fn run(kind: HookKind, hook_input_source: &str, verbose: bool) -> RouteOutcome {
    let cfg = config::load_config();
    if let Err(e) = logging::init(
        cfg.log.log_dir(),
        kind.log_category(),
        cfg.log.stderr,
        verbose,
    ) {
        eprintln!("[claude-notify] Logging disabled: {}", e);
    }

    log::info!("{}", kind.banner());

    let outcome = route(kind, read_hook_input(hook_input_source).as_deref(), &cfg);
    log::debug!("Outcome: {:?}", outcome);
    outcome
}

/// Parse the raw hook payload and hand it to the router for `kind`.
pub fn route(kind: HookKind, raw_input: Option<&str>, cfg: &NotifyConfig) -> RouteOutcome {
    let Some(event) = raw_input.and_then(event::parse_hook_input) else {
        log::info!("Ignoring unparseable hook input");
        return RouteOutcome::Skipped(SkipReason::InvalidInput);
    };
    log::info!(
        "📥 {} event for session {}",
        event.hook_event_name.as_deref().unwrap_or("unknown"),
        event.session_id.as_deref().unwrap_or("-")
    );
    log::debug!("📥 Input: {:?}", event);

    let webhook = SlackApp::new(&cfg.webhook);
    let notifier = TerminalNotifier::new(&cfg.desktop);
    let project_dir = event.project_dir();
    let dispatcher = Dispatcher::new(
        &webhook,
        &notifier,
        project_dir.as_deref(),
        cfg.desktop.max_message_length,
    );

    kind.handle(&event, &dispatcher)
}

/// Run a hook body, turning a panic into a logged error. `None` means it panicked.
pub fn guarded<F>(kind: HookKind, body: F) -> Option<RouteOutcome>
where
    F: FnOnce() -> RouteOutcome + UnwindSafe,
{
    match std::panic::catch_unwind(body) {
        Ok(outcome) => Some(outcome),
        Err(panic) => {
            let reason = panic
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| panic.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            log::error!("❌ Unexpected error in {} hook: {}", kind.log_category(), reason);
            None
        }
    }
}
