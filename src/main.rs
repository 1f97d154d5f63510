mod commands;
mod core;
mod integrations;

use clap::{Parser, Subcommand};
use commands::hook::{self, HookKind};

/// claude-notify: relay Claude Code hook events to a local Slack app and
/// macOS notifications.
#[derive(Parser)]
#[command(name = "claude-notify", version = env!("CARGO_PKG_VERSION"), about = "Claude Code hook notifications")]
struct Cli {
    /// Log at debug level
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Notification hook: alert when Claude is blocked on the user (internal)
    Notification {
        /// Read hook input from stdin, or pass the JSON payload directly
        #[arg(long, default_value = "stdin")]
        hook_input: String,
    },

    /// Stop hook: "Task Complete" or "Needs Input" (internal)
    Stop {
        #[arg(long, default_value = "stdin")]
        hook_input: String,
    },

    /// SubagentStop hook: forward the subagent's last message to Slack (internal)
    SubagentStop {
        #[arg(long, default_value = "stdin")]
        hook_input: String,
    },

    /// Register the hooks in ~/.claude/settings.json
    Install,

    /// Remove the hooks from ~/.claude/settings.json
    Uninstall,
}

/// Run a hook and exit 0 no matter what: Claude Code treats a non-zero exit
/// as a failure of the session itself.
fn run_hook(kind: HookKind, hook_input: &str, verbose: bool) -> ! {
    hook::guarded(kind, || hook::run(kind, hook_input, verbose));
    std::process::exit(0);
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Notification { hook_input } => {
            run_hook(HookKind::Notification, &hook_input, cli.verbose);
        }

        Commands::Stop { hook_input } => {
            run_hook(HookKind::Stop, &hook_input, cli.verbose);
        }

        Commands::SubagentStop { hook_input } => {
            run_hook(HookKind::SubagentStop, &hook_input, cli.verbose);
        }

        Commands::Install => {
            if let Err(e) = integrations::claude_hooks::install() {
                eprintln!("Error installing Claude Code hooks: {}", e);
                std::process::exit(1);
            }
        }

        Commands::Uninstall => {
            if let Err(e) = integrations::claude_hooks::uninstall() {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    }
}
