use super::{DesktopNotification, DesktopNotifier};
use crate::core::config::DesktopConfig;
use std::io::{ErrorKind, Read};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

/// macOS notifications via the `terminal-notifier` CLI.
pub struct TerminalNotifier {
    program: String,
    activate: String,
    timeout: Duration,
}

impl TerminalNotifier {
    pub fn new(cfg: &DesktopConfig) -> Self {
        TerminalNotifier {
            program: cfg.notifier.clone(),
            activate: cfg.activate.clone(),
            timeout: cfg.timeout(),
        }
    }
}

/// Command-line arguments for one notification. Empty subtitle/sound are omitted.
pub fn build_args(notification: &DesktopNotification, activate: &str) -> Vec<String> {
    let mut args = vec![
        "-message".to_string(),
        notification.message.clone(),
        "-title".to_string(),
        notification.title.clone(),
        "-group".to_string(),
        notification.group.clone(),
        "-activate".to_string(),
        activate.to_string(),
    ];
    if !notification.subtitle.is_empty() {
        args.push("-subtitle".to_string());
        args.push(notification.subtitle.clone());
    }
    if !notification.sound.is_empty() {
        args.push("-sound".to_string());
        args.push(notification.sound.clone());
    }
    args
}

/// Wait for `child`, killing it once `timeout` has passed.
fn wait_with_timeout(child: &mut Child, timeout: Duration) -> Result<ExitStatus, String> {
    let deadline = Instant::now() + timeout;
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(status),
            Ok(None) if Instant::now() >= deadline => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(format!("timed out after {:?}", timeout));
            }
            Ok(None) => std::thread::sleep(Duration::from_millis(20)),
            Err(e) => return Err(format!("failed to wait for notifier: {}", e)),
        }
    }
}

impl DesktopNotifier for TerminalNotifier {
    fn notify(&self, notification: &DesktopNotification) -> Result<(), String> {
        let mut child = Command::new(&self.program)
            .args(build_args(notification, &self.activate))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => format!(
                    "{} not found (install it with: brew install terminal-notifier)",
                    self.program
                ),
                _ => format!("Cannot run {}: {}", self.program, e),
            })?;

        // Drained while waiting so a noisy notifier can't fill the pipe and stall.
        let stderr_reader = child.stderr.take().map(|mut pipe| {
            std::thread::spawn(move || {
                let mut buf = String::new();
                let _ = pipe.read_to_string(&mut buf);
                buf
            })
        });

        let status = wait_with_timeout(&mut child, self.timeout)
            .map_err(|e| format!("{} {}", self.program, e))?;

        if status.success() {
            return Ok(());
        }

        let stderr = stderr_reader
            .and_then(|reader| reader.join().ok())
            .unwrap_or_default();
        Err(format!(
            "{} exited with {}: {}",
            self.program,
            status,
            stderr.trim()
        ))
    }
}
