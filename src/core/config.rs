use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILE_NAME: &str = ".claude-notifyrc";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct NotifyConfig {
    #[serde(default)]
    pub webhook: WebhookConfig,
    #[serde(default)]
    pub desktop: DesktopConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WebhookConfig {
    #[serde(default = "default_webhook_url")]
    pub url: String,
    #[serde(default = "default_webhook_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DesktopConfig {
    #[serde(default = "default_notifier")]
    pub notifier: String,
    /// Bundle id brought to the front when the notification is clicked.
    #[serde(default = "default_activate")]
    pub activate: String,
    #[serde(default = "default_notifier_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_message_length")]
    pub max_message_length: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    /// Overrides `~/.claude/logs`.
    #[serde(default)]
    pub dir: Option<PathBuf>,
    #[serde(default = "default_true")]
    pub stderr: bool,
}

fn default_webhook_url() -> String {
    "http://localhost:8080/claude/hook".to_string()
}

fn default_webhook_timeout() -> u64 {
    10
}

fn default_notifier() -> String {
    "terminal-notifier".to_string()
}

fn default_activate() -> String {
    "com.apple.Terminal".to_string()
}

fn default_notifier_timeout() -> u64 {
    5
}

fn default_max_message_length() -> usize {
    200
}

fn default_true() -> bool {
    true
}

impl Default for WebhookConfig {
    fn default() -> Self {
        WebhookConfig {
            url: default_webhook_url(),
            timeout_secs: default_webhook_timeout(),
        }
    }
}

impl Default for DesktopConfig {
    fn default() -> Self {
        DesktopConfig {
            notifier: default_notifier(),
            activate: default_activate(),
            timeout_secs: default_notifier_timeout(),
            max_message_length: default_max_message_length(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            dir: None,
            stderr: default_true(),
        }
    }
}

impl WebhookConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl DesktopConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl LogConfig {
    pub fn log_dir(&self) -> PathBuf {
        match &self.dir {
            Some(dir) => expand_home(dir),
            None => dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".claude")
                .join("logs"),
        }
    }
}

fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| path.to_path_buf()),
        Err(_) => path.to_path_buf(),
    }
}

fn find_config_file() -> Option<PathBuf> {
    // Project directory first
    let local = Path::new(CONFIG_FILE_NAME);
    if local.exists() {
        return Some(local.to_path_buf());
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home.join(CONFIG_FILE_NAME);
        if home_config.exists() {
            return Some(home_config);
        }
    }

    None
}

/// Parse a config file. Errors are returned as display strings.
pub fn load_config_from(path: &Path) -> Result<NotifyConfig, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    toml::from_str(&content).map_err(|e| format!("Failed to parse {}: {}", path.display(), e))
}

/// Load `.claude-notifyrc`, falling back to defaults. Never fails: a hook must not
/// be stopped by a broken config file.
pub fn load_config() -> NotifyConfig {
    match find_config_file() {
        Some(path) => load_config_from(&path).unwrap_or_else(|e| {
            eprintln!("[claude-notify] Warning: {}", e);
            NotifyConfig::default()
        }),
        None => NotifyConfig::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = NotifyConfig::default();
        assert_eq!(config.webhook.url, "http://localhost:8080/claude/hook");
        assert_eq!(config.webhook.timeout(), Duration::from_secs(10));
        assert_eq!(config.desktop.notifier, "terminal-notifier");
        assert_eq!(config.desktop.activate, "com.apple.Terminal");
        assert_eq!(config.desktop.timeout(), Duration::from_secs(5));
        assert_eq!(config.desktop.max_message_length, 200);
        assert!(config.log.dir.is_none());
        assert!(config.log.stderr);
    }

    #[test]
    fn test_parse_config() {
        let toml_str = r#"
[webhook]
url = "http://127.0.0.1:9000/hook"
timeout_secs = 3

[desktop]
notifier = "/opt/homebrew/bin/terminal-notifier"
activate = "com.googlecode.iterm2"
max_message_length = 120

[log]
dir = "/tmp/claude-notify-logs"
stderr = false
"#;
        let config: NotifyConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.webhook.url, "http://127.0.0.1:9000/hook");
        assert_eq!(config.webhook.timeout_secs, 3);
        assert_eq!(config.desktop.notifier, "/opt/homebrew/bin/terminal-notifier");
        assert_eq!(config.desktop.activate, "com.googlecode.iterm2");
        assert_eq!(config.desktop.timeout_secs, 5);
        assert_eq!(config.desktop.max_message_length, 120);
        assert_eq!(config.log.log_dir(), PathBuf::from("/tmp/claude-notify-logs"));
        assert!(!config.log.stderr);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[webhook]
timeout_secs = 2
"#;
        let config: NotifyConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.webhook.timeout_secs, 2);
        assert_eq!(config.webhook.url, "http://localhost:8080/claude/hook");
        assert_eq!(config.desktop.max_message_length, 200);
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[desktop]\nnotifier = \"true\"\n").unwrap();
        let config = load_config_from(&path).unwrap();
        assert_eq!(config.desktop.notifier, "true");
    }

    #[test]
    fn test_load_config_from_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[webhook\nurl = ").unwrap();
        let err = load_config_from(&path).unwrap_err();
        assert!(err.starts_with("Failed to parse"));
    }

    #[test]
    fn test_log_dir_expands_home() {
        let log = LogConfig {
            dir: Some(PathBuf::from("~/logs/claude")),
            stderr: true,
        };
        if let Some(home) = dirs::home_dir() {
            assert_eq!(log.log_dir(), home.join("logs").join("claude"));
        }
    }

    #[test]
    fn test_default_log_dir() {
        let log = LogConfig::default();
        assert!(log.log_dir().ends_with(".claude/logs"));
    }
}
