/// Shared helpers for building notification text.
use std::path::Path;

const ELLIPSIS: &str = "...";

/// Truncate `message` to at most `max_chars` characters, ending in "..." when cut.
/// Counts chars, not bytes, so multi-byte text is never split.
pub fn truncate_message(message: &str, max_chars: usize) -> String {
    if message.chars().count() <= max_chars {
        return message.to_string();
    }
    let keep = max_chars.saturating_sub(ELLIPSIS.len());
    let mut truncated: String = message.chars().take(keep).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}

/// Base name of a project directory, used to stack notifications per project.
pub fn project_name(dir: &Path) -> Option<String> {
    dir.file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .map(String::from)
}

/// Stable per-project notification title.
pub fn project_title(project: Option<&str>) -> String {
    match project {
        Some(name) => format!("Claude - {}", name),
        None => "Claude".to_string(),
    }
}

/// First `n` characters, for log previews.
pub fn preview(text: &str, n: usize) -> String {
    text.chars().take(n).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_truncate_short_message_unchanged() {
        assert_eq!(truncate_message("done", 200), "done");
        let exact = "x".repeat(200);
        assert_eq!(truncate_message(&exact, 200), exact);
    }

    #[test]
    fn test_truncate_long_message() {
        let long = "a".repeat(250);
        let out = truncate_message(&long, 200);
        assert_eq!(out.chars().count(), 200);
        assert!(out.ends_with("..."));
        assert_eq!(&out[..197], &long[..197]);
    }

    #[test]
    fn test_truncate_multibyte() {
        let long = "é".repeat(300);
        let out = truncate_message(&long, 200);
        assert_eq!(out.chars().count(), 200);
        assert!(out.starts_with("ééé"));
    }

    #[test]
    fn test_truncate_tiny_limit() {
        assert_eq!(truncate_message("abcdef", 2), "...");
    }

    #[test]
    fn test_project_name() {
        assert_eq!(
            project_name(&PathBuf::from("/tmp/test-project")),
            Some("test-project".to_string())
        );
        assert_eq!(project_name(&PathBuf::from("/")), None);
    }

    #[test]
    fn test_project_title() {
        assert_eq!(project_title(Some("webapp")), "Claude - webapp");
        assert_eq!(project_title(None), "Claude");
    }

    #[test]
    fn test_preview() {
        assert_eq!(preview("hello world", 5), "hello");
        assert_eq!(preview("hi", 50), "hi");
    }
}
