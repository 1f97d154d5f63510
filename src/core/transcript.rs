use serde_json::Value;
use std::path::Path;

/// Tool Claude calls when it stops to ask the user something.
pub const ASK_USER_QUESTION: &str = "AskUserQuestion";

#[derive(Debug, Clone, PartialEq)]
pub enum ContentBlock {
    Text(String),
    ToolUse { name: String },
    /// Thinking blocks, tool results, images and anything malformed.
    Other,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MessageContent {
    PlainText(String),
    Blocks(Vec<ContentBlock>),
    Other,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub role: Option<String>,
    pub content: MessageContent,
}

impl Message {
    pub fn is_assistant(&self) -> bool {
        self.role.as_deref() == Some("assistant")
    }
}

/// One line of a Claude Code JSONL transcript.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub message: Option<Message>,
}

impl LogEntry {
    pub fn from_value(v: &Value) -> Self {
        let message = v.get("message").filter(|m| m.is_object()).map(|m| Message {
            role: m.get("role").and_then(|r| r.as_str()).map(String::from),
            content: parse_content(m.get("content")),
        });
        LogEntry { message }
    }

    fn assistant_message(&self) -> Option<&Message> {
        self.message.as_ref().filter(|m| m.is_assistant())
    }
}

fn parse_content(content: Option<&Value>) -> MessageContent {
    match content {
        Some(Value::String(s)) => MessageContent::PlainText(s.clone()),
        Some(Value::Array(items)) => MessageContent::Blocks(items.iter().map(parse_block).collect()),
        _ => MessageContent::Other,
    }
}

fn parse_block(item: &Value) -> ContentBlock {
    match item.get("type").and_then(|t| t.as_str()) {
        Some("text") => ContentBlock::Text(
            item.get("text")
                .and_then(|t| t.as_str())
                .unwrap_or("")
                .to_string(),
        ),
        Some("tool_use") => ContentBlock::ToolUse {
            name: item
                .get("name")
                .and_then(|n| n.as_str())
                .unwrap_or("")
                .to_string(),
        },
        _ => ContentBlock::Other,
    }
}

/// Parse JSONL text into entries, in file order. Blank and malformed lines are skipped.
pub fn parse_transcript(text: &str) -> Vec<LogEntry> {
    parse_transcript_bytes(text.as_bytes())
}

/// Same as [`parse_transcript`], but a line that isn't valid UTF-8 is skipped
/// on its own instead of spoiling the whole file.
pub fn parse_transcript_bytes(bytes: &[u8]) -> Vec<LogEntry> {
    let mut entries = Vec::new();

    for (idx, raw) in bytes.split(|b| *b == b'\n').enumerate() {
        let line = match std::str::from_utf8(raw) {
            Ok(line) => line.trim(),
            Err(e) => {
                log::debug!("Skipping non-UTF-8 transcript line {}: {}", idx + 1, e);
                continue;
            }
        };
        if line.is_empty() {
            continue;
        }

        let value: Value = match serde_json::from_str(line) {
            Ok(v) => v,
            Err(e) => {
                log::debug!("Skipping malformed transcript line {}: {}", idx + 1, e);
                continue;
            }
        };

        entries.push(LogEntry::from_value(&value));
    }

    entries
}

/// Read a transcript file. A missing path or unreadable file yields no entries.
pub fn read_transcript(transcript_path: &str) -> Vec<LogEntry> {
    if transcript_path.is_empty() {
        log::info!("No transcript path provided");
        return Vec::new();
    }

    let path = Path::new(transcript_path);
    if !path.exists() {
        log::info!("Transcript file not found: {}", transcript_path);
        return Vec::new();
    }

    match std::fs::read(path) {
        Ok(content) => {
            let entries = parse_transcript_bytes(&content);
            log::info!("Parsed {} entries from transcript", entries.len());
            entries
        }
        Err(e) => {
            log::warn!("Cannot read transcript {}: {}", transcript_path, e);
            Vec::new()
        }
    }
}

fn latest_assistant(entries: &[LogEntry]) -> Option<&Message> {
    entries.iter().rev().find_map(LogEntry::assistant_message)
}

/// Text of the most recent assistant message.
///
/// Only that one message is inspected: if it carries no non-blank text (for
/// example it is a bare tool call) the answer is `None`, never an older message.
pub fn latest_assistant_text(entries: &[LogEntry]) -> Option<String> {
    let message = latest_assistant(entries)?;

    match &message.content {
        MessageContent::PlainText(text) => {
            let text = text.trim();
            (!text.is_empty()).then(|| text.to_string())
        }
        MessageContent::Blocks(blocks) => blocks.iter().find_map(|block| match block {
            ContentBlock::Text(text) => {
                let text = text.trim();
                (!text.is_empty()).then(|| text.to_string())
            }
            ContentBlock::ToolUse { .. } | ContentBlock::Other => None,
        }),
        MessageContent::Other => None,
    }
}

/// Whether the most recent assistant message called `tool_name`.
/// Earlier assistant messages are never considered.
pub fn invoked_tool(entries: &[LogEntry], tool_name: &str) -> bool {
    let Some(message) = latest_assistant(entries) else {
        return false;
    };

    match &message.content {
        MessageContent::Blocks(blocks) => blocks
            .iter()
            .any(|b| matches!(b, ContentBlock::ToolUse { name } if name == tool_name)),
        MessageContent::PlainText(_) | MessageContent::Other => false,
    }
}
