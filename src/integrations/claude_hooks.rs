use serde_json::json;
use std::path::{Path, PathBuf};

const MARKER: &str = "claude-notify";

/// Claude Code hook event → our subcommand.
const HOOK_EVENTS: [(&str, &str); 3] = [
    ("Notification", "notification"),
    ("Stop", "stop"),
    ("SubagentStop", "subagent-stop"),
];

fn settings_path() -> Result<PathBuf, String> {
    let home = dirs::home_dir().ok_or("Cannot find home directory")?;
    Ok(home.join(".claude").join("settings.json"))
}

fn binary_path() -> String {
    std::env::current_exe()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|_| MARKER.to_string())
}

fn is_ours(entry: &serde_json::Value) -> bool {
    serde_json::to_string(entry)
        .map(|s| s.contains(MARKER))
        .unwrap_or(false)
}

fn read_settings(path: &Path) -> Result<serde_json::Value, String> {
    if !path.exists() {
        return Ok(json!({}));
    }
    let content =
        std::fs::read_to_string(path).map_err(|e| format!("Cannot read settings: {}", e))?;
    serde_json::from_str(&content).map_err(|e| format!("Invalid JSON in {}: {}", path.display(), e))
}

fn write_settings(path: &Path, settings: &serde_json::Value) -> Result<(), String> {
    let json_str = serde_json::to_string_pretty(settings)
        .map_err(|e| format!("Failed to serialize: {}", e))?;
    std::fs::write(path, json_str).map_err(|e| format!("Failed to write settings: {}", e))
}

/// Add our hooks to the settings file at `path`. Events that already carry one
/// of our entries are left alone. Returns `false` if nothing was missing.
pub fn install_into(path: &Path, binary: &str) -> Result<bool, String> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Cannot create {}: {}", parent.display(), e))?;
    }

    let mut settings = read_settings(path)?;
    if !settings.is_object() {
        return Err(format!("{} is not a JSON object", path.display()));
    }

    if !settings.get("hooks").is_some_and(|h| h.is_object()) {
        settings["hooks"] = json!({});
    }
    let hooks = &mut settings["hooks"];
    let mut added = 0;

    for (event, subcommand) in HOOK_EVENTS {
        if !hooks.get(event).is_some_and(|v| v.is_array()) {
            hooks[event] = json!([]);
        }
        let Some(arr) = hooks.get_mut(event).and_then(|v| v.as_array_mut()) else {
            continue;
        };
        if arr.iter().any(is_ours) {
            continue;
        }
        arr.push(json!({
            "hooks": [{
                "type": "command",
                "command": format!("{} {}", binary, subcommand)
            }]
        }));
        added += 1;
    }

    if added == 0 {
        return Ok(false);
    }
    write_settings(path, &settings)?;
    Ok(true)
}

/// Remove our hooks from the settings file at `path`, leaving everything else.
/// Returns how many hook entries were removed.
pub fn uninstall_from(path: &Path) -> Result<usize, String> {
    if !path.exists() {
        return Ok(0);
    }

    let mut settings = read_settings(path)?;
    let mut removed = 0;

    if let Some(hooks) = settings.get_mut("hooks") {
        for (event, _) in HOOK_EVENTS {
            if let Some(arr) = hooks.get_mut(event).and_then(|v| v.as_array_mut()) {
                let before = arr.len();
                arr.retain(|entry| !is_ours(entry));
                removed += before - arr.len();
            }
        }

        // Clean up empty arrays
        if let Some(hooks_obj) = hooks.as_object_mut() {
            hooks_obj.retain(|_, v| v.as_array().is_none_or(|a| !a.is_empty()));
        }
        let hooks_empty = hooks.as_object().is_some_and(|o| o.is_empty());
        if hooks_empty {
            if let Some(obj) = settings.as_object_mut() {
                obj.remove("hooks");
            }
        }
    }

    write_settings(path, &settings)?;
    Ok(removed)
}

pub fn install() -> Result<(), String> {
    let path = settings_path()?;
    if install_into(&path, &binary_path())? {
        println!("Installed Notification, Stop and SubagentStop hooks in {}", path.display());
    } else {
        println!("claude-notify hooks already installed in {}", path.display());
    }
    Ok(())
}

pub fn uninstall() -> Result<(), String> {
    let path = settings_path()?;
    let removed = uninstall_from(&path)?;
    if removed == 0 {
        println!("  \x1b[2m[skip]\x1b[0m No claude-notify hooks found in {}", path.display());
    } else {
        println!(
            "  \x1b[1;32m[done]\x1b[0m Removed {} hook(s) \x1b[2m({})\x1b[0m",
            removed,
            path.display()
        );
    }
    Ok(())
}
