//! Integration Test: Sleep Prohibition
//!
//! **Policy**: The core MUST NOT sleep. Typing delays and selection feedback
//! are timers on a `Scheduler`, polled by the surface once per frame.
//! The TUI may wait on its frame interval, but never with a raw sleep.

use std::fs;

use architectural_enforcement::{code_part, rust_files};

#[test]
fn test_no_sleep_in_production_code() {
    let mut violations = Vec::new();

    for dir in ["core/src", "tui/src"] {
        for path in rust_files(dir) {
            let Ok(content) = fs::read_to_string(&path) else {
                continue;
            };
            for (idx, line) in content.lines().enumerate() {
                // Unit tests live at the bottom of each file
                if line.trim_start().starts_with("#[cfg(test)]") {
                    break;
                }
                let code = code_part(line);
                if code.contains("::sleep(") || code.contains(".sleep(") {
                    violations.push(format!("{}:{}: {}", path.display(), idx + 1, line.trim()));
                }
            }
        }
    }

    assert!(
        violations.is_empty(),
        "Found {} sleep call(s); schedule a timer instead:\n{}",
        violations.len(),
        violations.join("\n")
    );
}

#[test]
fn test_sources_were_scanned() {
    assert!(!rust_files("core/src").is_empty());
    assert!(!rust_files("tui/src").is_empty());
}
