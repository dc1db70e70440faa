//! Integration Test: Headless Core
//!
//! `parlor-core` must run without a terminal so it can be driven by tests
//! and by any future surface. UI crates belong to `parlor-tui` only.

use std::fs;

use architectural_enforcement::{code_part, rust_files, workspace_root};

const UI_CRATES: [&str; 3] = ["ratatui", "crossterm", "tokio"];

#[test]
fn test_core_manifest_has_no_ui_dependencies() {
    let manifest = fs::read_to_string(workspace_root().join("core/Cargo.toml"))
        .expect("core/Cargo.toml should be readable");

    for line in manifest.lines() {
        let key = line.split('=').next().unwrap_or("").trim();
        assert!(
            !UI_CRATES.contains(&key),
            "parlor-core depends on {key}; move that code to parlor-tui"
        );
    }
}

#[test]
fn test_core_sources_do_not_import_ui_crates() {
    let mut violations = Vec::new();
    for path in rust_files("core/src") {
        let content = fs::read_to_string(&path).expect("source should be readable");
        for (idx, line) in content.lines().enumerate() {
            let code = code_part(line);
            if UI_CRATES.iter().any(|krate| code.contains(&format!("{krate}::"))) {
                violations.push(format!("{}:{}", path.display(), idx + 1));
            }
        }
    }
    assert!(violations.is_empty(), "UI imports in core:\n{}", violations.join("\n"));
}
