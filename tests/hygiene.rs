//! Hygiene — enforces coding standards at test time
//!
//! Scans the crate's production source for antipatterns that violate project
//! standards. Every pattern has a budget of zero: panicking escape hatches,
//! silent error discards, and dead-code waivers all fail the build here
//! before review has to catch them. Test files (`*_test.rs`) are exempt.

use std::fs;
use std::path::Path;

/// `(needle, description)` pairs with a zero budget in production code.
const BANNED: &[(&str, &str)] = &[
    (".unwrap()", "panics on None/Err; propagate with ? or match"),
    (".expect(", "panics with a message; propagate with ? or match"),
    ("panic!(", "crashes the process"),
    ("unreachable!(", "crashes the process"),
    ("todo!(", "unfinished stub"),
    ("unimplemented!(", "unfinished stub"),
    ("let _ =", "discards a Result without inspecting it"),
    (".ok()", "discards an error without inspecting it"),
    ("#[allow(dead_code)]", "dead-code waiver"),
];

struct SourceFile {
    path: String,
    content: String,
}

/// Collect production `.rs` files from `src/`, excluding test files.
fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect_rs_files(Path::new("src"), &mut files);
    files
}

fn collect_rs_files(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_rs_files(&path, out);
        } else if path.extension().is_some_and(|e| e == "rs") {
            let path_str = path.to_string_lossy().to_string();
            if path_str.ends_with("_test.rs") {
                continue;
            }
            if let Ok(content) = fs::read_to_string(&path) {
                out.push(SourceFile { path: path_str, content });
            }
        }
    }
}

fn hits_for(files: &[SourceFile], needle: &str) -> Vec<String> {
    let mut hits = Vec::new();
    for file in files {
        for (lineno, line) in file.content.lines().enumerate() {
            if line.contains(needle) {
                hits.push(format!("  {}:{}: {}", file.path, lineno + 1, line.trim()));
            }
        }
    }
    hits
}

#[test]
fn banned_patterns_have_zero_occurrences() {
    let files = source_files();
    assert!(!files.is_empty(), "no source files found; run from the crate root");

    let mut report = String::new();
    for (needle, why) in BANNED {
        let hits = hits_for(&files, needle);
        if !hits.is_empty() {
            report.push_str(&format!("`{needle}` ({why}):\n{}\n", hits.join("\n")));
        }
    }
    assert!(report.is_empty(), "banned patterns found in production code:\n{report}");
}

#[test]
fn source_tree_has_expected_modules() {
    let files = source_files();
    for module in ["doc", "engine", "hit", "input", "persist", "render"] {
        let expected = format!("src/{module}.rs");
        assert!(
            files.iter().any(|f| f.path.ends_with(&expected)),
            "missing production module {expected}"
        );
    }
}
