use std::path::{Path, PathBuf};

use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use codespan_reporting::files::SimpleFiles;

use fable::SyntaxError;

/// One document that failed to load, kept for the failure report.
/// `file_id` is absent when the file could not be read at all.
struct LoadFailure {
    path: PathBuf,
    file_id: Option<usize>,
    source: String,
    error: SyntaxError,
}

/// Discover `.feature` documents under `root`, sorted by path.
fn discover(root: &Path) -> Vec<PathBuf> {
    let mut found = Vec::new();
    collect(root, &mut found);
    found.sort();
    found
}

fn collect(dir: &Path, out: &mut Vec<PathBuf>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect(&path, out);
        } else if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            if name.ends_with(".feature") {
                out.push(path);
            }
        }
    }
}

fn pass_label(no_color: bool) -> &'static str {
    if no_color { "PASS" } else { "\x1b[32mPASS\x1b[0m" }
}

fn fail_label(no_color: bool) -> &'static str {
    if no_color { "FAIL" } else { "\x1b[31mFAIL\x1b[0m" }
}

/// Load every `.feature` document under `path` (or a single file), parse
/// each one and report failures. A failing document fails the pass but
/// never stops the remaining documents.
/// Returns exit code: 0 = all parsed, 1 = any failure.
pub fn check_path(path: &Path, no_color: bool, language: &str) -> i32 {
    let documents = if path.is_file() {
        vec![path.to_path_buf()]
    } else {
        discover(path)
    };

    if documents.is_empty() {
        eprintln!("no .feature files found in {}", path.display());
        return 1;
    }

    let mut files = SimpleFiles::new();
    let mut passed = 0usize;
    let mut failures: Vec<LoadFailure> = Vec::new();

    for document in &documents {
        let source = match std::fs::read_to_string(document) {
            Ok(source) => source,
            Err(e) => {
                eprintln!(
                    "  {}  {}: cannot read file: {}",
                    fail_label(no_color),
                    document.display(),
                    e
                );
                failures.push(LoadFailure {
                    path: document.clone(),
                    file_id: None,
                    source: String::new(),
                    error: SyntaxError::structure(
                        &document.display().to_string(),
                        1,
                        format!("cannot read file: {}", e),
                    ),
                });
                continue;
            }
        };

        let name = document.display().to_string();
        let file_id = files.add(name.clone(), source.clone());

        match fable::Parser::new(name, source.clone()).language(language).parse() {
            Ok(_) => {
                passed += 1;
                eprintln!("  {}  {}", pass_label(no_color), document.display());
            }
            Err(error) => {
                eprintln!("  {}  {}", fail_label(no_color), document.display());
                failures.push(LoadFailure {
                    path: document.clone(),
                    file_id: Some(file_id),
                    source,
                    error,
                });
            }
        }
    }

    // Failure details as source-addressed diagnostics.
    if !failures.is_empty() {
        let color_choice = if no_color {
            ColorChoice::Never
        } else {
            ColorChoice::Auto
        };
        let writer = StandardStream::stderr(color_choice);
        let config = term::Config::default();

        eprintln!();
        eprintln!("failures:");
        for failure in &failures {
            eprintln!();
            eprintln!("  --- {} ---", failure.path.display());
            eprintln!("  {}", failure.error);
            if let Some(file_id) = failure.file_id {
                let diagnostic = failure.error.to_diagnostic(file_id, &failure.source);
                let _ = term::emit_to_write_style(&mut writer.lock(), &config, &files, &diagnostic);
            }
        }
    }

    // Summary.
    eprintln!();
    let failed = failures.len();
    if failed == 0 {
        if no_color {
            eprintln!("check result: ok. {} parsed, 0 failed", passed);
        } else {
            eprintln!("check result: \x1b[32mok\x1b[0m. {} parsed, 0 failed", passed);
        }
        0
    } else {
        let total = passed + failed;
        if no_color {
            eprintln!(
                "check result: FAILED. {} parsed, {} failed (of {})",
                passed, failed, total
            );
        } else {
            eprintln!(
                "check result: \x1b[31mFAILED\x1b[0m. {} parsed, {} failed (of {})",
                passed, failed, total
            );
        }
        1
    }
}
