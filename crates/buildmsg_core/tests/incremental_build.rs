//! Integration tests for consecutive incremental builds.
//!
//! Each test runs several build sessions against one temporary site and
//! checks that skipped files report the same messages as a full rebuild.

use std::path::Path;
use std::sync::Arc;

use buildmsg_core::{BuildSession, LogLevel, Logger, Message, SessionConfig};
use buildmsg_log::MemorySink;
use pretty_assertions::assert_eq;
use rayon::prelude::*;
use tempfile::TempDir;

fn config_in(dir: &TempDir) -> SessionConfig {
    let mut config = SessionConfig::new();
    config.base_dir = Some(dir.path().to_path_buf());
    config
}

/// Stands in for an expensive per-file build step.
fn build_file(logger: &Logger, root: &Path, file: &str, revision: u32) {
    let path = root.join(file).to_string_lossy().to_string();
    logger.log(&Message::new(LogLevel::Verbose, "processing").with_file(path.as_str()));
    logger.log(
        &Message::warning(format!("{file}: missing link (rev {revision})"))
            .with_file(path.as_str())
            .with_line("3")
            .with_phase("Validate"),
    );
    logger.log(&Message::error(format!("{file}: unknown uid (rev {revision})")).with_file(file));
    logger.log(&Message::info("build step done"));
}

fn run_session(
    dir: &TempDir,
    rebuilt: &[&str],
    skipped: &[&str],
    revision: u32,
) -> Vec<Message> {
    let logger = Arc::new(Logger::new());
    let live = Arc::new(MemorySink::new());
    logger.register(live.clone());

    let session = BuildSession::start(config_in(dir), Arc::clone(&logger));

    rebuilt
        .par_iter()
        .for_each(|file| build_file(&logger, dir.path(), file, revision));
    for file in skipped {
        session.replay(file);
    }

    session.finish().unwrap();
    live.take_all()
}

fn file_scoped(messages: &[Message], file: &str, min: LogLevel) -> Vec<String> {
    messages
        .iter()
        .filter(|m| m.level >= min && m.file().is_some_and(|f| f.ends_with(file)))
        .map(|m| m.text.clone())
        .collect()
}

#[test]
fn test_skipped_files_replay_previous_messages() {
    let dir = TempDir::new().unwrap();

    let first = run_session(&dir, &["a.md", "b.md", "c.md"], &[], 1);
    assert_eq!(first.len(), 12);

    let second = run_session(&dir, &["b.md"], &["a.md", "c.md"], 2);

    assert_eq!(
        file_scoped(&second, "a.md", LogLevel::Warning),
        file_scoped(&first, "a.md", LogLevel::Warning)
    );
    assert_eq!(
        file_scoped(&second, "c.md", LogLevel::Warning),
        file_scoped(&first, "c.md", LogLevel::Warning)
    );
    assert_eq!(
        file_scoped(&second, "b.md", LogLevel::Warning),
        vec!["b.md: missing link (rev 2)", "b.md: unknown uid (rev 2)"]
    );
}

#[test]
fn test_replayed_messages_carry_forward() {
    let dir = TempDir::new().unwrap();

    run_session(&dir, &["a.md"], &[], 1);
    run_session(&dir, &[], &["a.md"], 2);
    let third = run_session(&dir, &[], &["a.md"], 3);

    assert_eq!(
        file_scoped(&third, "a.md", LogLevel::Diagnostic),
        vec!["a.md: missing link (rev 1)", "a.md: unknown uid (rev 1)"]
    );
}

#[test]
fn test_sub_threshold_and_unscoped_messages_are_not_replayed() {
    let dir = TempDir::new().unwrap();

    run_session(&dir, &["a.md"], &[], 1);
    let second = run_session(&dir, &[], &["a.md"], 2);

    assert_eq!(second.len(), 2);
    assert!(second.iter().all(|m| m.level >= LogLevel::Warning));
}

#[test]
fn test_snapshot_keys_are_relative_to_base_dir() {
    let dir = TempDir::new().unwrap();
    run_session(&dir, &["docs/a.md"], &[], 1);

    let snapshot = config_in(&dir).snapshot_path();
    let content = std::fs::read_to_string(snapshot).unwrap();
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();

    let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["docs/a.md"]);
    assert_eq!(value["docs/a.md"].as_array().unwrap().len(), 2);
}
