//! EditorHost tests: pure plan application, the in-memory seam, and the
//! atomic file-backed host.

use std::cell::RefCell;
use std::fs;

use anyhow::Result;

use crate::editor::{EditorHost, FileHost, apply_plan, run_extraction};
use crate::engine::{Config, Outcome};
use crate::planner::EditPlan;

const SOURCE: &str = concat!(
    "import React from 'react';\n",
    "\n",
    "const Example = () => <View style={{flex: 1}} />;\n",
);

/// In-memory host, the shape an editor integration would inject.
struct MemoryHost {
    text: String,
    messages: RefCell<Vec<String>>,
}

impl MemoryHost {
    fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            messages: RefCell::new(Vec::new()),
        }
    }
}

impl EditorHost for MemoryHost {
    fn text(&self) -> Result<String> {
        Ok(self.text.clone())
    }

    fn apply(&mut self, plan: &EditPlan) -> Result<()> {
        self.text = apply_plan(&self.text, plan);
        Ok(())
    }

    fn notify(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}

#[test]
fn memory_host_round_trip_notifies_with_the_entry_name() {
    let mut host = MemoryHost::new(SOURCE);
    let offset = SOURCE.find("flex").unwrap();

    let outcome = run_extraction(&mut host, offset, &Config::default()).unwrap();
    assert!(matches!(outcome, Outcome::Planned(_)));

    assert!(host.text.contains("styles.view"));
    assert!(host.text.contains("const styles = StyleSheet.create({"));

    let messages = host.messages.borrow();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0], "Added style: view");
}

#[test]
fn no_op_applies_nothing_and_stays_silent() {
    let source = "const X = () => <View style={styles.view} />;\n";
    let mut host = MemoryHost::new(source);
    let offset = source.find("styles.view").unwrap();

    let outcome = run_extraction(&mut host, offset, &Config::default()).unwrap();
    assert!(matches!(outcome, Outcome::NoOp(_)));
    assert_eq!(host.text, source);
    assert!(host.messages.borrow().is_empty());
}

#[test]
fn file_host_rewrites_the_file_atomically() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("example.tsx");
    fs::write(&path, SOURCE).unwrap();

    let mut host = FileHost::new(&path);
    let offset = SOURCE.find("flex").unwrap();
    let outcome = run_extraction(&mut host, offset, &Config::default()).unwrap();
    assert!(matches!(outcome, Outcome::Planned(_)));

    let edited = fs::read_to_string(&path).unwrap();
    assert!(edited.contains("const styles = StyleSheet.create({"));
    assert!(edited.contains("<View style={styles.view} />"));

    // The temp file from the transaction must not survive the commit.
    let leftovers: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_name().to_string_lossy().contains(".tmp."))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn apply_plan_keeps_edits_in_original_offsets() {
    let planned = match crate::engine::extract(
        SOURCE,
        SOURCE.find("flex").unwrap(),
        &Config::default(),
    )
    .unwrap()
    {
        Outcome::Planned(planned) => planned,
        other => panic!("expected a planned extraction, got {:?}", other),
    };

    // The insertion sits before the replacement; applying back-to-front must
    // leave the replaced range untouched by the earlier insertion.
    let applied = apply_plan(SOURCE, &planned.plan);
    assert_eq!(applied.matches("styles.view").count(), 1);
    assert!(!applied.contains("{flex: 1}} />"));
}
