//! Extraction engine
//!
//! One synchronous pass over the document: locate the style attribute under
//! the cursor, scan for the registry, pick a collision-free entry name,
//! reformat the style value and plan the edits. Stateless across invocations;
//! the tree is parsed fresh each time and discarded with the pass.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::format;
use crate::language;
use crate::locator;
use crate::naming;
use crate::planner::{self, EditPlan};
use crate::registry::{self, RegistryScan};

/// Names the engine recognizes in the source unit. The defaults match the
/// React Native registry pattern and stay bit-compatible with it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Registry factory type, the `StyleSheet` in `StyleSheet.create({...})`
    pub registry_type: String,
    /// Identifier the rewritten attribute references, the `styles` in
    /// `styles.view`
    pub registry_ident: String,
    /// Attribute name carrying inline styles
    pub attribute: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            registry_type: "StyleSheet".to_string(),
            registry_ident: "styles".to_string(),
            attribute: "style".to_string(),
        }
    }
}

/// Why an invocation produced no edits. Informational, not a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoOpReason {
    /// Cursor is not inside an extractable style attribute
    NoMatch,
    /// The unit's registry call does not take an object literal
    UnsupportedShape,
}

impl fmt::Display for NoOpReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoOpReason::NoMatch => write!(f, "no inline style object at the cursor"),
            NoOpReason::UnsupportedShape => {
                write!(f, "the existing registry call does not take an object literal")
            }
        }
    }
}

/// A complete planned extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedExtraction {
    /// Entry name chosen for the registry
    pub name: String,
    /// The two edits to apply atomically
    pub plan: EditPlan,
}

/// Discriminated result of one extraction pass. Fatal conditions surface as
/// the `Err` arm of [`extract`] instead; no partial plan is ever produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Outcome {
    Planned(PlannedExtraction),
    NoOp(NoOpReason),
}

/// Run one extraction over `source` at the cursor `offset` (bytes).
pub fn extract(source: &str, offset: usize, config: &Config) -> Result<Outcome> {
    let tree = language::parse_tsx(source)?;

    let Some(matched) = locator::locate(&tree, source, offset, config)? else {
        debug!("No extractable style attribute at byte {}", offset);
        return Ok(Outcome::NoOp(NoOpReason::NoMatch));
    };

    let scan = registry::find_registry(&tree, source, config);
    let (registry_info, existing) = match &scan {
        RegistryScan::Found(info) => (Some(info), info.entry_names.clone()),
        RegistryScan::Missing => (None, HashSet::new()),
        RegistryScan::Malformed => {
            debug!("Registry argument is not an object literal, refusing to plan");
            return Ok(Outcome::NoOp(NoOpReason::UnsupportedShape));
        }
    };

    let name = naming::generate_name(&matched.tag, &existing);
    let formatted = format::format_style(matched.value.slice(source))?;
    let plan = planner::plan(&matched, registry_info, &name, &formatted, source, config);

    debug!(
        "Planned extraction of <{}> style into entry '{}'",
        matched.tag, name
    );
    Ok(Outcome::Planned(PlannedExtraction { name, plan }))
}
