//! SCSS variable extraction and substitution
//!
//! Variables live in the source text as lines of the form
//! `$mk_<name>: <value>;`. Matching is regex-based and first-match-wins;
//! there is deliberately no structural SCSS parser here, the source format
//! is loose and this mirrors how the assets are actually written.

use regex::{NoExpand, Regex};
use std::collections::BTreeMap;

/// Prefix carried by every themeable variable in the SCSS sources.
pub const VARIABLE_PREFIX: &str = "mk_";

/// A single `name -> value` substitution for [`replace_variables`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub name: String,
    pub value: String,
}

impl Assignment {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

fn lookup_pattern(name: &str) -> Regex {
    // Name is escaped, the pattern is always valid.
    Regex::new(&format!(
        r"\${}{}:?\s(.*?);",
        VARIABLE_PREFIX,
        regex::escape(name)
    ))
    .expect("escaped variable name forms a valid pattern")
}

/// Extract the value of one variable, `None` when the text does not
/// contain it.
pub fn variable_value(content: &str, name: &str) -> Option<String> {
    lookup_pattern(name)
        .captures(content)
        .map(|caps| caps[1].to_string())
}

/// Extract several variables at once. Missing names map to `None`.
pub fn variable_values(content: &str, names: &[&str]) -> BTreeMap<String, Option<String>> {
    names
        .iter()
        .map(|name| (name.to_string(), variable_value(content, name)))
        .collect()
}

/// Rewrite the first `<name>: <old>;` occurrence per assignment to the new
/// value. Names absent from the text are skipped silently.
pub fn replace_variables(content: &str, assignments: &[Assignment]) -> String {
    let mut content = content.to_string();
    for assignment in assignments {
        let pattern = Regex::new(&format!(r"{}:?\s(.*?);", regex::escape(&assignment.name)))
            .expect("escaped variable name forms a valid pattern");
        let replacement = format!("{}: {};", assignment.name, assignment.value);
        content = pattern
            .replace(&content, NoExpand(&replacement))
            .into_owned();
    }
    content
}
