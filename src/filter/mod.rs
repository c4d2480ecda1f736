use std::fmt;
use std::fs;
use std::path::Path;

use log::info;
use regex::Regex;
use serde::Deserialize;
use toml::value::Table;
use toml::Value;

use crate::ledger::Transaction;

/// On-disk shape of a rules file:
///
/// ```toml
/// remove = ["Transfer", "Credit Card Payment"]
///
/// [rename]
/// "Fast Food" = "Dining"
/// ```
#[derive(Deserialize, Debug, Default)]
struct RulesFile {
    #[serde(default)]
    remove: Vec<String>,
    #[serde(default)]
    rename: Table,
}

/// Compiled category rules, applied to transactions before aggregation.
/// Removal runs before rename.
pub(crate) struct Rules {
    remove: Vec<Regex>,
    rename: Vec<(Regex, String)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RulesError {
    InvalidRulesFile(String),
}

impl fmt::Display for RulesError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "filter rules error: {}",
            match self {
                RulesError::InvalidRulesFile(s) => s,
            }
        )
    }
}

impl std::error::Error for RulesError {}

impl Rules {
    pub(crate) fn empty() -> Rules {
        Rules { remove: vec![], rename: vec![] }
    }

    /// Load rules from a TOML file. A path that does not exist yields the
    /// empty rule set; a file that fails to parse is an error.
    pub(crate) fn load_from_file(file_path: &str) -> Result<Rules, RulesError> {
        let path = Path::new(file_path);
        if !path.exists() || !path.is_file() {
            return Ok(Rules::empty());
        }

        let raw = fs::read_to_string(path)
            .map_err(|e| RulesError::InvalidRulesFile(format!("{}: {}", file_path, e)))?;
        let rules = Rules::parse(raw.as_str())?;
        info!(
            "Loaded {} remove and {} rename rule(s) from {}",
            rules.remove.len(),
            rules.rename.len(),
            file_path
        );
        Ok(rules)
    }

    fn parse(raw: &str) -> Result<Rules, RulesError> {
        let rules_file: RulesFile =
            toml::from_str(raw).map_err(|e| RulesError::InvalidRulesFile(e.to_string()))?;

        let mut remove = vec![];
        for pattern in &rules_file.remove {
            remove.push(compile(pattern)?);
        }

        let mut rename = vec![];
        for (pattern, target) in &rules_file.rename {
            if let Value::String(target) = target {
                rename.push((compile(pattern)?, target.clone()));
            }
        }

        Ok(Rules { remove, rename })
    }

    /// Drop transactions whose category matches a remove rule, then rewrite
    /// categories matching a rename rule. A renamed category takes part in
    /// aggregation under its new name, including first-occurrence ordering.
    pub(crate) fn apply(&self, transactions: Vec<Transaction>) -> Vec<Transaction> {
        transactions
            .into_iter()
            .filter(|t| !self.is_removed(t.category.as_str()))
            .map(|mut t| {
                if let Some(target) = self.rename_target(t.category.as_str()) {
                    t.category = target;
                }
                t
            })
            .collect()
    }

    fn is_removed(&self, category: &str) -> bool {
        self.remove.iter().any(|r| r.is_match(category))
    }

    fn rename_target(&self, category: &str) -> Option<String> {
        self.rename
            .iter()
            .find(|(r, _)| r.is_match(category))
            .map(|(_, target)| target.clone())
    }
}

/// Rules match the whole category name, case-insensitively.
fn compile(pattern: &str) -> Result<Regex, RulesError> {
    Regex::new(format!("(?i)^(?:{})$", pattern).as_str())
        .map_err(|e| RulesError::InvalidRulesFile(format!("bad rule '{}': {}", pattern, e)))
}
