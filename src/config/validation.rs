//! Configuration invariants.
//!
//! Checked once before a run so that an inconsistent configuration never
//! produces a partial set of side effects.
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use super::{Composite, Config, TREE_ACTION};
use crate::error::ConfigError;

impl Config {
    /// Check every configuration invariant.
    ///
    /// - action names (`tree`, group labels, composites) are unique
    /// - repository destinations are absolute and declared once across all groups
    /// - composite steps name existing actions
    /// - composites do not invoke themselves, directly or indirectly
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.check_action_names()?;
        self.check_destinations()?;
        self.check_composites()
    }

    fn check_action_names(&self) -> Result<(), ConfigError> {
        let mut seen: HashSet<&str> = HashSet::from([TREE_ACTION]);
        let names = self
            .groups
            .iter()
            .map(|g| g.label.as_str())
            .chain(self.composites.iter().map(|c| c.name.as_str()));
        for name in names {
            if !seen.insert(name) {
                return Err(ConfigError::DuplicateAction(name.to_string()));
            }
        }
        Ok(())
    }

    fn check_destinations(&self) -> Result<(), ConfigError> {
        let mut owners: HashMap<&PathBuf, &str> = HashMap::new();
        for group in &self.groups {
            for repo in &group.repos {
                if !repo.dest.is_absolute() {
                    return Err(ConfigError::RelativeDestination {
                        group: group.label.clone(),
                        dest: repo.dest.clone(),
                    });
                }
                if let Some(first) = owners.insert(&repo.dest, &group.label) {
                    return Err(ConfigError::DuplicateDestination {
                        dest: repo.dest.clone(),
                        first: first.to_string(),
                        second: group.label.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    fn check_composites(&self) -> Result<(), ConfigError> {
        let composites: HashMap<&str, &Composite> = self
            .composites
            .iter()
            .map(|c| (c.name.as_str(), c))
            .collect();

        for composite in &self.composites {
            for step in &composite.steps {
                let known = step == TREE_ACTION
                    || self.group(step).is_some()
                    || composites.contains_key(step.as_str());
                if !known {
                    return Err(ConfigError::UnknownStep {
                        composite: composite.name.clone(),
                        step: step.clone(),
                    });
                }
            }
        }

        let mut done: HashSet<&str> = HashSet::new();
        for composite in &self.composites {
            let mut path = Vec::new();
            visit(composite.name.as_str(), &composites, &mut path, &mut done)?;
        }
        Ok(())
    }
}

/// Depth-first walk over composite steps; `path` holds the current chain.
fn visit<'a>(
    name: &'a str,
    composites: &HashMap<&'a str, &'a Composite>,
    path: &mut Vec<&'a str>,
    done: &mut HashSet<&'a str>,
) -> Result<(), ConfigError> {
    if done.contains(name) {
        return Ok(());
    }
    if path.contains(&name) {
        let mut chain: Vec<&str> = path.iter().copied().skip_while(|n| *n != name).collect();
        chain.push(name);
        return Err(ConfigError::CompositeCycle(chain.join(" → ")));
    }
    let Some(&composite) = composites.get(name) else {
        return Ok(());
    };
    path.push(name);
    for step in &composite.steps {
        visit(step.as_str(), composites, path, done)?;
    }
    path.pop();
    done.insert(name);
    Ok(())
}
