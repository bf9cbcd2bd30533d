//! Enumerated member domains.
//!
//! A [`Domain`] is the runtime stand-in for an enum type: a named, ordered
//! list of member names. Keeping domains as plain values (rather than a
//! trait over user enums) lets YAML specs and the preview CLI name them.

use crate::errors::{configuration_error_with_help, AttestResult};

/// A named, ordered set of member names. Declaration order is enumeration
/// order.
#[derive(Debug, Clone, PartialEq)]
pub struct Domain {
    name: String,
    members: Vec<String>,
}

impl Domain {
    pub fn new<N, I, M>(name: N, members: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = M>,
        M: Into<String>,
    {
        Self {
            name: name.into(),
            members: members.into_iter().map(Into::into).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn members(&self) -> &[String] {
        &self.members
    }

    pub fn contains(&self, member: &str) -> bool {
        self.members.iter().any(|m| m == member)
    }

    /// Applies include/exclude name filters and returns the selected members
    /// in declaration order.
    ///
    /// A non-empty `include` keeps only the named members; `exclude` then
    /// removes its names from that set. Referencing a name that is not a
    /// member of this domain is a configuration error.
    pub fn select(&self, include: &[String], exclude: &[String]) -> AttestResult<Vec<String>> {
        self.check_known(include, "include")?;
        self.check_known(exclude, "exclude")?;

        let selected = self
            .members
            .iter()
            .filter(|m| include.is_empty() || include.iter().any(|i| i == *m))
            .filter(|m| !exclude.iter().any(|e| e == *m))
            .cloned()
            .collect();
        Ok(selected)
    }

    fn check_known(&self, filter: &[String], filter_name: &str) -> AttestResult<()> {
        for name in filter {
            if !self.contains(name) {
                return Err(configuration_error_with_help(
                    format!(
                        "unknown member '{}' in {} filter for domain '{}'",
                        name, filter_name, self.name
                    ),
                    format!("known members: {}", self.members.join(", ")),
                ));
            }
        }
        Ok(())
    }
}
