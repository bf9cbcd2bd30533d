//! Parameterized case expansion.
//!
//! A [`ParameterSource`] declares the set of argument tuples a test should
//! run against; [`ParameterSource::expand`] turns it into a [`CaseList`] of
//! concrete [`Case`]s. Expansion validates the whole source up front, so
//! every configuration error surfaces before any case runs, and the
//! resulting list is restartable: it can be iterated any number of times
//! and always yields cases in source declaration order.

pub mod config;
pub mod csv;
pub mod domain;

pub use csv::{ColumnType, DEFAULT_DELIMITER};
pub use domain::Domain;

use std::fmt;

use crate::errors::{arity_mismatch, type_mismatch, AttestResult};
use crate::value::Value;

// ============================================================================
// CASES
// ============================================================================

/// An ordered tuple of argument values for one test invocation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Case {
    values: Vec<Value>,
}

impl Case {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    /// The empty argument tuple, used when invoking unparameterized tests.
    pub fn empty() -> Self {
        Self { values: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn value(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Returns the number at `index`, or a type/arity error.
    pub fn number(&self, index: usize) -> AttestResult<f64> {
        let value = self.checked(index)?;
        value
            .as_number()
            .ok_or_else(|| type_mismatch("Number", value.type_name()))
    }

    /// Returns the string at `index`, or a type/arity error.
    pub fn text(&self, index: usize) -> AttestResult<&str> {
        let value = self.checked(index)?;
        value
            .as_text()
            .ok_or_else(|| type_mismatch("String", value.type_name()))
    }

    /// Returns the bool at `index`, or a type/arity error.
    pub fn boolean(&self, index: usize) -> AttestResult<bool> {
        let value = self.checked(index)?;
        value
            .as_bool()
            .ok_or_else(|| type_mismatch("Bool", value.type_name()))
    }

    fn checked(&self, index: usize) -> AttestResult<&Value> {
        self.values
            .get(index)
            .ok_or_else(|| arity_mismatch(index + 1, self.values.len()))
    }
}

impl fmt::Display for Case {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", value)?;
        }
        write!(f, ")")
    }
}

/// The finite, restartable sequence of cases one source expands to.
///
/// Pre-computed at expansion time; iterating it has no side effects and can
/// be repeated for reproducing failures.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CaseList {
    cases: Vec<Case>,
}

impl CaseList {
    pub fn new(cases: Vec<Case>) -> Self {
        Self { cases }
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Case> {
        self.cases.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Case> {
        self.cases.iter()
    }
}

impl IntoIterator for CaseList {
    type Item = Case;
    type IntoIter = std::vec::IntoIter<Case>;

    fn into_iter(self) -> Self::IntoIter {
        self.cases.into_iter()
    }
}

impl<'a> IntoIterator for &'a CaseList {
    type Item = &'a Case;
    type IntoIter = std::slice::Iter<'a, Case>;

    fn into_iter(self) -> Self::IntoIter {
        self.cases.iter()
    }
}

// ============================================================================
// PARAMETER SOURCES
// ============================================================================

/// A declarative specification of the argument tuples to run a test against.
///
/// Immutable once constructed, either programmatically or from a
/// [`config::SourceSpec`].
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterSource {
    /// A list of scalar literals; each becomes a one-element case.
    Literal(Vec<Value>),
    /// All members of a domain, optionally narrowed by name filters.
    ///
    /// A non-empty `include` keeps only the named members; `exclude` then
    /// removes any of its names from that set. Declaration order is always
    /// preserved.
    Domain {
        domain: Domain,
        include: Vec<String>,
        exclude: Vec<String>,
    },
    /// Delimited text rows, typed by the declared column list.
    CsvRows {
        rows: Vec<String>,
        delimiter: char,
        skip: usize,
        columns: Vec<ColumnType>,
    },
}

impl ParameterSource {
    pub fn literal<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        ParameterSource::Literal(values.into_iter().map(Into::into).collect())
    }

    /// An unfiltered domain source.
    pub fn domain(domain: Domain) -> Self {
        ParameterSource::Domain {
            domain,
            include: Vec::new(),
            exclude: Vec::new(),
        }
    }

    /// A domain source narrowed by include/exclude name lists.
    pub fn domain_filtered(domain: Domain, include: &[&str], exclude: &[&str]) -> Self {
        ParameterSource::Domain {
            domain,
            include: include.iter().map(|s| s.to_string()).collect(),
            exclude: exclude.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// A CSV source with the default delimiter and no header skip.
    pub fn csv(rows: &[&str], columns: &[ColumnType]) -> Self {
        ParameterSource::CsvRows {
            rows: rows.iter().map(|s| s.to_string()).collect(),
            delimiter: DEFAULT_DELIMITER,
            skip: 0,
            columns: columns.to_vec(),
        }
    }

    /// Expands this source into its case list.
    ///
    /// The whole source is validated here: unknown filter names, malformed
    /// rows, and unparseable cells all fail with a configuration error
    /// before a single case is produced.
    pub fn expand(&self) -> AttestResult<CaseList> {
        let cases = match self {
            ParameterSource::Literal(values) => values
                .iter()
                .map(|v| Case::new(vec![v.clone()]))
                .collect(),
            ParameterSource::Domain {
                domain,
                include,
                exclude,
            } => domain
                .select(include, exclude)?
                .into_iter()
                .map(|member| Case::new(vec![Value::String(member)]))
                .collect(),
            ParameterSource::CsvRows {
                rows,
                delimiter,
                skip,
                columns,
            } => csv::expand_rows(rows, *delimiter, *skip, columns)?,
        };
        Ok(CaseList::new(cases))
    }
}
