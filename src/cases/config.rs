//! Declarative parameter-source specs.
//!
//! Sources can be described in YAML and loaded at runtime. A spec file is a
//! list of named entries, each carrying exactly one source form:
//!
//! ```yaml
//! - name: month-names
//!   values: ["March", "January", "May"]
//! - name: not-february
//!   domain: Month
//!   exclude: [FEBRUARY]
//! - name: abs-pairs
//!   rows: ["3, 3", "-3, 3"]
//!   columns: [number, number]
//! ```
//!
//! Domain forms are resolved by name against the domains the caller
//! registers; everything else is self-contained.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::errors::{configuration_error, configuration_error_with_help, AttestResult};
use crate::value::Value;

use super::csv::DEFAULT_DELIMITER;
use super::{ColumnType, Domain, ParameterSource};

/// One named parameter-source spec as it appears in a YAML file.
///
/// All form fields are optional at parse time; [`SourceSpec::resolve`]
/// checks that exactly one form is present and that no field from another
/// form leaks in.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceSpec {
    pub name: String,
    pub values: Option<Vec<Value>>,
    pub domain: Option<String>,
    pub include: Option<Vec<String>>,
    pub exclude: Option<Vec<String>>,
    pub rows: Option<Vec<String>>,
    pub delimiter: Option<char>,
    pub skip: Option<usize>,
    pub columns: Option<Vec<ColumnType>>,
}

impl SourceSpec {
    /// Validates the spec and produces the parameter source it describes.
    ///
    /// Domain names are looked up in `domains`; unknown names, ambiguous
    /// specs, and fields that do not belong to the chosen form are all
    /// configuration errors.
    pub fn resolve(&self, domains: &[Domain]) -> AttestResult<ParameterSource> {
        let forms =
            [self.values.is_some(), self.domain.is_some(), self.rows.is_some()]
                .iter()
                .filter(|present| **present)
                .count();
        if forms != 1 {
            return Err(configuration_error_with_help(
                format!(
                    "source '{}' must specify exactly one of values, domain, or rows",
                    self.name
                ),
                "literal sources use 'values', enum domains use 'domain', \
                 delimited text uses 'rows' with 'columns'",
            ));
        }

        if let Some(values) = &self.values {
            self.reject_domain_fields("a literal source")?;
            self.reject_csv_fields("a literal source")?;
            return Ok(ParameterSource::Literal(values.clone()));
        }

        if let Some(domain_name) = &self.domain {
            self.reject_csv_fields("a domain source")?;
            let domain = domains
                .iter()
                .find(|d| d.name() == domain_name)
                .ok_or_else(|| self.unknown_domain(domain_name, domains))?;
            return Ok(ParameterSource::Domain {
                domain: domain.clone(),
                include: self.include.clone().unwrap_or_default(),
                exclude: self.exclude.clone().unwrap_or_default(),
            });
        }

        let rows = self.rows.as_ref().expect("one form is present");
        self.reject_domain_fields("a CSV source")?;
        let columns = self.columns.clone().ok_or_else(|| {
            configuration_error(format!(
                "source '{}' has rows but no columns declaration",
                self.name
            ))
        })?;
        Ok(ParameterSource::CsvRows {
            rows: rows.clone(),
            delimiter: self.delimiter.unwrap_or(DEFAULT_DELIMITER),
            skip: self.skip.unwrap_or(0),
            columns,
        })
    }

    fn reject_domain_fields(&self, form: &str) -> AttestResult<()> {
        if self.include.is_some() || self.exclude.is_some() {
            return Err(configuration_error(format!(
                "source '{}' is {} and cannot carry include/exclude filters",
                self.name, form
            )));
        }
        Ok(())
    }

    fn reject_csv_fields(&self, form: &str) -> AttestResult<()> {
        if self.delimiter.is_some() || self.skip.is_some() || self.columns.is_some() {
            return Err(configuration_error(format!(
                "source '{}' is {} and cannot carry delimiter/skip/columns",
                self.name, form
            )));
        }
        Ok(())
    }

    fn unknown_domain(&self, domain_name: &str, domains: &[Domain]) -> crate::AttestError {
        let help = if domains.is_empty() {
            "no domains registered".to_string()
        } else {
            format!(
                "known domains: {}",
                domains
                    .iter()
                    .map(Domain::name)
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        };
        configuration_error_with_help(
            format!(
                "unknown domain '{}' for source '{}'",
                domain_name, self.name
            ),
            help,
        )
    }
}

/// Load and parse source specs from a YAML file.
pub fn load_source_specs(path: &Path) -> AttestResult<Vec<SourceSpec>> {
    let content = fs::read_to_string(path)
        .map_err(|e| configuration_error(format!("failed to read {}: {}", path.display(), e)))?;
    serde_yaml::from_str::<Vec<SourceSpec>>(&content).map_err(|e| {
        configuration_error_with_help(
            format!("failed to parse {}: {}", path.display(), e),
            "expected a YAML list of parameter-source specs",
        )
    })
}

/// Discovers all YAML spec files recursively under the given root directory.
pub fn discover_source_files<P: AsRef<Path>>(root: P) -> Vec<PathBuf> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.file_type().is_file()
                && e.path()
                    .extension()
                    .map(|ext| ext == "yaml" || ext == "yml")
                    .unwrap_or(false)
        })
        .map(|e| e.path().to_path_buf())
        .collect()
}
