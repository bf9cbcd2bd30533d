//! Previews the cases a parameter-source spec file will produce.
//!
//! Loads one YAML spec file (or discovers all spec files under a
//! directory), resolves domain references against `--domain` definitions,
//! and prints each source's expanded cases. Configuration errors are
//! rendered as full diagnostics and make the process exit non-zero.

use std::path::PathBuf;

use clap::Parser;

use attest::cases::config::{discover_source_files, load_source_specs, SourceSpec};
use attest::cases::Domain;
use attest::errors::{configuration_error_with_help, print_error};
use attest::AttestResult;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "expand-cases",
    version,
    about = "Preview the cases a parameter-source spec file will produce."
)]
struct Args {
    /// A YAML spec file, or a directory to search for spec files.
    #[arg(required = true)]
    path: PathBuf,

    /// Only expand sources whose name contains this substring.
    #[arg(long)]
    filter: Option<String>,

    /// Define a domain as NAME=MEMBER,MEMBER,... (repeatable).
    #[arg(long = "domain", value_name = "NAME=MEMBERS")]
    domains: Vec<String>,

    /// Emit the expansion as JSON instead of text.
    #[arg(long)]
    json: bool,
}

fn main() {
    let args = Args::parse();

    let domains = match parse_domains(&args.domains) {
        Ok(domains) => domains,
        Err(err) => {
            print_error(err);
            std::process::exit(1);
        }
    };

    let files = if args.path.is_dir() {
        discover_source_files(&args.path)
    } else {
        vec![args.path.clone()]
    };

    let mut failures = 0;
    for file in &files {
        let specs = match load_source_specs(file) {
            Ok(specs) => specs,
            Err(err) => {
                print_error(err);
                failures += 1;
                continue;
            }
        };
        for spec in &specs {
            if let Some(filter) = &args.filter {
                if !spec.name.contains(filter.as_str()) {
                    continue;
                }
            }
            if let Err(err) = expand_spec(spec, &domains, args.json) {
                print_error(err);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        std::process::exit(1);
    }
}

fn expand_spec(spec: &SourceSpec, domains: &[Domain], json: bool) -> AttestResult<()> {
    let cases = spec.resolve(domains)?.expand()?;
    if json {
        let rendered: Vec<Vec<&attest::value::Value>> =
            cases.iter().map(|c| c.values().iter().collect()).collect();
        let doc = serde_json::json!({ "name": spec.name, "cases": rendered });
        println!("{}", doc);
    } else {
        println!("{} ({} case(s))", spec.name, cases.len());
        for case in &cases {
            println!("  {}", case);
        }
    }
    Ok(())
}

/// Parses repeated `NAME=A,B,C` definitions into domains.
fn parse_domains(definitions: &[String]) -> AttestResult<Vec<Domain>> {
    definitions
        .iter()
        .map(|definition| {
            let (name, members) = definition.split_once('=').ok_or_else(|| {
                configuration_error_with_help(
                    format!("malformed domain definition '{}'", definition),
                    "expected NAME=MEMBER,MEMBER,...",
                )
            })?;
            Ok(Domain::new(
                name.trim(),
                members.split(',').map(|m| m.trim().to_string()),
            ))
        })
        .collect()
}
