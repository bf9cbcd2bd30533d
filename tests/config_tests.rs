//! Declarative source-spec handling: YAML parsing, resolution against
//! registered domains, and the configuration errors for malformed specs.

use std::fs;
use std::path::PathBuf;

use attest::cases::config::{discover_source_files, load_source_specs, SourceSpec};
use attest::cases::{ColumnType, Domain, ParameterSource};
use attest::value::Value;

fn parse_specs(yaml: &str) -> Vec<SourceSpec> {
    serde_yaml::from_str(yaml).unwrap()
}

fn month_domain() -> Domain {
    Domain::new("Month", ["JANUARY", "FEBRUARY", "MARCH"])
}

fn temp_path(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("attest-config-{}-{}", std::process::id(), name));
    path
}

mod resolution {
    use super::*;

    #[test]
    fn literal_specs_keep_scalar_types() {
        let specs = parse_specs(
            r#"
- name: mixed
  values: ["March", 3, true, null]
"#,
        );
        let source = specs[0].resolve(&[]).unwrap();
        match source {
            ParameterSource::Literal(values) => {
                assert_eq!(values[0], Value::String("March".to_string()));
                assert_eq!(values[1], Value::Number(3.0));
                assert_eq!(values[2], Value::Bool(true));
                assert_eq!(values[3], Value::Nil);
            }
            other => panic!("expected a literal source, got {:?}", other),
        }
    }

    #[test]
    fn domain_specs_resolve_against_registered_domains() {
        let specs = parse_specs(
            r#"
- name: not-february
  domain: Month
  exclude: [FEBRUARY]
"#,
        );
        let source = specs[0].resolve(&[month_domain()]).unwrap();
        let cases = source.expand().unwrap();
        assert_eq!(cases.len(), 2);
    }

    #[test]
    fn csv_specs_carry_delimiter_skip_and_columns() {
        let specs = parse_specs(
            r#"
- name: abs-pairs
  rows: ["input|result", "3|3"]
  delimiter: "|"
  skip: 1
  columns: [number, number]
"#,
        );
        match specs[0].resolve(&[]).unwrap() {
            ParameterSource::CsvRows {
                delimiter,
                skip,
                columns,
                ..
            } => {
                assert_eq!(delimiter, '|');
                assert_eq!(skip, 1);
                assert_eq!(columns, vec![ColumnType::Number, ColumnType::Number]);
            }
            other => panic!("expected a CSV source, got {:?}", other),
        }
    }

    #[test]
    fn csv_defaults_apply_when_omitted() {
        let specs = parse_specs(
            r#"
- name: pairs
  rows: ["3, 3"]
  columns: [number, number]
"#,
        );
        match specs[0].resolve(&[]).unwrap() {
            ParameterSource::CsvRows {
                delimiter, skip, ..
            } => {
                assert_eq!(delimiter, ',');
                assert_eq!(skip, 0);
            }
            other => panic!("expected a CSV source, got {:?}", other),
        }
    }
}

mod spec_errors {
    use super::*;

    #[test]
    fn unknown_domain_name_is_a_configuration_error() {
        let specs = parse_specs(
            r#"
- name: bad
  domain: Weekday
"#,
        );
        let err = specs[0].resolve(&[month_domain()]).unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("Weekday"));
    }

    #[test]
    fn ambiguous_specs_are_rejected() {
        let specs = parse_specs(
            r#"
- name: confused
  values: [1, 2]
  rows: ["1, 2"]
  columns: [number, number]
"#,
        );
        let err = specs[0].resolve(&[]).unwrap_err();
        assert!(err.to_string().contains("exactly one"));
    }

    #[test]
    fn empty_specs_are_rejected() {
        let specs = parse_specs("- name: hollow\n");
        assert!(specs[0].resolve(&[]).is_err());
    }

    #[test]
    fn rows_without_columns_are_rejected() {
        let specs = parse_specs(
            r#"
- name: shapeless
  rows: ["1, 2"]
"#,
        );
        let err = specs[0].resolve(&[]).unwrap_err();
        assert!(err.to_string().contains("columns"));
    }

    #[test]
    fn filters_do_not_apply_to_csv_sources() {
        let specs = parse_specs(
            r#"
- name: crossed
  rows: ["1, 2"]
  columns: [number, number]
  include: [A]
"#,
        );
        let err = specs[0].resolve(&[]).unwrap_err();
        assert!(err.to_string().contains("include/exclude"));
    }

    #[test]
    fn csv_fields_do_not_apply_to_domain_sources() {
        let specs = parse_specs(
            r#"
- name: crossed
  domain: Month
  delimiter: ";"
"#,
        );
        let err = specs[0].resolve(&[month_domain()]).unwrap_err();
        assert!(err.to_string().contains("delimiter"));
    }
}

mod files {
    use super::*;

    #[test]
    fn loads_specs_from_a_yaml_file() {
        let path = temp_path("load.yaml");
        fs::write(
            &path,
            "- name: months\n  values: [\"March\", \"January\", \"May\"]\n",
        )
        .unwrap();

        let specs = load_source_specs(&path).unwrap();
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].name, "months");
        let cases = specs[0].resolve(&[]).unwrap().expand().unwrap();
        assert_eq!(cases.len(), 3);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn missing_files_and_bad_yaml_are_configuration_errors() {
        let missing = temp_path("does-not-exist.yaml");
        assert!(load_source_specs(&missing).unwrap_err().is_configuration());

        let path = temp_path("broken.yaml");
        fs::write(&path, "not: [a, list, of, specs").unwrap();
        assert!(load_source_specs(&path).unwrap_err().is_configuration());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn discovery_finds_yaml_files_recursively() {
        let root = temp_path("discover-root");
        let nested = root.join("nested");
        fs::create_dir_all(&nested).unwrap();
        fs::write(root.join("a.yaml"), "[]").unwrap();
        fs::write(nested.join("b.yml"), "[]").unwrap();
        fs::write(nested.join("ignored.txt"), "").unwrap();

        let mut found = discover_source_files(&root);
        found.sort();
        let names: Vec<_> = found
            .iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
            .collect();
        assert_eq!(names, vec!["a.yaml", "b.yml"]);

        let _ = fs::remove_dir_all(&root);
    }
}
