//! Integration tests for the projection write path
//!
//! Verifies that JSON and CSV reports land in the configured output file
//! as complete UTF-8 documents.


use repo_census::formatter;
use repo_census::types::RepositoryDescriptor;
use test_util::{repo_node, resolve_config};

fn descriptors(names: &[&str]) -> Vec<RepositoryDescriptor> {
    names
        .iter()
        .map(|name| {
            let node: repo_census::github::graphql::repository::RepositoryNode =
                serde_json::from_value(repo_node(name, false, &["infra-tools", "cli"])).unwrap();
            RepositoryDescriptor::try_from(node).unwrap()
        })
        .collect()
}

#[test]
fn test_json_report_written_to_file_is_lossless() {
    let dir = tempfile::TempDir::new().unwrap();
    let out_path = dir.path().join("report.json");

    let input = descriptors(&["alpha", "beta"]);
    let config = resolve_config(|raw| {
        raw.output_mode = Some("json".to_string());
        raw.out_file = Some(out_path.clone());
    });

    formatter::write_report(&input, &config).unwrap();

    let written = std::fs::read_to_string(&out_path).unwrap();
    let decoded: Vec<RepositoryDescriptor> = serde_json::from_str(&written).unwrap();
    assert_eq!(decoded, input);
}

#[test]
fn test_csv_report_written_to_file_has_header_and_rows() {
    let dir = tempfile::TempDir::new().unwrap();
    let out_path = dir.path().join("report.csv");

    let input = descriptors(&["alpha", "beta", "gamma"]);
    let config = resolve_config(|raw| {
        raw.output_mode = Some("csv".to_string());
        raw.out_file = Some(out_path.clone());
    });

    formatter::write_report(&input, &config).unwrap();

    let written = std::fs::read_to_string(&out_path).unwrap();
    let lines: Vec<&str> = written.lines().collect();

    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("Name,FullName,Description,"));
    assert!(lines[1].starts_with("alpha,octocat/alpha,"));
    assert!(lines[1].ends_with("infra-tools;cli"));
}

#[test]
fn test_unwritable_out_file_is_an_output_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let out_path = dir.path().join("missing-subdir").join("report.json");

    let config = resolve_config(|raw| {
        raw.output_mode = Some("json".to_string());
        raw.out_file = Some(out_path.clone());
    });

    let result = formatter::write_report(&[], &config);
    match result {
        Err(formatter::ProjectionError::Io(message)) => {
            assert!(message.contains("missing-subdir"))
        }
        other => panic!("expected Io error, got {:?}", other),
    }
}
