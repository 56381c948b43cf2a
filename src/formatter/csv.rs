//! Flat CSV projection
//!
//! This projection is lossy: topics are collapsed into one `;`-joined
//! column, and the nested default-branch and license values are reduced to
//! the bare branch name and SPDX identifier. Use the JSON projection when
//! the full structure matters.

use crate::types::RepositoryDescriptor;

const HEADER: &str = "Name,FullName,Description,Visibility,IsPrivate,IsFork,Archived,Stars,UpdatedAt,CreatedAt,DefaultBranch,URL,SSHUrl,HomepageUrl,License,Topics";

/// Separator used to collapse the topic set into a single column
pub const TOPIC_SEPARATOR: char = ';';

/// Render the descriptor sequence as a CSV document, header row first,
/// one row per descriptor in sequence order.
pub fn render(descriptors: &[RepositoryDescriptor]) -> String {
    let mut output = String::new();
    output.push_str(HEADER);
    output.push('\n');

    for descriptor in descriptors {
        let topics = descriptor
            .topics
            .iter()
            .map(|topic| topic.as_str())
            .collect::<Vec<_>>()
            .join(&TOPIC_SEPARATOR.to_string());

        let fields = [
            descriptor.name.as_str().to_string(),
            descriptor.full_name.clone(),
            descriptor.description.clone().unwrap_or_default(),
            descriptor.visibility.to_string(),
            descriptor.is_private.to_string(),
            descriptor.is_fork.to_string(),
            descriptor.archived.to_string(),
            descriptor.stargazer_count.to_string(),
            descriptor.updated_at.to_rfc3339(),
            descriptor.created_at.to_rfc3339(),
            descriptor
                .default_branch
                .as_ref()
                .map(|branch| branch.as_str().to_string())
                .unwrap_or_default(),
            descriptor.url.to_string(),
            descriptor.ssh_url.clone(),
            descriptor.homepage_url.clone().unwrap_or_default(),
            descriptor
                .license
                .as_ref()
                .map(|license| license.as_str().to_string())
                .unwrap_or_default(),
            topics,
        ];

        let row = fields
            .iter()
            .map(|field| escape(field))
            .collect::<Vec<_>>()
            .join(",");
        output.push_str(&row);
        output.push('\n');
    }

    output
}

/// Quote a field when it contains a separator, quote, or line break;
/// embedded quotes are doubled.
fn escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        Branch, License, RepositoryName, RepositoryUrl, RepositoryVisibility, Topic,
    };
    use chrono::{TimeZone, Utc};

    fn descriptor() -> RepositoryDescriptor {
        RepositoryDescriptor {
            name: RepositoryName::from("sample"),
            full_name: "octocat/sample".to_string(),
            description: Some("tools, for \"infra\"".to_string()),
            homepage_url: Some("https://example.com".to_string()),
            topics: vec![Topic::from("infra-tools"), Topic::from("cli")],
            visibility: RepositoryVisibility::Public,
            is_private: false,
            is_fork: false,
            archived: false,
            url: RepositoryUrl::new("https://github.com/octocat/sample"),
            ssh_url: "git@github.com:octocat/sample.git".to_string(),
            created_at: Utc.with_ymd_and_hms(2023, 1, 10, 8, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 6, 1, 12, 30, 0).unwrap(),
            stargazer_count: 42,
            watchers_count: 7,
            open_issues_count: 3,
            default_branch: Some(Branch::new("main")),
            license: Some(License::new("MIT")),
        }
    }

    #[test]
    fn test_header_row_comes_first() {
        let output = render(&[]);
        assert_eq!(output.lines().next().unwrap(), HEADER);
        assert_eq!(output.lines().count(), 1);
    }

    #[test]
    fn test_row_flattens_nested_fields() {
        let output = render(&[descriptor()]);
        let row = output.lines().nth(1).unwrap();

        assert!(row.starts_with("sample,octocat/sample,"));
        assert!(row.contains(",main,"));
        assert!(row.contains(",MIT,"));
        assert!(row.ends_with("infra-tools;cli"));
    }

    #[test]
    fn test_embedded_separators_and_quotes_are_escaped() {
        let output = render(&[descriptor()]);
        let row = output.lines().nth(1).unwrap();
        assert!(row.contains(r#""tools, for ""infra""""#));
    }

    #[test]
    fn test_absent_nested_fields_render_empty() {
        let mut d = descriptor();
        d.default_branch = None;
        d.license = None;
        d.description = None;
        d.homepage_url = None;
        d.topics = Vec::new();

        let output = render(&[d]);
        let row = output.lines().nth(1).unwrap();
        let fields: Vec<&str> = row.split(',').collect();

        assert_eq!(fields[2], "", "description should be empty");
        assert_eq!(fields[10], "", "default branch should be empty");
        assert_eq!(fields[14], "", "license should be empty");
        assert_eq!(fields[15], "", "topics should be empty");
    }

    #[test]
    fn test_topics_round_trip_through_separator() {
        let topics = vec![Topic::from("infra-tools"), Topic::from("cli"), Topic::from("rust")];
        let mut d = descriptor();
        d.topics = topics.clone();

        let output = render(&[d]);
        let row = output.lines().nth(1).unwrap();
        let joined = row.rsplit(',').next().unwrap();

        let reconstructed: Vec<Topic> =
            joined.split(TOPIC_SEPARATOR).map(Topic::from).collect();
        assert_eq!(reconstructed, topics);
    }
}
