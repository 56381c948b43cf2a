//! JSON document projection
//!
//! The only lossless projection: the unsorted filtered sequence is
//! serialized as an array with every descriptor field preserved, nested
//! optional values included.

use crate::formatter::ProjectionError;
use crate::types::RepositoryDescriptor;

/// Render the descriptor sequence as a pretty-printed JSON array document.
pub fn render(descriptors: &[RepositoryDescriptor]) -> Result<String, ProjectionError> {
    let mut document = serde_json::to_string_pretty(descriptors)
        .map_err(|e| ProjectionError::Serialization(e.to_string()))?;
    document.push('\n');
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        Branch, License, RepositoryName, RepositoryUrl, RepositoryVisibility, Topic,
    };
    use chrono::{TimeZone, Utc};

    fn descriptor(name: &str) -> RepositoryDescriptor {
        RepositoryDescriptor {
            name: RepositoryName::from(name),
            full_name: format!("octocat/{}", name),
            description: Some("description".to_string()),
            homepage_url: None,
            topics: vec![Topic::from("cli")],
            visibility: RepositoryVisibility::Internal,
            is_private: true,
            is_fork: false,
            archived: true,
            url: RepositoryUrl::new(format!("https://github.com/octocat/{}", name)),
            ssh_url: format!("git@github.com:octocat/{}.git", name),
            created_at: Utc.with_ymd_and_hms(2023, 1, 10, 8, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 6, 1, 12, 30, 0).unwrap(),
            stargazer_count: 42,
            watchers_count: 7,
            open_issues_count: 3,
            default_branch: Some(Branch::new("develop")),
            license: Some(License::new("Apache-2.0")),
        }
    }

    #[test]
    fn test_round_trip_is_lossless() {
        let input = vec![descriptor("a"), descriptor("b")];
        let document = render(&input).unwrap();

        let decoded: Vec<RepositoryDescriptor> = serde_json::from_str(&document).unwrap();
        assert_eq!(decoded, input);
    }

    #[test]
    fn test_sequence_order_is_preserved_unsorted() {
        // newest-first sorting belongs to the console projection only
        let mut newer = descriptor("newer");
        newer.updated_at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let input = vec![descriptor("older"), newer];

        let document = render(&input).unwrap();
        let decoded: Vec<RepositoryDescriptor> = serde_json::from_str(&document).unwrap();
        assert_eq!(decoded[0].name.as_str(), "older");
        assert_eq!(decoded[1].name.as_str(), "newer");
    }

    #[test]
    fn test_empty_sequence_renders_empty_array() {
        assert_eq!(render(&[]).unwrap(), "[]\n");
    }
}
