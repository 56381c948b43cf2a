//! Repository domain types
//!
//! This module contains the repository descriptor produced by the fetcher
//! and the newtype wrappers used throughout the pipeline. Descriptors are
//! ephemeral: the fetcher produces them, the filter pipeline and the
//! projections borrow them read-only, and nothing outlives the invocation.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::github::graphql::repository::RepositoryNode;

/// Owner name wrapper for type safety
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord,
)]
pub struct Owner(pub String);

impl Owner {
    pub fn new<T: Into<String>>(owner: T) -> Self {
        Self(owner.into())
    }

    /// Get the string value
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to String
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Owner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Owner {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Owner {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Repository name wrapper for type safety
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord,
)]
pub struct RepositoryName(pub String);

impl RepositoryName {
    pub fn new<T: Into<String>>(repo_name: T) -> Self {
        Self(repo_name.into())
    }

    /// Get the string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RepositoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RepositoryName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Repository URL wrapper for type safety
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepositoryUrl(pub String);

impl RepositoryUrl {
    pub fn new<T: Into<String>>(url: T) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RepositoryUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Default branch name, absent when the repository is empty
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Branch(pub String);

impl Branch {
    pub fn new<T: Into<String>>(branch: T) -> Self {
        Self(branch.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Branch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// SPDX license identifier, absent when the repository declares no license
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct License(pub String);

impl License {
    pub fn new<T: Into<String>>(spdx_id: T) -> Self {
        Self(spdx_id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for License {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Free-form categorization label attached to a repository
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Topic(String);

impl Topic {
    pub fn new<T: Into<String>>(name: T) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive substring match against the topic name
    pub fn matches(&self, needle: &str) -> bool {
        self.0.to_lowercase().contains(&needle.to_lowercase())
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Topic {
    fn from(s: &str) -> Self {
        Topic(s.to_string())
    }
}

/// Repository visibility as reported by GitHub.
///
/// Parses case-insensitively so it accepts both the lowercase CLI spelling
/// and the UPPERCASE GraphQL enum value.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum RepositoryVisibility {
    Public,
    Private,
    Internal,
}

impl RepositoryVisibility {
    /// GraphQL enum spelling for query arguments
    pub fn as_graphql(&self) -> &'static str {
        match self {
            Self::Public => "PUBLIC",
            Self::Private => "PRIVATE",
            Self::Internal => "INTERNAL",
        }
    }
}

/// One repository's metadata record as understood by the pipeline.
///
/// Produced by the fetcher from a single listing query, consumed read-only
/// by the filter pipeline and the output projections. Flag and timestamp
/// consistency is enforced at decode time, so downstream code can rely on
/// `is_private` implying a non-public visibility and on
/// `updated_at >= created_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryDescriptor {
    pub name: RepositoryName,
    pub full_name: String,
    pub description: Option<String>,
    pub homepage_url: Option<String>,
    pub topics: Vec<Topic>,
    pub visibility: RepositoryVisibility,
    pub is_private: bool,
    pub is_fork: bool,
    pub archived: bool,
    pub url: RepositoryUrl,
    pub ssh_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub stargazer_count: u64,
    pub watchers_count: u64,
    pub open_issues_count: u64,
    pub default_branch: Option<Branch>,
    pub license: Option<License>,
}

impl RepositoryDescriptor {
    /// Owner segment of the full name (`owner/name`)
    pub fn owner_segment(&self) -> &str {
        self.full_name
            .split_once('/')
            .map(|(owner, _)| owner)
            .unwrap_or(&self.full_name)
    }
}

impl TryFrom<RepositoryNode> for RepositoryDescriptor {
    type Error = anyhow::Error;

    fn try_from(node: RepositoryNode) -> Result<Self, Self::Error> {
        use anyhow::Context;

        let created_at = chrono::DateTime::parse_from_rfc3339(&node.created_at)
            .context("Failed to parse createdAt timestamp")?
            .with_timezone(&Utc);

        let updated_at = chrono::DateTime::parse_from_rfc3339(&node.updated_at)
            .context("Failed to parse updatedAt timestamp")?
            .with_timezone(&Utc);

        if updated_at < created_at {
            anyhow::bail!(
                "Repository {} reports updatedAt earlier than createdAt",
                node.name_with_owner
            );
        }

        let visibility = RepositoryVisibility::from_str(&node.visibility).with_context(|| {
            format!(
                "Unknown visibility value '{}' for repository {}",
                node.visibility, node.name_with_owner
            )
        })?;

        if node.is_private && visibility == RepositoryVisibility::Public {
            anyhow::bail!(
                "Repository {} reports isPrivate with public visibility",
                node.name_with_owner
            );
        }

        let topics = node
            .repository_topics
            .nodes
            .into_iter()
            .map(|topic_node| Topic::new(topic_node.topic.name))
            .collect();

        let default_branch = node
            .default_branch_ref
            .map(|branch_ref| Branch::new(branch_ref.name));

        // licenseInfo can be present with a null spdxId (custom licenses)
        let license = node
            .license_info
            .and_then(|license_info| license_info.spdx_id)
            .map(License::new);

        Ok(RepositoryDescriptor {
            name: RepositoryName::new(node.name),
            full_name: node.name_with_owner,
            description: node.description,
            homepage_url: node.homepage_url.filter(|url| !url.is_empty()),
            topics,
            visibility,
            is_private: node.is_private,
            is_fork: node.is_fork,
            archived: node.is_archived,
            url: RepositoryUrl::new(node.url),
            ssh_url: node.ssh_url,
            created_at,
            updated_at,
            stargazer_count: node.stargazer_count,
            watchers_count: node.watchers.total_count,
            open_issues_count: node.issues.total_count,
            default_branch,
            license,
        })
    }
}
