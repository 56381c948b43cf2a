//! Repository listing query construction and response node types
//!
//! The listing query is assembled dynamically because the push-down
//! predicates (visibility, fork exclusion, owner affiliation) are optional
//! GraphQL arguments: they are emitted only when the configuration asks
//! for them, so an unfiltered query stays identical to the service default.

use serde::{Deserialize, Serialize};

use crate::types::{Owner, RepositoryVisibility};

// GitHub caps topic connections at 100 entries per node
const TOPIC_PAGE_SIZE: u8 = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryListVariable {
    pub owner: Owner,
    pub limit: u32,
}

/// Build the repository listing query with the configured push-down filters.
///
/// `include_forks = false` becomes an `isFork: false` predicate and
/// `source_only` becomes `ownerAffiliations: [OWNER]`, both evaluated by
/// the service before transfer. The same predicates are re-applied
/// client-side by the filter pipeline, so correctness does not depend on
/// the push-down.
pub fn repository_list_query(
    visibility: Option<RepositoryVisibility>,
    include_forks: bool,
    source_only: bool,
) -> String {
    let mut connection_args = vec!["first: $limit".to_string()];

    if let Some(visibility) = visibility {
        connection_args.push(format!("visibility: {}", visibility.as_graphql()));
    }
    if !include_forks {
        connection_args.push("isFork: false".to_string());
    }
    if source_only {
        connection_args.push("ownerAffiliations: [OWNER]".to_string());
    }

    format!(
        r#"
        query($owner: String!, $limit: Int!) {{
            repositoryOwner(login: $owner) {{
                repositories({}) {{
                    nodes {{
                        name
                        nameWithOwner
                        description
                        visibility
                        isPrivate
                        isFork
                        isArchived
                        url
                        sshUrl
                        homepageUrl
                        createdAt
                        updatedAt
                        stargazerCount
                        watchers {{
                            totalCount
                        }}
                        issues(states: [OPEN]) {{
                            totalCount
                        }}
                        defaultBranchRef {{
                            name
                        }}
                        licenseInfo {{
                            spdxId
                        }}
                        repositoryTopics(first: {}) {{
                            nodes {{
                                topic {{
                                    name
                                }}
                            }}
                        }}
                    }}
                }}
            }}
        }}
    "#,
        connection_args.join(", "),
        TOPIC_PAGE_SIZE
    )
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryListResponse {
    pub repository_owner: Option<RepositoryOwnerNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryOwnerNode {
    pub repositories: RepositoryConnection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryConnection {
    pub nodes: Vec<RepositoryNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryNode {
    pub name: String,
    pub name_with_owner: String,
    pub description: Option<String>,
    pub visibility: String,
    pub is_private: bool,
    pub is_fork: bool,
    pub is_archived: bool,
    pub url: String,
    pub ssh_url: String,
    pub homepage_url: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub stargazer_count: u64,
    pub watchers: TotalCountNode,
    pub issues: TotalCountNode,
    pub default_branch_ref: Option<BranchRefNode>,
    pub license_info: Option<LicenseInfoNode>,
    pub repository_topics: TopicsConnection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalCountNode {
    pub total_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchRefNode {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseInfoNode {
    pub spdx_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicsConnection {
    pub nodes: Vec<TopicNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicNode {
    pub topic: TopicNameNode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicNameNode {
    pub name: String,
}
