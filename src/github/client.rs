use octocrab::Octocrab;
use tokio::time::Duration;
use tracing::{info, warn};

use crate::config::QueryConfiguration;
use crate::github::error::FetchError;
use crate::github::graphql::repository::{
    RepositoryListResponse, RepositoryListVariable, repository_list_query,
};
use crate::github::graphql::{GraphQLPayload, GraphQLQuery, GraphQLResponse};
use crate::types::RepositoryDescriptor;

/// Default request timeout for the listing query
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// GitHub caps GraphQL connection pages at 100 nodes
pub const MAX_REPOSITORY_PAGE_SIZE: u32 = 100;

fn missing_token_error() -> FetchError {
    FetchError::Unauthenticated(
        "no GitHub token available; set REPO_CENSUS_GITHUB_TOKEN or GITHUB_TOKEN".to_string(),
    )
}

/// Thin wrapper over octocrab issuing the repository listing query.
///
/// One invocation performs exactly one query; there is no pagination loop
/// and no retry, so every error surfaced here is terminal.
#[derive(Clone)]
pub struct GitHubClient {
    pub(crate) client: Octocrab,
}

impl GitHubClient {
    /// Create a client against the public GitHub API.
    ///
    /// The GraphQL API rejects anonymous callers, so a missing token fails
    /// here rather than as a confusing HTTP error later.
    pub fn new(token: Option<String>, timeout: Option<Duration>) -> Result<Self, FetchError> {
        let token = token.ok_or_else(missing_token_error)?;

        let timeout_duration = timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT);
        let read_write_timeout = std::cmp::max(timeout_duration, Duration::from_secs(1));

        let client = Octocrab::builder()
            .personal_token(token)
            .set_connect_timeout(Some(std::cmp::min(
                timeout_duration,
                Duration::from_secs(10),
            )))
            .set_read_timeout(Some(read_write_timeout))
            .set_write_timeout(Some(read_write_timeout))
            .build()
            .map_err(|e| FetchError::ClientConstruction(e.to_string()))?;

        Ok(Self { client })
    }

    /// Create a client against a non-default API endpoint.
    ///
    /// Used for GitHub Enterprise hosts and for tests running against a
    /// local mock server.
    pub fn with_base_uri(
        base_uri: impl AsRef<str>,
        token: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, FetchError> {
        let token = token.ok_or_else(missing_token_error)?;

        let timeout_duration = timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT);
        let read_write_timeout = std::cmp::max(timeout_duration, Duration::from_secs(1));

        let client = Octocrab::builder()
            .personal_token(token)
            .base_uri(base_uri.as_ref())
            .map_err(|e| FetchError::ClientConstruction(e.to_string()))?
            .set_connect_timeout(Some(std::cmp::min(
                timeout_duration,
                Duration::from_secs(10),
            )))
            .set_read_timeout(Some(read_write_timeout))
            .set_write_timeout(Some(read_write_timeout))
            .build()
            .map_err(|e| FetchError::ClientConstruction(e.to_string()))?;

        Ok(Self { client })
    }

    /// Fetch the repositories owned by the configured account.
    ///
    /// Issues one GraphQL listing query with the configured push-down
    /// predicates and decodes the response into descriptors. The page size
    /// is the configured limit clamped to the API page maximum; no further
    /// pages are requested.
    pub async fn list_repositories(
        &self,
        config: &QueryConfiguration,
    ) -> Result<Vec<RepositoryDescriptor>, FetchError> {
        let page_size = if config.limit > MAX_REPOSITORY_PAGE_SIZE {
            warn!(
                "limit {} exceeds the API page maximum, requesting {} repositories",
                config.limit, MAX_REPOSITORY_PAGE_SIZE
            );
            MAX_REPOSITORY_PAGE_SIZE
        } else {
            config.limit
        };

        let query = repository_list_query(
            config.visibility,
            config.include_forks,
            config.source_only,
        );
        let variables = RepositoryListVariable {
            owner: config.owner.clone(),
            limit: page_size,
        };

        let payload = GraphQLPayload {
            query: GraphQLQuery(query),
            variables: Some(variables),
        };

        let start_time = std::time::Instant::now();

        let response: GraphQLResponse<RepositoryListResponse> = self
            .client
            .graphql(&payload)
            .await
            .map_err(FetchError::from_octocrab_error)?;

        info!(
            "Repository listing for {} completed in {:?}",
            config.owner,
            start_time.elapsed()
        );

        if response.errors.as_deref().is_some_and(|e| !e.is_empty()) {
            return Err(FetchError::Request(response.error_messages()));
        }

        let data = response.data.ok_or_else(|| {
            FetchError::Decode("No data in GraphQL repository listing response".to_string())
        })?;

        let owner_node = data
            .repository_owner
            .ok_or_else(|| FetchError::OwnerNotFound(config.owner.to_string()))?;

        let mut descriptors = Vec::with_capacity(owner_node.repositories.nodes.len());
        for node in owner_node.repositories.nodes {
            let full_name = node.name_with_owner.clone();
            match RepositoryDescriptor::try_from(node) {
                Ok(descriptor) => descriptors.push(descriptor),
                Err(e) => {
                    warn!("Failed to convert repository {}: {}", full_name, e);
                    return Err(FetchError::Decode(format!("{}: {}", full_name, e)));
                }
            }
        }

        Ok(descriptors)
    }
}
