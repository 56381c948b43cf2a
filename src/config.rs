//! Query configuration resolution
//!
//! Validates and normalizes raw caller input into the immutable
//! [`QueryConfiguration`] that drives one pipeline run. Resolution is
//! purely structural: no network or filesystem access happens here, which
//! keeps every rule exhaustively unit-testable.

use std::path::PathBuf;
use std::str::FromStr;

use strum::{Display, EnumString};

use crate::types::{Owner, RepositoryVisibility};

/// Result cap applied when the caller does not supply one
pub const DEFAULT_RESULT_LIMIT: u32 = 100;

/// Target representation for the filtered descriptor sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OutputMode {
    #[default]
    Console,
    Json,
    Csv,
}

/// Case-insensitive substring matched against a repository's topic set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicFilter(String);

impl TopicFilter {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TopicFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Raw caller input before validation.
///
/// Mirrors the invocation surface one-to-one; enumerated values arrive as
/// plain strings so that rejection happens here, at the resolver boundary,
/// instead of inside the fetcher or a projection.
#[derive(Debug, Clone, Default)]
pub struct RawQueryInput {
    pub owner: String,
    pub limit: Option<i64>,
    pub visibility: Option<String>,
    pub include_forks: bool,
    pub source_only: bool,
    pub topic_filter: Option<String>,
    pub output_mode: Option<String>,
    pub out_file: Option<PathBuf>,
}

/// Validation failures, each naming the offending field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// `owner` is empty after trimming
    EmptyOwner,
    /// `limit` is not a positive integer
    InvalidLimit(i64),
    /// `visibility` is outside the enumerated set
    InvalidVisibility(String),
    /// `topics` is whitespace-only
    BlankTopicFilter,
    /// `output` is outside the enumerated set
    InvalidOutputMode(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyOwner => write!(f, "owner must not be empty"),
            Self::InvalidLimit(value) => {
                write!(f, "limit must be a positive integer, got {}", value)
            }
            Self::InvalidVisibility(value) => write!(
                f,
                "visibility must be one of public, private, internal; got '{}'",
                value
            ),
            Self::BlankTopicFilter => write!(f, "topics filter must not be blank"),
            Self::InvalidOutputMode(value) => write!(
                f,
                "output must be one of console, json, csv; got '{}'",
                value
            ),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Immutable configuration for one pipeline run
#[derive(Debug, Clone, PartialEq)]
pub struct QueryConfiguration {
    pub owner: Owner,
    pub limit: u32,
    pub visibility: Option<RepositoryVisibility>,
    pub include_forks: bool,
    pub source_only: bool,
    pub topic_filter: Option<TopicFilter>,
    pub output_mode: OutputMode,
    pub out_file: Option<PathBuf>,
}

impl QueryConfiguration {
    /// Validate raw input into a configuration, or fail naming the field.
    pub fn resolve(input: RawQueryInput) -> Result<Self, ValidationError> {
        let owner = input.owner.trim();
        if owner.is_empty() {
            return Err(ValidationError::EmptyOwner);
        }

        let limit = match input.limit {
            None => DEFAULT_RESULT_LIMIT,
            Some(value) => u32::try_from(value)
                .ok()
                .filter(|limit| *limit >= 1)
                .ok_or(ValidationError::InvalidLimit(value))?,
        };

        let visibility = input
            .visibility
            .map(|value| {
                RepositoryVisibility::from_str(value.trim())
                    .map_err(|_| ValidationError::InvalidVisibility(value))
            })
            .transpose()?;

        let topic_filter = input
            .topic_filter
            .map(|value| {
                if value.trim().is_empty() {
                    Err(ValidationError::BlankTopicFilter)
                } else {
                    Ok(TopicFilter(value))
                }
            })
            .transpose()?;

        let output_mode = input
            .output_mode
            .map(|value| {
                OutputMode::from_str(value.trim())
                    .map_err(|_| ValidationError::InvalidOutputMode(value))
            })
            .transpose()?
            .unwrap_or_default();

        Ok(QueryConfiguration {
            owner: Owner::new(owner),
            limit,
            visibility,
            include_forks: input.include_forks,
            source_only: input.source_only,
            topic_filter,
            output_mode,
            out_file: input.out_file,
        })
    }
}
