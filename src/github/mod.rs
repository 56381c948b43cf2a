pub mod client;
pub mod error;
pub mod graphql;

pub use client::GitHubClient;
pub use error::FetchError;
