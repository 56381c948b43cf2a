//! Client-side filter pipeline
//!
//! A pure, total function over the fetched descriptor sequence. Stages run
//! in a fixed order (visibility, fork inclusion, source ownership, topic)
//! and preserve relative order. The first three predicates are normally
//! already pushed down into the listing query; they are re-applied here so
//! the result does not depend on where filtering physically happened —
//! applying the pipeline twice yields the same sequence as applying it
//! once.

use crate::config::QueryConfiguration;
use crate::types::RepositoryDescriptor;

/// Apply the configured filters, preserving relative order.
pub fn apply(
    descriptors: Vec<RepositoryDescriptor>,
    config: &QueryConfiguration,
) -> Vec<RepositoryDescriptor> {
    descriptors
        .into_iter()
        .filter(|descriptor| retain(descriptor, config))
        .collect()
}

fn retain(descriptor: &RepositoryDescriptor, config: &QueryConfiguration) -> bool {
    if let Some(visibility) = config.visibility {
        if descriptor.visibility != visibility {
            return false;
        }
    }

    if !config.include_forks && descriptor.is_fork {
        return false;
    }

    if config.source_only && descriptor.owner_segment() != config.owner.as_str() {
        return false;
    }

    if let Some(topic_filter) = &config.topic_filter {
        // an empty topic set never matches a set filter
        if !descriptor
            .topics
            .iter()
            .any(|topic| topic.matches(topic_filter.as_str()))
        {
            return false;
        }
    }

    true
}
