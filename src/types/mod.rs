//! Core type system and domain definitions
//!
//! Central type definitions for the repo-census pipeline. Everything the
//! later stages consume is a strongly-typed wrapper over the raw service
//! response, validated once at the decode boundary.

pub mod repository;

pub use repository::*;
