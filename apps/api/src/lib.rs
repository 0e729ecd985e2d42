//! Member Search API Library
//!
//! Dynamic, paginated member searches over a Postgres Member/Team schema:
//! optional filter predicates, a typed SELECT builder, and repository
//! adapters that return pages with total counts.

pub mod config;
pub mod domain;
pub mod infrastructure;
