//! Request extractors: token authentication and listing query parameters.

pub mod auth;
pub mod query;
