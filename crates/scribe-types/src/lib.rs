//! Shared domain types for Scribe.
//!
//! Users, groups and posts, the form descriptors used to edit posts, and
//! the error enums shared by every layer.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod config;
pub mod error;
pub mod form;
pub mod group;
pub mod post;
pub mod user;
