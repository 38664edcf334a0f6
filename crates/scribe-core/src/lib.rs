//! Business logic and repository trait definitions for Scribe.
//!
//! This crate defines the "ports" (repository traits) that the infrastructure
//! layer implements, plus pagination and post form validation. It depends
//! only on `scribe-types` -- never on `scribe-infra` or any database/IO crate.

pub mod form;
pub mod pagination;
pub mod repository;
pub mod service;

#[cfg(test)]
mod testing;
