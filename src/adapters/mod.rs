//! Adapters Layer - Hexagonal Architecture Outer Ring
//!
//! Implements the port traits defined in `crate::ports` with concrete
//! backends. Each sub-module groups adapters by infrastructure concern.
//!
//! Adapter categories:
//! - `persistence`: In-memory and filesystem key-value stores

pub mod persistence;
