//! # Postboard - a GraphQL endpoint over a small social schema
//!
//! Users own posts, have at most one profile tied to a membership tier, and
//! can subscribe to other users. Everything is reachable through one GraphQL
//! endpoint: `POST /` with `{ query, variables }`, answered with
//! `{ data, errors? }`.
//!
//! ## Quick Start
//!
//! ```bash
//! # Write a config with a JSON data file
//! postboard init
//!
//! # Serve on 127.0.0.1:8000
//! postboard serve
//!
//! # Or run a single document from the shell
//! postboard mutate 'createUser(dto: { name: "Ann", balance: 0 }) { id }'
//! ```
//!
//! ## Modules
//!
//! - [`cli`]: Command-line interface definitions and handlers
//! - [`config`]: Configuration loading and management
//! - [`error`]: Error types and result aliases
//! - [`graphql`]: Schema, resolvers and HTTP endpoint
//! - [`model`]: Persisted rows and write payloads
//! - [`storage`]: The persistence collaborator and its in-memory implementation

/// Command-line interface definitions using clap.
pub mod cli;

/// Configuration loading and management.
///
/// Handles `.postboard.toml` files and project discovery.
pub mod config;

/// Error types and result aliases.
pub mod error;

/// GraphQL schema, resolvers and HTTP endpoint.
///
/// Provides the async-graphql schema and the axum router serving it.
pub mod graphql;

/// Persisted rows: users, posts, profiles, member types, subscriptions.
pub mod model;

/// Persistence layer used by the resolvers.
pub mod storage;

pub mod logging;
