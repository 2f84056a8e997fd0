//! GraphQL schema, resolvers and HTTP endpoint for postboard.
//!
//! ## Usage
//!
//! ```bash
//! # Start the endpoint (POST / executes, GET / serves GraphiQL)
//! postboard serve --port 8000
//!
//! # Execute a query from the CLI
//! postboard query '{ users { id name posts { title } } }'
//!
//! # Execute a mutation from the CLI
//! postboard mutate 'createUser(dto: { name: "Ann", balance: 10 }) { id }'
//! ```
//!
//! ## Schema
//!
//! - **Queries**: `memberTypes`, `memberType`, `posts`, `post`, `profiles`,
//!   `profile`, `users`, `user`
//! - **Mutations**: `create*`, `change*`, `delete*` for users, posts and
//!   profiles; `subscribeTo`, `unsubscribeFrom`
//!
//! Relational fields (`User.posts`, `User.profile`, `User.userSubscribedTo`,
//! `User.subscribedToUser`, `Profile.memberType`) each issue their own store
//! call per parent; there is no batching layer.

mod scalar;
mod schema;
mod server;
mod types;

pub use scalar::Uuid;
pub use schema::{MutationRoot, PostboardSchema, QueryRoot, build_schema};
pub use server::{GqlResponse, execute, router, run_server};
pub use types::*;
