//! Persistence collaborator for the GraphQL resolvers.
//!
//! Resolvers only see the [`Store`] trait, shared as [`StoreHandle`]. Every
//! method is one data-access call; nothing here caches across calls.
//!
//! ## Components
//!
//! - [`Store`]: per-entity list / find / create / update / delete
//! - [`InMemoryStore`]: insertion-ordered tables with foreign key, uniqueness
//!   and cascade rules, optionally mirrored to a JSON snapshot file
//! - [`Snapshot`]: the on-disk shape of the whole data set

mod memory;
mod snapshot;

pub use memory::InMemoryStore;
pub use snapshot::Snapshot;

use crate::error::StoreResult;
use crate::model::{
    MemberType, MemberTypeId, NewPost, NewProfile, NewUser, Post, PostChanges, Profile,
    ProfileChanges, Subscription, User, UserChanges,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type StoreHandle = Arc<dyn Store>;

/// Unique lookup key for a profile.
#[derive(Debug, Clone, Copy)]
pub enum ProfileKey<'a> {
    Id(&'a str),
    UserId(&'a str),
}

#[async_trait]
pub trait Store: Send + Sync {
    async fn list_member_types(&self) -> StoreResult<Vec<MemberType>>;
    async fn find_member_type(&self, id: MemberTypeId) -> StoreResult<Option<MemberType>>;

    /// All posts, or only those written by `author_id`.
    async fn list_posts(&self, author_id: Option<&str>) -> StoreResult<Vec<Post>>;
    async fn find_post(&self, id: &str) -> StoreResult<Option<Post>>;
    async fn create_post(&self, data: NewPost) -> StoreResult<Post>;
    async fn update_post(&self, id: &str, changes: PostChanges) -> StoreResult<Post>;
    async fn delete_post(&self, id: &str) -> StoreResult<Post>;

    async fn list_profiles(&self) -> StoreResult<Vec<Profile>>;
    async fn find_profile(&self, key: ProfileKey<'_>) -> StoreResult<Option<Profile>>;
    async fn create_profile(&self, data: NewProfile) -> StoreResult<Profile>;
    async fn update_profile(&self, id: &str, changes: ProfileChanges) -> StoreResult<Profile>;
    async fn delete_profile(&self, id: &str) -> StoreResult<Profile>;

    async fn list_users(&self) -> StoreResult<Vec<User>>;
    async fn find_user(&self, id: &str) -> StoreResult<Option<User>>;
    async fn create_user(&self, data: NewUser) -> StoreResult<User>;
    async fn update_user(&self, id: &str, changes: UserChanges) -> StoreResult<User>;
    /// Removes the user together with its posts, profile and subscription edges.
    async fn delete_user(&self, id: &str) -> StoreResult<User>;

    /// Authors followed by `subscriber_id`.
    async fn list_authors_of(&self, subscriber_id: &str) -> StoreResult<Vec<User>>;
    /// Users following `author_id`.
    async fn list_subscribers_of(&self, author_id: &str) -> StoreResult<Vec<User>>;
    async fn create_subscription(&self, edge: Subscription) -> StoreResult<Subscription>;
    async fn delete_subscription(&self, edge: &Subscription) -> StoreResult<Subscription>;
}
