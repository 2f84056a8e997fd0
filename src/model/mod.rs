//! Persisted rows and write payloads.
//!
//! - [`User`]: account with a balance, owns posts and at most one profile
//! - [`Post`]: authored by a user
//! - [`Profile`]: one-to-one with a user, points at a [`MemberType`]
//! - [`MemberType`]: read-only membership tier, keyed by [`MemberTypeId`]
//! - [`Subscription`]: directed "subscriber follows author" edge

mod member_type;
mod post;
mod profile;
mod subscription;
mod user;

pub use member_type::{MemberType, MemberTypeId};
pub use post::{NewPost, Post, PostChanges};
pub use profile::{NewProfile, Profile, ProfileChanges};
pub use subscription::Subscription;
pub use user::{NewUser, User, UserChanges};

/// Generate a fresh row identifier.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
