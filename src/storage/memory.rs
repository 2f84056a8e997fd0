use super::{ProfileKey, Snapshot, Store};
use crate::error::{StoreError, StoreResult};
use crate::model::{
    self, MemberType, MemberTypeId, NewPost, NewProfile, NewUser, Post, PostChanges, Profile,
    ProfileChanges, Subscription, User, UserChanges,
};
use async_trait::async_trait;
use indexmap::{IndexMap, IndexSet};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock, RwLockReadGuard};

#[derive(Debug, Clone, Default)]
struct Tables {
    member_types: IndexMap<MemberTypeId, MemberType>,
    users: IndexMap<String, User>,
    posts: IndexMap<String, Post>,
    profiles: IndexMap<String, Profile>,
    subscriptions: IndexSet<Subscription>,
}

impl Tables {
    fn from_snapshot(snapshot: Snapshot) -> Self {
        Self {
            member_types: snapshot
                .member_types
                .into_iter()
                .map(|m| (m.id, m))
                .collect(),
            users: snapshot
                .users
                .into_iter()
                .map(|u| (u.id.clone(), u))
                .collect(),
            posts: snapshot
                .posts
                .into_iter()
                .map(|p| (p.id.clone(), p))
                .collect(),
            profiles: snapshot
                .profiles
                .into_iter()
                .map(|p| (p.id.clone(), p))
                .collect(),
            subscriptions: snapshot.subscriptions.into_iter().collect(),
        }
    }

    fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            member_types: self.member_types.values().cloned().collect(),
            users: self.users.values().cloned().collect(),
            posts: self.posts.values().cloned().collect(),
            profiles: self.profiles.values().cloned().collect(),
            subscriptions: self.subscriptions.iter().cloned().collect(),
        }
    }

    fn require_user(&self, entity: &'static str, field: &'static str, id: &str) -> StoreResult<()> {
        if self.users.contains_key(id) {
            Ok(())
        } else {
            Err(StoreError::ForeignKey {
                entity,
                field,
                key: id.to_string(),
            })
        }
    }

    fn require_member_type(&self, id: MemberTypeId) -> StoreResult<()> {
        if self.member_types.contains_key(&id) {
            Ok(())
        } else {
            Err(StoreError::ForeignKey {
                entity: "Profile",
                field: "memberTypeId",
                key: id.to_string(),
            })
        }
    }

    fn users_by_id<'a>(&self, ids: impl Iterator<Item = &'a str>) -> Vec<User> {
        ids.filter_map(|id| self.users.get(id).cloned()).collect()
    }
}

/// Store kept in process memory.
///
/// Tables keep insertion order, so list queries return rows oldest first.
/// When opened with a data file, a write only becomes visible after the full
/// snapshot containing it has been persisted.
pub struct InMemoryStore {
    tables: RwLock<Tables>,
    data_file: Option<PathBuf>,
    /// Serializes writers so the snapshot can be written without holding `tables`.
    writer: Mutex<()>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            data_file: None,
            writer: Mutex::new(()),
        }
    }

    /// Open a store mirrored to `data_file`, loading it if it already exists.
    pub fn open(data_file: &Path) -> StoreResult<Self> {
        let tables = match Snapshot::read(data_file)? {
            Some(snapshot) => {
                tracing::info!(
                    path = %data_file.display(),
                    users = snapshot.users.len(),
                    posts = snapshot.posts.len(),
                    "Loaded snapshot"
                );
                Tables::from_snapshot(snapshot)
            }
            None => {
                tracing::info!(path = %data_file.display(), "No snapshot yet, starting empty");
                Tables::default()
            }
        };
        Ok(Self {
            tables: RwLock::new(tables),
            data_file: Some(data_file.to_path_buf()),
            writer: Mutex::new(()),
        })
    }

    pub fn data_file(&self) -> Option<&Path> {
        self.data_file.as_deref()
    }

    /// Insert membership tiers that are not present yet. Existing tiers are left untouched.
    pub fn seed_member_types(&self, member_types: &[MemberType]) -> StoreResult<usize> {
        self.write(|tables| {
            let mut inserted = 0;
            for member_type in member_types {
                if !tables.member_types.contains_key(&member_type.id) {
                    tables
                        .member_types
                        .insert(member_type.id, member_type.clone());
                    inserted += 1;
                }
            }
            Ok(inserted)
        })
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Tables>> {
        self.tables.read().map_err(|_| StoreError::Poisoned)
    }

    /// Apply `op` and, with a data file, persist the result before committing it.
    ///
    /// `op` runs on a scratch copy; if it or the snapshot write fails, memory
    /// is left as it was. Readers are only blocked for the final swap.
    fn write<T>(&self, op: impl FnOnce(&mut Tables) -> StoreResult<T>) -> StoreResult<T> {
        let Some(path) = &self.data_file else {
            let mut tables = self.tables.write().map_err(|_| StoreError::Poisoned)?;
            return op(&mut *tables);
        };

        let _writer = self.writer.lock().map_err(|_| StoreError::Poisoned)?;
        let mut scratch = self.read()?.clone();
        let value = op(&mut scratch)?;

        if let Err(e) = scratch.to_snapshot().write(path) {
            tracing::warn!(path = %path.display(), error = %e, "Failed to write snapshot");
            return Err(e);
        }

        *self.tables.write().map_err(|_| StoreError::Poisoned)? = scratch;
        Ok(value)
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Store for InMemoryStore {
    async fn list_member_types(&self) -> StoreResult<Vec<MemberType>> {
        Ok(self.read()?.member_types.values().cloned().collect())
    }

    async fn find_member_type(&self, id: MemberTypeId) -> StoreResult<Option<MemberType>> {
        Ok(self.read()?.member_types.get(&id).cloned())
    }

    async fn list_posts(&self, author_id: Option<&str>) -> StoreResult<Vec<Post>> {
        Ok(self
            .read()?
            .posts
            .values()
            .filter(|p| author_id.is_none_or(|a| p.author_id == a))
            .cloned()
            .collect())
    }

    async fn find_post(&self, id: &str) -> StoreResult<Option<Post>> {
        Ok(self.read()?.posts.get(id).cloned())
    }

    async fn create_post(&self, data: NewPost) -> StoreResult<Post> {
        self.write(|tables| {
            tables.require_user("Post", "authorId", &data.author_id)?;
            let post = Post::new(model::new_id(), data);
            tables.posts.insert(post.id.clone(), post.clone());
            Ok(post)
        })
    }

    async fn update_post(&self, id: &str, changes: PostChanges) -> StoreResult<Post> {
        self.write(|tables| {
            let post = tables
                .posts
                .get_mut(id)
                .ok_or_else(|| StoreError::not_found("Post", id))?;
            post.apply(changes);
            Ok(post.clone())
        })
    }

    async fn delete_post(&self, id: &str) -> StoreResult<Post> {
        self.write(|tables| {
            tables
                .posts
                .shift_remove(id)
                .ok_or_else(|| StoreError::not_found("Post", id))
        })
    }

    async fn list_profiles(&self) -> StoreResult<Vec<Profile>> {
        Ok(self.read()?.profiles.values().cloned().collect())
    }

    async fn find_profile(&self, key: ProfileKey<'_>) -> StoreResult<Option<Profile>> {
        let tables = self.read()?;
        Ok(match key {
            ProfileKey::Id(id) => tables.profiles.get(id).cloned(),
            ProfileKey::UserId(user_id) => tables
                .profiles
                .values()
                .find(|p| p.user_id == user_id)
                .cloned(),
        })
    }

    async fn create_profile(&self, data: NewProfile) -> StoreResult<Profile> {
        self.write(|tables| {
            tables.require_user("Profile", "userId", &data.user_id)?;
            tables.require_member_type(data.member_type_id)?;
            if tables.profiles.values().any(|p| p.user_id == data.user_id) {
                return Err(StoreError::UniqueViolation {
                    entity: "Profile",
                    key: format!("userId={}", data.user_id),
                });
            }
            let profile = Profile::new(model::new_id(), data);
            tables.profiles.insert(profile.id.clone(), profile.clone());
            Ok(profile)
        })
    }

    async fn update_profile(&self, id: &str, changes: ProfileChanges) -> StoreResult<Profile> {
        self.write(|tables| {
            if !tables.profiles.contains_key(id) {
                return Err(StoreError::not_found("Profile", id));
            }
            if let Some(member_type_id) = changes.member_type_id {
                tables.require_member_type(member_type_id)?;
            }
            let profile = tables
                .profiles
                .get_mut(id)
                .ok_or_else(|| StoreError::not_found("Profile", id))?;
            profile.apply(changes);
            Ok(profile.clone())
        })
    }

    async fn delete_profile(&self, id: &str) -> StoreResult<Profile> {
        self.write(|tables| {
            tables
                .profiles
                .shift_remove(id)
                .ok_or_else(|| StoreError::not_found("Profile", id))
        })
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        Ok(self.read()?.users.values().cloned().collect())
    }

    async fn find_user(&self, id: &str) -> StoreResult<Option<User>> {
        Ok(self.read()?.users.get(id).cloned())
    }

    async fn create_user(&self, data: NewUser) -> StoreResult<User> {
        self.write(|tables| {
            let user = User::new(model::new_id(), data);
            tables.users.insert(user.id.clone(), user.clone());
            Ok(user)
        })
    }

    async fn update_user(&self, id: &str, changes: UserChanges) -> StoreResult<User> {
        self.write(|tables| {
            let user = tables
                .users
                .get_mut(id)
                .ok_or_else(|| StoreError::not_found("User", id))?;
            user.apply(changes);
            Ok(user.clone())
        })
    }

    async fn delete_user(&self, id: &str) -> StoreResult<User> {
        self.write(|tables| {
            let user = tables
                .users
                .shift_remove(id)
                .ok_or_else(|| StoreError::not_found("User", id))?;
            tables.posts.retain(|_, p| p.author_id != id);
            tables.profiles.retain(|_, p| p.user_id != id);
            tables.subscriptions.retain(|s| !s.touches(id));
            Ok(user)
        })
    }

    async fn list_authors_of(&self, subscriber_id: &str) -> StoreResult<Vec<User>> {
        let tables = self.read()?;
        let ids = tables
            .subscriptions
            .iter()
            .filter(|s| s.subscriber_id == subscriber_id)
            .map(|s| s.author_id.as_str());
        Ok(tables.users_by_id(ids))
    }

    async fn list_subscribers_of(&self, author_id: &str) -> StoreResult<Vec<User>> {
        let tables = self.read()?;
        let ids = tables
            .subscriptions
            .iter()
            .filter(|s| s.author_id == author_id)
            .map(|s| s.subscriber_id.as_str());
        Ok(tables.users_by_id(ids))
    }

    async fn create_subscription(&self, edge: Subscription) -> StoreResult<Subscription> {
        self.write(|tables| {
            tables.require_user("Subscription", "subscriberId", &edge.subscriber_id)?;
            tables.require_user("Subscription", "authorId", &edge.author_id)?;
            if tables.subscriptions.contains(&edge) {
                return Err(StoreError::UniqueViolation {
                    entity: "Subscription",
                    key: edge.to_string(),
                });
            }
            tables.subscriptions.insert(edge.clone());
            Ok(edge)
        })
    }

    async fn delete_subscription(&self, edge: &Subscription) -> StoreResult<Subscription> {
        self.write(|tables| {
            if tables.subscriptions.shift_remove(edge) {
                Ok(edge.clone())
            } else {
                Err(StoreError::not_found("Subscription", edge.to_string()))
            }
        })
    }
}
