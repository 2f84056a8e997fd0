use super::scalar::Uuid;
use crate::error::StoreError;
use crate::model;
use crate::storage::{ProfileKey, StoreHandle};
use async_graphql::{ComplexObject, Context, Enum, ErrorExtensions, InputObject, SimpleObject};

/// Fetch the store handle registered on the schema.
pub(crate) fn store<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a StoreHandle> {
    ctx.data::<StoreHandle>()
}

/// Lift a store failure into a resolver error carrying `extensions.code`.
pub(crate) fn store_error(e: StoreError) -> async_graphql::Error {
    e.extend()
}

#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug)]
pub enum MemberTypeId {
    Basic,
    Business,
}

impl From<model::MemberTypeId> for MemberTypeId {
    fn from(id: model::MemberTypeId) -> Self {
        match id {
            model::MemberTypeId::Basic => MemberTypeId::Basic,
            model::MemberTypeId::Business => MemberTypeId::Business,
        }
    }
}

impl From<MemberTypeId> for model::MemberTypeId {
    fn from(id: MemberTypeId) -> Self {
        match id {
            MemberTypeId::Basic => model::MemberTypeId::Basic,
            MemberTypeId::Business => model::MemberTypeId::Business,
        }
    }
}

#[derive(SimpleObject, Clone, Debug)]
pub struct MemberType {
    pub id: MemberTypeId,
    pub discount: f64,
    pub posts_limit_per_month: i32,
}

impl From<model::MemberType> for MemberType {
    fn from(m: model::MemberType) -> Self {
        Self {
            id: m.id.into(),
            discount: m.discount,
            posts_limit_per_month: m.posts_limit_per_month,
        }
    }
}

#[derive(SimpleObject, Clone, Debug)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author_id: Uuid,
}

impl From<model::Post> for Post {
    fn from(p: model::Post) -> Self {
        Self {
            id: p.id.into(),
            title: p.title,
            content: p.content,
            author_id: p.author_id.into(),
        }
    }
}

#[derive(SimpleObject, Clone, Debug)]
#[graphql(complex)]
pub struct Profile {
    pub id: Uuid,
    pub is_male: bool,
    pub year_of_birth: i32,
    pub user_id: Uuid,
    pub member_type_id: MemberTypeId,
}

#[ComplexObject]
impl Profile {
    async fn member_type(&self, ctx: &Context<'_>) -> async_graphql::Result<Option<MemberType>> {
        let member_type = store(ctx)?
            .find_member_type(self.member_type_id.into())
            .await
            .map_err(store_error)?;
        Ok(member_type.map(Into::into))
    }
}

impl From<model::Profile> for Profile {
    fn from(p: model::Profile) -> Self {
        Self {
            id: p.id.into(),
            is_male: p.is_male,
            year_of_birth: p.year_of_birth,
            user_id: p.user_id.into(),
            member_type_id: p.member_type_id.into(),
        }
    }
}

#[derive(SimpleObject, Clone, Debug)]
#[graphql(complex)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub balance: f64,
}

#[ComplexObject]
impl User {
    async fn posts(&self, ctx: &Context<'_>) -> async_graphql::Result<Option<Vec<Post>>> {
        let posts = store(ctx)?
            .list_posts(Some(self.id.as_str()))
            .await
            .map_err(store_error)?;
        Ok(Some(posts.into_iter().map(Into::into).collect()))
    }

    async fn profile(&self, ctx: &Context<'_>) -> async_graphql::Result<Option<Profile>> {
        let profile = store(ctx)?
            .find_profile(ProfileKey::UserId(self.id.as_str()))
            .await
            .map_err(store_error)?;
        Ok(profile.map(Into::into))
    }

    /// Authors this user follows.
    async fn user_subscribed_to(
        &self,
        ctx: &Context<'_>,
    ) -> async_graphql::Result<Option<Vec<User>>> {
        let authors = store(ctx)?
            .list_authors_of(self.id.as_str())
            .await
            .map_err(store_error)?;
        Ok(Some(authors.into_iter().map(Into::into).collect()))
    }

    /// Users following this user.
    async fn subscribed_to_user(
        &self,
        ctx: &Context<'_>,
    ) -> async_graphql::Result<Option<Vec<User>>> {
        let subscribers = store(ctx)?
            .list_subscribers_of(self.id.as_str())
            .await
            .map_err(store_error)?;
        Ok(Some(subscribers.into_iter().map(Into::into).collect()))
    }
}

impl From<model::User> for User {
    fn from(u: model::User) -> Self {
        Self {
            id: u.id.into(),
            name: u.name,
            balance: u.balance,
        }
    }
}

#[derive(InputObject)]
pub struct CreatePostInput {
    pub title: String,
    pub content: String,
    pub author_id: Uuid,
}

impl From<CreatePostInput> for model::NewPost {
    fn from(dto: CreatePostInput) -> Self {
        Self {
            title: dto.title,
            content: dto.content,
            author_id: dto.author_id.into_inner(),
        }
    }
}

#[derive(InputObject)]
pub struct CreateUserInput {
    pub name: String,
    pub balance: f64,
}

impl From<CreateUserInput> for model::NewUser {
    fn from(dto: CreateUserInput) -> Self {
        Self {
            name: dto.name,
            balance: dto.balance,
        }
    }
}

#[derive(InputObject)]
pub struct CreateProfileInput {
    pub is_male: bool,
    pub year_of_birth: i32,
    pub user_id: Uuid,
    pub member_type_id: MemberTypeId,
}

impl From<CreateProfileInput> for model::NewProfile {
    fn from(dto: CreateProfileInput) -> Self {
        Self {
            is_male: dto.is_male,
            year_of_birth: dto.year_of_birth,
            user_id: dto.user_id.into_inner(),
            member_type_id: dto.member_type_id.into(),
        }
    }
}

#[derive(InputObject)]
pub struct ChangePostInput {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl From<ChangePostInput> for model::PostChanges {
    fn from(dto: ChangePostInput) -> Self {
        Self {
            title: dto.title,
            content: dto.content,
        }
    }
}

#[derive(InputObject)]
pub struct ChangeProfileInput {
    pub is_male: Option<bool>,
    pub year_of_birth: Option<i32>,
    pub member_type_id: Option<MemberTypeId>,
}

impl From<ChangeProfileInput> for model::ProfileChanges {
    fn from(dto: ChangeProfileInput) -> Self {
        Self {
            is_male: dto.is_male,
            year_of_birth: dto.year_of_birth,
            member_type_id: dto.member_type_id.map(Into::into),
        }
    }
}

#[derive(InputObject)]
pub struct ChangeUserInput {
    pub name: Option<String>,
    pub balance: Option<f64>,
}

impl From<ChangeUserInput> for model::UserChanges {
    fn from(dto: ChangeUserInput) -> Self {
        Self {
            name: dto.name,
            balance: dto.balance,
        }
    }
}
