use async_graphql::{Context, EmptySubscription, Object, Schema};

use crate::model;
use crate::storage::{ProfileKey, StoreHandle};

use super::scalar::Uuid;
use super::types::*;

pub type PostboardSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Assemble the schema once; `store` is handed to every resolver through the context.
pub fn build_schema(store: StoreHandle) -> PostboardSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(store)
        .finish()
}

fn collect<T, U: From<T>>(rows: Vec<T>) -> Option<Vec<U>> {
    Some(rows.into_iter().map(U::from).collect())
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// List all membership tiers
    async fn member_types(
        &self,
        ctx: &Context<'_>,
    ) -> async_graphql::Result<Option<Vec<MemberType>>> {
        let rows = store(ctx)?.list_member_types().await.map_err(store_error)?;
        Ok(collect(rows))
    }

    /// Get a single membership tier by ID
    async fn member_type(
        &self,
        ctx: &Context<'_>,
        id: MemberTypeId,
    ) -> async_graphql::Result<Option<MemberType>> {
        let row = store(ctx)?
            .find_member_type(id.into())
            .await
            .map_err(store_error)?;
        Ok(row.map(Into::into))
    }

    /// List all posts
    async fn posts(&self, ctx: &Context<'_>) -> async_graphql::Result<Option<Vec<Post>>> {
        let rows = store(ctx)?.list_posts(None).await.map_err(store_error)?;
        Ok(collect(rows))
    }

    /// Get a single post by ID
    async fn post(&self, ctx: &Context<'_>, id: Uuid) -> async_graphql::Result<Option<Post>> {
        let row = store(ctx)?
            .find_post(id.as_str())
            .await
            .map_err(store_error)?;
        Ok(row.map(Into::into))
    }

    /// List all profiles
    async fn profiles(&self, ctx: &Context<'_>) -> async_graphql::Result<Option<Vec<Profile>>> {
        let rows = store(ctx)?.list_profiles().await.map_err(store_error)?;
        Ok(collect(rows))
    }

    /// Get a single profile by ID
    async fn profile(
        &self,
        ctx: &Context<'_>,
        id: Uuid,
    ) -> async_graphql::Result<Option<Profile>> {
        let row = store(ctx)?
            .find_profile(ProfileKey::Id(id.as_str()))
            .await
            .map_err(store_error)?;
        Ok(row.map(Into::into))
    }

    /// List all users
    async fn users(&self, ctx: &Context<'_>) -> async_graphql::Result<Option<Vec<User>>> {
        let rows = store(ctx)?.list_users().await.map_err(store_error)?;
        Ok(collect(rows))
    }

    /// Get a single user by ID
    async fn user(&self, ctx: &Context<'_>, id: Uuid) -> async_graphql::Result<Option<User>> {
        let row = store(ctx)?
            .find_user(id.as_str())
            .await
            .map_err(store_error)?;
        Ok(row.map(Into::into))
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Create a new post
    async fn create_post(
        &self,
        ctx: &Context<'_>,
        dto: CreatePostInput,
    ) -> async_graphql::Result<Option<Post>> {
        let post = store(ctx)?
            .create_post(dto.into())
            .await
            .map_err(store_error)?;
        tracing::debug!(id = %post.id, "Created post");
        Ok(Some(post.into()))
    }

    /// Create a new user
    async fn create_user(
        &self,
        ctx: &Context<'_>,
        dto: CreateUserInput,
    ) -> async_graphql::Result<Option<User>> {
        let user = store(ctx)?
            .create_user(dto.into())
            .await
            .map_err(store_error)?;
        tracing::debug!(id = %user.id, "Created user");
        Ok(Some(user.into()))
    }

    /// Create a profile for an existing user
    async fn create_profile(
        &self,
        ctx: &Context<'_>,
        dto: CreateProfileInput,
    ) -> async_graphql::Result<Option<Profile>> {
        let profile = store(ctx)?
            .create_profile(dto.into())
            .await
            .map_err(store_error)?;
        tracing::debug!(id = %profile.id, "Created profile");
        Ok(Some(profile.into()))
    }

    /// Delete a post
    async fn delete_post(&self, ctx: &Context<'_>, id: Uuid) -> async_graphql::Result<Option<bool>> {
        store(ctx)?
            .delete_post(id.as_str())
            .await
            .map_err(store_error)?;
        Ok(Some(true))
    }

    /// Delete a profile
    async fn delete_profile(
        &self,
        ctx: &Context<'_>,
        id: Uuid,
    ) -> async_graphql::Result<Option<bool>> {
        store(ctx)?
            .delete_profile(id.as_str())
            .await
            .map_err(store_error)?;
        Ok(Some(true))
    }

    /// Delete a user along with their posts, profile and subscriptions
    async fn delete_user(&self, ctx: &Context<'_>, id: Uuid) -> async_graphql::Result<Option<bool>> {
        store(ctx)?
            .delete_user(id.as_str())
            .await
            .map_err(store_error)?;
        Ok(Some(true))
    }

    /// Update the supplied fields of a post
    async fn change_post(
        &self,
        ctx: &Context<'_>,
        id: Uuid,
        dto: ChangePostInput,
    ) -> async_graphql::Result<Option<Post>> {
        let post = store(ctx)?
            .update_post(id.as_str(), dto.into())
            .await
            .map_err(store_error)?;
        Ok(Some(post.into()))
    }

    /// Update the supplied fields of a profile
    async fn change_profile(
        &self,
        ctx: &Context<'_>,
        id: Uuid,
        dto: ChangeProfileInput,
    ) -> async_graphql::Result<Option<Profile>> {
        let profile = store(ctx)?
            .update_profile(id.as_str(), dto.into())
            .await
            .map_err(store_error)?;
        Ok(Some(profile.into()))
    }

    /// Update the supplied fields of a user
    async fn change_user(
        &self,
        ctx: &Context<'_>,
        id: Uuid,
        dto: ChangeUserInput,
    ) -> async_graphql::Result<Option<User>> {
        let user = store(ctx)?
            .update_user(id.as_str(), dto.into())
            .await
            .map_err(store_error)?;
        Ok(Some(user.into()))
    }

    /// Make `userId` follow `authorId`
    async fn subscribe_to(
        &self,
        ctx: &Context<'_>,
        user_id: Uuid,
        author_id: Uuid,
    ) -> async_graphql::Result<Option<bool>> {
        let edge = model::Subscription::new(user_id.into_inner(), author_id.into_inner());
        store(ctx)?
            .create_subscription(edge)
            .await
            .map_err(store_error)?;
        Ok(Some(true))
    }

    /// Remove the `userId` -> `authorId` subscription
    async fn unsubscribe_from(
        &self,
        ctx: &Context<'_>,
        user_id: Uuid,
        author_id: Uuid,
    ) -> async_graphql::Result<Option<bool>> {
        let edge = model::Subscription::new(user_id.into_inner(), author_id.into_inner());
        store(ctx)?
            .delete_subscription(&edge)
            .await
            .map_err(store_error)?;
        Ok(Some(true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PostboardConfig;
    use crate::storage::InMemoryStore;
    use async_graphql::{Request, Variables};
    use serde_json::{Value, json};
    use std::sync::Arc;

    fn setup_schema() -> PostboardSchema {
        let store = InMemoryStore::new();
        store
            .seed_member_types(&PostboardConfig::default().member_types)
            .unwrap();
        build_schema(Arc::new(store))
    }

    async fn run(schema: &PostboardSchema, query: &str, variables: Value) -> Value {
        let request = Request::new(query).variables(Variables::from_json(variables));
        let response = schema.execute(request).await;
        serde_json::to_value(&response).unwrap()
    }

    async fn create_user(schema: &PostboardSchema, name: &str) -> String {
        let out = run(
            schema,
            "mutation($dto: CreateUserInput!) { createUser(dto: $dto) { id } }",
            json!({ "dto": { "name": name, "balance": 10.0 } }),
        )
        .await;
        out["data"]["createUser"]["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_sdl_names() {
        let sdl = setup_schema().sdl();
        assert!(sdl.contains("scalar UUID"));
        assert!(sdl.contains("enum MemberTypeId"));
        assert!(sdl.contains("userSubscribedTo: [User!]"));
        assert!(sdl.contains("user(id: UUID!): User"));
        assert!(sdl.contains("input ChangePostInput"));
        assert!(sdl.contains("Get a single user by ID"));
        assert!(sdl.contains("Delete a user along with their posts, profile and subscriptions"));
    }

    #[tokio::test]
    async fn test_member_types_seeded() {
        let schema = setup_schema();
        let out = run(
            &schema,
            "{ memberTypes { id discount postsLimitPerMonth } memberType(id: BUSINESS) { postsLimitPerMonth } }",
            json!({}),
        )
        .await;
        assert_eq!(out["data"]["memberTypes"][0]["id"], "BASIC");
        assert_eq!(out["data"]["memberType"]["postsLimitPerMonth"], 100);
    }

    #[tokio::test]
    async fn test_missing_user_is_null_without_errors() {
        let schema = setup_schema();
        let out = run(
            &schema,
            r#"{ user(id: "00000000-0000-0000-0000-000000000000") { id } }"#,
            json!({}),
        )
        .await;
        assert_eq!(out["data"]["user"], Value::Null);
        assert!(out.get("errors").is_none());
    }

    #[tokio::test]
    async fn test_profile_member_type_resolves() {
        let schema = setup_schema();
        let user_id = create_user(&schema, "Ann").await;
        let out = run(
            &schema,
            "mutation($dto: CreateProfileInput!) { createProfile(dto: $dto) { id memberType { id discount } } }",
            json!({ "dto": { "isMale": false, "yearOfBirth": 1991, "userId": user_id, "memberTypeId": "BASIC" } }),
        )
        .await;
        assert_eq!(out["data"]["createProfile"]["memberType"]["id"], "BASIC");
        assert_eq!(out["data"]["createProfile"]["memberType"]["discount"], 2.3);

        let out = run(
            &schema,
            "query($id: UUID!) { user(id: $id) { profile { yearOfBirth userId } } }",
            json!({ "id": user_id }),
        )
        .await;
        assert_eq!(out["data"]["user"]["profile"]["yearOfBirth"], 1991);
        assert_eq!(out["data"]["user"]["profile"]["userId"], user_id.as_str());
    }

    #[tokio::test]
    async fn test_change_missing_user_reports_not_found() {
        let schema = setup_schema();
        let out = run(
            &schema,
            r#"mutation { changeUser(id: "missing", dto: { name: "x" }) { id } }"#,
            json!({}),
        )
        .await;
        assert_eq!(out["data"]["changeUser"], Value::Null);
        assert_eq!(out["errors"][0]["path"][0], "changeUser");
        assert_eq!(out["errors"][0]["extensions"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_failed_field_does_not_abort_siblings() {
        let schema = setup_schema();
        let user_id = create_user(&schema, "Ann").await;
        let out = run(
            &schema,
            r#"mutation($id: UUID!) {
                bad: deletePost(id: "missing")
                good: changeUser(id: $id, dto: { balance: 1.5 }) { balance }
            }"#,
            json!({ "id": user_id }),
        )
        .await;
        assert_eq!(out["data"]["bad"], Value::Null);
        assert_eq!(out["data"]["good"]["balance"], 1.5);
        assert_eq!(out["errors"].as_array().unwrap().len(), 1);
    }
}
