use std::net::SocketAddr;

use async_graphql::{ServerError, http::GraphiQLSource};
use async_graphql_axum::GraphQLRequest;
use axum::{
    Json, Router,
    extract::State,
    response::{Html, IntoResponse},
    routing::{MethodRouter, post},
};
use serde::Serialize;

use super::schema::PostboardSchema;

/// Response body of the endpoint.
///
/// `data` is always present (null when execution produced nothing);
/// `errors` only when something went wrong, copied from the executor as is.
#[derive(Debug, Serialize)]
pub struct GqlResponse {
    pub data: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ServerError>>,
}

impl From<async_graphql::Response> for GqlResponse {
    fn from(response: async_graphql::Response) -> Self {
        let data = match response.data {
            async_graphql::Value::Null => None,
            value => match value.into_json() {
                Ok(json) => Some(json),
                Err(e) => {
                    tracing::warn!(error = %e, "Result data is not representable as JSON");
                    None
                }
            },
        };
        let errors = (!response.errors.is_empty()).then_some(response.errors);
        Self { data, errors }
    }
}

/// Execute one request against the schema and shape the envelope.
pub async fn execute(schema: &PostboardSchema, request: async_graphql::Request) -> GqlResponse {
    let response = schema.execute(request).await;
    if !response.errors.is_empty() {
        tracing::debug!(errors = response.errors.len(), "Request finished with errors");
    }
    response.into()
}

/// `POST /` executes; `GET /` serves GraphiQL when `playground` is set.
pub fn router(schema: PostboardSchema, playground: bool) -> Router {
    let mut route: MethodRouter<PostboardSchema> = post(graphql_handler);
    if playground {
        route = route.get(graphiql);
    }
    Router::new().route("/", route).with_state(schema)
}

async fn graphql_handler(
    State(schema): State<PostboardSchema>,
    req: GraphQLRequest,
) -> Json<GqlResponse> {
    let request = req.into_inner();
    tracing::debug!(operation = ?request.operation_name, "Executing GraphQL request");
    Json(execute(&schema, request).await)
}

async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/").finish())
}

pub async fn run_server(schema: PostboardSchema, addr: SocketAddr, playground: bool) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "GraphQL endpoint listening");
    axum::serve(listener, router(schema, playground))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
