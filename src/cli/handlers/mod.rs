mod init;
mod mutate;
mod query;
mod schema;
mod serve;

pub use init::handle_init;
pub use mutate::handle_mutate;
pub use query::handle_query;
pub use schema::handle_schema;
pub use serve::handle_serve;

use crate::config::PostboardConfig;
use crate::graphql::{GqlResponse, PostboardSchema, build_schema};
use crate::storage::InMemoryStore;
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;

/// Common context passed to all command handlers
pub struct CommandContext {
    pub config: PostboardConfig,
    pub data_file: Option<PathBuf>,
}

impl CommandContext {
    /// Resolve configuration from `--config` or by searching upward from the
    /// current directory. `data_file` from the command line wins over the file.
    pub fn load(config_path: Option<PathBuf>, data_file: Option<PathBuf>) -> Result<Self> {
        let (config, root) = match config_path {
            Some(path) => PostboardConfig::load(&path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => {
                let cwd = std::env::current_dir()?;
                PostboardConfig::discover(&cwd).context("Failed to load config")?
            }
        };
        let data_file = data_file.or_else(|| config.data_file(&root));
        Ok(Self { config, data_file })
    }

    pub fn open_store(&self) -> Result<InMemoryStore> {
        let store = match &self.data_file {
            Some(path) => InMemoryStore::open(path)
                .with_context(|| format!("Failed to open data file {}", path.display()))?,
            None => InMemoryStore::new(),
        };
        let seeded = store.seed_member_types(&self.config.member_types)?;
        if seeded > 0 {
            tracing::info!(count = seeded, "Seeded member types");
        }
        Ok(store)
    }

    pub fn schema(&self) -> Result<PostboardSchema> {
        Ok(build_schema(Arc::new(self.open_store()?)))
    }
}

/// Run a single document and print the envelope.
fn run_document(ctx: &CommandContext, document: String, variables: Option<String>) -> Result<()> {
    let schema = ctx.schema()?;

    let vars: async_graphql::Variables = if let Some(v) = variables {
        serde_json::from_str(&v).context("Invalid --variables JSON")?
    } else {
        async_graphql::Variables::default()
    };

    let request = async_graphql::Request::new(document).variables(vars);
    let response: GqlResponse =
        tokio::runtime::Runtime::new()?.block_on(crate::graphql::execute(&schema, request));

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
