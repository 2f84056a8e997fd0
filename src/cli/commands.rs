use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "postboard")]
#[command(
    author,
    version,
    about = "A GraphQL endpoint for users, posts, profiles and subscriptions"
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file (searches upward for .postboard.toml by default)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// JSON snapshot file for the store (overrides config)
    #[arg(long, global = true, env = "POSTBOARD_DATA_FILE")]
    pub data_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Also write JSON logs to this file (rotated daily)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default .postboard.toml in the current directory
    Init,

    /// Start the GraphQL HTTP endpoint
    Serve {
        /// Address to bind (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Execute a GraphQL query
    Query {
        /// GraphQL query document
        query: String,

        /// Variables as JSON
        #[arg(long)]
        variables: Option<String>,
    },

    /// Execute a GraphQL mutation (automatically wraps in 'mutation { }')
    Mutate {
        /// Mutation body (without 'mutation' keyword)
        mutation: String,

        /// Variables as JSON
        #[arg(long)]
        variables: Option<String>,
    },

    /// Print the schema in SDL
    Schema,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_overrides() {
        let cli = Cli::parse_from(["postboard", "serve", "--port", "9000", "-v"]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Serve { host, port } => {
                assert_eq!(host, None);
                assert_eq!(port, Some(9000));
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn test_global_data_file_after_subcommand() {
        let cli = Cli::parse_from(["postboard", "query", "{ users { id } }", "--data-file", "db.json"]);
        assert_eq!(cli.data_file, Some(PathBuf::from("db.json")));
        assert!(matches!(cli.command, Commands::Query { .. }));
    }
}
