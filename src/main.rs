use anyhow::Result;
use clap::Parser;

use postboard::cli::handlers::{
    CommandContext, handle_init, handle_mutate, handle_query, handle_schema, handle_serve,
};
use postboard::cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    postboard::logging::init(cli.verbose, cli.log_file.clone());

    let load = || CommandContext::load(cli.config.clone(), cli.data_file.clone());

    match cli.command {
        Commands::Init => handle_init(),
        Commands::Serve { host, port } => handle_serve(load()?, host, port),
        Commands::Query { query, variables } => handle_query(load()?, query, variables),
        Commands::Mutate {
            mutation,
            variables,
        } => handle_mutate(load()?, mutation, variables),
        Commands::Schema => handle_schema(load()?),
    }
}
