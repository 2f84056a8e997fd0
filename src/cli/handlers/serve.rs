use anyhow::{Context, Result};
use colored::Colorize;
use std::net::{IpAddr, SocketAddr};

use crate::graphql::run_server;

use super::CommandContext;

pub fn handle_serve(ctx: CommandContext, host: Option<String>, port: Option<u16>) -> Result<()> {
    let host = host.unwrap_or_else(|| ctx.config.server.host.clone());
    let port = port.unwrap_or(ctx.config.server.port);
    let ip: IpAddr = host
        .parse()
        .with_context(|| format!("Invalid host address: {}", host))?;
    let addr = SocketAddr::new(ip, port);
    let playground = ctx.config.server.playground;

    let schema = ctx.schema()?;

    println!(
        "{} GraphQL endpoint on http://{}",
        "Starting".green(),
        addr
    );
    if playground {
        println!("GraphiQL: http://{}", addr);
    }
    match &ctx.data_file {
        Some(path) => println!("Data file: {}", path.display()),
        None => println!("{}", "No data file configured, state is in-memory only".yellow()),
    }

    tokio::runtime::Runtime::new()?.block_on(run_server(schema, addr, playground))?;
    Ok(())
}
