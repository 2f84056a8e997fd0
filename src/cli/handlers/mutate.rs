use anyhow::Result;

use super::{CommandContext, run_document};

pub fn handle_mutate(
    ctx: CommandContext,
    mutation: String,
    variables: Option<String>,
) -> Result<()> {
    // Auto-wrap in mutation { }
    let document = format!("mutation {{ {} }}", mutation);
    run_document(&ctx, document, variables)
}
