//! Command dispatch: bridges CLI args -> engine calls -> output formatting.

pub mod candidates;
pub mod config_cmd;
pub mod detect;
pub mod resolve;
pub mod shell;
pub mod snippet;
pub mod tokens;

use crate::cli::{Command, GlobalOpts};
use crate::engine::Engine;
use crate::error::CliError;

/// Dispatch an engine-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, engine: Engine, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Resolve(args) => resolve::handle(&engine, &args, global),
        Command::Candidates(args) => candidates::handle(&engine, &args, global),
        Command::Tokens(args) => tokens::handle(&engine, &args, global),
        Command::Detect(args) => detect::handle(&engine, &args, global),
        Command::Snippet(args) => snippet::handle(&engine, &args, global),
        Command::Shell(args) => shell::handle(engine, &args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}

/// `--prefer light,switch` as the borrowed slice the resolver wants.
pub(crate) fn domain_refs(domains: &[String]) -> Vec<&str> {
    domains.iter().map(String::as_str).collect()
}
