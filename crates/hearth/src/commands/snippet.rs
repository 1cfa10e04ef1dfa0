//! `hearth snippet`: the relevant-entities block for a planner.

use serde::Serialize;

use hearth_core::build_relevant_entities_snippet;

use crate::cli::{GlobalOpts, SnippetArgs};
use crate::engine::Engine;
use crate::error::CliError;
use crate::output;

#[derive(Debug, Serialize)]
struct SnippetView {
    text: String,
    snippet: String,
}

pub fn handle(engine: &Engine, args: &SnippetArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let mut options = engine.config.snippet_options();
    if let Some(limit) = args.limit {
        options.limit = limit;
    }

    let text = args.text.joined();
    let snapshot = engine.registry.snapshot();
    let view = SnippetView {
        snippet: build_relevant_entities_snippet(&snapshot, &text, &options),
        text,
    };

    let out = output::render_single(
        global.output,
        &view,
        |v| v.snippet.clone(),
        |v| v.snippet.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
