//! `hearth detect`: route one utterance and show what would happen.

use hearth_core::Dispatch;

use crate::cli::{GlobalOpts, TextArgs};
use crate::engine::Engine;
use crate::error::CliError;
use crate::output;

/// Human-readable view of a dispatch, shared with `shell`.
pub fn detail(dispatch: &Dispatch, color: bool) -> String {
    let mut lines = Vec::new();
    match dispatch {
        Dispatch::StateQuery {
            matcher,
            query,
            entity,
        } => {
            lines.push(format!("Matcher: {matcher}"));
            lines.push(format!("Target:  {}", query.target));
            lines.push(format!("Entity:  {}", output::paint_id(&query.entity_id, color)));
            if let Some(entity) = entity {
                lines.push(format!("State:   {}", entity.state));
            }
        }
        Dispatch::Plan { matcher, plan } => {
            lines.push(format!("Matcher: {matcher}"));
            for action in &plan.actions {
                let mut line = format!(
                    "  {} {}",
                    action.service.qualified_for(&action.entity_id),
                    output::paint_id(&action.entity_id, color)
                );
                if let Some(pct) = action.data.and_then(|d| d.brightness_pct) {
                    line.push_str(&format!(" brightness_pct={pct}"));
                }
                lines.push(line);
            }
        }
        Dispatch::Fallback { snippet } => {
            lines.push(output::paint_dim("No detector matched. Planner context:", color));
            lines.push(snippet.clone());
            return lines.join("\n");
        }
    }
    lines.push(output::paint_ok(&dispatch.reply(), color));
    lines.join("\n")
}

pub fn handle(engine: &Engine, args: &TextArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let snapshot = engine.registry.snapshot();
    let aliases = engine.aliases.current();
    let ctx = engine.context(&snapshot, &aliases, &global.user);
    let dispatch = engine.router.dispatch(&args.joined(), &ctx);
    tracing::debug!(matcher = ?dispatch.matcher(), "dispatch complete");

    let color = output::should_color(global.color);
    let out = output::render_single(
        global.output,
        &dispatch,
        |d| detail(d, color),
        Dispatch::reply,
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
