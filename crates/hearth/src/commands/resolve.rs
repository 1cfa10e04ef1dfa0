//! `hearth resolve`: alias lookup, then the best-scoring candidate.

use serde::Serialize;

use hearth_core::{SelectOptions, select_entity_id};

use crate::cli::{GlobalOpts, ResolveArgs};
use crate::engine::Engine;
use crate::error::CliError;
use crate::output;

use super::domain_refs;

#[derive(Debug, Serialize)]
struct Resolution {
    text: String,
    entity_id: String,
    via: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    area: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<String>,
}

fn detail(r: &Resolution, color: bool) -> String {
    let mut lines = vec![
        format!("Entity:  {}", output::paint_id(&r.entity_id, color)),
        format!("Name:    {}", r.name.as_deref().unwrap_or("-")),
        format!("Area:    {}", r.area.as_deref().unwrap_or("-")),
        format!("State:   {}", r.state.as_deref().unwrap_or("-")),
        format!("Via:     {}", r.via),
    ];
    if r.name.is_none() {
        lines.push(output::paint_dim("(alias target is not in the registry)", color));
    }
    lines.join("\n")
}

pub fn handle(engine: &Engine, args: &ResolveArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let text = args.text.joined();
    let min_score = args.min_score.unwrap_or(engine.config.min_score);
    if !min_score.is_finite() || min_score < 0.0 {
        return Err(CliError::Validation {
            field: "min-score".into(),
            reason: format!("expected a non-negative number, got {min_score}"),
        });
    }

    let prefer = domain_refs(&args.prefer);
    let options = SelectOptions {
        preferred_domains: &prefer,
        limit: engine.config.candidate_limit,
        min_score,
    };

    let snapshot = engine.registry.snapshot();
    let aliases = engine.aliases.current();
    let entity_id = select_entity_id(&snapshot, &aliases, &text, &options)
        .ok_or_else(|| CliError::Unresolved { text: text.clone() })?;

    let via = if aliases.lookup(&text).is_some() {
        "alias"
    } else {
        "score"
    };
    let entity = snapshot.entity_by_id(&entity_id);
    let resolution = Resolution {
        via,
        name: entity.map(|e| e.name.clone()),
        area: entity.and_then(|e| e.area.clone()),
        state: entity.map(|e| e.state.clone()),
        entity_id,
        text,
    };

    let color = output::should_color(global.color);
    let out = output::render_single(
        global.output,
        &resolution,
        |r| detail(r, color),
        |r| r.entity_id.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
