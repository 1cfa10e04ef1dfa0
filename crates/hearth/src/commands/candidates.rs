//! `hearth candidates`: the ranked list behind a resolution.

use serde::Serialize;
use tabled::Tabled;

use hearth_core::{Candidate, SearchOptions, find_candidates};

use crate::cli::{CandidatesArgs, GlobalOpts};
use crate::engine::Engine;
use crate::error::CliError;
use crate::output;

use super::domain_refs;

#[derive(Debug, Serialize)]
struct CandidateView {
    rank: usize,
    entity_id: String,
    name: String,
    domain: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    area: Option<String>,
    score: f64,
}

impl CandidateView {
    fn new(rank: usize, candidate: &Candidate) -> Self {
        let entity = candidate.entity();
        Self {
            rank,
            entity_id: entity.entity_id.clone(),
            name: entity.name.clone(),
            domain: entity.domain.clone(),
            area: entity.area.clone(),
            score: candidate.score(),
        }
    }
}

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct CandidateRow {
    #[tabled(rename = "#")]
    rank: usize,
    #[tabled(rename = "Entity")]
    entity_id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Area")]
    area: String,
    #[tabled(rename = "Score")]
    score: String,
}

impl From<&CandidateView> for CandidateRow {
    fn from(c: &CandidateView) -> Self {
        Self {
            rank: c.rank,
            entity_id: c.entity_id.clone(),
            name: c.name.clone(),
            area: c.area.clone().unwrap_or_default(),
            score: format!("{:.2}", c.score),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(engine: &Engine, args: &CandidatesArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let text = args.text.joined();
    let limit = args.limit.unwrap_or(engine.config.candidate_limit);
    if limit == 0 {
        return Err(CliError::Validation {
            field: "limit".into(),
            reason: "must be at least 1".into(),
        });
    }

    let prefer = domain_refs(&args.prefer);
    let only = domain_refs(&args.only);
    let options = SearchOptions {
        preferred_domains: &prefer,
        restrict_domains: &only,
    };

    let snapshot = engine.registry.snapshot();
    let views: Vec<CandidateView> = find_candidates(&snapshot, &text, limit, &options)
        .iter()
        .enumerate()
        .map(|(i, c)| CandidateView::new(i + 1, c))
        .collect();

    let out = output::render_list(
        global.output,
        &views,
        |c| CandidateRow::from(c),
        |c| c.entity_id.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
