//! `hearth tokens`: tokenizer output with the snapshot's IDF weights.

use serde::Serialize;
use tabled::Tabled;

use hearth_core::resolve::tokenize::is_stop_word;
use hearth_core::tokenize;

use crate::cli::{GlobalOpts, TextArgs};
use crate::engine::Engine;
use crate::error::CliError;
use crate::output;

#[derive(Debug, Serialize)]
struct TokenView {
    token: String,
    stop_word: bool,
    weight: f64,
    in_corpus: bool,
}

#[derive(Tabled)]
struct TokenRow {
    #[tabled(rename = "Token")]
    token: String,
    #[tabled(rename = "Stop")]
    stop: String,
    #[tabled(rename = "Weight")]
    weight: String,
    #[tabled(rename = "In registry")]
    in_corpus: String,
}

impl From<&TokenView> for TokenRow {
    fn from(t: &TokenView) -> Self {
        let mark = |b: bool| String::from(if b { "yes" } else { "" });
        Self {
            token: t.token.clone(),
            stop: mark(t.stop_word),
            weight: format!("{:.3}", t.weight),
            in_corpus: mark(t.in_corpus),
        }
    }
}

pub fn handle(engine: &Engine, args: &TextArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let snapshot = engine.registry.snapshot();
    let idf = snapshot.token_idf();

    let views: Vec<TokenView> = tokenize(&args.joined())
        .into_iter()
        .map(|token| TokenView {
            stop_word: is_stop_word(&token),
            weight: idf.weight(&token),
            in_corpus: idf.get(&token).is_some(),
            token,
        })
        .collect();

    let out = output::render_list(
        global.output,
        &views,
        |t| TokenRow::from(t),
        |t| t.token.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
