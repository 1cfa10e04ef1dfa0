// ── Entity resolution ──
//
// Tokenizer -> IDF table -> scorer -> candidate search -> selector, plus
// the alias table, conjunction splitter and planner snippet built on them.

pub mod alias;
pub mod idf;
pub mod score;
pub mod search;
pub mod select;
pub mod snippet;
pub mod split;
pub mod tokenize;

pub use alias::{AliasStore, AliasTable, DEFAULT_ALIAS_TTL};
pub use idf::TokenIdf;
pub use score::{ScoreOptions, score};
pub use search::{Candidate, FALLBACK_SCORE, SearchOptions, find_candidates};
pub use select::{SelectOptions, select_entity_id};
pub use snippet::{
    DEFAULT_SNIPPET_DOMAINS, DEFAULT_SNIPPET_LIMIT, DEFAULT_SNIPPET_PER_DOMAIN, SnippetOptions,
    build_relevant_entities_snippet, relevant_entities,
};
pub use split::split_targets;
pub use tokenize::{query_tokens, tokenize};
