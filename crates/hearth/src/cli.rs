//! Clap derive structures for the `hearth` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// hearth -- resolve spoken device names against a smart-home registry
#[derive(Debug, Parser)]
#[command(
    name = "hearth",
    version,
    about = "Resolve smart-home device names and commands from the command line",
    long_about = "Scores free text against a cached smart-home entity registry, \
        applies curated aliases, and turns short commands into action plans.\n\n\
        Nothing is sent to the home-automation backend; plans are printed.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config file (defaults to the platform config directory)
    #[arg(long, env = "HEARTH_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Registry cache JSON (overrides registry_path)
    #[arg(long, short = 'r', env = "HEARTH_REGISTRY", global = true)]
    pub registry: Option<PathBuf>,

    /// Alias document, TOML or JSON (overrides alias_path)
    #[arg(long, short = 'a', env = "HEARTH_ALIASES", global = true)]
    pub aliases: Option<PathBuf>,

    /// User whose "last entity" memory pronouns refer to
    #[arg(long, short = 'u', env = "HEARTH_USER", default_value = "local", global = true)]
    pub user: String,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "HEARTH_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve text to a single entity id (alias first, then best match)
    #[command(alias = "r")]
    Resolve(ResolveArgs),

    /// List ranked candidates for text
    #[command(alias = "c")]
    Candidates(CandidatesArgs),

    /// Show how text is tokenized and weighted
    Tokens(TextArgs),

    /// Run the command detectors and print the resulting plan
    #[command(alias = "d")]
    Detect(TextArgs),

    /// Print the relevant-entities block a planner would receive
    Snippet(SnippetArgs),

    /// Read commands from stdin, one per line
    Shell(ShellArgs),

    /// Inspect or create the configuration file
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Argument Structs ─────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct TextArgs {
    /// Free text; multiple words need no quoting
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
}

impl TextArgs {
    pub fn joined(&self) -> String {
        self.text.join(" ")
    }
}

#[derive(Debug, Args)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub text: TextArgs,

    /// Domains that earn the preference bonus
    #[arg(long, short = 'p', value_delimiter = ',')]
    pub prefer: Vec<String>,

    /// Minimum score a fuzzy match must reach (overrides min_score)
    #[arg(long)]
    pub min_score: Option<f64>,
}

#[derive(Debug, Args)]
pub struct CandidatesArgs {
    #[command(flatten)]
    pub text: TextArgs,

    /// Maximum candidates (overrides candidate_limit)
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Domains that earn the preference bonus
    #[arg(long, short = 'p', value_delimiter = ',')]
    pub prefer: Vec<String>,

    /// Only consider these domains
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<String>,
}

#[derive(Debug, Args)]
pub struct SnippetArgs {
    #[command(flatten)]
    pub text: TextArgs,

    /// Overall entity cap (overrides snippet.limit)
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,
}

#[derive(Debug, Args)]
pub struct ShellArgs {
    /// Do not re-read the registry cache in the background
    #[arg(long)]
    pub no_refresh: bool,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration
    Show,
    /// Print the config file path
    Path,
    /// Write a config file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
