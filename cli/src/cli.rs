use std::path::PathBuf;

/// House election results CLI
#[derive(clap::Parser, Debug)]
#[command(name = "housesim", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Aggregate source results into winners, margins and seat shares
    Summary(SummaryArgs),

    /// Move votes between parties and recompute every result
    Redistribute(RedistributeArgs),

    /// Answer a question about the closest races
    Ask(AskArgs),
}

/// Serialization of a written report.
#[derive(clap::ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum Format { Csv, Json }

/// Which table of the result to emit.
#[derive(clap::ValueEnum, Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum View {
    /// Annotated candidate rows
    Table,
    /// One row per district race
    Races,
    /// Seats won per party
    #[default]
    Seats,
    /// Votes moved per race (redistribute only)
    Transfers,
}

/// Output options shared by every subcommand.
#[derive(clap::Args, Debug)]
pub struct OutputArgs {
    /// Output file, defaults to stdout
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Output format, defaults to the output file extension or csv
    #[arg(short, long, value_enum)]
    pub format: Option<Format>,
}

#[derive(clap::Args, Debug)]
pub struct SummaryArgs {
    /// Source results file (nested per-state JSON)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub source: PathBuf,

    #[arg(long, value_enum, default_value_t)]
    pub view: View,

    #[command(flatten)]
    pub out: OutputArgs,
}

#[derive(clap::Args, Debug)]
pub struct RedistributeArgs {
    /// Source results file (nested per-state JSON)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub source: PathBuf,

    /// Party whose votes are moved (repeatable)
    #[arg(long = "from", value_name = "PARTY", required_unless_present = "request")]
    pub from_parties: Vec<String>,

    /// Party receiving the votes
    #[arg(long = "to", value_name = "PARTY", required_unless_present = "request")]
    pub to_party: Option<String>,

    /// Restrict to one state
    #[arg(long)]
    pub state: Option<String>,

    /// Restrict to one district
    #[arg(long)]
    pub district: Option<String>,

    /// JSON request file { fromParties, toParty, state?, district? }
    #[arg(long, value_hint = clap::ValueHint::FilePath, conflicts_with_all = ["from_parties", "to_party", "state", "district"])]
    pub request: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t)]
    pub view: View,

    #[command(flatten)]
    pub out: OutputArgs,
}

#[derive(clap::Args, Debug)]
pub struct AskArgs {
    /// Source results file (nested per-state JSON)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub source: PathBuf,

    /// Free-text question, e.g. "which 3 districts had the closest races?"
    #[arg(required = true, num_args = 1..)]
    pub question: Vec<String>,

    #[command(flatten)]
    pub out: OutputArgs,
}
