use crate::catalog::Category;
use crate::recommendation::Requirement as LibRequirement;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Markdown,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Requirement {
    /// Bidirectional, low-latency messaging
    Realtime,
    /// Classic request/response APIs
    RequestResponse,
    /// One-way server push
    Streaming,
    /// Typed remote procedure calls
    Rpc,
    /// Infer from the protocols already in use
    Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CategoryFilter {
    Realtime,
    RequestResponse,
    Streaming,
    Rpc,
    All,
}

#[derive(Parser, Debug)]
#[command(name = "protomap")]
#[command(about = "Communication protocol usage analyzer and recommender", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv); RUST_LOG overrides
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    /// Configuration file (defaults to the nearest .protomap.toml)
    #[arg(long, global = true, env = "PROTOMAP_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Detect protocols in a project and recommend an approach
    Analyze {
        /// Project directory or single file
        path: PathBuf,

        /// Communication requirement to rank for
        #[arg(short, long, value_enum, default_value = "auto")]
        requirement: Requirement,

        /// Output format (defaults to the configured format, then text)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List raw protocol detections
    Scan {
        /// Project directory or single file
        path: PathBuf,

        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Compare protocols side by side
    Compare {
        /// Protocol names (e.g. websocket "socket io" grpc)
        #[arg(required = true)]
        protocols: Vec<String>,

        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Show a migration guide between two protocols
    Migrate {
        /// Protocol migrating away from
        from: String,

        /// Protocol migrating to
        to: String,

        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// List known protocols
    List {
        /// Only show one category
        #[arg(short, long, value_enum, default_value = "all")]
        category: CategoryFilter,

        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Write a default .protomap.toml in the current directory
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },
}

impl From<OutputFormat> for crate::io::output::OutputFormat {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Json => crate::io::output::OutputFormat::Json,
            OutputFormat::Markdown => crate::io::output::OutputFormat::Markdown,
            OutputFormat::Text => crate::io::output::OutputFormat::Text,
        }
    }
}

impl From<Requirement> for LibRequirement {
    fn from(r: Requirement) -> Self {
        match r {
            Requirement::Realtime => LibRequirement::Category(Category::Realtime),
            Requirement::RequestResponse => LibRequirement::Category(Category::RequestResponse),
            Requirement::Streaming => LibRequirement::Category(Category::Streaming),
            Requirement::Rpc => LibRequirement::Category(Category::Rpc),
            Requirement::Auto => LibRequirement::Auto,
        }
    }
}

impl From<CategoryFilter> for Option<Category> {
    fn from(c: CategoryFilter) -> Self {
        match c {
            CategoryFilter::Realtime => Some(Category::Realtime),
            CategoryFilter::RequestResponse => Some(Category::RequestResponse),
            CategoryFilter::Streaming => Some(Category::Streaming),
            CategoryFilter::Rpc => Some(Category::Rpc),
            CategoryFilter::All => None,
        }
    }
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
