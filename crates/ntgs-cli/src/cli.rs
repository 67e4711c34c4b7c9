use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// NTGS - Data conversion configuration for geological modelling
#[derive(Parser, Debug)]
#[command(name = "ntgs")]
#[command(about = "Map survey table columns onto the NTGS schema", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Show planned actions without executing them
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Minimum column match score (0 to 1)
    #[arg(long, global = true, value_parser = parse_threshold_arg)]
    pub threshold: Option<f64>,

    /// Match column names case-sensitively
    #[arg(long, global = true)]
    pub case_sensitive: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new NTGS workspace
    Init(InitArgs),

    /// List the configured data types
    Types,

    /// Show the fields of a data type
    Show(ShowArgs),

    /// Print a single field value
    Get(GetArgs),

    /// Set a single field value
    Set(SetArgs),

    /// Set several fields of one data type
    Update(UpdateArgs),

    /// Edit a data type field by field
    Edit(EditArgs),

    /// Suggest source columns for the column fields of a data type
    Match(MatchArgs),

    /// Select or clear the source layer of a data type
    Layer(LayerArgs),

    /// Restore built-in defaults
    Reset(ResetArgs),

    /// Export the configuration snapshot
    Export(ExportArgs),

    /// Show workspace status and settings
    Status,
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Workspace directory path (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Seed the session from an exported snapshot instead of the defaults
    #[arg(long, value_name = "FILE")]
    pub from: Option<PathBuf>,

    /// Force overwrite if workspace already exists
    #[arg(long)]
    pub force: bool,
}

#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Data type (defaults to the configured default data type)
    pub data_type: Option<String>,

    /// Show the built-in defaults instead of the session values
    #[arg(long)]
    pub defaults: bool,
}

#[derive(Parser, Debug)]
pub struct GetArgs {
    pub data_type: String,
    pub key: String,
}

#[derive(Parser, Debug)]
pub struct SetArgs {
    pub data_type: String,
    pub key: String,

    /// New value; list fields take comma separated text
    pub value: String,

    /// Parse VALUE as a JSON literal (number, array, null, ...)
    #[arg(long)]
    pub raw: bool,
}

#[derive(Parser, Debug)]
pub struct UpdateArgs {
    pub data_type: String,

    /// Assignments in KEY=VALUE form
    #[arg(required = true, value_name = "KEY=VALUE")]
    pub assignments: Vec<String>,
}

#[derive(Parser, Debug)]
pub struct EditArgs {
    /// Data type (defaults to the configured default data type)
    pub data_type: Option<String>,

    /// Columns of the source table, offered for column fields
    #[arg(long, value_delimiter = ',')]
    pub columns: Vec<String>,
}

#[derive(Parser, Debug)]
pub struct MatchArgs {
    pub data_type: String,

    /// Columns of the source table
    #[arg(long, required = true, value_delimiter = ',')]
    pub columns: Vec<String>,

    /// Store the best matches in the session
    #[arg(long)]
    pub apply: bool,
}

#[derive(Parser, Debug)]
pub struct LayerArgs {
    pub data_type: String,

    /// Layer identifier in the host project; omit to clear the selection
    pub layer_id: Option<String>,

    /// Display name of the layer (defaults to the identifier)
    #[arg(long)]
    pub name: Option<String>,
}

#[derive(Parser, Debug)]
pub struct ResetArgs {
    /// Data type to reset (resets everything if not specified)
    pub data_type: Option<String>,
}

#[derive(Parser, Debug)]
pub struct ExportArgs {
    /// Write to a file instead of standard output
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Export the manual conversion hand-off (layers and configuration)
    #[arg(long)]
    pub handoff: bool,
}

fn parse_threshold_arg(s: &str) -> Result<f64, String> {
    ntgs_core::config::parse_threshold(s).map_err(|e| e.to_string())
}
