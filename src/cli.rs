use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "componentforge")]
#[command(author, version, about = "Container component toolkit for ML pipelines")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// `name=value` bindings shared by `render` and `run`.
#[derive(Args, Debug, Default)]
pub struct BindingOpts {
    /// Bind an input artifact URI
    #[arg(long = "input", value_name = "NAME=URI")]
    pub inputs: Vec<String>,

    /// Bind an input inline value
    #[arg(long = "value", value_name = "NAME=TEXT")]
    pub values: Vec<String>,

    /// Bind an output artifact URI
    #[arg(long = "output", value_name = "NAME=URI")]
    pub outputs: Vec<String>,

    /// Set an execution property
    #[arg(long = "param", value_name = "NAME=VALUE")]
    pub params: Vec<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load a component document and display its interface
    Inspect {
        /// Component document (YAML or JSON)
        #[arg(required = true)]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a component document with every command entry normalized
    Normalize {
        /// Component document (YAML or JSON)
        #[arg(required = true)]
        file: PathBuf,
    },

    /// Print the container launch command with placeholders resolved
    Render {
        /// Component document (YAML or JSON)
        #[arg(required = true)]
        file: PathBuf,

        #[command(flatten)]
        bindings: BindingOpts,
    },

    /// Run a component in a container
    Run {
        /// Component document (YAML or JSON)
        #[arg(required = true)]
        file: PathBuf,

        #[command(flatten)]
        bindings: BindingOpts,

        /// Show what would be launched without executing
        #[arg(long)]
        dry_run: bool,

        /// Root directory for per-run temp files
        #[arg(long)]
        tmp_dir: Option<PathBuf>,

        /// Write the executor output as JSON to this file
        #[arg(long)]
        output_json: Option<PathBuf>,
    },

    /// Validate configuration file
    ValidateConfig {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
