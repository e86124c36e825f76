//! Command-line argument definitions

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Arguments for the edit command
#[derive(Args, Debug)]
pub struct EditArgs {
    /// Edit script (.json or .toml)
    #[arg(short, long)]
    pub script: PathBuf,

    /// Export the timeline after the script finishes
    #[arg(long)]
    pub export: bool,

    /// Directory for exported files
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Width of the rendered timeline, in characters
    #[arg(long, default_value_t = 60)]
    pub columns: usize,

    /// Print the final store snapshot as JSON instead of the timeline
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the probe command
#[derive(Args, Debug)]
pub struct ProbeArgs {
    /// Media file path
    #[arg(short, long)]
    pub input: PathBuf,
}

/// Arguments for the merge command
#[derive(Args, Debug)]
pub struct MergeArgs {
    /// Input video files, in file-index order
    #[arg(long = "video")]
    pub videos: Vec<PathBuf>,

    /// JSON array of {"fileIndex", "start", "end"}
    #[arg(long)]
    pub segments: Option<String>,
}

/// Arguments for the extract-audio command
#[derive(Args, Debug)]
pub struct ExtractAudioArgs {
    /// Video file the audio would be extracted from
    #[arg(short, long)]
    pub input: Option<PathBuf>,
}

/// Object store subcommands
#[derive(Subcommand, Debug)]
pub enum StorageCommand {
    /// Store a local file under the upload prefix
    Upload {
        #[arg(short, long)]
        input: PathBuf,
    },
    /// List object URLs under a prefix
    List {
        #[arg(short, long, default_value = "")]
        prefix: String,
    },
    /// Delete an object by URL
    Delete {
        #[arg(short, long)]
        url: String,
    },
}
