//! CLI module for Trackcut
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config_initialization::ConfigLayer;

pub mod args;
pub mod commands;

/// Trackcut timeline editor
///
/// Upload video and audio files, cut and arrange their segments on a shared
/// timeline, and export the result.
#[derive(Parser, Debug)]
#[command(name = "trackcut")]
#[command(about = "Trackcut - cut, arrange and export video and audio segments")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to ./trackcut.toml when present)
    #[arg(long, global = true, env = "TRACKCUT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log output format (pretty, compact, json)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Directory backing the local object store
    #[arg(long, global = true)]
    pub storage_root: Option<PathBuf>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Flags that override configuration values
    pub fn config_overrides(&self) -> ConfigLayer {
        let output_dir = match &self.command {
            Commands::Edit(args) => args.output.clone(),
            _ => None,
        };

        ConfigLayer {
            log_level: self.log_level.clone(),
            log_format: self.log_format.clone(),
            storage_root: self.storage_root.clone(),
            output_dir,
            ..ConfigLayer::default()
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay an edit script and print the resulting timeline
    Edit(args::EditArgs),
    /// Print the duration of a media file
    Probe(args::ProbeArgs),
    /// Submit files and segment descriptors to the merge service
    Merge(args::MergeArgs),
    /// Call the audio-extraction endpoint
    ExtractAudio(args::ExtractAudioArgs),
    /// Manage objects in the local store
    #[command(subcommand)]
    Storage(args::StorageCommand),
}
