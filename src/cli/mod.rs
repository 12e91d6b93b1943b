//! CLI Module
//!
//! Command-line front-end over the edit session.

pub mod commands;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// surfmod - bulk surface preset editor for track surfaces.ini files
#[derive(Parser, Debug)]
#[command(name = "surfmod")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Which surfaces.ini to open.
#[derive(Args, Debug, Clone)]
pub struct Target {
    /// Game folder, tracks folder or track folder
    #[arg(required_unless_present = "file", conflicts_with = "file")]
    pub root: Option<PathBuf>,

    /// Track folder name (required with a multi-track root)
    #[arg(short, long, conflicts_with = "file")]
    pub track: Option<String>,

    /// Layout id (defaults to the first layout)
    #[arg(short, long, conflicts_with = "file")]
    pub layout: Option<String>,

    /// Open a surfaces.ini file directly
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List tracks and their layouts
    #[command(name = "scan")]
    Scan {
        /// Game folder, tracks folder or track folder
        root: PathBuf,

        /// Only show tracks whose name, id or tags contain this text
        #[arg(long)]
        filter: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// List the available surface presets
    #[command(name = "presets")]
    Presets,

    /// List the surface sections of a layout
    #[command(name = "show")]
    Show {
        #[command(flatten)]
        target: Target,
    },

    /// Apply a preset to surface sections and save
    #[command(name = "apply")]
    Apply {
        #[command(flatten)]
        target: Target,

        /// Preset id or code (see `presets`)
        #[arg(short, long)]
        preset: String,

        /// Section to rewrite, e.g. SURFACE_3 (repeatable)
        #[arg(short, long = "surface", required_unless_present = "all")]
        surfaces: Vec<String>,

        /// Rewrite every section
        #[arg(long, conflicts_with = "surfaces")]
        all: bool,

        /// Print the result instead of saving
        #[arg(long)]
        dry_run: bool,

        /// Do not emit ;ORIGINAL: copies of rewritten sections
        #[arg(long)]
        no_annotate: bool,
    },
}
