// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the foldrank command-line interface.
//!
//! Three subcommands: `fold` to see what a profile does to some text,
//! `profile` to show how a language resolves under the current settings, and
//! `search` to run the whole pipeline over a JSON file of documents.

pub mod display;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "foldrank",
    about = "Language-aware accent folding and bounded reranking",
    version
)]
pub struct Cli {
    /// Settings file (JSON). Defaults to $FOLDRANK_SETTINGS, then built-ins
    #[arg(short, long, global = true)]
    pub settings: Option<PathBuf>,

    /// More logging (-v debug, -vv trace). RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fold text with a language's profile
    Fold {
        /// Text to fold (reads stdin lines when omitted)
        text: Option<String>,

        /// Language code, or "auto" for the project default
        #[arg(short, long, default_value = "auto")]
        lang: String,
    },

    /// Show the resolved profile, stopwords and pool sizing for a language
    Profile {
        /// Language code, or "auto" for the project default
        #[arg(short, long, default_value = "auto")]
        lang: String,

        /// Page size used to compute the pool
        #[arg(long)]
        page_size: Option<usize>,

        /// Print JSON instead of the table view
        #[arg(long)]
        json: bool,
    },

    /// Search a JSON array of documents and show one reranked page
    Search {
        /// Path to a JSON file: [{"id", "title", "body"?, "url"?, "language"?}, ...]
        #[arg(short, long)]
        docs: PathBuf,

        /// Search query
        query: String,

        /// Language code, or "auto" for the project default
        #[arg(short, long, default_value = "auto")]
        lang: String,

        /// Zero-based page index
        #[arg(short, long, default_value = "0")]
        page: usize,

        /// Results per page (0 uses the configured page size)
        #[arg(long, default_value = "0")]
        page_size: usize,

        /// Print JSON instead of the table view
        #[arg(long)]
        json: bool,
    },
}
