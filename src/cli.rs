//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Search and download books from Flibusta mirrors.
///
/// Every operation races the same request across all known mirrors and
/// uses whichever answers first, so a blocked or slow mirror never
/// stalls the client.
#[derive(Parser, Debug)]
#[command(name = "flibusta")]
#[command(author, version, about)]
pub struct Args {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Catalogue operations.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search the catalogue by free-text query
    #[command(alias = "s")]
    Search {
        /// Title or author text to search for
        query: String,
    },

    /// Show the metadata page for one book
    #[command(alias = "i")]
    Info {
        /// Numeric book ID as shown in search results
        id: String,
    },

    /// Download one book and save it to disk
    #[command(alias = "g")]
    Get {
        /// Numeric book ID as shown in search results
        id: String,

        /// Book format to request (fb2, epub or mobi)
        #[arg(short, long, env = "FLIBUSTA_PREFERRED_FORMAT", default_value = "mobi")]
        format: String,

        /// Directory the file is saved into
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,
    },
}
