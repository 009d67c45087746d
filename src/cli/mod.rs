//! Command line interface
//!
//! `serve` runs the web application; `forge` and `init` manage the database
//! from the terminal.

pub mod commands;
pub mod fakes;

use clap::{Parser, Subcommand};

pub use commands::{forge, init, ForgeOptions};

#[derive(Debug, Parser)]
#[command(name = "bluelog", about = "A personal blog engine", version)]
pub struct Cli {
    /// Configuration profile (development, testing, production);
    /// defaults to the BLUELOG_CONFIG environment variable
    #[arg(long, global = true)]
    pub profile: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the web server (the default)
    Serve,

    /// Drop all data and generate fake posts, categories, and comments
    Forge {
        /// Number of categories, including the default one
        #[arg(long, default_value_t = 10)]
        category: u32,

        /// Number of posts
        #[arg(long, default_value_t = 50)]
        post: u32,

        /// Number of reviewed visitor comments
        #[arg(long, default_value_t = 500)]
        comment: u32,
    },

    /// Create or update the administrator account
    Init {
        /// Administrator username
        #[arg(long)]
        username: Option<String>,

        /// Administrator password; prompted for when omitted
        #[arg(long)]
        password: Option<String>,
    },
}
