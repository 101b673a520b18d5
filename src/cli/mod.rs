pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "ladle")]
#[command(about = "Ladle - ingredient-based recipe search", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the search server
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long, env = "HOST")]
        host: Option<String>,
    },

    /// Search recipes on a running server
    Search {
        /// Ingredient keywords (space, comma, slash or dash separated)
        query: String,

        /// Result page to show
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },

    /// Download the recipe dataset to a local file
    Fetch {
        /// Output file path
        #[arg(short, long, default_value = "recipes.json")]
        output: String,
    },
}
