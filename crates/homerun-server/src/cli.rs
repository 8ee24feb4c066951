// Command-line surface. With no subcommand the binary serves queries over
// WebSocket; the other subcommands run a single query and print the JSON reply.

use clap::{Parser, Subcommand};

use crate::protocol::QueryRequest;

/// Home-run dashboard backend
#[derive(Parser, Debug)]
#[command(name = "homerun")]
#[command(about = "Serve home-run dashboard queries, or answer one from the shell")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Serve queries over WebSocket until Ctrl+C (the default)
    Serve,

    /// List every player in the dataset
    Players,

    /// Compare a player with the best-ranked player
    Compare {
        /// Player name; unquoted words are joined with spaces
        #[arg(required = true)]
        player: Vec<String>,
    },

    /// All chart data for a player
    Dashboard {
        /// Player name; unquoted words are joined with spaces
        #[arg(required = true)]
        player: Vec<String>,
    },
}

impl Cli {
    /// The one-shot query to run, or `None` when the server should start.
    pub fn query(&self) -> Option<QueryRequest> {
        match self.command.as_ref()? {
            Commands::Serve => None,
            Commands::Players => Some(QueryRequest::ListPlayers),
            Commands::Compare { player } => Some(QueryRequest::GetComparison {
                player: join_name(player),
            }),
            Commands::Dashboard { player } => Some(QueryRequest::GetDashboard {
                player: join_name(player),
            }),
        }
    }
}

fn join_name(words: &[String]) -> String {
    words.join(" ").trim().to_string()
}
