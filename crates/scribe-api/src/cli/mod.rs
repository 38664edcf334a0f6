//! CLI command definitions and dispatch for the `scribe` binary.
//!
//! Uses clap derive macros for argument parsing. The CLI follows a verb-noun
//! pattern (e.g., `scribe create group`, `scribe list posts`).

pub mod group;
pub mod post;
pub mod user;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Run and administer a Scribe blog.
#[derive(Parser)]
#[command(name = "scribe", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Default log filter for the chosen verbosity (`RUST_LOG` overrides it).
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 if self.quiet => "error",
            0 => "warn",
            1 => "info,scribe=debug",
            _ => "trace",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new resource.
    Create {
        #[command(subcommand)]
        resource: CreateResource,
    },

    /// Issue a fresh API token for a user (the old one stops working).
    Token {
        /// Username to issue the token for.
        username: String,
    },

    /// List resources.
    #[command(alias = "ls")]
    List {
        #[command(subcommand)]
        resource: ListResource,
    },

    /// Show a single post.
    Show {
        /// Post id.
        id: String,
    },

    /// Start the REST API server.
    Serve {
        /// Port to listen on (defaults to `server.port` in config.toml).
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (defaults to `server.host` in config.toml).
        #[arg(long)]
        host: Option<String>,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum CreateResource {
    /// Create a user and print their API token.
    User {
        /// Login name (letters, digits and @/./+/-/_).
        username: String,
    },

    /// Create a group posts can be published in.
    Group {
        /// Group title (prompted for when omitted).
        #[arg(long)]
        title: Option<String>,

        /// URL slug (derived from the title when omitted).
        #[arg(long)]
        slug: Option<String>,

        /// What the group is about.
        #[arg(long)]
        description: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ListResource {
    /// List all users.
    Users,

    /// List all groups.
    Groups,

    /// List posts, newest first, one page at a time.
    Posts {
        /// Only posts in the group with this slug.
        #[arg(long, conflicts_with = "author")]
        group: Option<String>,

        /// Only posts by this username.
        #[arg(long)]
        author: Option<String>,

        /// Page number (out of range values are clamped).
        #[arg(long)]
        page: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_list_posts_filters() {
        let cli = Cli::parse_from(["scribe", "list", "posts", "--group", "cats", "--page", "2"]);
        match cli.command {
            Commands::List {
                resource: ListResource::Posts { group, author, page },
            } => {
                assert_eq!(group.as_deref(), Some("cats"));
                assert!(author.is_none());
                assert_eq!(page.as_deref(), Some("2"));
            }
            _ => panic!("expected list posts"),
        }
    }

    #[test]
    fn verbosity_maps_to_filter() {
        assert_eq!(Cli::parse_from(["scribe", "--quiet", "list", "users"]).log_filter(), "error");
        assert_eq!(Cli::parse_from(["scribe", "list", "users"]).log_filter(), "warn");
        assert_eq!(Cli::parse_from(["scribe", "-vv", "list", "users"]).log_filter(), "trace");
    }
}
