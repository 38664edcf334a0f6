//! Scribe CLI and REST API entry point.
//!
//! Binary name: `scribe`
//!
//! Parses CLI arguments, initializes database and services, then dispatches
//! to the appropriate command handler or starts the REST API server.

mod cli;
mod http;
mod state;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands, CreateResource, ListResource};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    scribe_observe::tracing_setup::init_tracing(cli.log_filter(), cli.otel)?;

    let result = run(cli).await;
    scribe_observe::tracing_setup::shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "scribe", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init().await?;

    match cli.command {
        Commands::Create { resource } => match resource {
            CreateResource::User { username } => {
                cli::user::create_user(&state, username, cli.json).await?;
            }
            CreateResource::Group {
                title,
                slug,
                description,
            } => {
                cli::group::create_group(&state, title, slug, description, cli.json).await?;
            }
        },

        Commands::Token { username } => {
            cli::user::issue_token(&state, &username, cli.json).await?;
        }

        Commands::List { resource } => match resource {
            ListResource::Users => cli::user::list_users(&state, cli.json).await?,
            ListResource::Groups => cli::group::list_groups(&state, cli.json).await?,
            ListResource::Posts {
                group,
                author,
                page,
            } => {
                cli::post::list_posts(&state, group, author, page, cli.json).await?;
            }
        },

        Commands::Show { id } => {
            cli::post::show_post(&state, &id, cli.json).await?;
        }

        Commands::Serve { port, host } => {
            let host = host.unwrap_or_else(|| state.config.server.host.clone());
            let port = port.unwrap_or(state.config.server.port);
            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            tracing::info!(%addr, data_dir = %state.data_dir.display(), "serving");
            if !cli.quiet {
                println!(
                    "  {} Scribe API listening on {}",
                    console::style("⚡").bold(),
                    console::style(format!("http://{addr}/api/v1/")).cyan()
                );
                println!("  {}", console::style("Press Ctrl+C to stop").dim());
            }

            let app = http::router::build_app(state);
            http::router::serve(listener, app, shutdown_signal()).await?;

            if !cli.quiet {
                println!("\n  Server stopped.");
            }
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
