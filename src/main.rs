use anyhow::Context;
use clap::Parser;
use colored::*;
use devboard_server::api::{create_router, AppState};
use devboard_server::cli::Cli;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let cli = Cli::parse();

    println!("{}", "Devboard API Server".bold().green());
    println!("{}\n", "=".repeat(50).dimmed());

    let dashboard = cli.dashboard().context("Failed to build upstream clients")?;

    let status = |configured: bool| {
        if configured {
            "configured".green()
        } else {
            "not configured (serving empty data)".yellow()
        }
    };
    println!("GitHub: {}", status(dashboard.has_github()));
    println!("Vercel: {}", status(dashboard.has_vercel()));

    let app = create_router(AppState::new(dashboard), &cli.base_path);

    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Listening on http://{}", addr);
    println!("\nPress Ctrl+C to stop the server\n");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            println!("\n🛑 Shutting down server...");
        })
        .await
        .context("Server error")?;

    println!("✅ Server stopped");
    Ok(())
}
