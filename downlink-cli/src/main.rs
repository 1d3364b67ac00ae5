//! Downlink CLI
//!
//! Runs the download redirect service and offers one-shot upstream queries
//! for operators.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use downlink_api::{ApiServer, ServiceConfig};
use downlink_upstream::{UpstreamClient, UpstreamConfig};

/// Downlink - download redirects and cached release info
#[derive(Parser)]
#[command(name = "downlink")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3105")]
        port: u16,
        /// Bind address
        #[arg(short, long, default_value = "0.0.0.0")]
        bind: String,
    },

    /// Print the latest version string
    Version {
        /// Base URL of the download site
        #[arg(long, env = "DOWNLINK_BASE_URL")]
        base_url: Option<String>,
    },

    /// Show the latest release and its assets
    Release {
        /// REST API root for releases and commits
        #[arg(long, env = "DOWNLINK_API_URL")]
        api_url: Option<String>,
    },

    /// List recent commits
    Commits {
        /// Number of commits to request (clamped upstream to 1..=100)
        #[arg(short, long, default_value = "10")]
        limit: u32,
        /// REST API root for releases and commits
        #[arg(long, env = "DOWNLINK_API_URL")]
        api_url: Option<String>,
    },

    /// Resolve a platform to its download URL
    Resolve {
        /// Platform identifier (android, linux, mac, windows)
        platform: String,
        /// REST API root for releases and commits
        #[arg(long, env = "DOWNLINK_API_URL")]
        api_url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose { "debug" } else { "info" };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Serve { port, bind } => cmd_serve(port, &bind).await,
        Commands::Version { base_url } => cmd_version(base_url).await,
        Commands::Release { api_url } => cmd_release(api_url).await,
        Commands::Commits { limit, api_url } => cmd_commits(limit, api_url).await,
        Commands::Resolve { platform, api_url } => cmd_resolve(&platform, api_url).await,
    }
}

fn client_with(base_url: Option<String>, api_url: Option<String>) -> UpstreamClient {
    let mut config = UpstreamConfig::default();
    if let Some(url) = base_url {
        config.base_url = url;
    }
    if let Some(url) = api_url {
        config.api_url = url;
    }
    UpstreamClient::with_config(config)
}

fn spinner(message: &'static str) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(80));
    Ok(pb)
}

/// Run the HTTP server
async fn cmd_serve(port: u16, bind: &str) -> Result<()> {
    println!("{}", "🚀 Starting downlink server...".cyan().bold());
    println!("   {} http://{}:{}", "Listening on:".green(), bind, port);
    println!("   {} http://{}:{}/health", "Health check:".dimmed(), bind, port);
    println!("\n   Press Ctrl+C to stop.\n");

    let config = ServiceConfig::from_env();
    let server = ApiServer::new(config);

    let addr: SocketAddr = format!("{}:{}", bind, port).parse()?;
    server.run(addr).await?;

    Ok(())
}

/// Print the latest version string
async fn cmd_version(base_url: Option<String>) -> Result<()> {
    let client = client_with(base_url, None);

    let pb = spinner("Fetching latest version...")?;
    let version = client
        .fetch_version()
        .await
        .context("Failed to fetch latest version")?;
    pb.finish_and_clear();

    println!("{}", version);
    Ok(())
}

/// Show the latest release and its assets
async fn cmd_release(api_url: Option<String>) -> Result<()> {
    let client = client_with(None, api_url);

    let pb = spinner("Fetching latest release...")?;
    let release = client
        .fetch_latest_release()
        .await
        .context("Failed to fetch latest release")?;
    pb.finish_and_clear();

    println!("{} {}", "📦 Release:".cyan().bold(), release.tag_name);
    if let Some(name) = &release.name {
        println!("   {} {}", "Title:".dimmed(), name);
    }
    if let Some(published) = release.published_at {
        println!("   {} {}", "Published:".dimmed(), published);
    }
    if let Some(url) = &release.html_url {
        println!("   {} {}", "Page:".dimmed(), url);
    }

    if release.assets.is_empty() {
        println!("\n{}", "No assets attached.".yellow());
    } else {
        println!("\n{}", "Assets:".yellow().bold());
        for asset in &release.assets {
            println!(
                "   {} {} ({} bytes, {} downloads)",
                "•".green(),
                asset.name,
                asset.size,
                asset.download_count
            );
            println!("     {}", asset.download_url.dimmed());
        }
    }

    Ok(())
}

/// List recent commits
async fn cmd_commits(limit: u32, api_url: Option<String>) -> Result<()> {
    let client = client_with(None, api_url);

    let pb = spinner("Fetching recent commits...")?;
    let commits = client
        .fetch_commits(limit)
        .await
        .context("Failed to fetch commits")?;
    pb.finish_and_clear();

    if commits.is_empty() {
        println!("{}", "No commits returned.".yellow());
        return Ok(());
    }

    for commit in &commits {
        println!(
            "{} {} {}",
            commit.short_sha().yellow(),
            commit.author_name().green(),
            commit.summary()
        );
    }

    Ok(())
}

/// Resolve a platform to its download URL
async fn cmd_resolve(platform: &str, api_url: Option<String>) -> Result<()> {
    let client = client_with(None, api_url);

    let pb = spinner("Resolving download...")?;
    let release = client
        .fetch_latest_release()
        .await
        .context("Failed to fetch latest release")?;
    let asset = release.asset_for_platform(platform)?;
    pb.finish_and_clear();

    println!("{} {}", "✅ Resolved:".green().bold(), asset.name);
    println!("   {} {}", "Release:".dimmed(), release.tag_name);
    println!("   {} {}", "URL:".dimmed(), asset.download_url);

    Ok(())
}
