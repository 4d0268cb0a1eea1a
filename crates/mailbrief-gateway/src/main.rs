use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

mod app;
mod dashboard;
mod http;

use dashboard::{Dashboard, GatewayBackend};
use mailbrief_core::config::MailbriefConfig;

#[derive(Parser)]
#[command(name = "mailbrief-gateway", version, about = "Relay messages to an automation webhook and browse its email summaries")]
struct Cli {
    /// Config file (default: $MAILBRIEF_CONFIG, then ./mailbrief.toml).
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP gateway (default).
    Serve,
    /// Send a message through a running gateway, then list summaries.
    Submit {
        message: String,
        /// Gateway base URL (default: the configured bind address).
        #[arg(long)]
        server: Option<String>,
    },
    /// List summaries from a running gateway.
    Summaries {
        #[arg(long)]
        server: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "mailbrief_gateway=info,mailbrief_webhook=info,mailbrief_core=info,tower_http=debug"
                    .into()
            }),
        )
        .init();

    let cli = Cli::parse();

    // load config: --config > MAILBRIEF_CONFIG > ./mailbrief.toml
    let config_path = cli.config.or_else(|| std::env::var("MAILBRIEF_CONFIG").ok());
    let config = MailbriefConfig::load(config_path.as_deref()).unwrap_or_else(|e| {
        tracing::warn!("Config load failed ({}), using defaults", e);
        MailbriefConfig::default()
    });

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::Submit { message, server } => {
            let dash = Dashboard::new(GatewayBackend::new(gateway_url(&config, server)));
            dash.set_draft(message);
            if let Err(alert) = dash.submit().await {
                eprintln!("{alert}");
                std::process::exit(1);
            }
            print!("{}", dashboard::render(&dash.snapshot().summaries));
            Ok(())
        }
        Command::Summaries { server } => {
            let dash = Dashboard::new(GatewayBackend::new(gateway_url(&config, server)));
            dash.mount().await;
            print!("{}", dashboard::render(&dash.snapshot().summaries));
            Ok(())
        }
    }
}

async fn serve(config: MailbriefConfig) -> anyhow::Result<()> {
    let addr: SocketAddr = config.listen_addr().parse()?;
    info!(
        submit_url = %config.webhook.submit_url,
        summaries_url = %config.webhook.summaries_url,
        "webhooks configured"
    );

    let webhook = mailbrief_webhook::HttpWebhookClient::new();
    let state = Arc::new(app::AppState::new(config, Box::new(webhook)));
    let router = app::build_router(state);

    info!("Mailbrief gateway listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("gateway stopped");
    Ok(())
}

fn gateway_url(config: &MailbriefConfig, server: Option<String>) -> String {
    server.unwrap_or_else(|| format!("http://{}", config.listen_addr()))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
}
