//! Server binary for the Azure DevOps to Jira bridge.
//!
//! Receives Azure DevOps pull request service hooks and mirrors them into a
//! running comment on the Jira issue named in the pull request title.

use clap::Parser;
use devops_jira_bridge::{
    serve, Bridge, BridgeError, ConfigError, JiraConfig, Locale, DEFAULT_TIMEOUT_SECS,
};
use std::net::SocketAddr;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Azure DevOps to Jira bridge - Mirror pull request events into Jira comments.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to listen on.
    #[arg(long, env = "BRIDGE_LISTEN", default_value = "0.0.0.0:5000")]
    listen: SocketAddr,

    /// Jira base URL.
    #[arg(long, env = "JIRA_URL")]
    jira_url: String,

    /// Jira API token (or password when a username is set).
    #[arg(long, env = "JIRA_API_KEY", hide_env_values = true)]
    jira_api_key: String,

    /// Jira username; switches from Bearer to Basic authentication.
    #[arg(long, env = "JIRA_USERNAME")]
    jira_username: Option<String>,

    /// Jira request timeout in seconds.
    #[arg(long, env = "JIRA_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Custom User-Agent for Jira requests.
    #[arg(long, env = "JIRA_USER_AGENT")]
    user_agent: Option<String>,

    /// Replay Jira session and XSRF cookies on comment writes.
    #[arg(long, env = "JIRA_XSRF_SESSION")]
    xsrf_session: bool,

    /// Language of the comments written to Jira (pt-br, en).
    #[arg(long, env = "BRIDGE_LOCALE", default_value = "pt-br")]
    locale: Locale,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Values already present in the environment win over .env entries
    let _ = dotenvy::dotenv();

    // Initialize tracing
    init_tracing();

    // Both ring and aws-lc-rs end up in the dependency graph; pick one
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    // Parse arguments; missing configuration exits here
    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::from(0),
        Err(e) => {
            error!(error = %e, "Critical failure");
            ExitCode::from(2)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Sets up the global tracing subscriber with:
/// - Compact log formatting (single-line output)
/// - Log level filtering via `RUST_LOG` env var (defaults to "info")
fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Builds the Jira configuration from parsed arguments.
fn jira_config(args: &Args) -> Result<JiraConfig, ConfigError> {
    Ok(JiraConfig::new(&args.jira_url, args.jira_api_key.clone())?
        .with_username(args.jira_username.clone())
        .with_timeout_secs(args.timeout_secs)?
        .with_user_agent(args.user_agent.clone())
        .with_xsrf_session(args.xsrf_session))
}

/// Main execution logic.
async fn run(args: Args) -> Result<(), BridgeError> {
    let config = jira_config(&args)?;
    info!(
        jira_url = %config.base_url(),
        basic_auth = config.username().is_some(),
        timeout_secs = config.timeout().as_secs(),
        xsrf_session = config.xsrf_session(),
        "Loaded configuration"
    );

    let bridge = Bridge::new(config, args.locale)?;
    serve(args.listen, bridge).await
}
