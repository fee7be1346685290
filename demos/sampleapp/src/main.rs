//! OAuth Sample Application Demo
//!
//! Loads the credentials, builds an authenticator client and shows the
//! cached bearer token:
//! 1. `status` rebuilds the client from the last recorded authentication
//! 2. `load --mode <mode>` builds a client for an explicit mode
//! 3. `save-token` records a token as if an authentication flow had just
//!    completed, so the next `status` picks it up
//!
//! Run with:
//!   cargo run -p oauth-sampleapp-demo -- status
//!   cargo run -p oauth-sampleapp-demo -- load --mode script
//!   cargo run -p oauth-sampleapp-demo -- save-token --mode installed-app --access-token abc

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use oauth_sampleapp::{AppConfig, AuthClient, AuthGrant, AuthMode, AuthStorage, SampleApp, Token};

/// OAuth sample application
#[derive(Parser, Debug)]
#[command(name = "sampleapp", version)]
#[command(about = "Load credentials, build an authenticator client and show the bearer token")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rebuild the client from the last recorded authentication
    Status,

    /// Build a client for an explicit mode
    Load {
        /// Authentication mode
        #[arg(long, short = 'm', value_enum)]
        mode: ModeArg,
    },

    /// Record a token as the result of a completed authentication
    SaveToken {
        /// Authentication mode the token was obtained with
        #[arg(long, short = 'm', value_enum)]
        mode: ModeArg,

        /// Access token
        #[arg(long)]
        access_token: String,

        /// Refresh token
        #[arg(long)]
        refresh_token: Option<String>,

        /// Seconds until the access token expires
        #[arg(long)]
        expires_in: Option<u64>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    InstalledApp,
    Userless,
    Script,
}

impl From<ModeArg> for AuthMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::InstalledApp => AuthMode::InstalledApp,
            ModeArg::Userless => AuthMode::Userless,
            ModeArg::Script => AuthMode::Script,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = AppConfig::from_env();

    if config.logging {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "oauth_sampleapp=debug".into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    let mut app = SampleApp::new(config);

    match args.command {
        Command::Status => status(&mut app),
        Command::Load { mode } => load(&mut app, mode.into()),
        Command::SaveToken {
            mode,
            access_token,
            refresh_token,
            expires_in,
        } => {
            let mut token = Token::new(access_token);
            token.refresh_token = refresh_token;
            if let Some(seconds) = expires_in {
                token = token.expiring_in(seconds);
            }
            save_token(&mut app, mode.into(), token)
        }
    }
}

fn status(app: &mut SampleApp) -> anyhow::Result<()> {
    match app.load_client(None).context("Failed to load client")? {
        Some(client) => print_client(client),
        None => {
            println!("Not authenticated.");
            println!();
            println!("Build a client with: sampleapp load --mode <installed-app|userless|script>");
            return Ok(());
        }
    }

    println!();
    print_bearer(app.bearer().as_ref());
    Ok(())
}

fn load(app: &mut SampleApp, mode: AuthMode) -> anyhow::Result<()> {
    let client = app
        .load_client(Some(mode))
        .context("Failed to load client")?
        .context("An explicit mode always yields a client")?;
    print_client(client);

    println!();
    print_bearer(app.bearer().as_ref());
    Ok(())
}

fn save_token(app: &mut SampleApp, mode: AuthMode, token: Token) -> anyhow::Result<()> {
    app.storage()
        .save(mode, &token)
        .context("Failed to save token")?;
    app.set_bearer(token);

    println!("✓ Token saved for mode {mode}");
    println!("  {}", app.config().storage_path.display());
    println!();
    print_bearer(app.bearer().as_ref());
    Ok(())
}

fn print_client(client: &AuthClient) {
    println!("Auth client");
    println!("  Mode:      {}", client.mode());
    match client.grant() {
        AuthGrant::InstalledApp {
            client_id,
            redirect_url,
        } => {
            println!("  Client ID: {client_id}");
            println!("  Redirect:  {redirect_url}");
        }
        AuthGrant::Userless { client_id } => {
            println!("  Client ID: {client_id}");
        }
        AuthGrant::Script {
            username,
            client_id,
            ..
        } => {
            println!("  Client ID: {client_id}");
            println!("  Username:  {username}");
        }
    }
    println!("  Scopes:    {}", client.scopes().join(" "));
    println!("  Base URL:  {}", client.transport().base_url());
}

fn print_bearer(token: Option<&Token>) {
    let Some(token) = token else {
        println!("No bearer token.");
        return;
    };

    let preview = if token.access_token.chars().count() > 12 {
        format!("{}...", token.access_token.chars().take(8).collect::<String>())
    } else {
        token.access_token.clone()
    };
    println!("Bearer token");
    println!("  Access:    {preview}");
    println!(
        "  Refresh:   {}",
        if token.refresh_token.is_some() { "yes" } else { "no" }
    );
    match token.remaining_validity() {
        Some(remaining) => println!("  Expires:   in {}s", remaining.as_secs()),
        None if token.is_expired() => println!("  Expires:   expired"),
        None => println!("  Expires:   unknown"),
    }
}
