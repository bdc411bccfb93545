use anyhow::Context;
use clap::{Parser, Subcommand};
use entry_config::{load as load_config, SessionBackend};
use entry_identity::{EditRequest, IdentityService, LoginRequest, RegisterRequest};
use entry_runtime::{telemetry, IdentityRuntime};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "entry")]
#[command(about = "Register, log in and edit profiles against the Entry identity store")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account
    Register {
        username: String,
        password: String,
        nickname: String,
        #[arg(long, default_value = "")]
        profile_pic: String,
    },
    /// Log in and print the issued session id
    Login { username: String, password: String },
    /// Change nickname and profile picture
    Edit {
        username: String,
        #[arg(long, default_value = "")]
        nickname: String,
        #[arg(long, default_value = "")]
        profile_pic: String,
    },
    /// Resolve a session id to its username
    Whoami { session_id: String },
    /// Log in and resolve the new session in one process
    Session { username: String, password: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    telemetry::init_tracing().context("failed to initialise tracing")?;

    let config = load_config().context("failed to load configuration")?;
    let runtime = IdentityRuntime::initialise(&config)
        .await
        .context("failed to initialise identity runtime")?;

    if matches!(cli.command, Commands::Whoami { .. })
        && runtime.session_backend == SessionBackend::Memory
    {
        warn!("in-process session cache is empty at startup; use the redis backend to resolve sessions across runs");
    }

    run(&runtime.service, cli.command).await
}

async fn run(service: &IdentityService, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Register {
            username,
            password,
            nickname,
            profile_pic,
        } => {
            let request = RegisterRequest {
                username,
                password,
                nickname,
                profile_pic,
            };
            request.validate()?;
            let response = service.register(&request).await?;
            print_json(&response)?;
        }
        Commands::Login { username, password } => {
            let request = LoginRequest::new(username, password);
            request.validate()?;
            let response = service.login(&request).await?;
            print_json(&response)?;
        }
        Commands::Edit {
            username,
            nickname,
            profile_pic,
        } => {
            let request = EditRequest {
                username,
                nickname,
                profile_pic,
            };
            request.validate()?;
            let response = service.edit_profile(&request).await?;
            print_json(&response)?;
        }
        Commands::Whoami { session_id } => {
            let username = service.authenticate(&session_id).await?;
            println!("{username}");
        }
        Commands::Session { username, password } => {
            let request = LoginRequest::new(username, password);
            request.validate()?;
            let response = service.login(&request).await?;
            let resolved = service.authenticate(&response.session_id).await?;
            info!(username = %resolved, "session resolved");
            println!("{resolved}");
        }
    }
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    let rendered = serde_json::to_string(value).context("failed to encode response")?;
    println!("{rendered}");
    Ok(())
}
