//! `ciam` - command-line access to the CIAM service.
//!
//! ```text
//! ciam token
//! ciam me
//! ciam check <user|role|discordUser> <id> <flag>... [--missing] [--grant <flag>]...
//! ```

use std::process::ExitCode;
use std::str::FromStr;

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{error, info};

use ciam_client::{telemetry, CheckSubjectType, CiamClient, Lookup, PermissionCheckRequest};

/// Command-line access to the CIAM service.
///
/// Reads `CIAM_BASE_URL` and `CIAM_TOKEN` from the environment or `.env`.
#[derive(Parser, Debug)]
#[command(name = "ciam")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Report whether the configured token is valid
    Token,
    /// List the permissions granted to the token's user
    Me,
    /// Check whether a subject holds every given flag
    Check(CheckArgs),
}

#[derive(Args, Debug, PartialEq, Eq)]
struct CheckArgs {
    /// One of user, role or discordUser
    #[arg(value_parser = CheckSubjectType::from_str)]
    subject_type: CheckSubjectType,

    /// Object id, or the numeric id of a Discord user
    id: String,

    /// Flags that must all be granted
    #[arg(required = true, value_name = "FLAG")]
    required: Vec<String>,

    /// Report which required flags are missing
    #[arg(long)]
    missing: bool,

    /// Temporary grant considered alongside the subject's own permissions
    #[arg(long = "grant", value_name = "FLAG")]
    grants: Vec<String>,
}

impl CheckArgs {
    fn into_request(self) -> PermissionCheckRequest {
        PermissionCheckRequest::new(self.subject_type, self.id, self.required)
            .additional(self.grants)
            .include_missing(self.missing)
    }
}

async fn run(command: Command) -> Result<ExitCode> {
    let client = CiamClient::from_env()?;
    info!(base_url = %client.config().base_url, "Connecting to CIAM");

    match command {
        Command::Token => {
            let valid = client.is_token_valid().await?;
            println!("{}", if valid { "valid" } else { "invalid" });
            Ok(if valid { ExitCode::SUCCESS } else { ExitCode::from(1) })
        }
        Command::Me => {
            let flags = client.my_permissions().await?.into_option().unwrap_or_default();
            for flag in flags {
                println!("{flag}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Check(args) => match client.check(&args.into_request()).await? {
            Lookup::Found(result) => {
                println!("{}", serde_json::to_string_pretty(&result)?);
                Ok(if result.allowed {
                    ExitCode::SUCCESS
                } else {
                    ExitCode::from(1)
                })
            }
            Lookup::Absent => bail!("subject not found"),
        },
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    telemetry::init();

    run(cli.command).await.unwrap_or_else(|e| {
        error!("{e:#}");
        eprintln!("error: {e:#}");
        ExitCode::from(2)
    })
}
