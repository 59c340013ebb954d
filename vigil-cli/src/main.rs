mod args;
mod render;

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use args::{Args, Command, ModeCommand, PolicyCommand, ScansCommand};
use vigil_client::{Gateway, Notice};
use vigil_types::PolicyType;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing based on verbosity
    let filter = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .init();

    let gateway = Gateway::new();
    let mut notices = gateway.notices();

    let outcome = run(&gateway, &args).await;

    // Relay advisories raised while the command ran.
    while let Ok(Notice::ApiUnreachable { base_url, .. }) = notices.try_recv() {
        eprintln!(
            "Warning: the API at {base_url} is unreachable. \
             `vigil mode set demo` switches to the offline data set."
        );
    }

    outcome
}

async fn run(gateway: &Gateway, args: &Args) -> Result<()> {
    match &args.command {
        Command::Score => {
            let latest = gateway
                .latest_score()
                .await
                .context("failed to fetch the latest score")?;
            if args.json {
                render::json(&latest)?;
            } else {
                render::latest_score(&latest);
            }
        }

        Command::Scans { command } => run_scans(gateway, args, command).await?,

        Command::Policy { command } => run_policy(gateway, args, command).await?,

        Command::Simulate { scenario } => {
            let response = if scenario == "cleanup" {
                gateway.cleanup().await.context("cleanup failed")?
            } else {
                gateway
                    .simulate(scenario)
                    .await
                    .with_context(|| format!("scenario '{scenario}' failed"))?
            };
            if args.json {
                render::json(&response)?;
            } else if scenario == "cleanup" {
                println!(
                    "Timeline restored to the seed events (operation {}).",
                    response.operation_id
                );
            } else {
                println!(
                    "Scenario '{scenario}' replayed (operation {}).",
                    response.operation_id
                );
            }
        }

        Command::Timeline { since } => {
            let log = gateway
                .timeline(since.as_deref())
                .await
                .context("failed to fetch the timeline")?;
            if args.json {
                render::json(&log)?;
            } else {
                render::timeline(&log);
            }
        }

        Command::Mode { command } => run_mode(gateway, args, command).await?,
    }
    Ok(())
}

async fn run_scans(gateway: &Gateway, args: &Args, command: &ScansCommand) -> Result<()> {
    match command {
        ScansCommand::List { limit } => {
            let scans = gateway
                .list_scans(*limit)
                .await
                .context("failed to list scans")?;
            if args.json {
                render::json(&scans)?;
            } else {
                render::scan_list(&scans);
            }
        }

        ScansCommand::Show { scan_id } => {
            let detail = gateway
                .scan(scan_id)
                .await
                .with_context(|| format!("failed to fetch scan '{scan_id}'"))?;
            if args.json {
                render::json(&detail)?;
            } else {
                render::scan_detail(&detail);
            }
        }

        ScansCommand::Run => {
            let run = gateway.run_scan().await.context("scan failed")?;
            if args.json {
                render::json(&run)?;
            } else {
                println!("Scan complete: {}", run.scan_id);
                if let Ok(detail) = gateway.scan(&run.scan_id).await {
                    println!("Score: {}/100", detail.meta.score);
                }
            }
        }

        ScansCommand::Diff { old_id, new_id } => {
            let changes = gateway
                .diff(old_id, new_id)
                .await
                .context("failed to diff scans")?;
            if args.json {
                render::json(&changes)?;
            } else {
                render::transitions(old_id, new_id, &changes);
            }
        }
    }
    Ok(())
}

async fn run_policy(gateway: &Gateway, args: &Args, command: &PolicyCommand) -> Result<()> {
    match command {
        PolicyCommand::Validate {
            file,
            resource_policy,
        } => {
            let policy_json = read_policy(file.as_deref())?;
            let policy_type = if *resource_policy {
                PolicyType::ResourcePolicy
            } else {
                PolicyType::IdentityPolicy
            };
            let report = gateway
                .validate_policy(&policy_json, policy_type)
                .await
                .context("policy validation failed")?;
            if args.json {
                render::json(&report)?;
            } else {
                render::policy_report(&report);
            }
        }

        PolicyCommand::Examples => {
            let examples = vigil_policy::examples();
            if args.json {
                render::json(&examples)?;
            } else {
                render::policy_examples(&examples);
            }
        }
    }
    Ok(())
}

async fn run_mode(gateway: &Gateway, args: &Args, command: &ModeCommand) -> Result<()> {
    match command {
        ModeCommand::Show => {
            let state = gateway.mode().await;
            if args.json {
                render::json(&state)?;
            } else {
                render::mode_state(&state);
                let ok = gateway.health().await.map(|h| h.ok).unwrap_or(false);
                println!("Reachable:    {}", if ok { "yes" } else { "no" });
            }
        }

        ModeCommand::Set { mode, api_url } => {
            if let Some(url) = api_url {
                gateway
                    .set_api_base_url(url)
                    .await
                    .context("failed to set the API base URL")?;
            }
            let state = gateway
                .set_mode(*mode)
                .await
                .context("failed to set the mode")?;
            if args.json {
                render::json(&state)?;
            } else {
                render::mode_state(&state);
            }
        }
    }
    Ok(())
}

/// Read the policy document from a file, or from stdin for `-`/no argument.
fn read_policy(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}
