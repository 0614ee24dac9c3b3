mod cli;
mod render;
mod storage;

use anyhow::{bail, Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use contract_reviewer::config::validate_url;
use contract_reviewer::inventory::{check_item, load_inventory, sample_inventory};
use contract_reviewer::*;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

#[tokio::main]
async fn main() {
    // Initialize environment variables and logging
    dotenv::dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Review {
            file,
            webhook,
            output,
            local_jurisdictions,
            timeout_secs,
            json,
        } => {
            let config = review_config(
                ReviewConfig::from_env()?,
                webhook,
                local_jurisdictions,
                timeout_secs,
            )?;

            let service = ReviewService::new(config)?;
            let outcome = service.review_and_submit(&file).await?;
            let payload = &outcome.report.payload;

            if json {
                println!("{}", serde_json::to_string_pretty(payload)?);
            } else {
                println!("{}", render::review_report(&outcome.report));
            }

            if let Some(path) = &output {
                storage::save_payload(path, payload)?;
                eprintln!("Payload written to {}", path.display());
            }

            match outcome.delivery {
                None => {}
                Some(Ok(response)) => eprintln!("{}", render::webhook_response(&response)),
                Some(Err(e)) => {
                    if json {
                        let error = ErrorResponse {
                            status: "error".to_string(),
                            error: e.to_string(),
                        };
                        eprintln!("{}", serde_json::to_string(&error)?);
                    } else {
                        eprintln!("Failed to send the review to the webhook: {}", e);
                    }
                    if output.is_none() {
                        let path = storage::default_payload_path(payload);
                        storage::save_payload(&path, payload)?;
                        eprintln!("Payload kept in {} for a manual retry", path.display());
                    }
                }
            }
        }

        Command::Decide {
            decision,
            contract_name,
            summary,
            summary_file,
            payload,
            webhook,
        } => {
            let config = ReviewConfig::from_env()?;
            let url = webhook
                .or(config.webhook_url.clone())
                .context("No webhook URL given; pass --webhook or set REVIEW_WEBHOOK_URL")?;
            validate_url(&url)?;

            let (contract_name, review_summary) =
                decision_text(contract_name, summary, summary_file, payload)?;

            let decision = Decision::from(decision);
            let webhook = WebhookService::new(config.request_timeout)?;
            let response = webhook
                .send_decision(&url, decision, &contract_name, &review_summary)
                .await
                .context("Failed to send the decision to the webhook")?;

            println!(
                "Document '{}' {} and notification sent.",
                contract_name, decision
            );
            eprintln!("{}", render::webhook_response(&response));
        }

        Command::LookupItem { name, webhook } => {
            if name.trim().is_empty() {
                bail!("Please enter an item name");
            }
            validate_url(&webhook)?;

            let config = ReviewConfig::from_env()?;
            let service = WebhookService::new(config.request_timeout)?;
            let response = service
                .lookup_item(&webhook, &name)
                .await
                .context("Failed to reach the item lookup workflow")?;

            println!("{}", render::item_lookup(&response));
        }

        Command::Research {
            topic,
            api_url,
            api_key,
        } => {
            if topic.trim().is_empty() {
                bail!("Please enter a research topic");
            }
            validate_url(&api_url)?;

            let config = ReviewConfig::from_env()?;
            let api_key = research_api_key(api_key, &config)?;
            let webhook = WebhookService::new(config.request_timeout)?;
            let research = ResearchService::new(webhook, &api_url, &api_key);

            log::info!("Running research flow at {}", research.endpoint());
            let outcome = research
                .research(&topic)
                .await
                .context("Failed to reach the research flow")?;

            println!("{}", render::research(&outcome));
        }

        Command::CheckStock {
            sku,
            location,
            inventory,
            json,
        } => {
            let rows = match &inventory {
                Some(path) => load_inventory(path)?,
                None => sample_inventory(),
            };
            let results = check_item(&rows, &sku, location.as_deref());

            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                println!("{}", render::stock_table(&sku, &results));
            }
        }
    }

    Ok(())
}

/// `review` flags layered over the environment settings, then validated.
fn review_config(
    mut config: ReviewConfig,
    webhook: Option<String>,
    local_jurisdictions: Vec<String>,
    timeout_secs: Option<u64>,
) -> Result<ReviewConfig> {
    if let Some(url) = webhook {
        config.webhook_url = Some(url);
    }
    if !local_jurisdictions.is_empty() {
        config.local_jurisdictions = local_jurisdictions;
    }
    if let Some(secs) = timeout_secs {
        config.request_timeout = Duration::from_secs(secs);
    }
    config.validate()?;
    Ok(config)
}

/// Contract name and summary text for a decision notice. A saved payload
/// supplies both; otherwise the name is required.
fn decision_text(
    contract_name: Option<String>,
    summary: Option<String>,
    summary_file: Option<PathBuf>,
    payload: Option<PathBuf>,
) -> Result<(String, String)> {
    if let Some(path) = payload {
        let saved = storage::load_payload(&path)?;
        let name = contract_name.unwrap_or_else(|| saved.metadata().filename.clone());
        return Ok((name, saved.digest()));
    }

    let name = contract_name.context("Provide --contract-name or a saved --payload")?;
    let text = match (summary, summary_file) {
        (Some(text), _) => text,
        (None, Some(path)) => fs::read_to_string(&path)
            .with_context(|| format!("Failed to read summary file {}", path.display()))?,
        (None, None) => {
            bail!("Provide the review summary with --summary, --summary-file or --payload")
        }
    };
    Ok((name, text))
}

fn research_api_key(flag: Option<String>, config: &ReviewConfig) -> Result<String> {
    flag.or_else(|| config.api_key.clone())
        .filter(|key| !key.trim().is_empty())
        .context("No API key given; pass --api-key or set LANGFLOW_API_KEY or REVIEW_API_KEY")
}
