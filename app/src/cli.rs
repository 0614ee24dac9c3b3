use clap::{Parser, Subcommand, ValueEnum};
use contract_reviewer::Decision;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "contract-reviewer")]
#[command(
    version,
    about = "Review contracts, notify workflow webhooks and run lookup agents"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Extract key fields from a contract, score its risks and optionally POST the result
    Review {
        /// Contract file (.pdf, .txt or .md)
        file: PathBuf,

        /// Webhook that receives the review payload (overrides REVIEW_WEBHOOK_URL)
        #[arg(long)]
        webhook: Option<String>,

        /// Also write the payload to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Governing-law token treated as local; repeatable
        #[arg(long = "local-jurisdiction")]
        local_jurisdictions: Vec<String>,

        /// Per-request timeout in seconds
        #[arg(long)]
        timeout_secs: Option<u64>,

        /// Print the payload as JSON instead of a text report
        #[arg(long)]
        json: bool,
    },

    /// Send an approve/reject decision for a reviewed contract
    Decide {
        #[arg(value_enum)]
        decision: DecisionArg,

        /// Name of the reviewed contract; defaults to the file name in --payload
        #[arg(long)]
        contract_name: Option<String>,

        /// Review summary text
        #[arg(long, conflicts_with_all = ["summary_file", "payload"])]
        summary: Option<String>,

        /// Read the review summary from a file
        #[arg(long, conflicts_with = "payload")]
        summary_file: Option<PathBuf>,

        /// Saved review payload (review-<id>.json); its digest becomes the summary
        #[arg(long)]
        payload: Option<PathBuf>,

        /// Webhook that receives the decision (overrides REVIEW_WEBHOOK_URL)
        #[arg(long)]
        webhook: Option<String>,
    },

    /// Ask an item-lookup workflow about a product
    LookupItem {
        /// Item name
        name: String,

        #[arg(long, env = "ITEM_WEBHOOK_URL")]
        webhook: String,
    },

    /// Run a research agent flow on a topic
    Research {
        topic: String,

        /// Flow endpoint; `/run` is appended when missing
        #[arg(long, env = "LANGFLOW_API_URL")]
        api_url: String,

        /// Flow API key; falls back to REVIEW_API_KEY
        #[arg(long, env = "LANGFLOW_API_KEY", hide_env_values = true)]
        api_key: Option<String>,
    },

    /// Check stock for a SKU
    CheckStock {
        sku: String,

        #[arg(long)]
        location: Option<String>,

        /// JSON file with inventory rows; the built-in sample is used otherwise
        #[arg(long)]
        inventory: Option<PathBuf>,

        #[arg(long)]
        json: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecisionArg {
    Approve,
    Reject,
}

impl From<DecisionArg> for Decision {
    fn from(arg: DecisionArg) -> Self {
        match arg {
            DecisionArg::Approve => Decision::Approved,
            DecisionArg::Reject => Decision::Rejected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn review_arguments_parse() {
        let cli = Cli::try_parse_from([
            "contract-reviewer",
            "review",
            "nda.pdf",
            "--webhook",
            "https://hooks.example/review",
            "--local-jurisdiction",
            "indonesia",
            "--local-jurisdiction",
            "jakarta",
            "--json",
        ])
        .unwrap();

        match cli.command {
            Command::Review {
                file,
                webhook,
                local_jurisdictions,
                json,
                ..
            } => {
                assert_eq!(file, PathBuf::from("nda.pdf"));
                assert_eq!(webhook.as_deref(), Some("https://hooks.example/review"));
                assert_eq!(local_jurisdictions, vec!["indonesia", "jakarta"]);
                assert!(json);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn decide_rejects_both_summary_sources() {
        let result = Cli::try_parse_from([
            "contract-reviewer",
            "decide",
            "approve",
            "--contract-name",
            "nda.pdf",
            "--summary",
            "ok",
            "--summary-file",
            "summary.txt",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn decide_accepts_saved_payload_without_name() {
        let cli = Cli::try_parse_from([
            "contract-reviewer",
            "decide",
            "reject",
            "--payload",
            "review-1.json",
        ])
        .unwrap();

        match cli.command {
            Command::Decide {
                decision,
                contract_name,
                payload,
                ..
            } => {
                assert_eq!(decision, DecisionArg::Reject);
                assert_eq!(contract_name, None);
                assert_eq!(payload, Some(PathBuf::from("review-1.json")));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn decide_rejects_payload_with_summary() {
        let result = Cli::try_parse_from([
            "contract-reviewer",
            "decide",
            "approve",
            "--payload",
            "review-1.json",
            "--summary",
            "ok",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn decision_arg_maps_to_domain_decision() {
        assert_eq!(Decision::from(DecisionArg::Approve), Decision::Approved);
        assert_eq!(Decision::from(DecisionArg::Reject), Decision::Rejected);
    }
}
