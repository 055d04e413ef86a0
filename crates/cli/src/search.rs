use crate::view::ProposalView;
use chainscope_core::completion::{ChainCompletionComputer, CompletionContext};
use chainscope_core::config::ChainSettings;
use chainscope_core::oracle::InMemoryTypeOracle;
use clap::Args;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tabled::{Table, settings::Style};
use tracing::info;

#[derive(Args, Debug, Clone, Default)]
pub struct SearchArgs {
    /// JSON type model to search in
    #[arg(long, value_name = "MODEL_JSON")]
    pub model: PathBuf,
    /// JSON completion context (invoking type, visible names, expected type)
    #[arg(long, value_name = "CONTEXT_JSON")]
    pub context: PathBuf,
    /// JSON settings file; flags below override its values
    #[arg(long, value_name = "SETTINGS_JSON")]
    pub settings: Option<PathBuf>,
    #[arg(long)]
    pub max_chains: Option<usize>,
    #[arg(long)]
    pub min_length: Option<usize>,
    #[arg(long)]
    pub max_length: Option<usize>,
    /// Pipe-delimited type names whose members never appear in chains
    #[arg(long, value_name = "FQN|FQN")]
    pub ignored_types: Option<String>,
    /// Time budget in seconds
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,
    /// Print the outcome as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl SearchArgs {
    /// Settings file (or defaults) with command-line overrides applied.
    pub fn resolve_settings(&self) -> chainscope_core::Result<ChainSettings> {
        let mut settings = match &self.settings {
            Some(path) => ChainSettings::load(path)?,
            None => ChainSettings::default(),
        };
        if let Some(max_chains) = self.max_chains {
            settings.max_chains = max_chains;
        }
        if let Some(min_length) = self.min_length {
            settings.min_chain_length = min_length;
        }
        if let Some(max_length) = self.max_length {
            settings.max_chain_length = max_length;
        }
        if let Some(ignored_types) = &self.ignored_types {
            settings.ignored_types = ignored_types.clone();
        }
        if let Some(timeout) = self.timeout {
            settings.timeout_secs = timeout;
        }
        settings.validate()?;
        Ok(settings)
    }
}

fn load_context(path: &Path) -> chainscope_core::Result<CompletionContext> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

pub async fn run(args: SearchArgs) -> Result<(), Box<dyn std::error::Error>> {
    let settings = args.resolve_settings()?;
    let oracle = InMemoryTypeOracle::load(&args.model)?;
    let ctx = load_context(&args.context)?;

    info!(
        "Searching chains in {} types from {}",
        oracle.type_count(),
        ctx.invoking_type
    );

    let computer = ChainCompletionComputer::new(Arc::new(oracle), settings);
    let outcome = computer.compute(&ctx).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else if outcome.proposals.is_empty() {
        println!("No chains found.");
    } else {
        let views: Vec<ProposalView> = outcome
            .proposals
            .iter()
            .map(ProposalView::from_proposal)
            .collect();
        println!("{}", Table::new(&views).with(Style::psql()));
    }

    if let Some(error) = &outcome.error {
        eprintln!("{}", error);
    }
    Ok(())
}
