mod members;
mod search;
mod view;

pub use members::MembersArgs;
pub use search::SearchArgs;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "chainscope",
    version,
    about = "Call-chain completion search over a Java type model",
    long_about = "Chainscope finds chains of field accesses and method calls that start at \
                  the names visible at a completion location and end in a value of the \
                  expected type, e.g. `session.getConfig().getTimeout()`."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search call chains for a completion context
    #[command(
        long_about = "Loads a type model and a completion context from JSON, runs the bounded \
                            chain search and prints the ranked proposals."
    )]
    Search(SearchArgs),
    /// List the members of a type visible from another type
    Members(MembersArgs),
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let _guard = chainscope_core::logging::init_logging("cli", false);

    let rt = tokio::runtime::Runtime::new()?;

    match cli.command {
        Commands::Search(args) => rt.block_on(search::run(args)),
        Commands::Members(args) => rt.block_on(members::run(args)),
    }
}
