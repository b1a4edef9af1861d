//! `datevconnect` runs a node against a live gateway, using a JSON file as
//! the workflow host.
//!
//! ```bash
//! datevconnect describe accounting
//! datevconnect run master-data --input items.json --host https://gateway.example.com
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use datevconnect_core::{Credentials, UreqTransport};
use datevconnect_node::{
    execute, AccountingNode, ConnectNode, ExecutionInput, MasterDataNode, OutputRecord, StaticHost,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "datevconnect")]
#[command(about = "Run DATEVconnect master-data and accounting nodes")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a node's resources, operations and parameters as JSON
    Describe { node: NodeKind },

    /// Execute a node over the items of an input file
    Run {
        node: NodeKind,

        /// Execution input: {"continueOnFail", "parameters", "items"}
        #[arg(short, long)]
        input: PathBuf,

        #[command(flatten)]
        credentials: CredentialArgs,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum NodeKind {
    MasterData,
    Accounting,
}

#[derive(Args)]
struct CredentialArgs {
    /// Gateway host, with or without scheme
    #[arg(long, env = "DATEVCONNECT_HOST", default_value = "")]
    host: String,

    #[arg(long, env = "DATEVCONNECT_EMAIL", default_value = "")]
    email: String,

    #[arg(long, env = "DATEVCONNECT_PASSWORD", default_value = "", hide_env_values = true)]
    password: String,

    #[arg(long, env = "DATEVCONNECT_CLIENT_INSTANCE_ID", default_value = "")]
    client_instance_id: String,
}

impl From<CredentialArgs> for Credentials {
    fn from(args: CredentialArgs) -> Self {
        Credentials {
            host: args.host,
            email: args.email,
            password: args.password,
            client_instance_id: args.client_instance_id,
        }
    }
}

fn main() -> Result<()> {
    // A missing .env is fine; variables may come from the real environment.
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Commands::Describe { node } => {
            let descriptor = match node {
                NodeKind::MasterData => MasterDataNode::descriptor(),
                NodeKind::Accounting => AccountingNode::descriptor(),
            };
            println!("{}", serde_json::to_string_pretty(&descriptor)?);
        }
        Commands::Run {
            node,
            input,
            credentials,
        } => {
            let text = std::fs::read_to_string(&input)
                .with_context(|| format!("reading execution input {}", input.display()))?;
            let input: ExecutionInput =
                serde_json::from_str(&text).context("execution input is not valid JSON")?;
            let host = StaticHost::from_input(Some(credentials.into()), input);
            let outputs = run(node, &host)?;
            println!("{}", serde_json::to_string_pretty(&outputs)?);
        }
    }
    Ok(())
}

fn run(node: NodeKind, host: &StaticHost) -> Result<Vec<Vec<OutputRecord>>> {
    let transport = UreqTransport::new();
    let outputs = match node {
        NodeKind::MasterData => execute::<MasterDataNode, _>(host, transport)?,
        NodeKind::Accounting => execute::<AccountingNode, _>(host, transport)?,
    };
    Ok(outputs)
}
