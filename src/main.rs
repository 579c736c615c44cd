// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use ontap_service_policy::{
    config::{load_task_file, resolve, PartialConnection},
    ontap::OntapClient,
    params::params_schema,
    reconcilers::{reconcile_service_policy, service_policy::types::ReconcileReport},
};
use serde_json::json;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error, info};

/// Idempotent reconciler for ONTAP IP service policies
#[derive(Parser)]
#[command(name = "ontap-service-policy", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile the service policy described by a task file
    Apply(ApplyArgs),
    /// Print the JSON schema of the task file `params` section
    Schema,
    /// Generate shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

#[derive(Args)]
struct ApplyArgs {
    /// YAML or JSON task file
    #[arg(short, long, value_name = "PATH")]
    task_file: PathBuf,

    /// Plan and report without changing the cluster
    #[arg(long)]
    check: bool,

    #[command(flatten)]
    connection: ConnectionArgs,
}

/// Connection overrides; each wins over the task file.
#[derive(Args)]
struct ConnectionArgs {
    /// Cluster management address
    #[arg(long, env = "ONTAP_HOSTNAME")]
    hostname: Option<String>,

    /// API user
    #[arg(short, long, env = "ONTAP_USERNAME")]
    username: Option<String>,

    /// API password
    #[arg(long, env = "ONTAP_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Use HTTPS
    #[arg(long, env = "ONTAP_HTTPS", value_name = "BOOL")]
    https: Option<bool>,

    /// Verify the cluster certificate
    #[arg(long, env = "ONTAP_VALIDATE_CERTS", value_name = "BOOL")]
    validate_certs: Option<bool>,

    /// Non-default port of the management interface
    #[arg(long, env = "ONTAP_HTTP_PORT")]
    http_port: Option<u16>,

    /// Per-request timeout in seconds
    #[arg(long, env = "ONTAP_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,
}

impl From<ConnectionArgs> for PartialConnection {
    fn from(args: ConnectionArgs) -> Self {
        Self {
            hostname: args.hostname,
            username: args.username,
            password: args.password,
            https: args.https,
            validate_certs: args.validate_certs,
            http_port: args.http_port,
            timeout_secs: args.timeout_secs,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "ontap-service-policy",
                &mut io::stdout(),
            );
            ExitCode::SUCCESS
        }
        Commands::Schema => match serde_json::to_string_pretty(&params_schema()) {
            Ok(schema) => {
                println!("{schema}");
                ExitCode::SUCCESS
            }
            Err(e) => fail(&anyhow::Error::from(e)),
        },
        Commands::Apply(args) => {
            init_tracing();
            match run(args) {
                Ok(report) => match serde_json::to_string(&report) {
                    Ok(out) => {
                        println!("{out}");
                        ExitCode::SUCCESS
                    }
                    Err(e) => fail(&anyhow::Error::from(e)),
                },
                Err(e) => fail(&e),
            }
        }
    }
}

/// Initialize logging on stderr; stdout carries only the JSON result.
///
/// Respects `RUST_LOG` (default `info`) and `RUST_LOG_FORMAT=json|text`.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let log_format = std::env::var("RUST_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    match log_format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(io::stderr)
                .with_file(true)
                .with_line_number(true)
                .with_thread_names(true)
                .with_target(false)
                .json()
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(io::stderr)
                .with_file(true)
                .with_line_number(true)
                .with_thread_names(true)
                .with_target(false)
                .with_ansi(false)
                .compact()
                .init();
        }
    }

    debug!("Logging initialized with file and line number tracking");
}

fn run(args: ApplyArgs) -> Result<ReconcileReport> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .thread_name("ontap-service-policy")
        .enable_all()
        .build()
        .context("failed to build tokio runtime")?;

    runtime.block_on(async_run(args))
}

async fn async_run(args: ApplyArgs) -> Result<ReconcileReport> {
    let task = load_task_file(&args.task_file)?;
    let check_mode = args.check || task.check_mode;

    let connection = resolve(task.connection.merge(args.connection.into()))?;
    info!(
        hostname = %connection.hostname,
        https = connection.https,
        check_mode,
        "Starting ONTAP service policy reconciliation"
    );

    let client = OntapClient::new(&connection)?;
    let report = reconcile_service_policy(&client, &task.params, check_mode).await?;
    Ok(report)
}

fn fail(err: &anyhow::Error) -> ExitCode {
    error!(error = %format!("{err:#}"), "Service policy reconciliation failed");
    println!("{}", json!({"failed": true, "msg": format!("{err:#}")}));
    ExitCode::FAILURE
}
