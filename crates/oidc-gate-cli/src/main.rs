// crates/oidc-gate-cli/src/main.rs
// ============================================================================
// Module: OIDC Gate CLI Entry Point
// Description: Command dispatcher for offline config and trigger workflows.
// Purpose: Validate realm configuration and dry-run the redirect trigger.
// Dependencies: clap, oidc-gate-config, oidc-gate-core, serde, thiserror.
// ============================================================================

//! ## Overview
//! The `oidc-gate` CLI loads an OIDC realm configuration through the same
//! fail-closed loader the authorization server uses. `config validate` reports
//! whether the configuration is usable; `trigger evaluate` runs the redirect
//! trigger against a policy decision and a denial response read from disk.
//! Input files are untrusted and read with hard size limits.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use oidc_gate_cli::t;
use oidc_gate_config::OidcConfig;
use oidc_gate_config::ReadLimitError;
use oidc_gate_config::read_with_limit;
use oidc_gate_core::AuthCodeFlowTrigger;
use oidc_gate_core::DeniedHttpResponse;
use oidc_gate_core::EvaluationResult;
use oidc_gate_core::FileAuditSink;
use oidc_gate_core::OutcomeKind;
use oidc_gate_core::StderrAuditSink;
use oidc_gate_core::TriggerAuditSink;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum size of a policy decision input file.
const MAX_DECISION_BYTES: usize = 256 * 1024;
/// Maximum size of a denial response input file.
const MAX_RESPONSE_BYTES: usize = 256 * 1024;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "oidc-gate", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
    /// Redirect trigger utilities.
    Trigger {
        /// Selected trigger subcommand.
        #[command(subcommand)]
        command: TriggerCommand,
    },
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Load and validate an OIDC realm configuration.
    Validate(ConfigValidateCommand),
}

/// Arguments for config validation.
#[derive(Args, Debug)]
struct ConfigValidateCommand {
    /// Config file path (defaults to `OIDC_GATE_CONFIG` or `oidc-gate.toml`).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Trigger subcommands.
#[derive(Subcommand, Debug)]
enum TriggerCommand {
    /// Run the redirect trigger against a decision and a denial response.
    Evaluate(TriggerEvaluateCommand),
}

/// Arguments for trigger evaluation.
#[derive(Args, Debug)]
struct TriggerEvaluateCommand {
    /// Config file path (defaults to `OIDC_GATE_CONFIG` or `oidc-gate.toml`).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Policy decision JSON file.
    #[arg(long, value_name = "PATH")]
    decision: PathBuf,
    /// Denial response JSON file (defaults to an empty response).
    #[arg(long, value_name = "PATH")]
    response: Option<PathBuf>,
    /// Append audit events to this file instead of stderr.
    #[arg(long, value_name = "PATH")]
    audit_log: Option<PathBuf>,
}

/// JSON report printed by `trigger evaluate`.
#[derive(Debug, Serialize)]
struct EvaluateReport<'a> {
    /// Outcome classification.
    outcome: OutcomeKind,
    /// Whether the trigger handed the response back (false when no realm
    /// was requested).
    returned: bool,
    /// Denial response after the trigger ran.
    response: &'a DeniedHttpResponse,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for catalog-rendered messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a rendered message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    run().unwrap_or_else(|err| {
        let _ = write_stderr_line(&err.to_string());
        ExitCode::FAILURE
    })
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&t!("main.version", version = version))
            .map_err(|err| stdout_error(&err))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Commands::Config {
            command,
        } => match command {
            ConfigCommand::Validate(command) => command_config_validate(&command),
        },
        Commands::Trigger {
            command,
        } => match command {
            TriggerCommand::Evaluate(command) => command_trigger_evaluate(&command),
        },
    }
}

/// Prints top-level help.
fn show_help() -> CliResult<()> {
    let help = Cli::command().render_help().to_string();
    write_stdout_line(help.trim_end()).map_err(|err| stdout_error(&err))
}

// ============================================================================
// SECTION: Config Commands
// ============================================================================

/// Loads the configuration, mapping failures to the catalog message.
fn load_config(path: Option<&Path>) -> CliResult<OidcConfig> {
    OidcConfig::load(path).map_err(|err| CliError::new(t!("config.load_failed", error = err)))
}

/// Executes the config validation command.
fn command_config_validate(command: &ConfigValidateCommand) -> CliResult<ExitCode> {
    let config = load_config(command.config.as_deref())?;
    write_stdout_line(&t!("config.validate.ok", count = config.realms.len()))
        .map_err(|err| stdout_error(&err))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Trigger Commands
// ============================================================================

/// Executes the trigger evaluation command.
fn command_trigger_evaluate(command: &TriggerEvaluateCommand) -> CliResult<ExitCode> {
    let config = load_config(command.config.as_deref())?;
    let decision: Value =
        read_json(&command.decision, &t!("input.kind.decision"), MAX_DECISION_BYTES)?;
    let mut response = match &command.response {
        Some(path) => read_json(path, &t!("input.kind.response"), MAX_RESPONSE_BYTES)?,
        None => DeniedHttpResponse::default(),
    };
    let audit = audit_sink(command.audit_log.as_deref())?;
    let trigger = AuthCodeFlowTrigger::new(Some(config), audit);

    let result = EvaluationResult::new(decision);
    let outcome = trigger.evaluate(&result);
    let kind = outcome.kind();
    let returned = trigger.apply_outcome(outcome, &mut response).is_some();

    let report = EvaluateReport {
        outcome: kind,
        returned,
        response: &response,
    };
    let rendered = serde_json::to_string(&report)
        .map_err(|err| CliError::new(t!("output.encode_failed", error = err)))?;
    write_stdout_line(&rendered).map_err(|err| stdout_error(&err))?;
    Ok(ExitCode::SUCCESS)
}

/// Builds the audit sink for trigger diagnostics.
fn audit_sink(path: Option<&Path>) -> CliResult<Arc<dyn TriggerAuditSink>> {
    let Some(path) = path else {
        return Ok(Arc::new(StderrAuditSink));
    };
    let sink = FileAuditSink::new(path).map_err(|err| {
        CliError::new(t!("audit.open_failed", path = path.display(), error = err))
    })?;
    Ok(Arc::new(sink))
}

// ============================================================================
// SECTION: Input Helpers
// ============================================================================

/// Reads and decodes a bounded JSON input file.
fn read_json<T: DeserializeOwned>(path: &Path, kind: &str, max_bytes: usize) -> CliResult<T> {
    let bytes = read_with_limit(path, max_bytes).map_err(|err| match err {
        ReadLimitError::Io(err) => {
            CliError::new(t!("input.read_failed", kind = kind, path = path.display(), error = err))
        }
        ReadLimitError::TooLarge {
            size,
            limit,
        } => CliError::new(t!(
            "input.read_too_large",
            kind = kind,
            path = path.display(),
            size = size,
            limit = limit
        )),
    })?;
    serde_json::from_slice(&bytes).map_err(|err| {
        CliError::new(t!("input.parse_failed", kind = kind, path = path.display(), error = err))
    })
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Maps a stdout write failure to a CLI error.
fn stdout_error(error: &std::io::Error) -> CliError {
    CliError::new(t!("output.write_failed", error = error))
}
