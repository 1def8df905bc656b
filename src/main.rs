//! hosts-console: Hosts-view filter reconciliation and bulk-action gating
//!
//! Decodes the query parameters of a device-management hosts view and
//! reports what the console would actually show and allow.

#![allow(clippy::needless_pass_by_value)]

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use hosts_console::{cli, Tier};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build long version string with filter support info
const fn build_long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        "\n\nFilter dimensions:",
        "\n  Combinable: free text, team, label, status",
        "\n  Exclusive:  policy, macOS/OS settings, software, MDM, Munki,",
        "\n              disk space, OS version, vulnerability, disk encryption,",
        "\n              bootstrap package, configuration profile, script batch",
        "\n\nProfile platforms:",
        "\n  .mobileconfig, .json  macOS, iOS, iPadOS",
        "\n  .xml                  Windows"
    )
}

#[derive(Parser)]
#[command(name = "hosts-console")]
#[command(author = "Fleet Device Management")]
#[command(version, long_version = build_long_version())]
#[command(about = "Hosts-view filter reconciliation and bulk-action gating", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success
    1  Error, or a requested script run is blocked

EXAMPLES:
    # What does this pasted URL actually show?
    hosts-console inspect \"https://console.example.com/hosts/manage?policy_id=5&policy_response=failing&mdm_id=9\"

    # Step the state: switch to a team
    hosts-console next \"query=db&page=3&software_status=installed\" \"team=all\"

    # Can these filters run a script on 1200 hosts?
    hosts-console bulk \"team_id=2&status=online\" --targets 1200 --premium

    # Map an upload failure to the console message
    hosts-console profile-error \"Secret variable \\\"\\$FLEET_SECRET_CERT\\\" missing\"")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Evaluate filters under a premium license
    #[arg(long, global = true, env = "HOSTS_CONSOLE_PREMIUM")]
    premium: bool,

    #[command(subcommand)]
    command: Commands,
}

// ============================================================================
// Command argument structs (extracted for readability)
// ============================================================================

/// Arguments for the `inspect` subcommand
#[derive(Parser)]
struct InspectArgs {
    /// Query string or full hosts-view URL to decode
    input: String,

    /// Emit the report as JSON
    #[arg(long)]
    json: bool,
}

/// Arguments for the `next` subcommand
#[derive(Parser)]
struct NextArgs {
    /// Current state: query string or full hosts-view URL
    state: String,

    /// Change to apply, e.g. "team=2", "search=db", "status=", "clear-label"
    change: String,

    /// Selected label as `id` or `id:name` (overrides the URL path)
    #[arg(long)]
    label: Option<String>,

    /// Emit the navigation request as JSON
    #[arg(long)]
    json: bool,
}

/// Arguments for the `bulk` subcommand
#[derive(Parser)]
struct BulkArgs {
    /// Query string or full hosts-view URL to evaluate
    state: String,

    /// Number of hosts the current filters match (enables the full
    /// script-run verdict; exits 1 when the run would be refused)
    #[arg(long)]
    targets: Option<u32>,

    /// Script execution switched off in organization settings
    #[arg(long)]
    scripts_disabled: bool,

    /// Emit the report as JSON
    #[arg(long)]
    json: bool,
}

/// Arguments for the `profile` subcommand
#[derive(Parser)]
struct ProfileArgs {
    /// Uploaded file name, e.g. "com.acme.wifi.mobileconfig"
    file_name: String,

    /// Emit the parsed profile as JSON
    #[arg(long)]
    json: bool,
}

/// Arguments for the `profile-error` subcommand
#[derive(Parser)]
struct ProfileErrorArgs {
    /// Raw failure reason as returned by the profiles API
    reason: String,

    /// Emit the mapped message as JSON
    #[arg(long)]
    json: bool,
}

/// Arguments for the `columns` subcommand
#[derive(Parser)]
struct ColumnsArgs {
    /// Hide a column (repeatable)
    #[arg(long = "hide", value_name = "COLUMN")]
    hide: Vec<String>,

    /// Show a hidden column again (repeatable)
    #[arg(long = "unhide", value_name = "COLUMN")]
    unhide: Vec<String>,

    /// Restore the default hidden set
    #[arg(long)]
    reset: bool,

    /// Preferences file to use instead of the platform config path
    #[arg(long)]
    file: Option<PathBuf>,

    /// Emit the preferences as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a query string or URL and report the reconciled view
    Inspect(InspectArgs),

    /// Apply one filter change and print the resulting navigation request
    Next(NextArgs),

    /// Report which bulk host operations the current filters support
    Bulk(BulkArgs),

    /// Parse an uploaded configuration-profile file name
    Profile(ProfileArgs),

    /// Map a profiles-API failure reason to the console message
    ProfileError(ProfileErrorArgs),

    /// View or edit the persisted hidden hosts-table columns
    Columns(ColumnsArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let tier = if cli.premium {
        Tier::Premium
    } else {
        Tier::Free
    };

    // Dispatch to command handlers
    match cli.command {
        Commands::Inspect(args) => cli::run_inspect(args.input, tier, args.json),

        Commands::Next(args) => {
            cli::run_next(args.state, args.change, tier, args.label, args.json)
        }

        Commands::Bulk(args) => cli::run_bulk(
            args.state,
            tier,
            args.scripts_disabled,
            args.targets,
            args.json,
        ),

        Commands::Profile(args) => cli::run_profile(args.file_name, args.json),

        Commands::ProfileError(args) => cli::run_profile_error(args.reason, args.json),

        Commands::Columns(args) => cli::run_columns(
            args.hide,
            args.unhide,
            args.reset,
            args.file,
            args.json,
        ),

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "hosts-console", &mut io::stdout());
            Ok(())
        }
    }
}
