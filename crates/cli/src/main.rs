//! SimpleFlags CLI
//!
//! Copyright 2025 Release Workshop Ltd
//! Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
//! See the LICENSE file in the project root for details.

mod api;
mod commands;
mod error;
mod test_helpers;
mod ui;
mod utils;

use clap::{Args, CommandFactory, Parser, Subcommand};
use commands::{
    account, completion, env, eval, flag, key, login, logout, project, set, signup, status, tags,
    variable,
};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// SimpleFlags CLI - Manage flags, variables, environments and API keys
#[derive(Parser)]
#[command(name = "sf")]
#[command(about = "SimpleFlags CLI - Manage flags, variables, environments and API keys", long_about = None)]
#[command(version = env!("SF_VERSION"))]
struct Cli {
    /// Log decisions and requests to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Account and project every scoped command accepts
#[derive(Args, Debug, Clone)]
struct ScopeArgs {
    /// Account identifier
    #[arg(short = 'a', long = "acc", env = "SF_ACCOUNT")]
    account: Option<String>,
    /// Project identifier
    #[arg(short, long, env = "SF_PROJECT")]
    project: Option<String>,
}

#[derive(Args, Debug, Clone)]
struct FormatArg {
    /// Output format: table, json, or yaml
    #[arg(long, default_value = "table")]
    format: String,
}

fn parse_bool_arg(raw: &str) -> Result<bool, String> {
    utils::args::parse_bool(raw).ok_or_else(|| format!("'{raw}' is not a boolean"))
}

#[derive(Subcommand)]
enum Commands {
    /// List, show, create, update or delete flags
    Flag {
        /// Flag identifier, or a tag name to update every tagged flag
        identifier: Option<String>,
        #[command(flatten)]
        scope: ScopeArgs,
        /// Delete the flag
        #[arg(long = "rm")]
        remove: bool,
        /// Flag name (required on creation)
        #[arg(short, long)]
        name: Option<String>,
        /// Flag description
        #[arg(short, long)]
        description: Option<String>,
        /// Mark the flag permanent
        #[arg(
            long,
            num_args = 0..=1,
            require_equals = true,
            default_missing_value = "true",
            value_parser = parse_bool_arg
        )]
        permanent: Option<bool>,
        /// Mark the flag deprecated
        #[arg(
            long,
            num_args = 0..=1,
            require_equals = true,
            default_missing_value = "true",
            value_parser = parse_bool_arg
        )]
        deprecated: Option<bool>,
        /// Environment for --on, --off, --off-value and --rule on an existing flag
        #[arg(short, long)]
        env: Option<String>,
        /// Turn the flag on in the environment
        #[arg(long)]
        on: bool,
        /// Turn the flag off in the environment
        #[arg(long)]
        off: bool,
        /// Value served when the flag is off
        #[arg(long)]
        off_value: Option<String>,
        /// Targeting rule <expression>:<value> (repeatable, kept in order)
        #[arg(short, long = "rule")]
        rules: Vec<String>,
        /// Tag to add (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,
        #[command(flatten)]
        format: FormatArg,
    },
    /// List, show, create, update or delete variables
    #[command(visible_alias = "variable")]
    Var {
        /// Variable identifier
        identifier: Option<String>,
        #[command(flatten)]
        scope: ScopeArgs,
        /// Account-wide variable (no project)
        #[arg(short, long)]
        global: bool,
        /// Delete the variable
        #[arg(long = "rm")]
        remove: bool,
        /// Variable description (applied on creation)
        #[arg(short, long)]
        description: Option<String>,
        /// Value per environment <env>:<value> (repeatable)
        #[arg(short = 'V', long = "value")]
        values: Vec<String>,
        /// Show values for this environment when listing
        #[arg(short, long)]
        env: Option<String>,
        #[command(flatten)]
        format: FormatArg,
    },
    /// Create or delete an API key
    Key {
        /// Key identifier
        identifier: String,
        #[command(flatten)]
        scope: ScopeArgs,
        /// Restrict the key to one environment
        #[arg(short, long)]
        env: Option<String>,
        /// Key name (required on creation)
        #[arg(short, long)]
        name: Option<String>,
        /// Permission <key>:<bool>, e.g. flag:true or delete_flag:false (repeatable)
        #[arg(long = "perm")]
        permissions: Vec<String>,
        /// Store the created key in the settings file
        #[arg(long)]
        set_env: bool,
        /// Delete the key
        #[arg(long = "rm")]
        remove: bool,
    },
    /// List, create or delete environments
    Env {
        /// Environment identifier
        identifier: Option<String>,
        /// Account identifier
        #[arg(short = 'a', long = "acc", env = "SF_ACCOUNT")]
        account: Option<String>,
        /// Environment name
        #[arg(short, long)]
        name: Option<String>,
        /// Environment description
        #[arg(short, long)]
        description: Option<String>,
        /// Mark as a production environment
        #[arg(long)]
        prod: bool,
        /// Delete the environment
        #[arg(long = "rm")]
        remove: bool,
        #[command(flatten)]
        format: FormatArg,
    },
    /// List, create or delete projects
    Project {
        /// Project identifier
        identifier: Option<String>,
        /// Account identifier
        #[arg(short = 'a', long = "acc", env = "SF_ACCOUNT")]
        account: Option<String>,
        /// Project name
        #[arg(short, long)]
        name: Option<String>,
        /// Project description
        #[arg(short, long)]
        description: Option<String>,
        /// Delete the project
        #[arg(long = "rm")]
        remove: bool,
        #[command(flatten)]
        format: FormatArg,
    },
    /// List, create or delete accounts
    #[command(visible_alias = "account")]
    Acc {
        /// Name of a new account, or identifier with --rm
        name: Option<String>,
        /// Delete the account
        #[arg(long = "rm")]
        remove: bool,
        /// Delete without confirmation
        #[arg(long)]
        force: bool,
        #[command(flatten)]
        format: FormatArg,
    },
    /// List the tags of a project
    Tags {
        #[command(flatten)]
        scope: ScopeArgs,
        #[command(flatten)]
        format: FormatArg,
    },
    /// Evaluate flags with the stored API key
    #[command(visible_alias = "evaluate")]
    Eval {
        /// Flag identifiers (all flags when omitted)
        identifiers: Vec<String>,
        /// Target attribute <property>:<value> (repeatable)
        #[arg(short, long = "target")]
        targets: Vec<String>,
    },
    /// Log in and store a session token
    Login {
        /// Account email
        email: Option<String>,
    },
    /// Register a new user
    #[command(visible_alias = "register")]
    Signup,
    /// Remove the stored session token
    Logout,
    /// Store default server, account and project (an empty value removes it)
    Set {
        /// Admin server URL
        #[arg(short, long)]
        server: Option<String>,
        /// Default account identifier
        #[arg(short = 'a', long = "acc")]
        account: Option<String>,
        /// Default project identifier
        #[arg(short, long)]
        project: Option<String>,
    },
    /// Show settings, API key and session
    Status {
        #[command(flatten)]
        scope: ScopeArgs,
    },
    /// Generate shell completion script
    Completion {
        /// Shell: bash, zsh, fish, powershell, or elvish
        shell: String,
    },
}

/// Get the CLI command structure for completion generation
pub fn get_cli_command() -> clap::Command {
    Cli::command()
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    let mut env_filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .with_env_var("SF_LOG")
        .from_env_lossy();
    if verbose {
        env_filter = env_filter.add_directive(LevelFilter::DEBUG.into());
    }

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let exit_code = match cli.command {
        Commands::Flag {
            identifier,
            scope,
            remove,
            name,
            description,
            permanent,
            deprecated,
            env,
            on,
            off,
            off_value,
            rules,
            tags,
            format,
        } => flag::run(&flag::Options {
            account: scope.account,
            project: scope.project,
            identifier,
            remove,
            name,
            description,
            permanent,
            deprecated,
            environment: env,
            on,
            off,
            off_value,
            rules,
            tags,
            format: format.format,
        }),
        Commands::Var {
            identifier,
            scope,
            global,
            remove,
            description,
            values,
            env,
            format,
        } => variable::run(&variable::Options {
            account: scope.account,
            project: scope.project,
            global,
            identifier,
            remove,
            description,
            values,
            environment: env,
            format: format.format,
        }),
        Commands::Key {
            identifier,
            scope,
            env,
            name,
            permissions,
            set_env,
            remove,
        } => key::run(&key::Options {
            account: scope.account,
            project: scope.project,
            environment: env,
            identifier,
            name,
            permissions,
            set_env,
            remove,
        }),
        Commands::Env {
            identifier,
            account,
            name,
            description,
            prod,
            remove,
            format,
        } => env::run(&env::Options {
            account,
            identifier,
            name,
            description,
            production: prod,
            remove,
            format: format.format,
        }),
        Commands::Project {
            identifier,
            account,
            name,
            description,
            remove,
            format,
        } => project::run(&project::Options {
            account,
            identifier,
            name,
            description,
            remove,
            format: format.format,
        }),
        Commands::Acc {
            name,
            remove,
            force,
            format,
        } => account::run(&account::Options {
            name,
            remove,
            force,
            format: format.format,
        }),
        Commands::Tags { scope, format } => tags::run(&tags::Options {
            account: scope.account,
            project: scope.project,
            format: format.format,
        }),
        Commands::Eval {
            identifiers,
            targets,
        } => eval::run(&eval::Options {
            identifiers,
            targets,
        }),
        Commands::Login { email } => login::run(&login::Options { email }),
        Commands::Signup => signup::run(),
        Commands::Logout => logout::run(),
        Commands::Set {
            server,
            account,
            project,
        } => set::run(&set::Options {
            server,
            account,
            project,
        }),
        Commands::Status { scope } => status::run(&status::Options {
            account: scope.account,
            project: scope.project,
        }),
        Commands::Completion { shell } => completion::run(&completion::Options { shell }),
    };

    std::process::exit(exit_code);
}
