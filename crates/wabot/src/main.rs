// SPDX-FileCopyrightText: 2026 Wabot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wabot - a command-driven WhatsApp chat agent.
//!
//! This is the binary entry point. It loads and validates configuration,
//! initializes logging, and hands control to the agent event loop.

use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Wabot - a command-driven WhatsApp chat agent.
#[derive(Parser, Debug)]
#[command(name = "wabot", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the agent.
    Serve,
    /// Print the effective configuration.
    Config,
}

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.to_string()));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match wabot_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            wabot_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::Serve) => {
            init_tracing(&config.agent.log_level);
            // The router and event loop are gateway-agnostic; a session
            // adapter provides the `Gateway` impl and the event channel.
            // None is compiled into this build yet.
            error!(
                "no gateway session adapter available; \
                 cannot connect as {}",
                config.agent.name
            );
            std::process::exit(1);
        }
        Some(Commands::Config) => match toml::to_string_pretty(&config) {
            Ok(rendered) => println!("{rendered}"),
            Err(err) => {
                eprintln!("wabot: failed to render configuration: {err}");
                std::process::exit(1);
            }
        },
        None => {
            println!("wabot: use --help for available commands");
        }
    }
}
