//! datachat: console entry point.
//!
//! Startup sequence:
//!   1. Load .env (if present)
//!   2. Load config
//!   3. Resolve effective log level (CLI `-v` flags > env > config)
//!   4. Init logger once
//!   5. Build the answer provider
//!   6. Register the visual with the in-process host registry
//!   7. Create the chat visual through the registered descriptor
//!   8. Run the console channel until Ctrl-C or EOF

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::info;

use datachat::answer::providers;
use datachat::channel::pty::PtyChannel;
use datachat::config;
use datachat::error::AppError;
use datachat::logger;
use datachat::plugin::{
    self, DialogTable, InMemoryRegistry, PluginDescriptor, PluginError, VisualConstructorOptions,
};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    // Load .env if present; the file is optional.
    let _ = dotenvy::dotenv();

    let args = parse_cli_args();

    let config = config::load(args.config_path.as_deref())?;

    let effective_log_level = args.log_level.unwrap_or(config.log_level.as_str());
    logger::init(effective_log_level, args.log_level.is_some())?;

    info!(
        bot_name = %config.bot_name,
        configured_log_level = %config.log_level,
        effective_log_level = %effective_log_level,
        provider = %config.answer.provider,
        endpoint = %config.answer.endpoint,
        "config loaded"
    );

    if args.describe_plugin {
        let descriptor = PluginDescriptor::chatbot(config.plugin.debug, Arc::new(DialogTable::new()));
        let json = serde_json::to_string_pretty(&descriptor.metadata())
            .map_err(|e| AppError::Config(format!("cannot serialize plugin metadata: {e}")))?;
        println!("{json}");
        return Ok(());
    }

    let answerer = providers::build(&config.answer).map_err(|e| AppError::Answer(e.to_string()))?;

    // The console is its own host: register the visual, then build it the
    // way a dashboard would, through the registered descriptor.
    let host = InMemoryRegistry::new();
    let descriptor = PluginDescriptor::chatbot(config.plugin.debug, Arc::new(DialogTable::new()));
    let key = descriptor.name().to_string();
    plugin::register(Some(&host), descriptor);
    let visual = host
        .get(&key)
        .ok_or(PluginError::ComponentUnavailable)?
        .create(VisualConstructorOptions {
            answerer,
            chat: config.chat.clone(),
        })?;

    let shutdown = CancellationToken::new();

    // Ctrl-C cancels the token so the console loop exits.
    let ctrlc_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("ctrl-c received, initiating shutdown");
            ctrlc_token.cancel();
        }
    });

    PtyChannel::new("pty0", config.bot_name.clone(), visual.conversation())
        .run(shutdown)
        .await?;

    info!("shutdown complete");
    Ok(())
}

struct CliArgs {
    log_level: Option<&'static str>,
    config_path: Option<String>,
    describe_plugin: bool,
}

fn parse_cli_args() -> CliArgs {
    let mut verbosity = 0u8;
    let mut config_path = None;
    let mut describe_plugin = false;

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        if arg == "--" {
            break;
        }

        match arg.as_str() {
            "-h" | "--help" => {
                println!("Usage: datachat [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -h, --help                 Print help");
                println!("  -f, --config <PATH>        Path to configuration file (default: config/default.toml)");
                println!("  -v, -vv, -vvv, -vvvv       Increase logging verbosity");
                println!("      --describe-plugin      Print the visual plugin descriptor as JSON and exit");
                std::process::exit(0);
            }
            "-f" | "--config" => {
                if let Some(path) = iter.next() {
                    config_path = Some(path);
                } else {
                    eprintln!("error: -f/--config requires a path argument");
                    std::process::exit(1);
                }
            }
            "--describe-plugin" => describe_plugin = true,
            "--verbose" => verbosity = verbosity.saturating_add(1),
            a if a.starts_with('-') && a.len() > 1 && a.chars().skip(1).all(|c| c == 'v') => {
                verbosity = verbosity.saturating_add((a.len() - 1) as u8);
            }
            _ => {}
        }
    }

    //   -v      → warn
    //   -vv     → info
    //   -vvv    → debug  (request flow)
    //   -vvvv+  → trace  (raw answer bodies)
    let log_level = match verbosity {
        0 => None,
        1 => Some("warn"),
        2 => Some("info"),
        3 => Some("debug"),
        _ => Some("trace"),
    };

    CliArgs { log_level, config_path, describe_plugin }
}
