use clap::Parser;
use colored::Colorize;
use tracing::debug;

use channelizer::cli::Cli;
use channelizer::config::StaticConfig;
use channelizer::interfaces::cli::run_cli_command;
use channelizer::system::init_logging;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = match StaticConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e.format_colored());
            std::process::exit(1);
        }
    };

    // guard 必须存活到进程结束，否则文件日志可能丢失
    let _log_guard = match init_logging(&config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("{}", e.format_colored());
            std::process::exit(1);
        }
    };
    debug!("Starting channelizer {}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run_cli_command(cli.command, &config).await {
        eprintln!("{} {}", "✗".red().bold(), e.format_colored());
        tracing::error!("{}", e.format_simple());
        drop(_log_guard);
        std::process::exit(1);
    }
}
