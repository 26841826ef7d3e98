use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::{debug, warn};

use linkpad::cli::Cli;
use linkpad::config::init_config;
use linkpad::interfaces::cli::run_cli_command;
use linkpad::remote_log::{EventLogger, LogSink, NoopSink, RemoteLogClient};
use linkpad::system::init_logging;

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = match init_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e.format_colored());
            return ExitCode::FAILURE;
        }
    };

    // 日志初始化失败不影响命令执行
    let _log_guard = match init_logging(&config.logging) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("[WARN] {}", e);
            None
        }
    };

    let remote = if config.remote_log.enabled {
        match RemoteLogClient::new(&config.remote_log) {
            Ok(client) => Some(Arc::new(client)),
            Err(e) => {
                warn!("Remote logging disabled: {}", e);
                None
            }
        }
    } else {
        debug!("Remote logging disabled by configuration");
        None
    };

    let sink: Arc<dyn LogSink> = match &remote {
        Some(client) => client.clone() as Arc<dyn LogSink>,
        None => Arc::new(NoopSink),
    };
    let logger = EventLogger::new(sink, config.remote_log.stack.clone());

    let result = run_cli_command(cli.command, config.clone(), logger);

    if let Some(client) = remote {
        client.close(Duration::from_millis(config.remote_log.flush_timeout_ms));
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.format_colored());
            ExitCode::FAILURE
        }
    }
}
