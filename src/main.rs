use chatbox::Provider;
use chatbox::core::config::{self, ChatboxConfig, CliOverrides};
use chatbox::tui;
use clap::Parser;
use log::{error, info};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "chatbox", version, about = "Minimal terminal chat with an offline fallback")]
struct Args {
    /// Completion endpoint preset
    #[arg(short, long, value_enum)]
    provider: Option<Provider>,

    /// Model identifier sent with every request
    #[arg(short, long)]
    model: Option<String>,

    /// Base URL of an OpenAI-compatible API (overrides the preset)
    #[arg(long)]
    base_url: Option<String>,

    /// API key (prefer CHATBOX_API_KEY so it stays out of shell history)
    #[arg(long)]
    api_key: Option<String>,

    /// Log level written to chatbox.log
    #[arg(long, default_value = "debug")]
    log_level: LevelFilter,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // stdout belongs to the TUI, so logs go to chatbox.log in the working directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create("chatbox.log") {
        let _ = WriteLogger::init(args.log_level, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        error!("{e}; falling back to built-in defaults");
        ChatboxConfig::default()
    });

    let cli = CliOverrides {
        provider: args.provider,
        model: args.model,
        base_url: args.base_url,
        api_key: args.api_key,
    };
    let resolved = config::resolve(&file_config, &cli);

    info!(
        "Chatbox starting: provider={:?} model={} credential={}",
        resolved.provider,
        resolved.model_name,
        if resolved.api_key.is_some() { "set" } else { "unset" }
    );

    tui::run(resolved)
}
