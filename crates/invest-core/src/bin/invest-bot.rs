//! Investment Advisor Bot CLI
//!
//! An interactive command-line chat that collects a salary, an investment
//! choice, an amount and a duration, then projects the profit.
//!
//! # Usage
//!
//! ```bash
//! # Optional: enable /ask with an OpenAI-compatible endpoint
//! export OPENAI_API_KEY="sk-..."
//! export OPENAI_API_BASE="http://localhost:1234/v1"
//!
//! cargo run --bin invest-bot -p invest-core -- --format cli
//! ```

use clap::Parser;
use invest_core::bot::{AdvisorBot, BotConfig, BotOutput};
use invest_core::interface::OutputFormat;
use invest_core::AdvisorConfig;
use invest_llm::providers::{OpenAIConfig, OpenAIProvider};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

/// Conversational investment helper
#[derive(Parser, Debug)]
#[command(name = "invest-bot", version, about, long_about = None)]
struct Args {
    /// JSON catalog file replacing the built-in investment options
    #[arg(long, value_name = "PATH")]
    catalog: Option<PathBuf>,

    /// JSON theme file with message prefixes
    #[arg(long, value_name = "PATH")]
    theme: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Cli)]
    format: OutputFormat,

    /// Currency label used when a salary message names none
    #[arg(long, value_name = "LABEL")]
    currency: Option<String>,

    /// Completion model for /ask
    #[arg(long)]
    model: Option<String>,

    /// Disable advisor mode even when an API key is available
    #[arg(long)]
    no_advisor: bool,
}

fn print_banner(welcome: &str) {
    println!(
        r"
╔══════════════════════════════════════════════════════════════╗
║                  Investment Advisor Bot                      ║
║                                                              ║
║  Commands:                                                   ║
║    /options            - خيارات الاستثمار (Options)           ║
║    /status             - حالة المحادثة (Status)               ║
║    /calc <a> <t> <y>   - حساب سريع (Quick projection)         ║
║    /ask <question>     - سؤال للمستشار (Ask the advisor)      ║
║    /reset              - بدء جديد (Start over)                ║
║    /exit               - خروج (Exit)                          ║
╚══════════════════════════════════════════════════════════════╝
"
    );
    println!("{welcome}\n");
}

fn build_advisor_config(args: &Args) -> anyhow::Result<AdvisorConfig> {
    let mut builder = AdvisorConfig::builder().with_env();
    if let Some(path) = &args.catalog {
        builder = builder.catalog_path(path);
    }
    if let Some(path) = &args.theme {
        builder = builder.theme_path(path);
    }
    if let Some(currency) = &args.currency {
        builder = builder.default_currency(currency);
    }
    if let Some(model) = &args.model {
        builder = builder.model(model);
    }
    Ok(builder.build()?)
}

fn build_provider(args: &Args, production: bool) -> Option<Arc<OpenAIProvider>> {
    if args.no_advisor {
        info!("Advisor mode disabled by flag");
        return None;
    }

    let config = match OpenAIConfig::from_env() {
        Ok(config) => config,
        Err(e) if production => {
            warn!("Advisor mode unavailable: {}", e);
            return None;
        }
        Err(e) => {
            info!("Advisor mode unavailable: {}", e);
            return None;
        }
    };

    match OpenAIProvider::new(config) {
        Ok(provider) => Some(Arc::new(provider)),
        Err(e) => {
            warn!("Could not create completion provider: {}", e);
            None
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let app_config = invest_utils::Config::from_env();
    invest_utils::init_tracing_with(&app_config.log_filter);
    info!(environment = %app_config.environment, "Starting {}", app_config.app_name);

    let bot_config = BotConfig::builder()
        .advisor_config(build_advisor_config(&args)?)
        .output_format(args.format)
        .build();

    let mut bot = match build_provider(&args, app_config.is_production()) {
        Some(provider) => AdvisorBot::with_provider(provider, bot_config)?,
        None => AdvisorBot::new(bot_config)?,
    };

    print_banner(bot.welcome());
    if !bot.has_advisor() {
        println!("(/ask غير متاح: لم يتم ضبط OPENAI_API_KEY)\n");
    }
    println!("{}\n", bot.start());

    // Run REPL
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{}", bot.prompt());
        stdout.flush()?;

        let mut input = String::new();
        match stdin.lock().read_line(&mut input) {
            Ok(0) => {
                // EOF
                println!("\nمع السلامة!");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error reading input: {e}");
                continue;
            }
        }

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        match bot.process_input(input).await {
            Ok(BotOutput::Reply(response)) => println!("{response}\n"),
            Ok(BotOutput::Exit) => {
                println!("مع السلامة!");
                break;
            }
            Err(e) => println!("{}\n", bot.format_error(&e)),
        }
    }

    info!(
        session = %bot.session().id(),
        tokens = bot.session().token_count(),
        "Session ended"
    );
    Ok(())
}
