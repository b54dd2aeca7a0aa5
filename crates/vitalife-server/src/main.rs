//! VitaLife — symptom intake server and command-line checker.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;
use vitalife_core::VitaLifeConfig;
use vitalife_triage::TriageEngine;

mod routes;
mod state;

use state::AppState;

fn print_help() {
    println!("VitaLife — symptom intake assistant");
    println!();
    println!("Usage: vitalife [command]");
    println!();
    println!("Commands:");
    println!("  (none)                   Start the server");
    println!("  check <text...>          Assess a message and print the result as JSON");
    println!("  normalize <text...>      Print the canonical symptom phrase");
    println!("  help                     Show this help message");
    println!();
    println!("Environment:");
    println!("  PORT, VITALIFE_LEMMATIZER, VITALIFE_LEXICON, VITALIFE_KNOWLEDGE,");
    println!("  VITALIFE_LEXICON_RETRIES, VITALIFE_LEXICON_RETRY_DELAY_MS,");
    println!("  VITALIFE_HISTORY_VIEW, VITALIFE_MAX_SESSIONS");
}

fn text_argument(args: &[String], command: &str) -> String {
    let text = args[2..].join(" ");
    if text.trim().is_empty() {
        eprintln!("Usage: vitalife {} <text...>", command);
        std::process::exit(1);
    }
    text
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();

    if let Some(command) = args.get(1).map(String::as_str) {
        if matches!(command, "--help" | "-h" | "help") {
            print_help();
            return Ok(());
        }
    }

    let config = VitaLifeConfig::from_env()?;
    let engine = TriageEngine::from_config(&config)
        .map_err(|e| anyhow::anyhow!("Failed to load knowledge table: {}", e))?;

    // Handle CLI subcommands
    if let Some(command) = args.get(1).map(String::as_str) {
        match command {
            "check" => {
                let text = text_argument(&args, "check");
                let assessment = engine.assess(&text, None, true);
                println!("{}", serde_json::to_string_pretty(&assessment)?);
                return Ok(());
            }
            "normalize" => {
                let text = text_argument(&args, "normalize");
                println!("{}", engine.normalize(&text));
                return Ok(());
            }
            _ => {
                eprintln!("Unknown command: {}. Use 'vitalife help' for usage.", command);
                std::process::exit(1);
            }
        }
    }

    let status = engine.status();
    info!(
        "Loaded {} conditions, {} normalization rules, lemmatizer: {}",
        status.conditions, status.normalization_rules, status.lemmatizer
    );

    let port = config.port;
    let state = Arc::new(AppState::new(config, engine));
    let app = routes::build_router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("VitaLife server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
