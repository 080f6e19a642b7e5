//! storebot CLI: interactive chat or a one-shot question against the seeded demo
//! catalog. Config from env (.env supported): DATABASE_URL, LOG_FILE, RUST_LOG.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use catalog::{demo_catalog, InMemoryCatalog};
use chat_engine::ChatEngine;
use clap::{Parser, Subcommand};
use storage::{
    InMemoryProfileStore, InMemorySessionStore, SqliteProfileStore, SqliteSessionStore,
};
use storebot_core::{BotResponse, ChatRequest};
use tracing::info;

#[derive(Parser)]
#[command(name = "storebot")]
#[command(about = "Product-discovery assistant CLI: chat, ask", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive chat session; type "quit" to leave.
    Chat {
        /// Keep sessions and profiles in memory instead of SQLite.
        #[arg(long)]
        ephemeral: bool,
        /// User id to accumulate preferences under.
        #[arg(short, long)]
        user: Option<String>,
    },
    /// One-shot question; prints the reply and exits.
    Ask {
        /// The message to send.
        message: Vec<String>,
        /// User id to accumulate preferences under.
        #[arg(short, long)]
        user: Option<String>,
        /// Print the full reply envelope as JSON.
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let log_file = std::env::var("LOG_FILE").unwrap_or_else(|_| "storebot.log".to_string());
    storebot_core::init_tracing(&log_file).context("Initialize tracing")?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Chat { ephemeral, user } => {
            let engine = build_engine(ephemeral).await?;
            run_chat(engine, user).await
        }
        Commands::Ask { message, user, json } => {
            let engine = build_engine(true).await?;
            let message = message.join(" ");
            run_ask(engine, message, user, json).await
        }
    }
}

/// Wires the engine: seeded in-memory catalog, plus SQLite or in-memory session and
/// profile stores.
async fn build_engine(ephemeral: bool) -> Result<ChatEngine> {
    let catalog = Arc::new(InMemoryCatalog::with_items(demo_catalog()));

    if ephemeral {
        return Ok(ChatEngine::new(
            catalog,
            Arc::new(InMemorySessionStore::new()),
            Arc::new(InMemoryProfileStore::new()),
        ));
    }

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "storebot.db".to_string());
    info!(database_url = %database_url, "Opening stores");

    let sessions = SqliteSessionStore::new(&database_url)
        .await
        .context("Open session store (check DATABASE_URL)")?;
    let profiles = SqliteProfileStore::new(&database_url)
        .await
        .context("Open profile store (check DATABASE_URL)")?;

    Ok(ChatEngine::new(
        catalog,
        Arc::new(sessions),
        Arc::new(profiles),
    ))
}

async fn run_chat(engine: ChatEngine, user: Option<String>) -> Result<()> {
    let session_id = uuid::Uuid::new_v4().to_string();
    println!("storebot ready (session {session_id}). Type \"quit\" to leave.");

    let stdin = io::stdin();
    loop {
        print!("you> ");
        io::stdout().flush()?;

        let Some(line) = stdin.lock().lines().next() else {
            break;
        };
        let line = line?;
        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        if matches!(message, "quit" | "exit") {
            break;
        }

        let mut request = ChatRequest::new(message);
        request.session_id = Some(session_id.clone());
        request.user_id = user.clone();

        match engine.process(request).await {
            Ok(reply) => print_response(&reply.response),
            Err(error) => eprintln!("something went wrong: {error}"),
        }
    }

    println!("bye!");
    Ok(())
}

async fn run_ask(
    engine: ChatEngine,
    message: String,
    user: Option<String>,
    json: bool,
) -> Result<()> {
    let mut request = ChatRequest::new(message);
    request.user_id = user;

    let reply = engine.process(request).await.context("Process message")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&reply)?);
    } else {
        print_response(&reply.response);
    }
    Ok(())
}

fn print_response(response: &BotResponse) {
    println!("bot> {}", response.message);

    if let Some(products) = &response.products {
        for item in products {
            println!(
                "     - {} [{}] ${:.2} (rating {:.1})",
                item.title, item.category, item.price, item.rating
            );
        }
    }

    if let Some(chips) = &response.suggestions {
        println!("     suggestions: {}", chips.join(" | "));
    }
}
