use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;

mod app;
mod client;
mod config;
mod handler;
mod session;
mod transcript;
mod tui;
mod ui;

use app::App;
use client::ChatClient;
use config::Config;
use session::Session;
use transcript::{Origin, Transcript};

#[derive(Parser)]
#[command(name = "chatterbox")]
#[command(about = "Terminal chat widget for a local chatbot backend")]
struct Cli {
    /// Backend base URL (overrides the config file)
    #[arg(short, long)]
    url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Send a single message and print the exchange
    Send {
        /// The message to send
        message: String,
    },
    /// Save a backend base URL to the config file
    SetUrl {
        /// Backend base URL, e.g. http://localhost:5000
        url: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::SetUrl { url }) = &cli.command {
        Config::save_backend_url(url)?;
        println!("Backend URL set to {}", url.cyan());
        return Ok(());
    }

    let config = Config::load().unwrap_or_else(|_| Config::new());
    let base_url = cli.url.unwrap_or_else(|| config.backend_url().to_string());
    let client = ChatClient::new(&base_url, config.request_timeout())?;
    let session = Session::new(Arc::new(client));

    match cli.command {
        Some(Commands::Send { message }) => send_once(session, &message).await,
        _ => run_tui(session).await,
    }
}

/// One submit/resolve cycle, printed to stdout.
async fn send_once(mut session: Session, message: &str) -> Result<()> {
    let mut transcript = Transcript::new();

    if !session.submit(&mut transcript, message) {
        println!("{}", "Nothing to send".yellow());
        return Ok(());
    }
    session.resolve(&mut transcript).await;

    for msg in transcript.messages() {
        match msg.origin {
            Origin::User => println!("{} {}", "You:".cyan().bold(), msg.text),
            Origin::Bot => println!("{} {}", "Bot:".yellow().bold(), msg.text),
        }
    }

    Ok(())
}

async fn run_tui(session: Session) -> Result<()> {
    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let mut events = tui::EventHandler::new();
    let mut app = App::new(session);

    // Restore the terminal even when the loop errors out, or the shell is
    // left in raw mode on the alternate screen.
    let result = event_loop(&mut terminal, &mut events, &mut app).await;
    tui::restore()?;
    result
}

async fn event_loop(
    terminal: &mut tui::Tui,
    events: &mut tui::EventHandler,
    app: &mut App,
) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| ui::draw(app, frame))?;

        match events.next().await {
            Some(event) => handler::handle_event(app, event).await?,
            None => break,
        }
    }
    Ok(())
}
