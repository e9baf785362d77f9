use anyhow::{bail, Result};
use clap::Parser;
use shared::{
    error::ApiException,
    protocol::{PageView, CARD_LABELS},
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

mod client;

use client::ViewerClient;

#[derive(Parser, Debug)]
#[command(about = "Browse the conference roster from a terminal")]
struct Args {
    #[arg(long, default_value = "http://127.0.0.1:8080")]
    server_url: String,
    #[arg(long)]
    username: String,
    #[arg(long, env = "ROSTER_PASSWORD")]
    password: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Next,
    Back,
    Refresh,
    Quit,
}

fn parse_command(line: &str) -> Option<Command> {
    match line.trim().to_ascii_lowercase().as_str() {
        "n" | "next" => Some(Command::Next),
        "b" | "back" => Some(Command::Back),
        "" | "r" | "refresh" => Some(Command::Refresh),
        "q" | "quit" | "exit" => Some(Command::Quit),
        _ => None,
    }
}

fn render_page(view: &PageView) -> String {
    let mut out = String::from("Conference Participants\n\n");
    for participant in &view.participants {
        for (label, value) in CARD_LABELS.iter().zip(participant.field_values()) {
            out.push_str(&format!("{label:<12} {value}\n"));
        }
        out.push('\n');
    }
    out.push_str(&view.indicator());
    out.push('\n');
    out.push_str(&controls_hint(view));
    out
}

fn controls_hint(view: &PageView) -> String {
    let mut hints = Vec::new();
    if view.can_go_back {
        hints.push("[b]ack");
    }
    if view.can_go_next {
        hints.push("[n]ext");
    }
    hints.push("[q]uit");
    hints.join("  ")
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();
    let args = Args::parse();

    let mut client = ViewerClient::new(args.server_url);
    let view = match client.sign_in(&args.username, &args.password).await {
        Ok(view) => view,
        Err(err) => match err.downcast_ref::<ApiException>() {
            Some(api) => bail!("{}", api.message),
            None => return Err(err),
        },
    };
    if let Some(session_id) = client.session_id() {
        debug!(%session_id, "logged in");
    }
    println!("{}", render_page(&view));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let result = match parse_command(&line) {
            Some(Command::Next) => client.next().await,
            Some(Command::Back) => client.back().await,
            Some(Command::Refresh) => client.page().await,
            Some(Command::Quit) => break,
            None => {
                println!("unknown command '{}'", line.trim());
                continue;
            }
        };
        match result {
            Ok(view) => println!("{}", render_page(&view)),
            Err(err) => warn!(%err, "request failed"),
        }
    }

    if let Err(err) = client.close().await {
        warn!(%err, "failed to end session");
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
