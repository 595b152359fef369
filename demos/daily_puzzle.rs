//! Daily Puzzle
//!
//! This example plays one day's chain end to end through a session.
//!
//! Key concepts:
//! - Opening a session from a chain source and a file-backed store
//! - Alternating guesses and hints until the chain is solved
//! - Watching the reveal animation through its event channel
//! - Reopening the same day to resume saved progress
//!
//! Run with: cargo run --example daily_puzzle

use chainle::core::{Chain, Command, Derived};
use chainle::effects::{GameEnv, Session, SessionLoad, StaticChainSource};
use chainle::persistence::FileStore;
use chainle::reveal::RevealEvent;
use chainle::time;
use chainle::GameConfig;
use std::sync::Arc;
use std::time::Duration;

fn print_view(label: &str, view: &Derived) {
    println!(
        "  [{label}] {} | {} | {} left",
        view.current_guess.join(" -> "),
        view.status,
        view.guesses_remaining
    );
}

async fn open(env: &GameEnv, date: chrono::NaiveDate) -> Result<Session, Box<dyn std::error::Error>> {
    match Session::open(env, date).await {
        SessionLoad::Ready(session) => Ok(session),
        SessionLoad::Unavailable { date } => Err(format!("no chain published for {date}").into()),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    println!("=== Chainle ===\n");

    let date = time::today();
    let chain = Chain::new(["rain", "coat", "tail", "spin", "off"])?;
    let source = StaticChainSource::new().with_chain(date, chain);

    let dir = std::env::temp_dir().join("chainle-demo");
    let config = GameConfig::default().with_reveal_delay(Duration::from_millis(200));
    let env = GameEnv::new(Arc::new(source), Arc::new(FileStore::new(&dir)), config)?;

    // Start from a clean slate each run.
    env.persistence.clear(date)?;

    let mut session = open(&env, date).await?;
    let mut events = session.reveal_events();
    session.subscribe(|view| print_view("update", view));

    println!("Day {}", time::date_key(date));
    print_view("start", &session.view());

    println!("\nFirst guess: only the middle word");
    session
        .dispatch(&env, Command::SetLetters { index: 2, text: "tail".into() })
        .await;
    session.dispatch(&env, Command::ConfirmGuess).await;

    println!("\nSpend a hint on word 1, then guess again");
    session.dispatch(&env, Command::SelectHint { index: 1 }).await;
    session
        .dispatch(&env, Command::SetLetters { index: 1, text: "coat".into() })
        .await;
    session.dispatch(&env, Command::ConfirmGuess).await;

    println!("\nReopen the same day from disk");
    let resumed = open(&env, date).await?;
    print_view("resumed", &resumed.view());

    println!("\nSpend a hint on word 3 and finish the chain");
    session.dispatch(&env, Command::SelectHint { index: 3 }).await;
    session
        .dispatch(&env, Command::SetLetters { index: 3, text: "spin".into() })
        .await;
    session.dispatch(&env, Command::ConfirmGuess).await;

    let hidden = session.game().chain().hidden_indices().count();
    let mut shown = 0;
    while let Some(event) = events.recv().await {
        match event {
            RevealEvent::Revealed(index) => {
                shown += 1;
                println!("  [reveal] word {index}");
            }
            RevealEvent::Finished if shown < hidden => {}
            RevealEvent::Finished | RevealEvent::Cancelled => break,
        }
    }

    if let Some(text) = session.share_text() {
        println!("\n{text}");
    }

    let countdown = time::time_until_tomorrow(chrono::Local::now());
    println!("\nNext chain in {countdown}");

    Ok(())
}
