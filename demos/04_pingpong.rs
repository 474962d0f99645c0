//! # Ping-pong
//!
//! Two players rally one ball over a single handoff link. The link is
//! the table: only one ball exists, so whoever receives it hits it,
//! rests, and serves it back. After a second the main thread snatches
//! the ball mid-rally and the game is over.
//!
//! ```text
//! [ping] <──── table (handoff) ────> [pong]
//! ```
//!
//! Run: `cargo run --example 04_pingpong`

use chorus::error::Result;
use chorus::link::{Link, LinkReceiver, LinkSender};
use std::thread;
use std::time::Duration;

struct Ball {
    hits: u32,
}

fn player(name: &'static str, table_tx: LinkSender<Ball>, table_rx: LinkReceiver<Ball>) {
    while let Some(mut ball) = table_rx.recv() {
        ball.hits += 1;
        println!("{name} {}", ball.hits);
        thread::sleep(Duration::from_millis(100));
        if table_tx.send(ball).is_err() {
            return;
        }
    }
}

fn main() -> Result<()> {
    let (table_tx, table_rx) = Link::handoff();

    for name in ["ping", "pong"] {
        let tx = table_tx.clone();
        let rx = table_rx.clone();
        thread::spawn(move || player(name, tx, rx));
    }

    // Game on: toss the ball.
    table_tx.send(Ball { hits: 0 })?;
    thread::sleep(Duration::from_secs(1));

    // Game over: snatch the ball.
    match table_rx.recv() {
        Some(ball) => println!("game over after {} hits", ball.hits),
        None => println!("the players walked off with the ball"),
    }
    Ok(())
}
