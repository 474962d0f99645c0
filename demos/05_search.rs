//! # Search
//!
//! Replicated backends raced for latency. Each result kind queries two
//! replicas and keeps whichever answers first; the three kinds are then
//! gathered under a 100ms budget, so one slow kind cannot hold up the
//! page.
//!
//! ```text
//! web1/web2 ──> first ──┐
//! img1/img2 ──> first ──┼── gather (100ms) ──> results
//! vid1/vid2 ──> first ──┘
//! ```
//!
//! Run: `cargo run --example 05_search`

use chorus::error::Result;
use chorus::race::{first, gather, Task};
use rand::Rng;
use std::thread;
use std::time::{Duration, Instant};

fn replica(name: String, query: &'static str) -> Task<String> {
    Box::new(move || {
        let delay = rand::rng().random_range(0..100);
        thread::sleep(Duration::from_millis(delay));
        format!("{name} result for {query:?}")
    })
}

fn kind_search(kind: &'static str, query: &'static str) -> Task<String> {
    Box::new(move || {
        let replicas = vec![
            replica(format!("{kind}1"), query),
            replica(format!("{kind}2"), query),
        ];
        first(replicas).unwrap_or_else(|_| format!("{kind}: no replica answered"))
    })
}

fn main() -> Result<()> {
    let query = "rendezvous channels";
    let start = Instant::now();

    let results = gather(
        vec![
            kind_search("web", query),
            kind_search("image", query),
            kind_search("video", query),
        ],
        Duration::from_millis(100),
    );

    if results.len() < 3 {
        println!("timeout");
    }
    for result in &results {
        println!("{result}");
    }
    println!("{:?}", start.elapsed());
    Ok(())
}
