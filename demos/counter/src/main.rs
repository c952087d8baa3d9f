//! Counter - Minimal store-dispatch example
//!
//! This example demonstrates the core pattern in a few dozen lines:
//! - Initial value: what the app knows
//! - Action tree: what can happen
//! - Dispatch: the only way state changes
//! - Watcher: react to changes
//!
//! Type an action path (increment, decrement, reset) and press enter;
//! an empty line quits. Run with RUST_LOG=trace to watch the dispatches.

use std::io::{self, BufRead, Write};

use serde_json::json;
use store_dispatch::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // ========================================================================
    // Store + actions - the whole app state lives behind one dispatcher
    // ========================================================================

    let initial = json!({"count": 0});
    let (store, dispatch) = create_reducer_with(
        initial.clone(),
        StoreOptions::named("counter"),
        move |_store, m| {
            actions!(m => {
                increment() => m.update("count", |c| json!(c.as_i64().unwrap_or(0) + 1)),
                decrement() => m.update("count", |c| json!(c.as_i64().unwrap_or(0) - 1)),
                reset() => m.replace(initial.clone()),
            })
        },
    );

    store.watch("count", |count| println!("count is now {count}"));

    // ========================================================================
    // Input loop - every line is an action path
    // ========================================================================

    println!("actions: increment, decrement, reset (empty line quits)");
    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let path = line.trim();
        if path.is_empty() {
            break;
        }

        if let Err(err) = dispatch.call(path) {
            eprintln!("{err}");
        }
    }

    println!("final state: {}", store.snapshot());
    Ok(())
}
