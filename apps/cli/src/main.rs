//! # Essence CLI Entry Point
//!
//! The actual setup is in lib.rs so it can be tested.

#[tokio::main]
async fn main() {
    let code = essence_cli::run().await;
    std::process::exit(code);
}
