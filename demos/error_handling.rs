//! Error handling example for geoform-rs
//!
//! This example demonstrates the typed fetch outcomes: transport failures,
//! non-success API statuses (including bad credentials), and how the form
//! keeps its previous candidate data when a scoped fetch fails.

use geoform_core::{CascadeForm, CscClient, GeoFormError};
use std::time::Duration;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    println!("=== GeoForm-RS Error Handling Example ===\n");

    // Example 1: Missing credential is caught before any request.
    println!("--- Example 1: Missing API key ---");
    std::env::remove_var("CSC_API_KEY");
    match CscClient::from_env() {
        Ok(_) => println!("  (CSC_API_KEY was set)"),
        Err(e) => println!("  ✗ {e}"),
    }
    println!();

    // Example 2: A bad credential surfaces as a distinct auth failure.
    println!("--- Example 2: Rejected API key ---");
    let bad_client = CscClient::builder("not-a-real-key")
        .retries(0)
        .timeout(Duration::from_secs(5))
        .build()
        .expect("client construction");
    match CascadeForm::initialize(bad_client).await {
        Ok(_) => println!("  (the API accepted the key?)"),
        Err(e) => {
            println!("  ✗ {e}");
            if e.is_auth() {
                println!("  → looks like a misconfigured credential");
            }
        }
    }
    println!();

    // Example 3: An unreachable host is a transport failure, not an API one.
    println!("--- Example 3: Transport failure ---");
    let offline_client = CscClient::builder("any-key")
        .base_url("http://127.0.0.1:9")
        .retries(0)
        .timeout(Duration::from_secs(2))
        .build()
        .expect("client construction");
    match CascadeForm::initialize(offline_client).await {
        Ok(_) => println!("  (unexpectedly reachable)"),
        Err(e) => {
            match &e {
                GeoFormError::Transport { endpoint, .. } => {
                    println!("  ✗ transport failure while fetching {endpoint}")
                }
                other => println!("  ✗ {other}"),
            }
            println!("  transient: {}", e.is_transient());
        }
    }

    println!("\n=== Example completed ===");
}
