//! Basic usage example for geoform-rs
//!
//! This example demonstrates how to:
//! - Load the country and state catalogs (joined)
//! - Drive the country → state → city cascade with typed field edits
//! - Read back candidate sets and autocomplete suggestions
//!
//! Requires a countrystatecity.in API key in `CSC_API_KEY`.

use geoform_core::{CascadeForm, CscClient, Result};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    println!("=== GeoForm-RS Basic Usage Example ===\n");

    // Load the reference catalogs
    println!("Loading reference catalogs...");
    let client = CscClient::from_env()?;
    let mut form = CascadeForm::initialize(client).await?;
    println!("✓ Catalogs loaded successfully\n");

    // Example 1: Country candidates
    println!("--- Example 1: Country candidates ---");
    let total = form.cascade().country_candidates().len();
    println!("Total countries: {total}");
    for (i, country) in form.cascade().country_candidates().iter().take(5).enumerate() {
        println!("{}. {} ({})", i + 1, country.name, country.iso2);
    }
    println!("... and {} more\n", total.saturating_sub(5));

    // Example 2: Autocomplete on the country field
    println!("--- Example 2: Country autocomplete ---");
    form.set_country("united").await?;
    for country in form.cascade().country_suggestions().iter().take(5) {
        println!("- {}", country.name);
    }
    println!();

    // Example 3: Selecting a country narrows states and cities
    println!("--- Example 3: Select a country ---");
    form.set_country("United States").await?;
    let stats = form.cascade().stats();
    println!("Selected: {:?}", form.cascade().selected_country());
    println!("State candidates: {}", stats.states);
    println!("City candidates: {}", stats.cities);
    for state in form.cascade().state_candidates().iter().take(5) {
        println!("- {} ({:?})", state.name, state.state_code());
    }
    println!();

    // Example 4: Selecting a state scopes the city list
    println!("--- Example 4: Select a state ---");
    form.set_state("California").await?;
    println!("Selected state: {:?}", form.cascade().selected_state());
    if let Some(cities) = form.cascade().city_candidates() {
        println!("Cities in scope: {}", cities.len());
        for city in cities.iter().take(5) {
            println!("- {}", city.name);
        }
    }
    println!();

    // Example 5: City autocomplete
    println!("--- Example 5: City autocomplete ---");
    form.set_city("san");
    match form.cascade().city_suggestions() {
        Some(cities) => {
            for city in cities.iter().take(5) {
                println!("- {}", city.name);
            }
        }
        None => println!("(no city data yet — select a country first)"),
    }
    println!();

    // Example 6: Identifier-based selection
    println!("--- Example 6: Select by ISO2 code ---");
    if form.select_country("DE").await? {
        println!("Country field now reads: {}", form.cascade().country_text());
        println!(
            "State candidates: {}",
            form.cascade().state_candidates().len()
        );
    }

    println!("\n=== Example completed successfully ===");
    Ok(())
}
