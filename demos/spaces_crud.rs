//! Create, update, read and delete a space, then list every space.
//!
//! Run with:
//! ```bash
//! export KIBANA_URL="http://localhost:5601"
//! export KIBANA_USERNAME="elastic"
//! export KIBANA_PASSWORD="changeme"
//! cargo run --example spaces_crud
//! ```

use kibana_api::services::spaces::{CreateSpaceOptions, UpdateSpaceOptions};
use kibana_api::{Client, ClientOptions};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let base_url =
        std::env::var("KIBANA_URL").unwrap_or_else(|_| "http://localhost:5601".to_string());
    let username =
        std::env::var("KIBANA_USERNAME").expect("KIBANA_USERNAME environment variable must be set");
    let password =
        std::env::var("KIBANA_PASSWORD").expect("KIBANA_PASSWORD environment variable must be set");

    let client =
        Client::with_basic_auth(username, password, ClientOptions::new().with_base_url(base_url))?;
    let spaces = client.spaces();

    println!("Creating space...");
    let opt = CreateSpaceOptions::new("test-space", "Test Space")
        .with_description("Created by the spaces_crud example");
    let (space, resp) = spaces.create_space(&opt, &[]).await?;
    println!("Created {} ({}): {}", space.id, space.name, resp.status());

    println!("\nUpdating space...");
    let opt = UpdateSpaceOptions::default()
        .with_name("Test Space (updated)")
        .with_description("Updated by the spaces_crud example");
    let (space, resp) = spaces.update_space("test-space", opt, &[]).await?;
    println!("Updated {} ({}): {}", space.id, space.name, resp.status());

    println!("\nGetting space...");
    match spaces.get_space("test-space", &[]).await {
        Ok((space, _)) => println!("Got {} ({}): {}", space.id, space.name, space.description),
        Err(e) => eprintln!("Error: {}", e),
    }

    println!("\nDeleting space...");
    let resp = spaces.delete_space("test-space", &[]).await?;
    println!("Deleted test-space: {}", resp.status());

    println!("\nListing spaces...");
    match spaces.get_all_spaces(None, &[]).await {
        Ok((all, _)) => {
            for space in all {
                println!("  {} ({})", space.id, space.name);
            }
        }
        Err(e) => eprintln!("Error: {}", e),
    }

    Ok(())
}
