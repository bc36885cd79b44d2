//! Search command handler: print one result row per line.

use anyhow::Result;
use flibusta_core::FlibustaClient;

pub async fn run_search_command(client: &FlibustaClient, query: &str) -> Result<()> {
    let items = client.search(query).await?;
    for item in &items {
        println!("{item}");
    }
    Ok(())
}
