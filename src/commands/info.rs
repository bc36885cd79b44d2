//! Info command handler: print the metadata block for one book.

use anyhow::Result;
use flibusta_core::FlibustaClient;

pub async fn run_info_command(client: &FlibustaClient, id: &str) -> Result<()> {
    let info = client.info(id).await?;
    println!("{info}");
    Ok(())
}
