//! Get command handler: download one book and save it to disk.

use std::path::Path;

use anyhow::{Context, Result};
use flibusta_core::FlibustaClient;

pub async fn run_get_command(
    client: &FlibustaClient,
    id: &str,
    format: &str,
    output_dir: &Path,
) -> Result<()> {
    let result = client.download(id, format).await?;

    let name = if result.name.is_empty() {
        format!("{id}.{format}")
    } else {
        result.name
    };
    let path = output_dir.join(&name);
    tokio::fs::write(&path, &result.data)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;

    println!("File saved at {}", path.display());
    Ok(())
}
