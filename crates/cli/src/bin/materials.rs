use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    materials_cli::main_entry().await
}
