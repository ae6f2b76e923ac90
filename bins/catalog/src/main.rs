#[tokio::main]
async fn main() -> anyhow::Result<()> {
    catalog::run().await
}
