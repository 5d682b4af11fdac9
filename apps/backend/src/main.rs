#[tokio::main]
async fn main() -> anyhow::Result<()> {
    studytrack_backend::run().await
}
