#[tokio::main]
async fn main() -> std::io::Result<()> {
    alien_sync::run_with_config().await.map(|_| ())
}
