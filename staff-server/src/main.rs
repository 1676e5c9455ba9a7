use staff_server::{Config, Server, setup_environment};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // .env first so Config sees its values
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;
    setup_environment(&config);

    tracing::info!(env = %config.environment, "Staff server starting");

    let server = Server::new(config);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e);
    }

    Ok(())
}
