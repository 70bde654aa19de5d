use anyhow::Result;
use typing_persistence::connection::DEFAULT_DATABASE_URL;
use typing_persistence::{connect_and_migrate, seed::seed_prompts, PromptRepository};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
    let db = connect_and_migrate(&database_url).await?;

    let report = seed_prompts(&PromptRepository::new(db)).await?;
    tracing::info!(
        "Added {} prompts ({} prompts in the database)",
        report.added,
        report.total
    );

    Ok(())
}
