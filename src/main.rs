use std::error::Error;

use ai_llm_service::telemetry;
use tracing::Level;
use tracing_subscriber::{Layer, filter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load environment variables from .env file.
    // A missing .env is fine: the variables may come from the process env.
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            return Err(e.into());
        }
    }

    let filter = telemetry::env_filter_with_level("info,code_analyzer=debug", Level::INFO);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_filter(filter::filter_fn(|meta| {
            // ai-llm-service events are rendered by its own layer below.
            !meta.target().starts_with(telemetry::TARGET_PREFIX)
        })))
        .with(telemetry::layer())
        .try_init()?;

    api::start().await?;

    Ok(())
}
