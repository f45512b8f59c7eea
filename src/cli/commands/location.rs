use crate::config::Config;
use crate::state::SharedState;

pub async fn cmd_location(config: Config, query: &str) -> anyhow::Result<()> {
    let state = SharedState::new(config).await?;

    let location = state.resolver.resolve(query).await?;
    println!("{}", serde_json::to_string_pretty(&location)?);

    state.store.close().await
}
