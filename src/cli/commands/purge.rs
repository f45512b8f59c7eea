use crate::config::Config;
use crate::db::Store;

pub async fn cmd_purge(config: &Config, query: &str) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;

    let Some(location) = store.find_location_by_query(query).await? else {
        println!("No stored location for '{query}'.");
        println!("Locations are matched on the exact text they were first resolved with.");
        return store.close().await;
    };

    let removed = store.purge_location_records(location.id).await?;
    println!(
        "✓ Removed {} cached records for {} (ID: {})",
        removed, location.formatted_query, location.id
    );

    store.close().await
}
