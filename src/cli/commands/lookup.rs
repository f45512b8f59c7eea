use futures::future::try_join_all;

use crate::config::Config;
use crate::domain::Domain;
use crate::state::SharedState;

/// Parse `all`, a single domain, or a comma-separated list of domains.
pub fn parse_domains(list: &str) -> anyhow::Result<Vec<Domain>> {
    if list.trim().eq_ignore_ascii_case("all") {
        return Ok(Domain::ALL.to_vec());
    }

    let mut domains = Vec::new();
    for part in list.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let domain: Domain = part.parse().map_err(|e: String| anyhow::anyhow!(e))?;
        if !domains.contains(&domain) {
            domains.push(domain);
        }
    }

    if domains.is_empty() {
        anyhow::bail!("No domain given");
    }
    Ok(domains)
}

pub async fn cmd_lookup(config: Config, domains: &str, query: &str) -> anyhow::Result<()> {
    let domains = parse_domains(domains)?;
    let state = SharedState::new(config).await?;

    let location = state.resolver.resolve(query).await?;
    println!(
        "{} ({}, {}) [id {}]",
        location.formatted_query, location.latitude, location.longitude, location.id
    );

    let results = try_join_all(
        domains
            .iter()
            .map(|domain| state.lookup(*domain, &location)),
    )
    .await?;

    let mut output = serde_json::Map::new();
    for (domain, records) in domains.iter().zip(results) {
        output.insert(domain.to_string(), records);
    }
    println!("{}", serde_json::to_string_pretty(&output)?);

    state.store.close().await
}
