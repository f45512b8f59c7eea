use crate::config::Config;

pub fn cmd_init() -> anyhow::Result<()> {
    if Config::create_default_if_missing()? {
        println!("✓ Config file created. Add provider API keys to config.toml or .env and run again.");
    } else {
        println!("config.toml already exists, leaving it untouched.");
    }
    Ok(())
}
