use std::fs;

use anyhow::Context as _;
use log::info;
use warden_business::{AdminConfig, Database};

/// The configured JSON seed, or the bundled demo data when none is set.
pub fn load_seed(config: &AdminConfig) -> anyhow::Result<Database> {
    let Some(path) = &config.seed_path else {
        info!("no seed configured, using demo data");
        return Ok(Database::demo());
    };

    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read seed {}", path.display()))?;
    let database = Database::from_json(&json)
        .with_context(|| format!("failed to load seed {}", path.display()))?;
    info!(
        "loaded seed {}: {} users, {} logs",
        path.display(),
        database.users.len(),
        database.logs.len()
    );
    Ok(database)
}
