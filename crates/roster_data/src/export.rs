//! Team export (CSV per team, JSON per team set)

use anyhow::{Context, Result};
use roster_core::{Team, TeamSet};
use serde::Serialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Serialize)]
struct TeamRow<'a> {
    name: &'a str,
    type1: Option<&'a str>,
    type2: Option<&'a str>,
    role: Option<&'static str>,
    base_total: Option<f64>,
}

/// `team_<anchor>.csv`, lowercase with spaces as `_`
pub fn default_team_filename(anchor: &str) -> String {
    format!("team_{}.csv", anchor.trim().to_lowercase().replace(' ', "_"))
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }
    Ok(())
}

/// Write one team as CSV (anchor first)
pub fn write_team_csv(team: &Team, path: &Path) -> Result<()> {
    ensure_parent(path)?;
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;

    for member in team.members() {
        writer
            .serialize(TeamRow {
                name: &member.name,
                type1: member.primary_type.as_deref(),
                type2: member.secondary_type.as_deref(),
                role: member.role.map(|r| r.label()),
                base_total: member.base_total(),
            })
            .with_context(|| format!("Failed to write row for {}", member.name))?;
    }
    writer.flush().context("Failed to flush CSV writer")?;

    log::info!("saved team of {} to {}", team.len(), path.display());
    Ok(())
}

/// Write a whole team set as pretty JSON
pub fn write_team_set_json(set: &TeamSet, path: &Path) -> Result<()> {
    ensure_parent(path)?;
    let json = serde_json::to_string_pretty(set).context("Failed to serialize team set")?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    log::info!("saved {} teams for {} to {}", set.len(), set.anchor, path.display());
    Ok(())
}
