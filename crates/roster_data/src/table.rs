//! Candidate table - CSV → Vec<Entity> with a name index
//!
//! Headers are matched after normalisation (trimmed, lowercased, spaces and
//! dots turned into `_`), so `Type 1`, `type1` and `type_1` all land on the
//! primary type. Recognised columns:
//!
//! - `name` (required)
//! - `type1`/`type_1`, `type2`/`type_2`
//! - `role` (labels such as `DPS`, `Tank`, `Special DPS`)
//! - `is_legendary` (1/true/yes) or `category` (`legendary`) → restricted
//! - `against_<type>` → damage multiplier received from `<type>`
//! - every other column with a numeric value → stat (`total`, `sp_atk`,
//!   `sp_def` are stored as `base_total`, `sp_attack`, `sp_defense`)
//!
//! Empty cells are undefined, not zero.

use anyhow::{bail, Context, Result};
use roster_core::{assign_roles, stat, Entity, Role, RoleThresholds};
use rustc_hash::FxHashMap;
use std::io::Read;
use std::path::Path;

/// Names excluded from recommendations unless the caller opts back in
pub const DEFAULT_EXCLUSIONS: &[&str] = &[
    "Mew", "Celebi", "Jirachi", "Manaphy", "Darkrai", "Shaymin", "Arceus", "Victini", "Keldeo",
    "Meloetta", "Genesect", "Diancie", "Hoopa", "Volcanion", "Magearna", "Marshadow", "Zeraora",
    "Meltan", "Melmetal", "Zarude",
];

/// CSV parsing statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseStats {
    pub total_rows: u32,
    pub parsed: u32,
    pub failed: u32,
    /// Rows skipped because the name was already loaded
    pub duplicates: u32,
}

/// Loaded candidates, in file order, with case-insensitive lookup by name
#[derive(Debug, Clone, Default)]
pub struct CandidateTable {
    entities: Vec<Entity>,
    index: FxHashMap<String, usize>,
}

impl CandidateTable {
    /// Build a table from entities; later duplicates of a name are dropped
    pub fn from_entities(entities: Vec<Entity>) -> Self {
        let mut table = Self::default();
        for entity in entities {
            let name = entity.name.clone();
            if !table.insert(entity) {
                log::warn!("duplicate name '{}' skipped", name);
            }
        }
        table
    }

    fn insert(&mut self, entity: Entity) -> bool {
        let key = entity.name.to_lowercase();
        if self.index.contains_key(&key) {
            return false;
        }
        self.index.insert(key, self.entities.len());
        self.entities.push(entity);
        true
    }

    fn reindex(&mut self) {
        self.index = self
            .entities
            .iter()
            .enumerate()
            .map(|(i, e)| (e.name.to_lowercase(), i))
            .collect();
    }

    pub fn get(&self, name: &str) -> Option<&Entity> {
        self.index
            .get(&name.trim().to_lowercase())
            .map(|&i| &self.entities[i])
    }

    /// Like [`get`](Self::get), failing with `EntityNotFound`
    pub fn require(&self, name: &str) -> roster_core::Result<&Entity> {
        self.get(name)
            .ok_or_else(|| roster_core::RosterError::EntityNotFound {
                name: name.trim().to_string(),
            })
    }

    /// Resolve a list of names (e.g. an enemy roster) to owned entities
    pub fn resolve<S: AsRef<str>>(&self, names: &[S]) -> roster_core::Result<Vec<Entity>> {
        names
            .iter()
            .map(|n| self.require(n.as_ref()).cloned())
            .collect()
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// True when at least one entity carries matchup data
    pub fn has_matchups(&self) -> bool {
        self.entities.iter().any(Entity::has_matchups)
    }

    /// Entities without a role label
    pub fn missing_roles(&self) -> usize {
        self.entities.iter().filter(|e| e.role.is_none()).count()
    }

    /// Remove entities by name (case-insensitive); returns how many were removed
    pub fn exclude_names<S: AsRef<str>>(&mut self, names: &[S]) -> usize {
        let excluded: Vec<String> = names
            .iter()
            .map(|n| n.as_ref().trim().to_lowercase())
            .collect();
        let before = self.entities.len();
        self.entities
            .retain(|e| !excluded.contains(&e.name.to_lowercase()));
        let removed = before - self.entities.len();
        if removed > 0 {
            self.reindex();
            log::debug!("excluded {} entities", removed);
        }
        removed
    }

    /// Fill in roles from population medians
    ///
    /// With `overwrite == false` labels read from the file are kept.
    pub fn classify_roles(&mut self, overwrite: bool) -> RoleThresholds {
        let thresholds = RoleThresholds::from_population(&self.entities);
        let assigned = assign_roles(&mut self.entities, &thresholds, overwrite);
        log::info!("classified {} entities by median thresholds", assigned);
        thresholds
    }
}

/// What a header column feeds into
#[derive(Debug, Clone, PartialEq)]
enum Column {
    Name,
    PrimaryType,
    SecondaryType,
    Role,
    Legendary,
    Category,
    Matchup(String),
    Stat(String),
}

fn normalize_header(header: &str) -> String {
    let lowered = header
        .trim_start_matches('\u{feff}')
        .trim()
        .to_lowercase()
        .replace([' ', '.', '-'], "_");
    let mut out = String::with_capacity(lowered.len());
    for c in lowered.chars() {
        if c == '_' && out.ends_with('_') {
            continue;
        }
        out.push(c);
    }
    out
}

fn classify_header(header: &str) -> Column {
    let key = normalize_header(header);
    match key.as_str() {
        "name" => Column::Name,
        "type1" | "type_1" | "primary_type" => Column::PrimaryType,
        "type2" | "type_2" | "secondary_type" => Column::SecondaryType,
        "role" => Column::Role,
        "is_legendary" | "legendary" => Column::Legendary,
        "category" => Column::Category,
        "total" => Column::Stat(stat::BASE_TOTAL.to_string()),
        "sp_atk" => Column::Stat(stat::SP_ATTACK.to_string()),
        "sp_def" => Column::Stat(stat::SP_DEFENSE.to_string()),
        _ => match key.strip_prefix("against_") {
            Some(ty) if !ty.is_empty() => Column::Matchup(ty.to_string()),
            _ => Column::Stat(key),
        },
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.to_lowercase().as_str(),
        "1" | "1.0" | "true" | "yes" | "y"
    )
}

/// Load a candidate table from a CSV file
pub fn load_table(csv_path: &Path) -> Result<(CandidateTable, ParseStats)> {
    let file = std::fs::File::open(csv_path)
        .with_context(|| format!("Failed to open CSV file: {}", csv_path.display()))?;
    let (table, stats) = read_table(file)
        .with_context(|| format!("Failed to parse CSV file: {}", csv_path.display()))?;
    log::info!(
        "loaded {} entities from {} ({} rows, {} failed, {} duplicates)",
        table.len(),
        csv_path.display(),
        stats.total_rows,
        stats.failed,
        stats.duplicates
    );
    Ok((table, stats))
}

/// Parse a candidate table from any CSV source with a header row
pub fn read_table<R: Read>(reader: R) -> Result<(CandidateTable, ParseStats)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns: Vec<Column> = reader
        .headers()
        .context("Failed to read CSV header")?
        .iter()
        .map(classify_header)
        .collect();
    if !columns.contains(&Column::Name) {
        bail!("CSV header has no `name` column");
    }

    let mut table = CandidateTable::default();
    let mut stats = ParseStats::default();

    for (i, record) in reader.records().enumerate() {
        // header is line 1
        let line = i + 2;
        stats.total_rows += 1;
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                stats.failed += 1;
                log::warn!("line {}: unreadable row: {}", line, e);
                continue;
            }
        };

        let Some(entity) = parse_row(&columns, &record, line) else {
            stats.failed += 1;
            continue;
        };

        let name = entity.name.clone();
        if table.insert(entity) {
            stats.parsed += 1;
        } else {
            stats.duplicates += 1;
            log::warn!("line {}: duplicate name '{}' skipped", line, name);
        }
    }

    Ok((table, stats))
}

fn parse_row(columns: &[Column], record: &csv::StringRecord, line: usize) -> Option<Entity> {
    let mut name = None;
    let mut primary = None;
    let mut secondary = None;
    let mut role = None;
    let mut restricted = false;
    let mut stats: Vec<(&str, f64)> = Vec::new();
    let mut matchups: Vec<(&str, f64)> = Vec::new();

    for (column, value) in columns.iter().zip(record.iter()) {
        if value.is_empty() {
            continue;
        }
        match column {
            Column::Name => name = Some(value),
            Column::PrimaryType => primary = Some(value),
            Column::SecondaryType => secondary = Some(value),
            Column::Role => {
                role = Role::from_label(value);
                if role.is_none() {
                    log::warn!("line {}: unknown role '{}' ignored", line, value);
                }
            }
            Column::Legendary => restricted |= parse_flag(value),
            Column::Category => restricted |= value.eq_ignore_ascii_case("legendary"),
            Column::Matchup(ty) => match value.parse::<f64>() {
                Ok(v) if v.is_finite() => matchups.push((ty.as_str(), v)),
                _ => log::warn!("line {}: invalid against_{} value '{}'", line, ty, value),
            },
            // free-text columns (japanese_name, classfication, ...) are not stats
            Column::Stat(key) => match value.parse::<f64>() {
                Ok(v) if v.is_finite() => stats.push((key.as_str(), v)),
                Ok(_) => log::warn!("line {}: non-finite {} value '{}'", line, key, value),
                Err(_) => {}
            },
        }
    }

    let Some(name) = name else {
        log::warn!("line {}: missing name", line);
        return None;
    };

    let mut entity = Entity::new(name)
        .with_types(primary, secondary)
        .with_restricted(restricted);
    entity.role = role;
    for (key, v) in stats {
        entity = entity.with_stat(key, v);
    }
    for (ty, v) in matchups {
        entity = entity.with_matchup(ty, v);
    }
    Some(entity)
}
