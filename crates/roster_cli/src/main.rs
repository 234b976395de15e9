//! Roster CLI
//!
//! Team recommendations around an anchor, read from a candidate CSV

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use env_logger::{Builder, Target};
use log::LevelFilter;
use roster_core::{
    generate, generate_for_anchors, Entity, RecommenderConfig, Role, Team, TeamProfile, TeamSet,
};
use roster_data::{
    default_team_filename, load_table, write_team_csv, write_team_set_json, AnchorCatalog,
    CandidateTable, DEFAULT_EXCLUSIONS,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "roster")]
#[command(about = "Recommend role-balanced teams around an anchor", long_about = None)]
struct Cli {
    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Preset {
    Default,
    Exploratory,
    Strict,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate teams for one anchor (or every catalogue anchor)
    Recommend {
        /// Candidate table (CSV)
        #[arg(long)]
        data: PathBuf,

        /// Anchor name (case-insensitive)
        #[arg(long, required_unless_present = "all_anchors")]
        anchor: Option<String>,

        /// Generate for every catalogue anchor found in the table
        #[arg(long, conflicts_with = "anchor")]
        all_anchors: bool,

        /// Number of distinct teams
        #[arg(long)]
        teams: Option<usize>,

        /// Team size including the anchor
        #[arg(long)]
        size: Option<usize>,

        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Enemy roster, comma separated
        #[arg(long, value_delimiter = ',')]
        enemy: Vec<String>,

        /// Config JSON file, used instead of a preset
        #[arg(long)]
        config: Option<PathBuf>,

        /// Built-in knob set (default when neither this nor --config is given)
        #[arg(long, value_enum, conflicts_with = "config")]
        preset: Option<Preset>,

        /// Sample among the K best candidates
        #[arg(long)]
        top_k: Option<usize>,

        /// Max base_total above the anchor
        #[arg(long, conflicts_with = "no_power_cap")]
        power_margin: Option<f64>,

        /// Disable the base_total cap
        #[arg(long)]
        no_power_cap: bool,

        /// Allow restricted (legendary) candidates
        #[arg(long)]
        allow_restricted: bool,

        /// Keep the default exclusion list in the pool
        #[arg(long)]
        keep_excluded: bool,

        /// Save the first team as CSV (file, or directory for team_<anchor>.csv)
        #[arg(long)]
        save: Option<PathBuf>,

        /// Print the team set(s) as JSON instead of text
        #[arg(long)]
        json: bool,

        /// Write the team set(s) as JSON to a file
        #[arg(long)]
        json_out: Option<PathBuf>,
    },

    /// List the anchor catalogue
    Anchors {
        /// Mark which anchors exist in this table
        #[arg(long)]
        data: Option<PathBuf>,
    },

    /// Classify roles by median thresholds and print the result
    Classify {
        #[arg(long)]
        data: PathBuf,

        /// Replace role labels already in the file
        #[arg(long)]
        overwrite: bool,
    },
}

/// Knob overrides from the command line, applied on top of preset/config
#[derive(Debug, Default, Clone, PartialEq)]
struct Overrides {
    teams: Option<usize>,
    size: Option<usize>,
    top_k: Option<usize>,
    power_margin: Option<f64>,
    no_power_cap: bool,
    allow_restricted: bool,
}

impl Overrides {
    fn apply(&self, config: &mut RecommenderConfig) {
        if let Some(n) = self.teams {
            config.team.n_teams = n;
        }
        if let Some(size) = self.size {
            config.team.target_size = size;
        }
        if let Some(k) = self.top_k {
            config.selection.top_k = k;
        }
        if let Some(margin) = self.power_margin {
            config.team.power_margin = Some(margin);
        }
        if self.no_power_cap {
            config.team.power_margin = None;
        }
        if self.allow_restricted {
            config.team.allow_restricted = true;
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let mut builder = Builder::new();
    builder.target(Target::Stderr).filter_level(level);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Recommend {
            data,
            anchor,
            all_anchors,
            teams,
            size,
            seed,
            enemy,
            config,
            preset,
            top_k,
            power_margin,
            no_power_cap,
            allow_restricted,
            keep_excluded,
            save,
            json,
            json_out,
        } => {
            let overrides = Overrides {
                teams,
                size,
                top_k,
                power_margin,
                no_power_cap,
                allow_restricted,
            };
            let config = build_config(preset, config.as_deref(), &overrides)?;
            let table = prepare_table(&data, keep_excluded)?;
            let enemy_roster = table
                .resolve(&enemy)
                .context("Unknown name in --enemy")?;

            let sets = match anchor {
                Some(name) => {
                    let anchor = table
                        .require(&name)
                        .with_context(|| format!("Unknown anchor '{}'", name))?;
                    vec![generate(anchor, table.entities(), &config, &enemy_roster, seed)]
                }
                None => {
                    let catalog = AnchorCatalog::default();
                    let anchors: Vec<&Entity> = catalog
                        .all_names()
                        .into_iter()
                        .filter_map(|n| table.get(n))
                        .collect();
                    if anchors.is_empty() {
                        bail!("No catalogue anchor found in {}", data.display());
                    }
                    generate_for_anchors(&anchors, table.entities(), &config, &enemy_roster, seed)
                }
            };

            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&sets).context("Failed to serialize teams")?
                );
            } else {
                for set in &sets {
                    print_team_set(set, &config);
                }
            }

            if let Some(path) = json_out {
                if let [set] = sets.as_slice() {
                    write_team_set_json(set, &path)?;
                } else {
                    for set in &sets {
                        let file = path.join(format!("teams_{}.json", set.anchor.to_lowercase()));
                        write_team_set_json(set, &file)?;
                    }
                }
            }

            if let Some(target) = save {
                for set in &sets {
                    match set.teams().first() {
                        Some(team) => {
                            let path = save_path(&target, &set.anchor, sets.len() > 1);
                            write_team_csv(team, &path)?;
                            println!("💾 Saved {} → {}", set.anchor, path.display());
                        }
                        None => log::warn!("{}: no team to save", set.anchor),
                    }
                }
            }
        }

        Commands::Anchors { data } => {
            let table = match data {
                Some(path) => Some(prepare_table(&path, true)?),
                None => None,
            };
            print_catalog(&AnchorCatalog::default(), table.as_ref());
        }

        Commands::Classify { data, overwrite } => {
            let (mut table, stats) = load_table(&data)?;
            println!("📄 {} ({} rows, {} parsed)", data.display(), stats.total_rows, stats.parsed);
            let thresholds = table.classify_roles(overwrite);

            println!("\nThresholds (median):");
            for (label, value) in [
                ("hp", thresholds.hp),
                ("attack", thresholds.attack),
                ("defense", thresholds.defense),
                ("sp_attack", thresholds.sp_attack),
                ("sp_defense", thresholds.sp_defense),
                ("speed", thresholds.speed),
            ] {
                match value {
                    Some(v) => println!("   {:<11} {:.1}", label, v),
                    None => println!("   {:<11} -", label),
                }
            }

            println!("\nRoles:");
            for role in Role::all() {
                let count = table
                    .entities()
                    .iter()
                    .filter(|e| e.role == Some(*role))
                    .count();
                println!("   {:<13} {}", role.label(), count);
            }
        }
    }

    Ok(())
}

fn build_config(
    preset: Option<Preset>,
    path: Option<&Path>,
    overrides: &Overrides,
) -> Result<RecommenderConfig> {
    let mut config = match path {
        Some(path) => RecommenderConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => match preset.unwrap_or(Preset::Default) {
            Preset::Default => RecommenderConfig::default(),
            Preset::Exploratory => RecommenderConfig::exploratory(),
            Preset::Strict => RecommenderConfig::strict(),
        },
    };
    overrides.apply(&mut config);
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Load the table, drop the exclusion list and fill in missing roles
fn prepare_table(path: &Path, keep_excluded: bool) -> Result<CandidateTable> {
    let (mut table, stats) = load_table(path)?;
    if stats.failed > 0 {
        log::warn!("{} rows in {} could not be parsed", stats.failed, path.display());
    }
    if table.is_empty() {
        bail!("No entities in {}", path.display());
    }
    if !keep_excluded {
        table.exclude_names(DEFAULT_EXCLUSIONS);
    }
    if table.missing_roles() > 0 {
        table.classify_roles(false);
    }
    if !table.has_matchups() {
        log::warn!("{} has no against_* columns; coverage is disabled", path.display());
    }
    Ok(table)
}

fn save_path(target: &Path, anchor: &str, many: bool) -> PathBuf {
    if many || target.is_dir() {
        target.join(default_team_filename(anchor))
    } else {
        target.to_path_buf()
    }
}

fn print_team_set(set: &TeamSet, config: &RecommenderConfig) {
    println!("\n🏆 {}: {} of {} teams", set.anchor, set.len(), config.team.n_teams);
    if set.is_empty() {
        println!("   (no team of {} could be built)", config.team.target_size);
        return;
    }
    for (i, team) in set.iter().enumerate() {
        println!("\n   Team {}", i + 1);
        print_team(team);
    }
}

fn print_team(team: &Team) {
    for member in team.members() {
        let types: Vec<&str> = member.types().collect();
        let role = member.role.map_or("-", |r| r.label());
        let total = member
            .base_total()
            .map_or_else(|| "-".to_string(), |t| format!("{:.0}", t));
        println!(
            "   {:<14} {:<18} {:<13} {:>5}",
            member.name,
            types.join("/"),
            role,
            total
        );
    }

    let profile = TeamProfile::from_team(team);
    if profile.matchups.is_empty() {
        return;
    }
    println!("   Weakest vs: {}", format_matchups(profile.worst(5)));
    println!("   Best vs:    {}", format_matchups(profile.best(5)));
}

fn format_matchups(matchups: &[(String, f64)]) -> String {
    matchups
        .iter()
        .map(|(ty, m)| format!("{} {:.2}", ty, m))
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_catalog(catalog: &AnchorCatalog, table: Option<&CandidateTable>) {
    for group in catalog.groups() {
        let names: Vec<String> = group
            .names
            .iter()
            .map(|n| match table {
                Some(t) if t.get(n).is_none() => format!("{} (missing)", n),
                _ => n.clone(),
            })
            .collect();
        println!("{:<8} {}", group.region, names.join(", "));
    }
}
