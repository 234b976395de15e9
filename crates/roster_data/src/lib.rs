//! Roster Data Library
//!
//! CSV candidate table → `Entity` list, anchor catalogue, team export

pub mod anchors;
pub mod export;
pub mod table;

pub use anchors::AnchorCatalog;
pub use export::{default_team_filename, write_team_csv, write_team_set_json};
pub use table::{load_table, read_table, CandidateTable, ParseStats, DEFAULT_EXCLUSIONS};
