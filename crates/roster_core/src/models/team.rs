use super::{Entity, Role};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Sorted member names; two teams with the same signature are the same team
pub type TeamSignature = Vec<String>;

/// Ordered team, slot 0 is the anchor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    members: Vec<Entity>,
}

impl Team {
    pub(crate) fn from_members(members: Vec<Entity>) -> Self {
        Self { members }
    }

    pub fn anchor(&self) -> Option<&Entity> {
        self.members.first()
    }

    pub fn members(&self) -> &[Entity] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|m| m.name.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names().any(|n| n == name)
    }

    pub fn signature(&self) -> TeamSignature {
        let mut names: Vec<String> = self.names().map(str::to_string).collect();
        names.sort();
        names
    }

    /// Whether any member carries `role`
    pub fn has_role(&self, role: Role) -> bool {
        self.members.iter().any(|m| m.role == Some(role))
    }
}

/// Distinct teams built around one anchor
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "TeamSetRecord")]
pub struct TeamSet {
    pub anchor: String,
    teams: Vec<Team>,
    #[serde(skip)]
    seen: HashSet<TeamSignature>,
}

impl TeamSet {
    pub fn new(anchor: impl Into<String>) -> Self {
        Self {
            anchor: anchor.into(),
            teams: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// Add `team` unless a team with the same signature is already present
    pub fn try_insert(&mut self, team: Team) -> bool {
        if !self.seen.insert(team.signature()) {
            return false;
        }
        self.teams.push(team);
        true
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn into_teams(self) -> Vec<Team> {
        self.teams
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Team> {
        self.teams.iter()
    }
}

/// Serialized form of a [`TeamSet`]; the signature index is rebuilt on load
#[derive(Deserialize)]
struct TeamSetRecord {
    anchor: String,
    #[serde(default)]
    teams: Vec<Team>,
}

impl From<TeamSetRecord> for TeamSet {
    fn from(record: TeamSetRecord) -> Self {
        let mut set = TeamSet::new(record.anchor);
        for team in record.teams {
            set.try_insert(team);
        }
        set
    }
}

impl<'a> IntoIterator for &'a TeamSet {
    type Item = &'a Team;
    type IntoIter = std::slice::Iter<'a, Team>;

    fn into_iter(self) -> Self::IntoIter {
        self.teams.iter()
    }
}
