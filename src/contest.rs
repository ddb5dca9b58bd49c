use crate::error::InvalidMatchError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// A set of components whose combined performance is ranked as one.
pub type Team = BTreeSet<String>;

/// The outcome of one contest between teams.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Match {
    /// Teams from best to worst.
    teams: Vec<Team>,
    /// Rank of each team, non-decreasing. Equal ranks mean the teams tied.
    ranks: Vec<usize>,
}

fn collect_team<I, S>(members: I) -> Team
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    members.into_iter().map(Into::into).collect()
}

impl Match {
    /// Teams listed from best to worst, with no ties.
    pub fn ordered<T, I, S>(teams: T) -> Self
    where
        T: IntoIterator<Item = I>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let teams: Vec<Team> = teams.into_iter().map(collect_team).collect();
        let ranks = (0..teams.len()).collect();
        Self { teams, ranks }
    }

    /// Teams paired with explicit ranks, 0 being best; teams sharing a rank drew.
    /// Entries may be given in any order.
    pub fn ranked<T, I, S>(entries: T) -> Self
    where
        T: IntoIterator<Item = (I, usize)>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut entries: Vec<(Team, usize)> = entries
            .into_iter()
            .map(|(members, rank)| (collect_team(members), rank))
            .collect();
        entries.sort_by_key(|&(_, rank)| rank);
        let (teams, ranks) = entries.into_iter().unzip();
        Self { teams, ranks }
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn ranks(&self) -> &[usize] {
        &self.ranks
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// Every participating component, best team first.
    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.teams.iter().flatten().map(String::as_str)
    }

    pub fn validate(&self) -> Result<(), InvalidMatchError> {
        if self.teams.len() < 2 {
            return Err(InvalidMatchError::TooFewTeams {
                found: self.teams.len(),
            });
        }
        let mut seen = HashSet::new();
        for (team_idx, team) in self.teams.iter().enumerate() {
            if team.is_empty() {
                return Err(InvalidMatchError::EmptyTeam { team: team_idx });
            }
            for id in team {
                if id.is_empty() {
                    return Err(InvalidMatchError::EmptyIdentifier { team: team_idx });
                }
                if !seen.insert(id.as_str()) {
                    return Err(InvalidMatchError::DuplicateComponent { id: id.clone() });
                }
            }
        }
        Ok(())
    }
}

/// A match as it appears in a JSON results file.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Teams from best to worst, or in any order if `ranks` is present.
    pub teams: Vec<Vec<String>>,
    /// Optional rank per team, 0 being best. Equal ranks are draws.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ranks: Option<Vec<usize>>,
}

impl TryFrom<MatchRecord> for Match {
    type Error = InvalidMatchError;

    fn try_from(record: MatchRecord) -> Result<Self, Self::Error> {
        let contest = match record.ranks {
            None => Match::ordered(record.teams),
            Some(ranks) if ranks.len() == record.teams.len() => {
                Match::ranked(record.teams.into_iter().zip(ranks))
            }
            Some(ranks) => {
                return Err(InvalidMatchError::RankCountMismatch {
                    teams: record.teams.len(),
                    ranks: ranks.len(),
                });
            }
        };
        contest.validate()?;
        Ok(contest)
    }
}
