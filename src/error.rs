use std::path::PathBuf;
use thiserror::Error;

/// Why a submitted match was rejected. A rejected match changes no ratings.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InvalidMatchError {
    #[error("a match needs at least two teams, found {found}")]
    TooFewTeams { found: usize },
    #[error("team {team} has no members")]
    EmptyTeam { team: usize },
    #[error("team {team} contains an empty component identifier")]
    EmptyIdentifier { team: usize },
    #[error("component {id:?} appears in more than one team")]
    DuplicateComponent { id: String },
    #[error("{teams} teams were given but {ranks} ranks")]
    RankCountMismatch { teams: usize, ranks: usize },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration file {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration")]
    Parse(#[from] json5::Error),
    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
    #[error("{0} is not a valid rating system. Must be one of: trueskill")]
    UnknownSystem(String),
}

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("invalid or missing filename extension in {0:?}")]
    Extension(PathBuf),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
