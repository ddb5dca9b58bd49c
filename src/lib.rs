pub mod contest;
pub mod engine;
pub mod engine_config;
pub mod error;
pub mod numerical;
pub mod store;
pub mod summary;
pub mod systems;

pub use contest::{Match, MatchRecord, Team};
pub use engine::Engine;
pub use engine_config::{EngineConfig, create_default_setup, create_setup};
pub use error::{ConfigError, InvalidMatchError, WriteError};
pub use store::{RatingSnapshot, RatingStore};
pub use systems::{RatingSystem, SkillBelief, TrueSkill};
