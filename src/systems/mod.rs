mod common;
mod true_skill;

pub use common::{RatingSystem, SkillBelief};
pub use true_skill::TrueSkill;

use crate::engine_config::EngineConfig;
use crate::error::ConfigError;

pub fn get_rating_system_by_name(
    system_name: &str,
    config: &EngineConfig,
) -> Result<Box<dyn RatingSystem + Send + Sync>, ConfigError> {
    match system_name {
        "trueskill" => Ok(Box::new(TrueSkill::from(config))),
        name => Err(ConfigError::UnknownSystem(name.to_owned())),
    }
}
