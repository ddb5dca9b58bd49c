use crate::engine::Engine;
use crate::error::ConfigError;
use crate::systems::{SkillBelief, TrueSkill, get_rating_system_by_name};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Mean skill of a newcomer under the default configuration.
pub const DEFAULT_MU: f64 = 25.;

/// Constants of a rating engine. Every field falls back to the default
/// configuration when missing from a file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Name of the rating system, see [`get_rating_system_by_name`].
    pub system: String,
    /// Mean of a component never seen before.
    pub mu_noob: f64,
    /// Uncertainty of a component never seen before.
    pub sig_noob: f64,
    /// Standard deviation of one performance around the true skill.
    pub beta: f64,
    /// Skill drift added in quadrature before every match.
    pub tau: f64,
    /// Chance that two evenly matched teams are ranked equal.
    pub draw_probability: f64,
    /// No update leaves a belief more certain than this.
    pub sig_min: f64,
    /// Comparisons use `mu - conservative_k * sig`.
    pub conservative_k: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::with_scale(DEFAULT_MU)
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0. {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be finite and non-negative, got {}", value),
        })
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0. {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be finite and positive, got {}", value),
        })
    }
}

impl EngineConfig {
    /// The standard TrueSkill constants for newcomers starting at `mu_noob`.
    pub fn with_scale(mu_noob: f64) -> Self {
        let sig_noob = mu_noob / 3.;
        Self {
            system: "trueskill".to_owned(),
            mu_noob,
            sig_noob,
            beta: sig_noob / 2.,
            tau: sig_noob / 100.,
            draw_probability: 0.1,
            sig_min: sig_noob * 1e-4,
            conservative_k: 0.,
        }
    }

    pub fn from_file(source: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = source.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        // json5 rather than serde_json so that comments and trailing commas are accepted
        let config: Self = json5::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.mu_noob.is_finite() {
            return Err(ConfigError::Invalid {
                field: "mu_noob",
                reason: format!("must be finite, got {}", self.mu_noob),
            });
        }
        positive("sig_noob", self.sig_noob)?;
        positive("beta", self.beta)?;
        non_negative("tau", self.tau)?;
        non_negative("conservative_k", self.conservative_k)?;
        positive("sig_min", self.sig_min)?;
        if self.sig_min > self.sig_noob {
            return Err(ConfigError::Invalid {
                field: "sig_min",
                reason: format!("must not exceed sig_noob = {}", self.sig_noob),
            });
        }
        if !(0. ..1.).contains(&self.draw_probability) {
            return Err(ConfigError::Invalid {
                field: "draw_probability",
                reason: format!("must lie in [0, 1), got {}", self.draw_probability),
            });
        }
        Ok(())
    }

    pub fn default_belief(&self) -> SkillBelief {
        SkillBelief::new(self.mu_noob, self.sig_noob)
    }
}

/// An engine with the default configuration and no ratings.
pub fn create_default_setup() -> Engine {
    let config = EngineConfig::default();
    let system = Box::new(TrueSkill::from(&config));
    Engine::new(config, system)
}

/// An engine with a custom configuration and no ratings.
pub fn create_setup(config: EngineConfig) -> Result<Engine, ConfigError> {
    config.validate()?;
    let system = get_rating_system_by_name(&config.system, &config)?;
    tracing::info!("Loading rating system:\n{:?}", system);
    Ok(Engine::new(config, system))
}
