use serde::{Deserialize, Serialize};

/// Gaussian belief `N(mu, sig^2)` about a component's latent skill.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SkillBelief {
    pub mu: f64,
    pub sig: f64,
}

impl SkillBelief {
    pub fn new(mu: f64, sig: f64) -> Self {
        Self { mu, sig }
    }

    pub fn variance(&self) -> f64 {
        self.sig * self.sig
    }

    pub fn with_noise(self, sig_noise: f64) -> Self {
        Self {
            mu: self.mu,
            sig: self.sig.hypot(sig_noise),
        }
    }

    /// Pessimistic point estimate `mu - k * sig`.
    pub fn conservative(&self, k: f64) -> f64 {
        self.mu - k * self.sig
    }
}

pub trait RatingSystem: std::fmt::Debug {
    /// Revises every belief in `standings` in place. Teams are listed best to worst,
    /// each with its rank; neighbouring teams of equal rank drew.
    fn round_update(&self, standings: Vec<(Vec<&mut SkillBelief>, usize)>);
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_noise_adds_variance() {
        let belief = SkillBelief::new(10., 3.).with_noise(4.);
        assert_eq!(belief.mu, 10.);
        assert!((belief.sig - 5.).abs() < 1e-12);
        assert!((belief.variance() - 25.).abs() < 1e-9);
    }

    #[test]
    fn test_conservative_estimate() {
        let belief = SkillBelief::new(25., 2.);
        assert_eq!(belief.conservative(0.), 25.);
        assert_eq!(belief.conservative(3.), 19.);
    }
}
