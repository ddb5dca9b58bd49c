use crate::systems::SkillBelief;
use overload::overload;
use std::ops;

#[derive(Clone, Debug, PartialEq)]
pub struct Gaussian {
    pub mu: f64,
    pub sigma: f64,
}

pub const ZERO: Gaussian = Gaussian { mu: 0., sigma: 0. };

// Sums and differences of independent Gaussian variables
overload!((a: ?Gaussian) + (b: ?Gaussian) -> Gaussian {
    Gaussian {
        mu: a.mu + b.mu,
        sigma: a.sigma.hypot(b.sigma),
    }
});

overload!((a: &mut Gaussian) += (b: ?Gaussian) {
    a.mu += b.mu;
    a.sigma = a.sigma.hypot(b.sigma);
});

overload!((a: ?Gaussian) - (b: ?Gaussian) -> Gaussian {
    Gaussian {
        mu: a.mu - b.mu,
        sigma: a.sigma.hypot(b.sigma),
    }
});

impl From<SkillBelief> for Gaussian {
    fn from(belief: SkillBelief) -> Self {
        Self {
            mu: belief.mu,
            sigma: belief.sig,
        }
    }
}

impl Gaussian {
    pub fn variance(&self) -> f64 {
        self.sigma * self.sigma
    }

    /// One noisy performance of a player with this skill distribution.
    pub fn perform(&self, beta: f64) -> Gaussian {
        Gaussian {
            mu: self.mu,
            sigma: self.sigma.hypot(beta),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_sum_and_difference() {
        let a = Gaussian { mu: 3., sigma: 3. };
        let b = Gaussian { mu: 1., sigma: 4. };

        let sum = &a + &b;
        assert_eq!(sum.mu, 4.);
        assert!((sum.sigma - 5.).abs() < 1e-12);

        let diff = a.clone() - b.clone();
        assert_eq!(diff.mu, 2.);
        assert!((diff.variance() - 25.).abs() < 1e-9);

        let mut acc = ZERO;
        acc += a;
        acc += &b;
        assert_eq!(acc, sum);
    }

    #[test]
    fn test_perform_adds_beta() {
        let skill = Gaussian::from(SkillBelief::new(20., 6.));
        let perf = skill.perform(8.);
        assert_eq!(perf.mu, 20.);
        assert!((perf.sigma - 10.).abs() < 1e-12);
    }
}
