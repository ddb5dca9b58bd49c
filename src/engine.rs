use crate::contest::Match;
use crate::engine_config::EngineConfig;
use crate::error::InvalidMatchError;
use crate::numerical::standard_normal_cdf;
use crate::store::{RatingSnapshot, RatingStore};
use crate::summary::{ComponentSummary, make_leaderboard};
use crate::systems::{RatingSystem, SkillBelief};
use std::cmp::Ordering;

/// A rating system bound to its own store of beliefs.
#[derive(Debug)]
pub struct Engine {
    config: EngineConfig,
    system: Box<dyn RatingSystem + Send + Sync>,
    store: RatingStore,
}

impl Engine {
    pub fn new(config: EngineConfig, system: Box<dyn RatingSystem + Send + Sync>) -> Self {
        let store = RatingStore::new(config.default_belief());
        Self {
            config,
            system,
            store,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn store(&self) -> &RatingStore {
        &self.store
    }

    /// Records a match whose teams are listed from best to worst.
    pub fn submit_results<T, I, S>(&self, teams: T) -> Result<(), InvalidMatchError>
    where
        T: IntoIterator<Item = I>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.submit_match(&Match::ordered(teams))
    }

    /// Records a match. Either every participant's belief is revised, or, if the
    /// match is invalid, nothing changes.
    pub fn submit_match(&self, contest: &Match) -> Result<(), InvalidMatchError> {
        contest.validate()?;

        // Held until every revised belief is written back
        let mut guard = self.store.lock();
        let mut beliefs: Vec<Vec<SkillBelief>> = contest
            .teams()
            .iter()
            .map(|team| team.iter().map(|id| guard.get(id)).collect())
            .collect();

        let standings: Vec<(Vec<&mut SkillBelief>, usize)> = beliefs
            .iter_mut()
            .zip(contest.ranks())
            .map(|(team, &rank)| (team.iter_mut().collect(), rank))
            .collect();
        self.system.round_update(standings);

        for (team, team_beliefs) in contest.teams().iter().zip(beliefs) {
            for (id, belief) in team.iter().zip(team_beliefs) {
                guard.set(id.as_str(), belief);
            }
        }
        tracing::debug!(
            "Processed match of {} teams with {} components",
            contest.len(),
            contest.components().count()
        );
        Ok(())
    }

    /// Current belief about `id`; the default belief if it never played.
    pub fn rating(&self, id: &str) -> SkillBelief {
        self.store.peek(id)
    }

    pub fn conservative_rating(&self, id: &str) -> f64 {
        self.rating(id).conservative(self.config.conservative_k)
    }

    pub fn compare_ordering(&self, a: &str, b: &str) -> Ordering {
        if a == b {
            return Ordering::Equal;
        }
        let k = self.config.conservative_k;
        let (belief_a, belief_b) = self.store.peek_pair(a, b);
        belief_a
            .conservative(k)
            .partial_cmp(&belief_b.conservative(k))
            .unwrap_or(Ordering::Equal)
    }

    /// Negative if `a` is estimated weaker than `b`, positive if stronger, zero if
    /// the estimates are identical. Components that never played hold the default belief.
    pub fn compare(&self, a: &str, b: &str) -> i32 {
        match self.compare_ordering(a, b) {
            Ordering::Less => -1,
            Ordering::Equal => 0,
            Ordering::Greater => 1,
        }
    }

    /// Probability that one performance of `a` beats one performance of `b`.
    pub fn win_probability(&self, a: &str, b: &str) -> f64 {
        if a == b {
            return 0.5;
        }
        let (belief_a, belief_b) = self.store.peek_pair(a, b);
        let beta_sq = self.config.beta * self.config.beta;
        let spread = (belief_a.variance() + belief_b.variance() + 2. * beta_sq).sqrt();
        standard_normal_cdf((belief_a.mu - belief_b.mu) / spread)
    }

    /// How likely the two teams are to draw, relative to a draw between identical
    /// certain teams; 1 is a perfectly even match. Zero if either team is empty.
    pub fn match_quality<A, B>(&self, team_a: A, team_b: B) -> f64
    where
        A: IntoIterator,
        A::Item: AsRef<str>,
        B: IntoIterator,
        B::Item: AsRef<str>,
    {
        let mut ids: Vec<String> = team_a.into_iter().map(|id| id.as_ref().to_owned()).collect();
        let size_a = ids.len();
        ids.extend(team_b.into_iter().map(|id| id.as_ref().to_owned()));
        if size_a == 0 || size_a == ids.len() {
            return 0.;
        }

        let beliefs = self.store.peek_many(&ids);
        let (beliefs_a, beliefs_b) = beliefs.split_at(size_a);
        let mu_diff = beliefs_a.iter().map(|b| b.mu).sum::<f64>()
            - beliefs_b.iter().map(|b| b.mu).sum::<f64>();
        let skill_var = beliefs.iter().map(SkillBelief::variance).sum::<f64>();
        let perf_var = ids.len() as f64 * self.config.beta * self.config.beta;
        let total_var = perf_var + skill_var;
        (perf_var / total_var).sqrt() * (-mu_diff * mu_diff / (2. * total_var)).exp()
    }

    pub fn snapshot(&self) -> RatingSnapshot {
        self.store.snapshot()
    }

    /// Every rated component, strongest first.
    pub fn leaderboard(&self) -> Vec<ComponentSummary> {
        make_leaderboard(&self.snapshot(), self.config.conservative_k)
    }
}
