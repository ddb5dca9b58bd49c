//! TrueSkill with each adjacent pair of teams treated as one independent
//! two-team comparison: the corrections from every pair are computed from the
//! same pre-match beliefs and then summed per component.

mod normal;

use super::{RatingSystem, SkillBelief};
use crate::engine_config::EngineConfig;
use crate::numerical::{draw_margin, v_draw, v_win, w_draw, w_win};
use itertools::Itertools;
use normal::{Gaussian, ZERO};

#[derive(Debug)]
pub struct TrueSkill {
    // performance sigma
    pub beta: f64,
    // defines sigma growth per round
    pub sig_drift: f64,
    // chance that two evenly matched teams are ranked equal
    pub draw_probability: f64,
    // lower bound on sigma after an update
    pub sig_min: f64,
}

impl Default for TrueSkill {
    fn default() -> Self {
        Self::from(&EngineConfig::default())
    }
}

impl From<&EngineConfig> for TrueSkill {
    fn from(config: &EngineConfig) -> Self {
        Self {
            beta: config.beta,
            sig_drift: config.tau,
            draw_probability: config.draw_probability,
            sig_min: config.sig_min,
        }
    }
}

// Combined belief of one team, taken from its members' pre-match beliefs
#[derive(Debug)]
struct TeamPerformance {
    perf: Gaussian,
    skill_var: f64,
    size: usize,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Delta {
    mu: f64,
    var: f64,
}

// Posterior correction for one adjacent pair, per unit of skill variance
#[derive(Debug)]
struct PairUpdate {
    // v / c
    mean_rate: f64,
    // w / c^2
    var_rate: f64,
}

impl PairUpdate {
    // sign is +1 for the better-placed team and -1 for the other
    fn for_team(&self, team: &TeamPerformance, sign: f64) -> Delta {
        Delta {
            mu: sign * team.skill_var * self.mean_rate,
            var: -team.skill_var * team.skill_var * self.var_rate,
        }
    }

    // A member's share of the team correction is its share of the team's skill variance:
    // linear in the share for the mean, quadratic for the variance.
    fn for_member(team: &TeamPerformance, team_delta: Delta, member_var: f64) -> Delta {
        let share = member_var / team.skill_var;
        Delta {
            mu: team_delta.mu * share,
            var: team_delta.var * share * share,
        }
    }
}

impl TrueSkill {
    fn team_performance<'a>(
        &self,
        members: impl Iterator<Item = &'a SkillBelief>,
    ) -> TeamPerformance {
        let mut team = TeamPerformance {
            perf: ZERO,
            skill_var: 0.,
            size: 0,
        };
        for &belief in members {
            let skill = Gaussian::from(belief);
            team.skill_var += skill.variance();
            team.perf += skill.perform(self.beta);
            team.size += 1;
        }
        team
    }

    fn pair_update(
        &self,
        ahead: &TeamPerformance,
        behind: &TeamPerformance,
        tied: bool,
    ) -> PairUpdate {
        let diff = &ahead.perf - &behind.perf;
        let c = diff.sigma;
        let t = diff.mu / c;
        let eps = draw_margin(self.draw_probability, self.beta, ahead.size + behind.size) / c;
        let (v, w) = if tied {
            (v_draw(t, eps), w_draw(t, eps))
        } else {
            (v_win(t, eps), w_win(t, eps))
        };
        PairUpdate {
            mean_rate: v / c,
            var_rate: w / (c * c),
        }
    }

    fn apply(&self, belief: &mut SkillBelief, delta: Delta) {
        let var = belief.variance() + delta.var;
        let sig = if var > self.sig_min * self.sig_min {
            var.sqrt()
        } else {
            tracing::warn!(
                "Clamping sigma of {:?} to {} after variance update {}",
                belief,
                self.sig_min,
                delta.var
            );
            self.sig_min
        };
        *belief = SkillBelief::new(belief.mu + delta.mu, sig);
    }
}

impl RatingSystem for TrueSkill {
    fn round_update(&self, mut standings: Vec<(Vec<&mut SkillBelief>, usize)>) {
        for (team, _) in &mut standings {
            for belief in team.iter_mut() {
                **belief = belief.with_noise(self.sig_drift);
            }
        }

        let teams: Vec<TeamPerformance> = standings
            .iter()
            .map(|(team, _)| self.team_performance(team.iter().map(|belief| &**belief)))
            .collect();
        let mut deltas: Vec<Vec<Delta>> = standings
            .iter()
            .map(|(team, _)| vec![Delta::default(); team.len()])
            .collect();

        for (ahead, behind) in (0..teams.len()).tuple_windows() {
            let tied = standings[ahead].1 == standings[behind].1;
            let pair = self.pair_update(&teams[ahead], &teams[behind], tied);

            for (idx, sign) in [(ahead, 1.), (behind, -1.)] {
                let team_delta = pair.for_team(&teams[idx], sign);
                for (belief, acc) in standings[idx].0.iter().zip(deltas[idx].iter_mut()) {
                    let delta =
                        PairUpdate::for_member(&teams[idx], team_delta, belief.variance());
                    acc.mu += delta.mu;
                    acc.var += delta.var;
                }
            }
        }

        for ((team, _), team_deltas) in standings.iter_mut().zip(deltas) {
            for (belief, delta) in team.iter_mut().zip(team_deltas) {
                self.apply(belief, delta);
            }
        }
    }
}
