use component_rating::{Engine, Match, create_default_setup};
use quickcheck_macros::quickcheck;

const POOL: usize = 6;

fn handle(idx: u8) -> String {
    format!("p{}", idx as usize % POOL)
}

// Replays head-to-head results between a small pool of components
fn engine_with_history(history: &[(u8, u8)]) -> Engine {
    let engine = create_default_setup();
    for &(winner, loser) in history {
        let (winner, loser) = (handle(winner), handle(loser));
        if winner != loser {
            assert!(engine.submit_results([[winner], [loser]]).is_ok());
        }
    }
    engine
}

#[quickcheck]
fn unseen_components_are_equal(a: String, b: String) -> bool {
    let engine = create_default_setup();
    engine.compare(&a, &b) == 0 && engine.store().is_empty()
}

#[quickcheck]
fn self_comparison_is_zero(history: Vec<(u8, u8)>, who: u8) -> bool {
    let engine = engine_with_history(&history);
    let who = handle(who);
    engine.compare(&who, &who) == 0
}

#[quickcheck]
fn comparison_is_antisymmetric(history: Vec<(u8, u8)>, a: u8, b: u8) -> bool {
    let engine = engine_with_history(&history);
    let (a, b) = (handle(a), handle(b));
    engine.compare(&a, &b) == -engine.compare(&b, &a)
}

#[quickcheck]
fn winners_overtake_losers(winner_size: u8, loser_size: u8) -> bool {
    let winners: Vec<String> = (0..=winner_size % 4).map(|i| format!("w{}", i)).collect();
    let losers: Vec<String> = (0..=loser_size % 4).map(|i| format!("l{}", i)).collect();
    let engine = create_default_setup();
    if engine
        .submit_results([winners.clone(), losers.clone()])
        .is_err()
    {
        return false;
    }
    winners
        .iter()
        .all(|w| losers.iter().all(|l| engine.compare(w, l) > 0))
}

#[quickcheck]
fn first_match_shrinks_sigma(winner_size: u8, loser_size: u8, draw: bool) -> bool {
    let winners: Vec<String> = (0..=winner_size % 4).map(|i| format!("w{}", i)).collect();
    let losers: Vec<String> = (0..=loser_size % 4).map(|i| format!("l{}", i)).collect();
    let engine = create_default_setup();
    let loser_rank = if draw { 0 } else { 1 };
    let contest = Match::ranked([(winners.clone(), 0), (losers.clone(), loser_rank)]);
    if engine.submit_match(&contest).is_err() {
        return false;
    }
    let prior = engine.config().default_belief();
    winners
        .iter()
        .chain(&losers)
        .all(|id| engine.rating(id).sig < prior.sig)
}
