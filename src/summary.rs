use crate::error::WriteError;
use crate::store::RatingSnapshot;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComponentSummary {
    pub rank: usize,
    pub handle: String,
    pub mu: f64,
    pub sig: f64,
    pub display_rating: f64,
}

/// Ranks every component in the snapshot by its conservative estimate
/// `mu - conservative_k * sig`, breaking ties by handle.
pub fn make_leaderboard(
    snapshot: &RatingSnapshot,
    conservative_k: f64,
) -> Vec<ComponentSummary> {
    let mut rating_data: Vec<ComponentSummary> = snapshot
        .iter()
        .map(|(handle, belief)| ComponentSummary {
            rank: 0,
            handle: handle.to_owned(),
            mu: belief.mu,
            sig: belief.sig,
            display_rating: belief.conservative(conservative_k),
        })
        .collect();
    rating_data.par_sort_unstable_by(|a, b| {
        b.display_rating
            .total_cmp(&a.display_rating)
            .then_with(|| a.handle.cmp(&b.handle))
    });
    for (idx, data) in rating_data.iter_mut().enumerate() {
        data.rank = idx + 1;
    }
    rating_data
}

pub fn write_leaderboard(
    rating_data: &[ComponentSummary],
    path: impl AsRef<Path>,
) -> Result<(), WriteError> {
    let path = path.as_ref();
    match path.extension().and_then(|s| s.to_str()) {
        Some("json") => {
            let file = std::fs::File::create(path)?;
            serde_json::to_writer_pretty(file, rating_data)?;
        }
        Some("csv") => {
            let mut writer = csv::Writer::from_path(path)?;
            for row in rating_data {
                writer.serialize(row)?;
            }
            writer.flush()?;
        }
        _ => return Err(WriteError::Extension(path.to_owned())),
    }
    tracing::info!("Successfully wrote {} ratings to {:?}", rating_data.len(), path);
    Ok(())
}

/// Logs summary statistics and the top `count` rows.
pub fn log_leaderboard(rating_data: &[ComponentSummary], count: usize) {
    if rating_data.is_empty() {
        tracing::info!("No rated components");
        return;
    }
    let sum_mu = rating_data.iter().map(|data| data.mu).sum::<f64>();
    let mean_mu = sum_mu / rating_data.len() as f64;
    tracing::info!(
        "{} rated components, mean rating.mu = {:.3}",
        rating_data.len(),
        mean_mu
    );
    for data in rating_data.iter().take(count) {
        tracing::info!(
            "{:5} {:>24} {:9.3} (mu {:.3}, sig {:.3})",
            data.rank,
            data.handle,
            data.display_rating,
            data.mu,
            data.sig
        );
    }
}
