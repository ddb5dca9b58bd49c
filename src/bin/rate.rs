use anyhow::Context;
use component_rating::summary::{log_leaderboard, write_leaderboard};
use component_rating::{EngineConfig, Match, MatchRecord, create_default_setup, create_setup};

fn read_matches(path: &str) -> anyhow::Result<Vec<MatchRecord>> {
    let contents =
        std::fs::read_to_string(path).with_context(|| format!("Could not read {}", path))?;
    serde_json::from_str(&contents).with_context(|| format!("Could not parse matches in {}", path))
}

/// Replays a JSON list of match results and reports the final ratings
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 || args.len() > 4 {
        tracing::error!(
            "Usage: {} matches.json [config.json5 | -] [output.csv | output.json]",
            args[0]
        );
        return Ok(());
    }

    // "-" or a missing argument selects the default configuration
    let engine = match args.get(2).map(String::as_str) {
        None | Some("-") => create_default_setup(),
        Some(path) => {
            let config = EngineConfig::from_file(path)
                .with_context(|| format!("Could not load configuration {}", path))?;
            create_setup(config)?
        }
    };

    let records = read_matches(&args[1])?;
    let num_records = records.len();
    let mut num_rated = 0;
    for (idx, record) in records.into_iter().enumerate() {
        let result = Match::try_from(record).and_then(|contest| engine.submit_match(&contest));
        match result {
            Ok(()) => num_rated += 1,
            Err(err) => tracing::warn!("Skipping match #{}: {}", idx, err),
        }
    }
    tracing::info!("Rated {} of {} matches", num_rated, num_records);

    let leaderboard = engine.leaderboard();
    match args.get(3) {
        Some(path) => write_leaderboard(&leaderboard, path)?,
        None => log_leaderboard(&leaderboard, 50),
    }
    Ok(())
}
