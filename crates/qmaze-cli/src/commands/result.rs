//! Results of the last finished run

use anyhow::Result;
use qmaze_core::flow::View;
use qmaze_core::storage::{self, KeyValueStore, RUN_SUMMARY_KEY};
use qmaze_core::RunSummary;

use crate::config::Config;
use crate::render;

pub fn run(cfg: &Config) -> Result<()> {
    let store = cfg.open_store()?;
    print!("{}", report(&store)?);
    super::print_next(View::Result);
    Ok(())
}

pub fn load(store: &dyn KeyValueStore) -> Result<Option<RunSummary>> {
    Ok(storage::load(store, RUN_SUMMARY_KEY)?)
}

fn report(store: &dyn KeyValueStore) -> Result<String> {
    let text = match load(store)? {
        Some(summary) => render::summary(&summary),
        None => "No results yet. Finish a run with `qmaze play` first.\n".to_string(),
    };
    Ok(text)
}
