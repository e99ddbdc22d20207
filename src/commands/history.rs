use super::render::records_table;
use super::{history_store, report};
use crate::cli::HistoryCommands;
use anyhow::Result;
use colored::Colorize;
use vectura::config::Config;
use vectura::storage::{Outcome, HISTORY_LIMIT};

/// Execute a history subcommand
pub fn execute(cfg: &Config, action: HistoryCommands) -> Result<()> {
    let store = history_store(cfg);

    match action {
        HistoryCommands::List => {
            let entries = store.load()?;
            if entries.is_empty() {
                println!("No calculations in history.");
                return Ok(());
            }
            println!(
                "{} ({}/{})",
                "Recent calculations".bold(),
                entries.len(),
                HISTORY_LIMIT
            );
            println!("{}", records_table(&entries, &cfg.pricing.currency_symbol));
            Ok(())
        }
        HistoryCommands::Clear => report(Outcome::from_result(store.clear(), |_| {
            "History cleared".to_string()
        })),
    }
}
