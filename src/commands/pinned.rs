use super::render::records_table;
use super::{history_store, pinned_store, report};
use crate::cli::PinnedCommands;
use anyhow::Result;
use colored::Colorize;
use vectura::config::Config;
use vectura::storage::{Outcome, PINNED_LIMIT};

/// Execute a pinned subcommand
pub fn execute(cfg: &Config, action: PinnedCommands) -> Result<()> {
    let store = pinned_store(cfg);

    match action {
        PinnedCommands::List => {
            let entries = store.load()?;
            if entries.is_empty() {
                println!("No pinned calculations.");
                return Ok(());
            }
            println!(
                "{} ({}/{})",
                "Pinned calculations".bold(),
                entries.len(),
                PINNED_LIMIT
            );
            println!("{}", records_table(&entries, &cfg.pricing.currency_symbol));
            Ok(())
        }
        PinnedCommands::Add { index } => {
            let history = history_store(cfg).load()?;
            let entry = index
                .checked_sub(1)
                .and_then(|i| history.get(i))
                .cloned()
                .ok_or_else(|| {
                    anyhow::anyhow!(
                        "No history entry #{} (history holds {})",
                        index,
                        history.len()
                    )
                })?;

            report(Outcome::from_result(store.pin(entry), |n| {
                format!("Calculation pinned ({}/{})", n, PINNED_LIMIT)
            }))
        }
        PinnedCommands::Clear => report(Outcome::from_result(store.clear(), |_| {
            "Pinned calculations cleared".to_string()
        })),
    }
}
