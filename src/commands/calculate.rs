use super::render::print_comparison;
use super::{address_repository, build_http_client, history_store, pinned_store, report};
use crate::cli::CalculateArgs;
use anyhow::{Context, Result};
use colored::Colorize;
use std::sync::Arc;
use tracing::info;
use vectura::config::Config;
use vectura::providers::GoogleRoutesClient;
use vectura::quote::{ComparisonEngine, ComparisonRequest, RouteDataNormalizer};
use vectura::storage::{AddressRepository, CalculationRecord, Outcome, Role, HISTORY_LIMIT, PINNED_LIMIT};

/// Execute the calculate command
///
/// Resolves the four names to their registered addresses, runs the comparison, records
/// the result in history and optionally pins it.
pub async fn execute(cfg: &Config, args: CalculateArgs) -> Result<()> {
    if args.destination1 == args.destination2 {
        anyhow::bail!("destination2 must differ from destination1");
    }

    let client = build_http_client()?;
    let addresses = address_repository(cfg, client.clone());

    let request = ComparisonRequest {
        origin: Some(resolve(&addresses, Role::Origin, &args.origin)?),
        destination1: Some(resolve(&addresses, Role::Destination, &args.destination1)?),
        recharge: Some(resolve(&addresses, Role::Recharge, &args.recharge)?),
        destination2: Some(resolve(&addresses, Role::Destination, &args.destination2)?),
        api_key: args.key,
        rate_per_km: args.rate.unwrap_or(cfg.pricing.default_rate_per_km),
    };

    let engine = ComparisonEngine::new(
        Arc::new(GoogleRoutesClient::new(client, &cfg.google)),
        RouteDataNormalizer::new(cfg.pricing.axle_multiplier),
    );

    println!("{}", "Calculating routes...".yellow());
    let result = engine.compare(&request).await?;
    println!();
    print_comparison(&result, &cfg.pricing.currency_symbol);
    println!();

    let record = CalculationRecord::from(&result);
    let history = history_store(cfg);
    report(Outcome::from_result(history.append(record.clone()), |n| {
        format!("Saved to history ({}/{})", n, HISTORY_LIMIT)
    }))?;

    if args.pin {
        let pinned = pinned_store(cfg);
        report(Outcome::from_result(pinned.pin(record), |n| {
            format!("Calculation pinned ({}/{})", n, PINNED_LIMIT)
        }))?;
    }

    info!("Calculate command completed");
    Ok(())
}

fn resolve(addresses: &AddressRepository, role: Role, name: &str) -> Result<String> {
    let record = addresses
        .get(role, name)
        .with_context(|| format!("Cannot resolve {} '{}'", role, name))?;
    Ok(record.formatted_address)
}
