//! Terminal rendering for calculations and stored records

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use vectura::quote::format::{format_hms, format_km, format_money, format_timestamp};
use vectura::quote::{ComparisonResult, Scenario};
use vectura::storage::CalculationRecord;

fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(
        header
            .iter()
            .map(|h| Cell::new(h).fg(Color::Cyan))
            .collect::<Vec<_>>(),
    );
    table
}

fn legs_table(scenario: &Scenario) -> Table {
    let mut table = new_table(&["LEG", "DISTANCE", "DURATION"]);
    for (idx, leg) in scenario.legs.iter().enumerate() {
        table.add_row(vec![
            Cell::new(idx + 1),
            Cell::new(format_km(leg.distance)),
            Cell::new(format_hms(leg.duration)),
        ]);
    }
    table
}

/// Full report of one calculation
pub fn print_comparison(result: &ComparisonResult, symbol: &str) {
    let stops = &result.stops;
    println!("{}", "Route".bold());
    println!("  {}: {}", "Origin".cyan(), stops.origin);
    println!("  {}: {}", "Destination 1".cyan(), stops.destination1);
    println!("  {}: {}", "Recharge".cyan(), stops.recharge);
    println!("  {}: {}", "Destination 2".cyan(), stops.destination2);
    println!();

    let mut table = new_table(&["", "SIMPLE", "FULL", "DIFFERENCE"]);
    table.add_row(vec![
        Cell::new("Distance"),
        Cell::new(format_km(result.simple.total_distance)),
        Cell::new(format_km(result.full.total_distance)),
        Cell::new(format_km(result.distance_diff)),
    ]);
    table.add_row(vec![
        Cell::new("Duration"),
        Cell::new(format_hms(result.simple.total_duration)),
        Cell::new(format_hms(result.full.total_duration)),
        Cell::new(format_hms(result.duration_diff)),
    ]);
    table.add_row(vec![
        Cell::new("Tolls"),
        Cell::new(format_money(result.simple.toll, symbol)),
        Cell::new(format_money(result.full.toll, symbol)),
        Cell::new(format_money(result.toll_diff, symbol)),
    ]);
    println!("{}", table);

    println!("{}", "Simple round trip legs".bold());
    println!("{}", legs_table(&result.simple));
    println!("{}", "Full round trip legs".bold());
    println!("{}", legs_table(&result.full));

    println!(
        "{}: {}",
        "Suggested value".bold(),
        format_money(result.suggested_value, symbol).green().bold()
    );
    println!(
        "  {} {}/km × {} + {} tolls",
        "Rationale:".dimmed(),
        format_money_rate(result.rate_per_km, symbol),
        format_km(result.distance_diff),
        format_money(result.toll_diff, symbol)
    );
}

fn format_money_rate(rate: f64, symbol: &str) -> String {
    format!("{} {:.2}", symbol, rate)
}

/// Table of history or pinned records, numbered from 1
pub fn records_table(records: &[CalculationRecord], symbol: &str) -> Table {
    let mut table = new_table(&[
        "#",
        "WHEN",
        "ORIGIN",
        "DEST 1",
        "RECHARGE",
        "DEST 2",
        "SIMPLE",
        "FULL",
        "Δ KM",
        "Δ TIME",
        "Δ TOLLS",
        "RATE/KM",
        "SUGGESTED",
    ]);

    for (idx, record) in records.iter().enumerate() {
        table.add_row(vec![
            Cell::new(idx + 1),
            Cell::new(format_timestamp(&record.timestamp)),
            Cell::new(&record.origin),
            Cell::new(&record.destination1),
            Cell::new(&record.recharge),
            Cell::new(&record.destination2),
            Cell::new(format_km(record.simple.total_distance)),
            Cell::new(format_km(record.full.total_distance)),
            Cell::new(format_km(record.distance_diff)),
            Cell::new(format_hms(record.duration_diff)),
            Cell::new(format_money(record.toll_diff, symbol)),
            Cell::new(format_money_rate(record.rate_per_km, symbol)),
            Cell::new(format_money(record.suggested_value, symbol)).fg(Color::Green),
        ]);
    }
    table
}
