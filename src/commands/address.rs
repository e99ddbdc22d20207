use super::{address_repository, build_http_client, report};
use crate::cli::AddressCommands;
use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use vectura::config::Config;
use vectura::quote::format::format_timestamp;
use vectura::storage::Role;

/// Execute an address subcommand
pub async fn execute(cfg: &Config, action: AddressCommands) -> Result<()> {
    let repo = address_repository(cfg, build_http_client()?);

    match action {
        AddressCommands::Register {
            role,
            name,
            address,
            key,
        } => report(repo.register_outcome(role, &name, &address, &key).await),
        AddressCommands::Delete { role, name } => report(repo.delete_outcome(role, &name)),
        AddressCommands::List { role } => {
            let roles: Vec<Role> = match role {
                Some(role) => vec![role],
                None => Role::ALL.to_vec(),
            };
            list(&repo, &roles)
        }
    }
}

fn list(repo: &vectura::storage::AddressRepository, roles: &[Role]) -> Result<()> {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("ROLE").fg(Color::Cyan),
        Cell::new("NAME").fg(Color::Cyan),
        Cell::new("ADDRESS").fg(Color::Cyan),
        Cell::new("CEP").fg(Color::Cyan),
        Cell::new("LAT, LNG").fg(Color::Cyan),
        Cell::new("REGISTERED").fg(Color::Cyan),
    ]);

    let mut count = 0;
    for role in roles {
        for entry in repo.list(*role)? {
            count += 1;
            table.add_row(vec![
                Cell::new(entry.role),
                Cell::new(&entry.name),
                Cell::new(&entry.record.formatted_address),
                Cell::new(entry.record.postal_code.as_deref().unwrap_or("-")),
                Cell::new(format!(
                    "{:.5}, {:.5}",
                    entry.record.latitude, entry.record.longitude
                )),
                Cell::new(format_timestamp(&entry.record.registered_at)),
            ]);
        }
    }

    if count == 0 {
        println!("No addresses registered.");
    } else {
        println!("{}", table);
    }
    Ok(())
}
