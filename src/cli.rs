use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use vectura::storage::Role;

#[derive(Parser, Debug)]
#[command(name = "vectura", version, about = "Truck freight quoting: simple vs. full round trip")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Compare the simple and full round trips for registered addresses
    Calculate(CalculateArgs),

    /// Manage the address book
    Address {
        #[command(subcommand)]
        action: AddressCommands,
    },

    /// Recent calculations
    History {
        #[command(subcommand)]
        action: HistoryCommands,
    },

    /// Pinned calculations
    Pinned {
        #[command(subcommand)]
        action: PinnedCommands,
    },

    /// Test configuration file validity
    Test,

    /// Show version information
    Version,
}

#[derive(Args, Debug, Clone)]
pub struct CalculateArgs {
    /// Registered origin name
    #[arg(long)]
    pub origin: String,

    /// Registered destination name (first delivery)
    #[arg(long)]
    pub destination1: String,

    /// Registered recharge name (reload point)
    #[arg(long)]
    pub recharge: String,

    /// Registered destination name (second delivery), must differ from destination1
    #[arg(long)]
    pub destination2: String,

    /// Routing API key
    #[arg(short, long, env = "VECTURA_API_KEY", hide_env_values = true)]
    pub key: String,

    /// Rate charged per km (defaults to pricing.default_rate_per_km)
    #[arg(short, long)]
    pub rate: Option<f64>,

    /// Pin the result after saving it to history
    #[arg(long)]
    pub pin: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum AddressCommands {
    /// Geocode and register an address under a name
    Register {
        /// origin, destination or recharge
        #[arg(long)]
        role: Role,

        #[arg(long)]
        name: String,

        /// Free-form address to geocode
        #[arg(long)]
        address: String,

        /// Shared secret, also used as the geocoding API key
        #[arg(short, long, env = "VECTURA_API_KEY", hide_env_values = true)]
        key: String,
    },

    /// Remove a registered address
    Delete {
        #[arg(long)]
        role: Role,

        #[arg(long)]
        name: String,
    },

    /// List registered addresses
    List {
        /// Only this role
        #[arg(long)]
        role: Option<Role>,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum HistoryCommands {
    /// Show recent calculations, oldest first
    List,

    /// Remove all history entries
    Clear,
}

#[derive(Subcommand, Debug, Clone)]
pub enum PinnedCommands {
    /// Show pinned calculations
    List,

    /// Pin a history entry by its 1-based position in `history list`
    Add { index: usize },

    /// Remove all pinned calculations
    Clear,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing_calculate() {
        let args = vec![
            "vectura",
            "calculate",
            "--origin",
            "HQ",
            "--destination1",
            "Port",
            "--recharge",
            "Yard",
            "--destination2",
            "Mill",
            "--key",
            "abc",
            "--rate",
            "7.5",
            "--pin",
        ];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Calculate(calc) => {
                assert_eq!(calc.origin, "HQ");
                assert_eq!(calc.destination2, "Mill");
                assert_eq!(calc.rate, Some(7.5));
                assert!(calc.pin);
            }
            _ => panic!("Expected Calculate command"),
        }
    }

    #[test]
    fn test_cli_parsing_address_register_role() {
        let args = vec![
            "vectura",
            "address",
            "register",
            "--role",
            "recarga",
            "--name",
            "Yard",
            "--address",
            "Rua A, 10",
            "--key",
            "s3cret",
        ];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Address {
                action: AddressCommands::Register { role, name, .. },
            } => {
                assert_eq!(role, Role::Recharge);
                assert_eq!(name, "Yard");
            }
            _ => panic!("Expected Address Register command"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_role() {
        let args = vec!["vectura", "address", "delete", "--role", "depot", "--name", "X"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_cli_parsing_pinned_add() {
        let args = vec!["vectura", "--config", "alt.toml", "pinned", "add", "3"];
        let cli = Cli::try_parse_from(args).unwrap();

        assert_eq!(cli.config, PathBuf::from("alt.toml"));
        match cli.command {
            Commands::Pinned {
                action: PinnedCommands::Add { index },
            } => assert_eq!(index, 3),
            _ => panic!("Expected Pinned Add command"),
        }
    }
}
