use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "menudesk")]
#[command(about = "Restaurant and menu records from the command line", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (config.json and the default store location)
    #[arg(long, global = true, env = "MENUDESK_HOME")]
    pub home: Option<PathBuf>,

    /// Path to the store file, overriding the configured one
    #[arg(long, global = true, env = "MENUDESK_STORE")]
    pub store: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the store with the default admin user if it does not exist
    Init,

    /// Get or set configuration
    Config {
        /// Configuration key (store-file, currency)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_starts_a_session() {
        let cli = Cli::try_parse_from(["menudesk"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["menudesk", "init", "--store", "/tmp/x.json", "-v"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Init)));
        assert_eq!(cli.store, Some(PathBuf::from("/tmp/x.json")));
        assert!(cli.verbose);
    }

    #[test]
    fn parses_config_set() {
        let cli = Cli::try_parse_from(["menudesk", "config", "currency", "$"]).unwrap();
        match cli.command {
            Some(Commands::Config { key, value }) => {
                assert_eq!(key.as_deref(), Some("currency"));
                assert_eq!(value.as_deref(), Some("$"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
