//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use cutover::Family;

/// Cutover: reconcile RF extracts against HOS extracts, country by country
#[derive(Parser)]
#[command(name = "cutover")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Countries to process, comma separated (e.g. "US,GB")
    #[arg(short, long, global = true, value_name = "CODES")]
    pub countries: Option<String>,

    /// TOML file overriding the family constants
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output directory (default: ./<family>_output)
    #[arg(short, long, global = true, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Print the run summary as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compare HOS and RF country master data
    I01 {
        /// RF country master data extract
        #[arg(long, value_name = "FILE")]
        rf: PathBuf,

        /// HOS country master data extract
        #[arg(long, value_name = "FILE")]
        hos: PathBuf,
    },

    /// Split RF records by country
    I34 {
        /// RF I34 extract
        #[arg(long, value_name = "FILE")]
        rf: PathBuf,
    },

    /// Validate RF I38 records against HOS I38 and I37
    I38 {
        /// RF I38 extract
        #[arg(long, value_name = "FILE")]
        rf: PathBuf,

        /// HOS I38 extract
        #[arg(long, value_name = "FILE")]
        hos38: PathBuf,

        /// HOS I37 extract
        #[arg(long, value_name = "FILE")]
        hos37: PathBuf,
    },

    /// Validate RF I51 records against HOS I37, skipping online codes
    I51 {
        /// RF I51 extract
        #[arg(long, value_name = "FILE")]
        rf: PathBuf,

        /// HOS I37 extract
        #[arg(long, value_name = "FILE")]
        hos37: PathBuf,
    },

    /// Convert online I51 records into I52 records, then validate against HOS I36
    I52 {
        /// RF I52 extract
        #[arg(long, value_name = "FILE")]
        rf52: PathBuf,

        /// RF I51 extract
        #[arg(long, value_name = "FILE")]
        rf51: PathBuf,

        /// HOS I36 extract
        #[arg(long, value_name = "FILE")]
        hos36: PathBuf,
    },

    /// Validate RF I53 records against HOS I35
    I53 {
        /// RF I53 extract
        #[arg(long, value_name = "FILE")]
        rf: PathBuf,

        /// HOS I35 extract
        #[arg(long, value_name = "FILE")]
        hos35: PathBuf,
    },

    /// List the master country codes
    Countries,
}

/// What a parsed command asks the binary to do.
#[derive(Debug)]
pub enum Action<'a> {
    /// Reconcile one family. Files are primary first, each with the label
    /// used in error messages.
    Reconcile {
        family: Family,
        files: Vec<(&'static str, &'a Path)>,
    },
    /// Print the master country list.
    ListCountries,
}

impl Commands {
    pub fn action(&self) -> Action<'_> {
        let (family, files) = match self {
            Commands::I01 { rf, hos } => (
                Family::I01,
                vec![("I01 RF", rf.as_path()), ("I01 HOS", hos.as_path())],
            ),
            Commands::I34 { rf } => (Family::I34, vec![("I34 RF", rf.as_path())]),
            Commands::I38 { rf, hos38, hos37 } => (
                Family::I38,
                vec![
                    ("I38 RF", rf.as_path()),
                    ("I38 HOS", hos38.as_path()),
                    ("I37 HOS", hos37.as_path()),
                ],
            ),
            Commands::I51 { rf, hos37 } => (
                Family::I51,
                vec![("I51 RF", rf.as_path()), ("I37 HOS", hos37.as_path())],
            ),
            Commands::I52 { rf52, rf51, hos36 } => (
                Family::I52,
                vec![
                    ("I52 RF", rf52.as_path()),
                    ("I51 RF", rf51.as_path()),
                    ("I36 HOS", hos36.as_path()),
                ],
            ),
            Commands::I53 { rf, hos35 } => (
                Family::I53,
                vec![("I53 RF", rf.as_path()), ("I35 HOS", hos35.as_path())],
            ),
            Commands::Countries => return Action::ListCountries,
        };
        Action::Reconcile { family, files }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_family_command() {
        let cli = Cli::try_parse_from([
            "cutover", "i38", "--rf", "rf.csv", "--hos38", "h38.csv", "--hos37", "h37.csv",
            "--countries", "US,GB",
        ])
        .unwrap();

        assert_eq!(cli.countries.as_deref(), Some("US,GB"));
        let Action::Reconcile { family, files } = cli.command.action() else {
            panic!("expected a reconcile action");
        };
        assert_eq!(family, Family::I38);
        let labels: Vec<&str> = files.iter().map(|(l, _)| *l).collect();
        assert_eq!(labels, vec!["I38 RF", "I38 HOS", "I37 HOS"]);
    }

    #[test]
    fn test_countries_lists_master_codes() {
        let cli = Cli::try_parse_from(["cutover", "countries", "--json"]).unwrap();
        assert!(cli.json);
        assert!(matches!(cli.command.action(), Action::ListCountries));
    }

    #[test]
    fn test_missing_input_is_rejected() {
        assert!(Cli::try_parse_from(["cutover", "i53", "--rf", "rf.csv"]).is_err());
    }
}
