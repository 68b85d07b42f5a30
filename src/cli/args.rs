use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/*-------------------------------------------------------------------------------------------------
  Command Line Interface (CLI) Arguments
-------------------------------------------------------------------------------------------------*/

#[derive(Parser, Debug)]
#[command(author, version, about="Query lists of IPv4 and IPv6 CIDR prefixes.", long_about = None)]
pub struct Args {
    /// Read prefixes from these files (`.json` files are read as JSON)
    #[arg(short = 'f', long = "file", required = true)]
    pub files: Vec<PathBuf>,

    /// Merge sibling prefixes into their supernets
    #[arg(short = 'm', long)]
    pub merge: bool,

    /// Fail on the first invalid prefix instead of skipping it
    #[arg(long)]
    pub strict: bool,

    /// Include IPv4 prefixes
    #[arg(short = '4', long)]
    pub ipv4: bool,

    /// Include IPv6 prefixes
    #[arg(short = '6', long)]
    pub ipv6: bool,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,

    /// Include a summary of the prefix list
    #[arg(long)]
    pub summary: bool,

    /// Save the results to a CSV file
    #[arg(long = "csv")]
    pub csv_file: Option<PathBuf>,

    /// Logging verbosity
    #[command(flatten)]
    pub verbose: clap_verbosity_flag::Verbosity,

    /// Look up the prefixes containing these IP addresses
    pub addresses: Option<Vec<String>>,
}

/*--------------------------------------------------------------------------------------
  Output Format
--------------------------------------------------------------------------------------*/

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Table of prefixes or lookup results
    Table,

    /// List of (RFC4632) CIDR-format prefixes
    Cidr,

    /// JSON document
    Json,
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_args() {
        let args = Args::parse_from([
            "cidrlist", "-f", "a.txt", "-f", "b.json", "-m", "-4", "-o", "cidr", "10.0.0.1",
        ]);

        assert_eq!(args.files, vec![PathBuf::from("a.txt"), PathBuf::from("b.json")]);
        assert!(args.merge);
        assert!(!args.strict);
        assert!(args.ipv4);
        assert_eq!(args.output, OutputFormat::Cidr);
        assert_eq!(args.addresses, Some(vec!["10.0.0.1".to_string()]));
    }
}
