//! CLI argument parsing using clap.

use std::path::PathBuf;

use clap::Parser;

/// relshape - static semantic analysis of a single SQL SELECT statement
#[derive(Parser, Debug)]
#[command(name = "relshape")]
#[command(about = "Analyze a SELECT statement against a database structure snapshot", long_about = None)]
#[command(version)]
pub struct Args {
    /// Path to the database-structure JSON file.
    #[arg(short = 's', long = "structure", value_name = "PATH")]
    pub structure: PathBuf,

    /// The SQL to analyze. Read from standard input when omitted.
    #[arg(short = 'q', long = "query", value_name = "SQL")]
    pub query: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_required_structure_path() {
        let args = Args::parse_from(["relshape", "-s", "structure.json"]);
        assert_eq!(args.structure, PathBuf::from("structure.json"));
        assert!(args.query.is_none());
    }

    #[test]
    fn parses_inline_query() {
        let args = Args::parse_from(["relshape", "-s", "structure.json", "-q", "SELECT 1"]);
        assert_eq!(args.query.as_deref(), Some("SELECT 1"));
    }

    #[test]
    fn rejects_missing_structure_path() {
        let result = Args::try_parse_from(["relshape"]);
        assert!(result.is_err());
    }
}
