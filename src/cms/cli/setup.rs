use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cms", bin_name = "cms", version)]
#[command(about = "Manage student records stored in tab-separated files", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true, help_heading = "Options")]
    pub verbose: u8,

    /// Directory holding config.json
    #[arg(long, value_name = "DIR", global = true, help_heading = "Options")]
    pub config_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show all records in a file
    #[command(alias = "ls", display_order = 1)]
    Show {
        /// Records file (defaults to the configured default-file)
        file: Option<PathBuf>,
    },

    /// Search records by one field
    #[command(alias = "find", display_order = 2)]
    Query {
        #[command(flatten)]
        by: QueryArgs,

        /// Records file (defaults to the configured default-file)
        file: Option<PathBuf>,
    },

    /// Insert a record and save the file
    #[command(display_order = 3)]
    Insert {
        /// 7-digit student ID
        id: String,
        name: String,
        programme: String,
        /// Mark between 0 and 100, at most one decimal
        mark: String,
        /// Records file (defaults to the configured default-file)
        file: Option<PathBuf>,
    },

    /// Change one field of a record and save the file
    #[command(display_order = 4)]
    Update {
        id: String,
        /// name, programme or mark
        field: String,
        value: String,
        /// Records file (defaults to the configured default-file)
        file: Option<PathBuf>,
    },

    /// Delete a record and save the file
    #[command(alias = "rm", display_order = 5)]
    Delete {
        id: String,
        /// Records file (defaults to the configured default-file)
        file: Option<PathBuf>,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Sort records and save the file
    #[command(display_order = 6)]
    Sort {
        #[arg(value_enum)]
        key: SortField,
        /// Records file (defaults to the configured default-file)
        file: Option<PathBuf>,
        /// Sort in descending order
        #[arg(short, long)]
        desc: bool,
    },

    /// Start an interactive session
    #[command(display_order = 7)]
    Shell {
        /// File to open at startup
        file: Option<PathBuf>,
    },

    /// Get or set configuration (capacity, default-file)
    #[command(display_order = 8)]
    Config {
        key: Option<String>,
        value: Option<String>,
    },
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct QueryArgs {
    /// Exact student ID
    #[arg(long)]
    pub id: Option<String>,

    /// Case-insensitive substring of the name
    #[arg(long)]
    pub name: Option<String>,

    /// Case-insensitive substring of the programme
    #[arg(long)]
    pub programme: Option<String>,

    /// Exact mark
    #[arg(long)]
    pub mark: Option<String>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SortField {
    Id,
    Mark,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_insert_with_file() {
        let cli = Cli::try_parse_from([
            "cms", "insert", "1000001", "Ann Lee", "CS", "88.5", "db.txt",
        ])
        .unwrap();
        match cli.command {
            Commands::Insert { id, name, file, .. } => {
                assert_eq!(id, "1000001");
                assert_eq!(name, "Ann Lee");
                assert_eq!(file, Some(PathBuf::from("db.txt")));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn query_needs_exactly_one_field() {
        assert!(Cli::try_parse_from(["cms", "query", "db.txt"]).is_err());
        assert!(
            Cli::try_parse_from(["cms", "query", "--name", "a", "--mark", "1", "db.txt"]).is_err()
        );
        assert!(Cli::try_parse_from(["cms", "query", "--name", "ann", "db.txt"]).is_ok());
    }

    #[test]
    fn verbosity_counts() {
        let cli = Cli::try_parse_from(["cms", "-vv", "show", "db.txt"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn sort_key_and_direction() {
        let cli = Cli::try_parse_from(["cms", "sort", "mark", "db.txt", "--desc"]).unwrap();
        match cli.command {
            Commands::Sort { key, desc, .. } => {
                assert_eq!(key, SortField::Mark);
                assert!(desc);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
