use clap::{Parser, Subcommand};
use std::path::PathBuf;

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("ROLLBOOK_BUILD"), ")");

#[derive(Parser, Debug)]
#[command(name = "rollbook")]
#[command(version = VERSION)]
#[command(about = "Keep track of students, roll numbers and grades", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding the data file and config.json (defaults to $ROLLBOOK_HOME,
    /// then the platform data directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new student
    #[command(alias = "a")]
    Add {
        /// Student name
        name: String,

        /// Roll number (positive integer, must be unique)
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        roll: u32,

        /// Grade (e.g. A, B+, Pass)
        grade: String,
    },

    /// Edit a student's name and/or grade
    #[command(alias = "e")]
    Edit {
        /// Roll number of the student to edit
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        roll: u32,

        /// New name (omit to keep current)
        #[arg(short, long)]
        name: Option<String>,

        /// New grade (omit to keep current)
        #[arg(short, long)]
        grade: Option<String>,
    },

    /// Remove a student
    #[command(alias = "rm")]
    Remove {
        /// Roll number of the student to remove
        roll: u32,
    },

    /// Search for a student by roll number
    #[command(alias = "s")]
    Search {
        /// Roll number to look up
        roll: u32,
    },

    /// List all students
    #[command(alias = "ls")]
    List,

    /// Interactive menu
    Menu,

    /// Get or set configuration
    Config {
        /// Configuration key (e.g., data-file)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
