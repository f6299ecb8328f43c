use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "file-inventory",
    author,
    version,
    about = "A tool for creating and comparing file inventories",
    long_about = "file-inventory records every file under a directory as a plain-text list \
                  and compares two such lists to show which files came or went."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Recursively scan a directory and write the list of files found
    Create(CreateArgs),

    /// Compare two inventory files and show the paths that differ
    Diff(DiffArgs),
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Directory to scan
    pub dir: PathBuf,

    /// Output file name
    #[arg(short, long, default_value = "file-inventory.txt")]
    pub output: PathBuf,

    /// Sort file paths in output
    #[arg(long)]
    pub sort: bool,

    /// Use paths relative to the scanned directory
    #[arg(long)]
    pub relative: bool,

    /// Include hidden files (names starting with '.')
    #[arg(long)]
    pub hidden: bool,

    /// Glob patterns for file names to exclude (e.g., '*.log')
    #[arg(long, value_delimiter = ',')]
    pub exclude: Option<Vec<String>>,

    /// Glob patterns for file names to include (e.g., '*.rs')
    #[arg(long, value_delimiter = ',')]
    pub include: Option<Vec<String>>,

    /// Use a named preset from presets.toml
    #[arg(long)]
    pub preset: Option<String>,
}

#[derive(Args, Debug)]
pub struct DiffArgs {
    /// First (left) inventory file
    pub left: PathBuf,

    /// Second (right) inventory file
    pub right: PathBuf,

    /// How to print the differences
    #[arg(long, value_enum, default_value_t = DiffFormat::Table)]
    pub format: DiffFormat,

    /// Exit with status 1 when the inventories differ
    #[arg(long)]
    pub exit_code: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffFormat {
    Table,
    Plain,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_defaults() {
        let cli = Cli::try_parse_from(["file-inventory", "create", "/data"]).unwrap();
        let Command::Create(args) = cli.command else {
            panic!("expected create");
        };

        assert_eq!(args.dir, PathBuf::from("/data"));
        assert_eq!(args.output, PathBuf::from("file-inventory.txt"));
        assert!(!args.sort && !args.relative && !args.hidden);
        assert!(args.include.is_none() && args.exclude.is_none());
    }

    #[test]
    fn create_pattern_lists_split_on_commas() {
        let cli = Cli::try_parse_from([
            "file-inventory",
            "create",
            "dir",
            "-o",
            "out.txt",
            "--exclude",
            "*.log,*.tmp",
            "--include",
            "*.rs",
            "--sort",
        ])
        .unwrap();
        let Command::Create(args) = cli.command else {
            panic!("expected create");
        };

        assert_eq!(args.output, PathBuf::from("out.txt"));
        assert_eq!(args.exclude.unwrap(), vec!["*.log", "*.tmp"]);
        assert_eq!(args.include.unwrap(), vec!["*.rs"]);
        assert!(args.sort);
    }

    #[test]
    fn diff_needs_two_files() {
        assert!(Cli::try_parse_from(["file-inventory", "diff", "a.txt"]).is_err());

        let cli = Cli::try_parse_from(["file-inventory", "diff", "a.txt", "b.txt", "--format", "json"])
            .unwrap();
        let Command::Diff(args) = cli.command else {
            panic!("expected diff");
        };
        assert_eq!(args.format, DiffFormat::Json);
        assert!(!args.exit_code);
    }
}
