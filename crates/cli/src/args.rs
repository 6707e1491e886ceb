use clap::{ArgAction, Parser};
use std::path::PathBuf;

use torfind_core::Config;

/// Environment variable naming a config file when `--config` is absent.
pub const CONFIG_ENV: &str = "TORFIND_CONFIG";

#[derive(Debug, Parser)]
#[command(name = "torfind", version)]
#[command(about = "Find .torrent files by the name stored inside them", long_about = None)]
pub struct Cli {
    /// Directory to search (default: current directory)
    #[arg(short, long)]
    pub path: Option<PathBuf>,

    /// Text to look for in torrent names; omit to list every torrent
    #[arg(short, long)]
    pub name: Option<String>,

    /// Treat NAME as a regular expression
    #[arg(short, long)]
    pub regex: bool,

    /// Copy matches into DIR; without DIR, into the search directory
    #[arg(short, long = "dest", value_name = "DIR", num_args = 0..=1)]
    pub dest: Option<Option<PathBuf>>,

    /// Name copies after the torrent name instead of the file name
    #[arg(long)]
    pub rename: bool,

    /// Descend into symlinked directories
    #[arg(long)]
    pub follow_links: bool,

    /// TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Emit log lines as JSON
    #[arg(long)]
    pub log_json: bool,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Config file from `--config`, falling back to `TORFIND_CONFIG`.
    pub fn config_path(&self) -> Option<PathBuf> {
        self.config
            .clone()
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from))
    }

    /// Default log filter when `RUST_LOG` is unset.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }

    /// Layers command-line flags over loaded configuration.
    pub fn apply(&self, config: &mut Config) {
        if let Some(path) = &self.path {
            config.search.path = path.clone();
        }
        if let Some(name) = &self.name {
            config.search.pattern = Some(name.clone());
        }
        if self.regex {
            config.search.use_regex = true;
        }
        if self.follow_links {
            config.search.follow_links = true;
        }
        if let Some(dest) = &self.dest {
            // empty path selects the search root
            config.output.destination = Some(dest.clone().unwrap_or_default());
        }
        if self.rename {
            config.output.rename = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("torfind").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults_leave_config_alone() {
        let mut config = Config::default();
        parse(&[]).apply(&mut config);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_flags_override_config() {
        let mut config = Config::default();
        config.search.pattern = Some("from file".to_string());

        parse(&["-p", "/data", "-n", "foo", "-r", "-d", "/out", "--rename"]).apply(&mut config);

        assert_eq!(config.search.path, PathBuf::from("/data"));
        assert_eq!(config.search.pattern.as_deref(), Some("foo"));
        assert!(config.search.use_regex);
        assert_eq!(config.resolved_destination(), Some(PathBuf::from("/out")));
        assert!(config.output.rename);
    }

    #[test]
    fn test_dest_without_value_means_search_root() {
        let cli = parse(&["-p", "/data", "-d"]);
        assert_eq!(cli.dest, Some(None));

        let mut config = Config::default();
        cli.apply(&mut config);
        assert_eq!(config.resolved_destination(), Some(PathBuf::from("/data")));
    }

    #[test]
    fn test_verbosity() {
        assert_eq!(parse(&[]).log_level(), "warn");
        assert_eq!(parse(&["-v"]).log_level(), "info");
        assert_eq!(parse(&["-vv"]).log_level(), "debug");
    }
}
