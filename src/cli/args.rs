use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "aqi-processor")]
#[command(about = "Clean raw AQI datasets into data/processed/")]
#[command(version)]
pub struct Cli {
    #[arg(
        long,
        default_value = ".",
        help = "Project root containing data/raw and data/processed"
    )]
    pub project_root: PathBuf,

    #[arg(long, help = "Optional settings file (TOML, YAML or JSON)")]
    pub config: Option<PathBuf>,

    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(long, help = "Disable the progress bar")]
    pub no_progress: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["aqi-processor"]);
        assert_eq!(cli.project_root, PathBuf::from("."));
        assert!(cli.config.is_none());
        assert!(!cli.verbose);
        assert!(!cli.no_progress);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::parse_from([
            "aqi-processor",
            "--project-root",
            "/srv/aqi",
            "--config",
            "aqi.toml",
            "-v",
            "--log-file",
            "run.log",
            "--no-progress",
        ]);
        assert_eq!(cli.project_root, PathBuf::from("/srv/aqi"));
        assert_eq!(cli.config, Some(PathBuf::from("aqi.toml")));
        assert!(cli.verbose);
        assert_eq!(cli.log_file, Some(PathBuf::from("run.log")));
        assert!(cli.no_progress);
    }
}
