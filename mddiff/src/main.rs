//! # mddiff
//!
//! A CLI tool for comparing two media directories.
//!
//! ## Overview
//!
//! mddiff is built on top of mddifflib. It scans a source and a target
//! directory and reports what is missing from the target, what is extra in
//! the target, and what exists in both but changed. Files are matched by
//! directory and name stem, so a re-encode from `.mkv` to `.mp4` is one
//! modified file rather than one deletion plus one addition.
//!
//! ## Usage
//!
//! ```bash
//! # Compare two trees, table output
//! mddiff /media/movies /backup/movies
//!
//! # Structured output for scripts
//! mddiff /media/movies /backup/movies --format json
//!
//! # Tolerate small size drift, skip sidecar files
//! mddiff src tgt --threshold 4096 --exclude "**/*.nfo"
//!
//! # Read defaults from a config file
//! mddiff src tgt --config mddiff.toml
//! ```

mod logging;

use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use mddifflib::output::{reporter_for, OutputFormat};
use mddifflib::{
    diff_directories, validate_root, Config, DiffOptions, IgnoreList, RootRole,
};
use tracing::debug;

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("mddiff")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Arthur Debert")
        .about("Compare two media directories: missing, extra and modified files")
        .arg(
            Arg::new("source")
                .help("Source directory (the reference tree)")
                .required(true)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("target")
                .help("Target directory (the tree checked against the source)")
                .required(true)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .value_parser(OutputFormat::NAMES)
                .help("Output format [default: table]"),
        )
        .arg(
            Arg::new("threshold")
                .short('t')
                .long("threshold")
                .value_parser(value_parser!(u64))
                .help("Size difference in bytes still treated as unchanged [default: 0]"),
        )
        .arg(
            Arg::new("exclude")
                .short('e')
                .long("exclude")
                .action(ArgAction::Append)
                .help("Skip entries whose relative path matches this glob pattern"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_parser(value_parser!(PathBuf))
                .help("Read settings from a TOML config file"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("Log progress to stderr (-v info, -vv debug)"),
        )
}

/// Settings resolved from config file and flags; flags win.
struct Settings {
    format: OutputFormat,
    options: DiffOptions,
}

fn resolve_settings(matches: &ArgMatches) -> anyhow::Result<Settings> {
    let config = match matches.get_one::<PathBuf>("config") {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let format = match matches.get_one::<String>("format") {
        Some(name) => name.parse()?,
        None => config.output_format()?.unwrap_or_default(),
    };

    let threshold = matches
        .get_one::<u64>("threshold")
        .copied()
        .or(config.size_threshold)
        .unwrap_or(0);

    let mut ignore: IgnoreList = config.ignore_list()?;
    if let Some(patterns) = matches.get_many::<String>("exclude") {
        for pattern in patterns {
            ignore = ignore.pattern(pattern)?;
        }
    }

    Ok(Settings {
        format,
        options: DiffOptions::new().size_threshold(threshold).ignore(ignore),
    })
}

fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    let source = matches
        .get_one::<PathBuf>("source")
        .ok_or_else(|| anyhow::anyhow!("missing source directory"))?;
    let target = matches
        .get_one::<PathBuf>("target")
        .ok_or_else(|| anyhow::anyhow!("missing target directory"))?;

    validate_root(source, RootRole::Source)?;
    validate_root(target, RootRole::Target)?;

    let settings = resolve_settings(matches)?;
    debug!(
        format = %settings.format,
        threshold = settings.options.size_threshold,
        "resolved settings"
    );

    let report = diff_directories(source, target, &settings.options)?;

    let stdout = io::stdout();
    let styled = stdout.is_terminal() && console::colors_enabled();
    let mut out = stdout.lock();
    reporter_for(settings.format, styled).report(&report, &mut out)?;
    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();
    logging::init(matches.get_count("verbose"));

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> ArgMatches {
        let mut argv = vec!["mddiff"];
        argv.extend(args);
        build_command().try_get_matches_from(argv).unwrap()
    }

    #[test]
    fn test_command_is_valid() {
        build_command().debug_assert();
    }

    #[test]
    fn test_requires_two_directories() {
        assert!(build_command()
            .try_get_matches_from(["mddiff", "only-one"])
            .is_err());
    }

    #[test]
    fn test_rejects_unknown_format() {
        assert!(build_command()
            .try_get_matches_from(["mddiff", "a", "b", "--format", "csv"])
            .is_err());
    }

    #[test]
    fn test_default_settings() {
        let settings = resolve_settings(&parse(&["a", "b"])).unwrap();
        assert_eq!(settings.format, OutputFormat::Table);
        assert_eq!(settings.options.size_threshold, 0);
        assert!(settings.options.ignore.is_ignored(".git", ".git"));
    }

    #[test]
    fn test_flags_override_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("mddiff.toml");
        std::fs::write(&config, "size_threshold = 10\nformat = \"markdown\"\n").unwrap();
        let config = config.to_str().unwrap();

        let settings = resolve_settings(&parse(&["a", "b", "-c", config])).unwrap();
        assert_eq!(settings.format, OutputFormat::Markdown);
        assert_eq!(settings.options.size_threshold, 10);

        let settings =
            resolve_settings(&parse(&["a", "b", "-c", config, "-f", "json", "-t", "3"])).unwrap();
        assert_eq!(settings.format, OutputFormat::Json);
        assert_eq!(settings.options.size_threshold, 3);
    }

    #[test]
    fn test_exclude_patterns_are_added() {
        let settings = resolve_settings(&parse(&["a", "b", "-e", "**/*.nfo"])).unwrap();
        assert!(settings.options.ignore.is_ignored("x.nfo", "Movies/x.nfo"));
        assert!(settings.options.ignore.is_ignored(".DS_Store", ".DS_Store"));
    }

    #[test]
    fn test_invalid_exclude_pattern() {
        assert!(resolve_settings(&parse(&["a", "b", "-e", "[bad"])).is_err());
    }
}
