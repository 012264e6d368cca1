use std::ffi::OsString;
use std::path::PathBuf;

use clap::parser::ValueSource;
use clap::{
    Arg, ArgAction, ArgMatches, Command, command, crate_authors, crate_description, crate_name,
    crate_version,
};

use crate::config::{Settings, expand_path};
use crate::constants::{
    COMMAND_HELP, CONFIG_HELP, DEFAULT_FILE_PATTERN, DEFAULT_OUTPUT_BASEDIR,
    DEFAULT_OUTPUT_PREFIX, DRY_RUN_HELP, FILE_PATTERN_HELP, IGNORE_CASE_HELP, LOG_FILE_HELP,
    OUTPUT_BASEDIR_HELP, OUTPUT_PREFIX_HELP, OUTPUT_SUBDIR_HELP, SOURCE_HELP, VERBOSE_HELP,
};
use crate::dispatch::CommandTemplate;
use crate::errors::{Result, generic_error};
use crate::logging::LogLevel;
use crate::workflow::RunOptions;

/// Multi-letter short flags accepted for compatibility, with their long forms
const LEGACY_FLAGS: [(&str, &str); 3] = [
    ("-pt", "--file-pattern"),
    ("-ofp", "--output-file-prefix"),
    ("-osd", "--output-basedir"),
];

/// Flags that consume the following token as their value
const VALUE_FLAGS: [&str; 12] = [
    "-p",
    "--file-pattern",
    "--output-file-prefix",
    "--output-basedir",
    "--output-subdir",
    "-c",
    "--config",
    "-l",
    "--log-file",
    "-pt",
    "-ofp",
    "-osd",
];

/// Builds the command-line definition
///
/// Defines the following arguments:
/// - `source_directory`: Directory searched for files
/// - `command`: The external command and its fixed arguments (rest of the line)
/// - `file_pattern`, `dry`, `verbose`, `output_file_prefix`, `output_basedir`,
///   `output_subdir`, `ignore_case`, `config`, `log_file`
pub fn build_command() -> Command {
    // define the positional source directory
    let arg_source = Arg::new("source_directory")
        .help(SOURCE_HELP)
        .required(true)
        .index(1);

    // define the command prefix, everything after it is passed through verbatim
    let arg_command = Arg::new("command")
        .help(COMMAND_HELP)
        .required(true)
        .index(2)
        .num_args(1..)
        .trailing_var_arg(true)
        .allow_hyphen_values(true);

    let arg_pattern = Arg::new("file_pattern")
        .short('p')
        .long("file-pattern")
        .help(FILE_PATTERN_HELP)
        .default_value(DEFAULT_FILE_PATTERN);

    // define arg for dry run
    let arg_dry = Arg::new("dry")
        .short('d')
        .long("dry-run")
        .help(DRY_RUN_HELP)
        .action(ArgAction::SetTrue);

    // define arg for verbosity level
    let arg_verbose = Arg::new("verbose")
        .short('v')
        .long("verbose")
        .help(VERBOSE_HELP)
        .action(ArgAction::Count);

    let arg_prefix = Arg::new("output_file_prefix")
        .long("output-file-prefix")
        .help(OUTPUT_PREFIX_HELP)
        .default_value(DEFAULT_OUTPUT_PREFIX);

    let arg_basedir = Arg::new("output_basedir")
        .long("output-basedir")
        .help(OUTPUT_BASEDIR_HELP)
        .default_value(DEFAULT_OUTPUT_BASEDIR);

    let arg_subdir = Arg::new("output_subdir")
        .long("output-subdir")
        .help(OUTPUT_SUBDIR_HELP)
        .default_value("");

    let arg_ignore_case = Arg::new("ignore_case")
        .short('i')
        .long("ignore-case")
        .help(IGNORE_CASE_HELP)
        .action(ArgAction::SetTrue);

    // define arg for reading defaults from a specific config file
    let arg_config = Arg::new("config")
        .short('c')
        .long("config")
        .help(CONFIG_HELP);

    // define arg for log file
    let arg_log_file = Arg::new("log_file")
        .short('l')
        .long("log-file")
        .help(LOG_FILE_HELP);

    command!()
        .author(crate_authors!())
        .about(crate_description!())
        .name(crate_name!())
        .version(crate_version!())
        .arg(arg_source)
        .arg(arg_command)
        .arg(arg_pattern)
        .arg(arg_dry)
        .arg(arg_verbose)
        .arg(arg_prefix)
        .arg(arg_basedir)
        .arg(arg_subdir)
        .arg(arg_ignore_case)
        .arg(arg_config)
        .arg(arg_log_file)
}

/// Parses the process arguments
///
/// Argument errors (missing source directory or command, unknown flags) are
/// reported by clap, which exits with its own status.
pub fn get_matches() -> ArgMatches {
    build_command().get_matches_from(normalize_legacy_flags(std::env::args_os()))
}

/// Rewrites `-pt`, `-ofp` and `-osd` to their long forms
///
/// Only the tokens before the command are rewritten; once the source
/// directory and the first command token have been seen, the rest of the
/// line belongs to the external command and is copied verbatim.
pub fn normalize_legacy_flags<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut iter = args.into_iter();
    let mut normalized: Vec<OsString> = iter.next().into_iter().collect();
    let mut positionals = 0;

    while let Some(arg) = iter.next() {
        let text = arg.to_str().map(str::to_owned);
        match text.as_deref() {
            Some("--") => {
                normalized.push(arg);
                break;
            }
            Some(flag) if flag.starts_with('-') && flag.len() > 1 => {
                let replacement = LEGACY_FLAGS
                    .iter()
                    .find(|(legacy, _)| *legacy == flag)
                    .map(|(_, long)| OsString::from(*long));
                normalized.push(replacement.unwrap_or(arg));
                if VALUE_FLAGS.contains(&flag)
                    && let Some(value) = iter.next()
                {
                    normalized.push(value);
                }
            }
            _ => {
                normalized.push(arg);
                positionals += 1;
                if positionals >= 2 {
                    break;
                }
            }
        }
    }

    normalized.extend(iter);
    normalized
}

/// Gets the verbosity level from the command-line arguments
///
/// # Arguments
/// * `matches` - The parsed command-line arguments
///
/// # Returns
/// * `LogLevel` - The log level based on the number of -v/--verbose flags
pub fn get_verbosity(matches: &ArgMatches) -> LogLevel {
    LogLevel::from_occurrences(matches.get_count("verbose"))
}

/// Gets the log file requested on the command line, if any
pub fn get_log_file(matches: &ArgMatches) -> Option<PathBuf> {
    matches
        .get_one::<String>("log_file")
        .map(|path| PathBuf::from(expand_path(path)))
}

/// Gets the configuration file requested on the command line, if any
pub fn get_config_option(matches: &ArgMatches) -> Option<&str> {
    matches.get_one::<String>("config").map(String::as_str)
}

/// Combines command-line values with configured defaults
///
/// A value typed on the command line wins over `settings`, which wins over
/// the built-in default.
///
/// # Errors
/// Returns an error if the command is missing
pub fn build_run_options(matches: &ArgMatches, settings: &Settings) -> Result<RunOptions> {
    let source = matches
        .get_one::<String>("source_directory")
        .ok_or_else(|| generic_error("Source directory argument not found"))?;

    let command = CommandTemplate::new(
        matches
            .get_many::<String>("command")
            .into_iter()
            .flatten()
            .cloned(),
    )?;

    let file_pattern = resolve_value(matches, "file_pattern", &settings.file_pattern);
    let output_file_prefix =
        resolve_value(matches, "output_file_prefix", &settings.output_file_prefix);
    let output_basedir = resolve_value(matches, "output_basedir", &settings.output_basedir);
    let output_subdir = resolve_value(matches, "output_subdir", &settings.output_subdir);

    Ok(RunOptions {
        source_dir: PathBuf::from(expand_path(source)),
        file_pattern,
        ignore_case: matches.get_flag("ignore_case") || settings.ignore_case.unwrap_or(false),
        command,
        output_basedir: PathBuf::from(expand_path(&output_basedir)),
        output_subdir: PathBuf::from(output_subdir),
        output_prefix: output_file_prefix,
        dry_run: matches.get_flag("dry"),
        verbose: matches.get_count("verbose") > 0,
    })
}

fn resolve_value(matches: &ArgMatches, id: &str, configured: &Option<String>) -> String {
    let typed = matches.value_source(id) == Some(ValueSource::CommandLine);
    let cli_value = matches.get_one::<String>(id).cloned().unwrap_or_default();

    match configured {
        Some(value) if !typed => value.clone(),
        _ => cli_value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(tokens: &[&str]) -> Vec<OsString> {
        tokens.iter().map(OsString::from).collect()
    }

    fn parse(tokens: &[&str]) -> ArgMatches {
        build_command()
            .try_get_matches_from(normalize_legacy_flags(args(tokens)))
            .unwrap()
    }

    #[test]
    fn test_legacy_flags_are_rewritten() {
        let normalized = normalize_legacy_flags(args(&[
            "fdispatch", "-pt", "*.jpg", "-ofp", "small_", "-osd", "out", "src", "magick",
        ]));
        assert_eq!(
            normalized,
            args(&[
                "fdispatch",
                "--file-pattern",
                "*.jpg",
                "--output-file-prefix",
                "small_",
                "--output-basedir",
                "out",
                "src",
                "magick",
            ])
        );
    }

    #[test]
    fn test_command_tokens_are_untouched() {
        let normalized =
            normalize_legacy_flags(args(&["fdispatch", "src", "-d", "tool", "-pt", "-osd"]));
        assert_eq!(
            normalized,
            args(&["fdispatch", "src", "-d", "tool", "-pt", "-osd"])
        );
    }

    #[test]
    fn test_defaults() {
        let matches = parse(&["fdispatch", "src", "cp"]);
        let options = build_run_options(&matches, &Settings::default()).unwrap();

        assert_eq!(options.source_dir, PathBuf::from("src"));
        assert_eq!(options.file_pattern, "*");
        assert_eq!(options.output_prefix, "p_");
        assert_eq!(options.output_basedir, PathBuf::from("processed"));
        assert_eq!(options.output_dir(), PathBuf::from("processed"));
        assert!(!options.dry_run);
        assert!(!options.verbose);
        assert!(!options.ignore_case);
        assert_eq!(options.command.tokens(), ["cp"]);
    }

    #[test]
    fn test_command_keeps_hyphen_arguments() {
        let matches = parse(&[
            "fdispatch", "-d", "src", "magick", "-resize", "50%", "-v",
        ]);
        let options = build_run_options(&matches, &Settings::default()).unwrap();

        assert!(options.dry_run);
        assert!(!options.verbose, "-v after the command belongs to the command");
        assert_eq!(options.command.tokens(), ["magick", "-resize", "50%", "-v"]);
    }

    #[test]
    fn test_legacy_flags_parse() {
        let matches = parse(&[
            "fdispatch", "src", "-pt", "*.txt", "-ofp", "new_", "-osd", "out", "-v", "echo",
        ]);
        let options = build_run_options(&matches, &Settings::default()).unwrap();

        assert_eq!(options.file_pattern, "*.txt");
        assert_eq!(options.output_prefix, "new_");
        assert_eq!(options.output_basedir, PathBuf::from("out"));
        assert!(options.verbose);
        assert_eq!(get_verbosity(&matches), LogLevel::Debug);
    }

    #[test]
    fn test_settings_fill_untyped_values() {
        let settings = Settings {
            file_pattern: Some("*.png".to_string()),
            output_file_prefix: Some("cfg_".to_string()),
            output_subdir: Some("nested".to_string()),
            ignore_case: Some(true),
            ..Settings::default()
        };
        let matches = parse(&["fdispatch", "--output-file-prefix", "cli_", "src", "cp"]);
        let options = build_run_options(&matches, &settings).unwrap();

        assert_eq!(options.file_pattern, "*.png");
        assert_eq!(options.output_prefix, "cli_");
        assert_eq!(options.output_dir(), PathBuf::from("processed").join("nested"));
        assert!(options.ignore_case);
    }

    #[test]
    fn test_missing_command_is_rejected() {
        let result = build_command().try_get_matches_from(args(&["fdispatch", "src"]));
        assert!(result.is_err());
    }

    #[test]
    fn test_log_and_config_options() {
        let matches = parse(&["fdispatch", "-l", "run.log", "-c", "my.yaml", "src", "cp"]);
        assert_eq!(get_log_file(&matches), Some(PathBuf::from("run.log")));
        assert_eq!(get_config_option(&matches), Some("my.yaml"));
    }
}
