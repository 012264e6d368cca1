/// Constants used throughout the application
///
/// This module centralises all constants used in the application to make
/// them easier to manage and update.

/// Default glob pattern, matches every file
pub const DEFAULT_FILE_PATTERN: &str = "*";

/// Default prefix prepended to every destination file name
pub const DEFAULT_OUTPUT_PREFIX: &str = "p_";

/// Default root directory for mirrored output
pub const DEFAULT_OUTPUT_BASEDIR: &str = "processed";

/// Name of the defaults file looked up in the platform configuration directory
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

/// Width of the progress bar in characters
pub const PROGRESS_BAR_WIDTH: usize = 40;

/// Number of decimals shown in the progress percentage
pub const PROGRESS_DECIMALS: usize = 1;

/// Label shown in front of the progress bar
pub const PROGRESS_PREFIX: &str = "Progress:";

/// Qualifier string used for application identification
///
/// This is used as part of the application's unique identifier.
pub const QUALIFIER: &str = "com";

/// Organisation name used for application identification
///
/// This is used as part of the application's unique identifier.
pub const ORGANIZATION: &str = "Ondřej Vágner";

/// Application name used for identification
///
/// This is the name of the application used in configuration file paths.
pub const APPLICATION: &str = "file_dispatch";

/// Help text for the source directory argument
pub const SOURCE_HELP: &str =
    "Directory containing the files to process. It is searched recursively.";

/// Help text for the command argument
pub const COMMAND_HELP: &str = "Command to run for each file, followed by its fixed arguments.\n\
     The original file path and the destination path are appended.\n\
     Example for copying: `cp`\n\
     Example for ImageMagick: `magick -resize 50% -quality 80`";

/// Help text for the file pattern option
pub const FILE_PATTERN_HELP: &str =
    "Glob pattern matched against file names (e.g. '*.jpg'). Patterns containing '/' match the path relative to the source directory.";

/// Help text for the dry-run option
pub const DRY_RUN_HELP: &str = "Print the commands without executing them";

/// Help text for the verbose option
pub const VERBOSE_HELP: &str =
    "Show command output for successful runs too; repeat to increase log verbosity";

/// Help text for the output file prefix option
pub const OUTPUT_PREFIX_HELP: &str = "Prefix added to every destination file name";

/// Help text for the output base directory option
pub const OUTPUT_BASEDIR_HELP: &str =
    "Directory under which the source tree is mirrored; created if missing";

/// Help text for the output subdirectory option
pub const OUTPUT_SUBDIR_HELP: &str =
    "Subdirectory inserted between the output directory and the mirrored path";

/// Help text for the ignore-case option
pub const IGNORE_CASE_HELP: &str = "Match the file pattern case-insensitively";

/// Help text for the config option
pub const CONFIG_HELP: &str = "Read default option values from a specific YAML file";

/// Help text for the log-file option
pub const LOG_FILE_HELP: &str = "Also write the log to this file";
