// src/constants.rs

/// Configuration file names searched for in the current directory, in priority order.
pub const CONFIG_FILENAMES: &[&str] = &[".monica.yml", ".monica.yaml", ".monica.toml"];

/// Environment variable that points to an explicit configuration file.
pub const CONFIG_PATH_ENV: &str = "MONICA_CONFIG";

/// Shell used to run command lines when the configuration does not name one.
#[cfg(not(target_os = "windows"))]
pub const DEFAULT_SHELL: &[&str] = &["sh", "-c"];

/// Shell used to run command lines when the configuration does not name one.
#[cfg(target_os = "windows")]
pub const DEFAULT_SHELL: &[&str] = &["cmd", "/C"];

/// Name of the global flag that raises the log level.
pub const DEBUG_FLAG: &str = "debug";

/// Short flag reserved by clap for `--help`.
pub const RESERVED_SHORT_FLAGS: &[char] = &['h'];

/// Exit code for a run that stopped on a configuration problem. Kept at zero on purpose:
/// a missing or broken `.monica.yml` is reported, not treated as a failed run.
pub const EXIT_CONFIG_ERROR: i32 = 0;

/// Exit code when a spawned command fails or cannot be started.
pub const EXIT_COMMAND_FAILED: i32 = 1;
