// src/constants.rs

/// The name of the tool, used for the configuration directory (`~/.config/fixline`).
pub const TOOL_NAME: &str = "fixline";

/// The name of the optional configuration file (inside the configuration directory).
pub const CONFIG_FILENAME: &str = "config.toml";

/// Environment variable that overrides the configuration file location.
pub const CONFIG_PATH_ENV: &str = "FIXLINE_CONFIG";

/// How many commits are scanned when completing a VCS reference.
pub const DEFAULT_HISTORY_LIMIT: usize = 20;

/// Display width used when the terminal cannot be queried.
pub const DEFAULT_TERMINAL_WIDTH: usize = 80;

/// Separator placed between a rule name and its description in completion displays.
pub const DESCRIPTION_SEPARATOR: &str = " -- ";

/// Characters accepted as separators inside classpath-style path lists.
pub const PATH_LIST_SEPARATORS: &[char] = &[':', ';'];
