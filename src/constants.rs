// src/constants.rs

/// Tokens (lowercased) that bind to `true` for a boolean argument.
pub const TRUTHY_TOKENS: &[&str] = &["true", "t", "1", "yes", "y", "on", "en", "enable"];

/// Tokens (lowercased) that bind to `false` for a boolean argument.
pub const FALSY_TOKENS: &[&str] = &["false", "f", "0", "no", "n", "off", "dis", "disable"];

/// The `log` target used by the fallback logger for operator-facing messages.
pub const CONSOLE_LOG_TARGET: &str = "console";

/// Name of the directory holding trieshell configuration (inside the system config dir).
pub const CONFIG_DIR_NAME: &str = "trieshell";

/// The name of the console configuration file.
pub const CONFIG_FILENAME: &str = "console.toml";
