//! # System Interaction Layer
//!
//! The boundary between the console and the host machine. The console core
//! never touches the filesystem; everything that does lives here.
//!
//! ## Modules
//!
//! - **`config`**: Loads `console.toml`, the settings of the interactive
//!   shell (suggestion and history limits, logger threshold), and resolves
//!   where that file lives.

pub mod config;
