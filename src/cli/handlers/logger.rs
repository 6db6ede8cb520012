// src/cli/handlers/logger.rs

use crate::cli::terminal_logger::TerminalLogger;
use crate::core::context::{Logger, Severity};
use crate::core::registry::CommandBuilder;
use std::sync::Arc;

/// `logger level [level]` and `logger enable [enable]`.
///
/// Without an argument each command reports the current setting.
pub fn register(builder: &mut CommandBuilder<'_>, terminal: &Arc<TerminalLogger>) {
    let show_level = Arc::clone(terminal);
    let set_level = Arc::clone(terminal);
    let show_enabled = Arc::clone(terminal);
    let set_enabled = Arc::clone(terminal);

    builder
        .group("logger")
        .add("level", move |log: Logger| {
            log.info(&format!(t!("logger.level.current"), level = show_level.min_severity()));
        })
        .add_named("level", &["level"], move |level: String, log: Logger| {
            if !set_level.is_enabled() {
                log.warn(t!("logger.level.not_listening"));
            }
            match level.parse::<Severity>() {
                Ok(severity) => {
                    set_level.set_min_severity(severity);
                    log.info(&format!(t!("logger.level.set"), level = severity));
                }
                Err(e) => {
                    log::debug!("{}", e);
                    log.error(t!("logger.level.unknown"));
                }
            }
        })
        .add("enable", move |log: Logger| {
            let state = if show_enabled.is_enabled() {
                t!("logger.enable.enabled")
            } else {
                t!("logger.enable.disabled")
            };
            log.info(&format!(t!("logger.enable.state"), state = state));
        })
        .add_named("enable", &["enable"], move |enable: bool, log: Logger| {
            // Announce while the sink is still listening.
            if enable {
                set_enabled.set_enabled(true);
                log.info(t!("logger.enable.on"));
            } else {
                log.info(t!("logger.enable.off"));
                set_enabled.set_enabled(false);
            }
        });
}
