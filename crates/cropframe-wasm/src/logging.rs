//! Forwarding of `log` records to the browser console.
//!
//! The core crate logs through the `log` facade. This module installs
//! `console_log` as the backend once per module instance; later calls only
//! change the maximum level.

use std::str::FromStr;
use std::sync::OnceLock;

use log::{Level, LevelFilter};
use wasm_bindgen::prelude::*;

/// Level used when the module starts.
pub(crate) const DEFAULT_LEVEL: LevelFilter = LevelFilter::Warn;

static CONSOLE_LOGGER: OnceLock<Result<(), String>> = OnceLock::new();

/// Parse a level name (`"off"`, `"error"`, `"warn"`, `"info"`, `"debug"`,
/// `"trace"`, any case).
pub(crate) fn parse_level(level: &str) -> Option<LevelFilter> {
    LevelFilter::from_str(level.trim()).ok()
}

/// Install the console logger (once) and set the maximum level.
///
/// Fails when a different logger was installed before this module's.
pub(crate) fn install(level: LevelFilter) -> Result<(), JsValue> {
    CONSOLE_LOGGER
        .get_or_init(|| {
            console_log::init_with_level(Level::Trace).map_err(|e| e.to_string())
        })
        .clone()
        .map_err(|e| JsValue::from_str(&e))?;
    // init_with_level raised the filter to Trace
    log::set_max_level(level);
    Ok(())
}

/// Route engine logs to the browser console at the given level.
///
/// # Example (TypeScript)
///
/// ```typescript
/// init_logging("debug");
/// ```
#[wasm_bindgen]
pub fn init_logging(level: &str) -> Result<(), JsValue> {
    let filter = parse_level(level)
        .ok_or_else(|| JsValue::from_str(&format!("unknown log level: {level}")))?;
    install(filter)
}
