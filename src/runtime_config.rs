//! Environment variable-based runtime configuration.
//!
//! ## Environment Variables
//!
//! ### `SWITCHBOARD_MAX_BODY_BYTES`
//!
//! Upper bound on the raw request body size the default JSON body
//! deserializer will accept. Accepts values in:
//! - Decimal: `1048576` (1 MiB)
//! - Hexadecimal: `0x100000` (1 MiB)
//!
//! Default: `0x100000` (1 MiB)
//!
//! Oversized bodies are rejected with a body-deserialization error before any
//! middleware or controller runs, so a misbehaving client cannot force the
//! core to parse arbitrarily large payloads.
//!
//! ## Usage
//!
//! ```rust
//! use switchboard::runtime_config::RuntimeConfig;
//!
//! let config = RuntimeConfig::from_env();
//! println!("Max body: {} bytes", config.max_body_bytes);
//! ```

use std::env;

const DEFAULT_MAX_BODY_BYTES: usize = 0x0010_0000;

/// Runtime configuration loaded from environment variables.
///
/// Load this at startup using [`RuntimeConfig::from_env()`].
#[derive(Debug, Clone, Copy)]
pub struct RuntimeConfig {
    /// Maximum accepted raw body size in bytes (default: 1 MiB / 0x100000)
    pub max_body_bytes: usize,
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let max_body_bytes = match env::var("SWITCHBOARD_MAX_BODY_BYTES") {
            Ok(val) => {
                if let Some(hex) = val.strip_prefix("0x") {
                    usize::from_str_radix(hex, 16).unwrap_or(DEFAULT_MAX_BODY_BYTES)
                } else {
                    val.parse().unwrap_or(DEFAULT_MAX_BODY_BYTES)
                }
            }
            Err(_) => DEFAULT_MAX_BODY_BYTES,
        };
        RuntimeConfig { max_body_bytes }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        RuntimeConfig {
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}
