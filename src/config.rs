// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Configuration for the translation engine.
//!
//! # Example
//!
//! ```
//! use lucene_translate::TranslatorConfig;
//!
//! // Defaults match the documented guards
//! let config = TranslatorConfig::default();
//! assert_eq!(config.max_input_bytes, 100 * 1024); // 100 KiB
//! assert_eq!(config.max_nesting_depth, 5);
//!
//! // Tighter limits for an untrusted endpoint
//! let config = TranslatorConfig {
//!     max_input_bytes: 16 * 1024,
//!     max_nesting_depth: 3,
//!     ..Default::default()
//! };
//! assert_eq!(config.default_fuzziness, 2);
//! ```

use serde::Deserialize;

/// Limits and defaults applied by the DSL front-end.
///
/// All fields have defaults, so an empty document deserializes to
/// [`TranslatorConfig::default()`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TranslatorConfig {
    /// Maximum UTF-8 byte length of a DSL document (default: 100 KiB)
    #[serde(default = "default_max_input_bytes")]
    pub max_input_bytes: usize,

    /// Maximum query nesting depth; the root query node is depth 1 (default: 5)
    #[serde(default = "default_max_nesting_depth")]
    pub max_nesting_depth: usize,

    /// Edit distance emitted for fuzzy clauses without an explicit fuzziness (default: 2)
    #[serde(default = "default_fuzziness")]
    pub default_fuzziness: u32,
}

fn default_max_input_bytes() -> usize { 100 * 1024 } // 100 KiB
fn default_max_nesting_depth() -> usize { 5 }
fn default_fuzziness() -> u32 { 2 }

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            max_input_bytes: default_max_input_bytes(),
            max_nesting_depth: default_max_nesting_depth(),
            default_fuzziness: default_fuzziness(),
        }
    }
}
