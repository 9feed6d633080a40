// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Logo sources for sheet headers and rows.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

/// Where a logo image comes from.
///
/// Inline `data:` URLs are decoded up front so a broken payload degrades to
/// "no logo" before any UI is built. Remote URLs are left for the presenter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "camelCase")]
pub enum LogoSource {
    Inline {
        media_type: String,
        #[serde(with = "base64_bytes")]
        bytes: Vec<u8>,
    },
    Remote { url: String },
}

impl LogoSource {
    /// Classify a caller-supplied logo string. Returns `None` for anything
    /// that is neither a base64 data URL nor an http(s) URL.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if let Some(rest) = input.strip_prefix("data:") {
            let (header, payload) = rest.split_once(',')?;
            let media_type = header
                .strip_suffix(";base64")
                .unwrap_or(header)
                .to_string();
            let cleaned: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
            return match STANDARD.decode(cleaned) {
                Ok(bytes) if !bytes.is_empty() => Some(Self::Inline { media_type, bytes }),
                _ => None,
            };
        }
        if input.starts_with("http://") || input.starts_with("https://") {
            return Some(Self::Remote {
                url: input.to_string(),
            });
        }
        None
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote { .. })
    }
}

mod base64_bytes {
    use base64::Engine as _;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(encoded).map_err(serde::de::Error::custom)
    }
}
