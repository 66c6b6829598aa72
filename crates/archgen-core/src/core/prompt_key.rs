// archgen-core/src/core/prompt_key.rs
// ============================================================================
// Module: ArchGen Prompt Key
// Description: Normalized cache key derived from a prompt.
// Purpose: Two prompts that differ only in case or whitespace hit the same
//          cache entry; the key is a SHA-256 digest of the normal form.
// Dependencies: serde, sha2
// ============================================================================

//! ## Overview
//! Normalization lower-cases the prompt, collapses internal whitespace runs
//! to single spaces, and trims the ends. The key is the hex digest of the
//! normal form, so it is stable across processes and safe as a file name.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use sha2::Digest;
use sha2::Sha256;

// ============================================================================
// SECTION: Prompt Key
// ============================================================================

/// SHA-256 cache key of a normalized prompt.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PromptKey(String);

impl PromptKey {
    /// Derives the key for a prompt.
    #[must_use]
    pub fn derive(prompt: &str) -> Self {
        let normalized = normalize(prompt);
        let digest = Sha256::digest(normalized.as_bytes());
        let mut hex = String::with_capacity(digest.len() * 2);
        for byte in digest {
            hex.push(HEX[usize::from(byte >> 4)]);
            hex.push(HEX[usize::from(byte & 0x0f)]);
        }
        Self(hex)
    }

    /// The hex digest as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PromptKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

const HEX: [char; 16] = ['0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f'];

/// Lower-cases, collapses whitespace runs, and trims.
#[must_use]
pub fn normalize(prompt: &str) -> String {
    let mut out = String::with_capacity(prompt.len());
    let mut pending_space = false;
    for ch in prompt.trim().chars() {
        if ch.is_whitespace() {
            pending_space = true;
        } else {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            for lower in ch.to_lowercase() {
                out.push(lower);
            }
        }
    }
    out
}
