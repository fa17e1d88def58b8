//! SHA-256 fingerprints of tour id sequences.
//!
//! The digest covers the ids joined with `-`. Ids are digit-only, so the
//! separator cannot appear inside an id. Changing the join rule changes every
//! fingerprint ever recorded.
//!
//! [`fingerprint`] is order-sensitive: the same cycle listed from another
//! starting city, or in the opposite direction, hashes differently.
//! [`canonical_fingerprint`] normalizes rotation and direction first.

use std::fmt;

use serde::Serialize;
use sha2::{Digest, Sha256};
use tour_audit_derive::CliValue;

const ID_SEPARATOR: &str = "-";

/// 256-bit digest rendered as 64 lowercase hex characters.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub const HEX_LEN: usize = 64;

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Leading characters for compact display.
    pub fn short(&self, len: usize) -> &str {
        &self.0[..len.min(self.0.len())]
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, CliValue)]
#[cli_value(option = "fingerprint-mode")]
pub enum FingerprintMode {
    /// Hash the ids exactly as listed.
    Ordered,
    /// Hash the rotation/direction-normalized sequence.
    Canonical,
}

impl FingerprintMode {
    pub fn apply<S: AsRef<str>>(self, ids: &[S]) -> Fingerprint {
        match self {
            Self::Ordered => fingerprint(ids),
            Self::Canonical => canonical_fingerprint(ids),
        }
    }
}

pub fn fingerprint<S: AsRef<str>>(ids: &[S]) -> Fingerprint {
    let mut hasher = Sha256::new();
    for (idx, id) in ids.iter().enumerate() {
        if idx > 0 {
            hasher.update(ID_SEPARATOR.as_bytes());
        }
        hasher.update(id.as_ref().as_bytes());
    }
    Fingerprint(format!("{:x}", hasher.finalize()))
}

/// Fingerprint that is identical for every rotation and both directions of
/// the same cycle.
///
/// The sequence is rotated to start at the smallest id (plain string order);
/// of the two directions from there, the lexicographically smaller one is
/// hashed.
pub fn canonical_fingerprint<S: AsRef<str>>(ids: &[S]) -> Fingerprint {
    fingerprint(&canonical_order(ids))
}

fn canonical_order<S: AsRef<str>>(ids: &[S]) -> Vec<&str> {
    let ids: Vec<&str> = ids.iter().map(|id| id.as_ref()).collect();
    let n = ids.len();
    let Some(start) = (0..n).min_by(|&a, &b| ids[a].cmp(ids[b])) else {
        return ids;
    };

    let forward: Vec<&str> = (0..n).map(|k| ids[(start + k) % n]).collect();
    let backward: Vec<&str> = (0..n).map(|k| ids[(start + n - k) % n]).collect();

    forward.min(backward)
}
