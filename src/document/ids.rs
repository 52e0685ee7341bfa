//! Sequential identifier allocation for files and clips.
//!
//! Ids take the form `<prefix>_<n>`. The counter only moves forward, and when
//! a registry is loaded from disk it starts past both the registry length and
//! the highest numeric suffix already present, so appends after a load never
//! collide with existing ids. A suffix of `u64::MAX` leaves nothing to count
//! past, so it is ignored when seeding and never handed out.

use log::{debug, warn};

use crate::error::{Result, StamplineError};

/// Prefix for file ids.
pub const FILE_ID_PREFIX: &str = "file";
/// Prefix for clip ids.
pub const CLIP_ID_PREFIX: &str = "clip";

/// Monotonic id counter for one registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdAllocator {
    prefix: &'static str,
    next: u64,
}

impl IdAllocator {
    /// A fresh counter; the first id is `<prefix>_1`.
    pub fn new(prefix: &'static str) -> Self {
        Self { prefix, next: 1 }
    }

    /// A counter positioned after every id in `existing`.
    pub fn seeded<'a, I>(prefix: &'static str, existing: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut count: u64 = 0;
        let mut highest: u64 = 0;

        for id in existing {
            count += 1;
            match numeric_suffix(prefix, id) {
                Some(u64::MAX) => warn!("ignoring {id}: end of counter range"),
                Some(n) => highest = highest.max(n),
                None => {}
            }
        }

        // highest < u64::MAX here, and count is bounded by memory
        let next = count.max(highest) + 1;
        debug!("seeded {prefix} ids at {next} ({count} existing, highest suffix {highest})");

        Self { prefix, next }
    }

    pub fn prefix(&self) -> &'static str {
        self.prefix
    }

    /// The id the next call to [`allocate`](Self::allocate) will return.
    pub fn peek(&self) -> String {
        format!("{}_{}", self.prefix, self.next)
    }

    /// Take the next id.
    ///
    /// Fails once the counter reaches `u64::MAX`.
    pub fn allocate(&mut self) -> Result<String> {
        let following = self
            .next
            .checked_add(1)
            .ok_or(StamplineError::IdSpaceExhausted {
                prefix: self.prefix,
            })?;
        let id = self.peek();
        self.next = following;
        Ok(id)
    }

    /// Whether [`allocate`](Self::allocate) will succeed.
    pub fn has_next(&self) -> bool {
        self.next < u64::MAX
    }
}

/// Parse `n` out of `<prefix>_<n>`.
fn numeric_suffix(prefix: &str, id: &str) -> Option<u64> {
    id.strip_prefix(prefix)?.strip_prefix('_')?.parse().ok()
}
