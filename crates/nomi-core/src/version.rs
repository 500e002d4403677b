//! Loose semantic-version coercion for client version strings.
//!
//! Telemetry reports strings like `"0.9.12-5a7b0c2d-x86_64-linux-gnu"` or
//! `"v0.9"`. Coercion takes the first run of `major[.minor[.patch]]` digits
//! found anywhere in the string; missing components are `0`.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Coerce a free-form version string into a [`Version`].
///
/// Returns `None` when the string contains no digits.
///
/// # Examples
///
/// ```
/// use nomi_core::version::{coerce, Version};
///
/// assert_eq!(coerce("v0.9.12"), Some(Version { major: 0, minor: 9, patch: 12 }));
/// assert_eq!(coerce("polkadot 1.2-abc"), Some(Version { major: 1, minor: 2, patch: 0 }));
/// assert_eq!(coerce("unknown"), None);
/// ```
pub fn coerce(input: &str) -> Option<Version> {
    let start = input.find(|c: char| c.is_ascii_digit())?;
    let mut parts = [0u64; 3];
    let mut filled = 0;

    for segment in input[start..].split('.') {
        let digits: &str = {
            let end = segment
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(segment.len());
            &segment[..end]
        };
        if digits.is_empty() {
            break;
        }
        parts[filled] = digits.parse().ok()?;
        filled += 1;
        // A non-digit inside the segment ends the numeric run.
        if filled == 3 || digits.len() != segment.len() {
            break;
        }
    }

    Some(Version {
        major: parts[0],
        minor: parts[1],
        patch: parts[2],
    })
}
