/*!
 * Lock Strategy Configuration
 *
 * Selection of the concurrency-control discipline under test
 */

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lock discipline selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockKind {
    /// Single mutex, every access serialized
    Exclusive,
    /// Reader/writer lock, concurrent readers
    ReadWrite,
}

impl LockKind {
    /// Every kind, in report order
    pub const ALL: [LockKind; 2] = [LockKind::Exclusive, LockKind::ReadWrite];

    pub const fn name(self) -> &'static str {
        match self {
            LockKind::Exclusive => "mutex",
            LockKind::ReadWrite => "rwlock",
        }
    }
}

impl fmt::Display for LockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LockKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mutex" | "exclusive" | "mx" => Ok(LockKind::Exclusive),
            "rwlock" | "rw" | "read_write" | "rwmx" => Ok(LockKind::ReadWrite),
            other => Err(format!("unknown lock kind '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!("MX".parse::<LockKind>(), Ok(LockKind::Exclusive));
        assert_eq!("rwlock".parse::<LockKind>(), Ok(LockKind::ReadWrite));
        assert!("spin".parse::<LockKind>().is_err());
    }

    #[test]
    fn test_display_matches_name() {
        for kind in LockKind::ALL {
            assert_eq!(kind.to_string(), kind.name());
        }
    }
}
