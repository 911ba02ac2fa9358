/*!
 * Shared Counter
 *
 * Owned counter + guard unit handed to the harness, one per benchmark run.
 *
 * # Design: Enum Dispatch
 *
 * The discipline is picked at runtime through a match over both arms, no
 * trait object sits on the measured path.
 */

use super::config::LockKind;
use super::locks::{ExclusiveLock, RwCounter};
use super::traits::{LockStrategy, NoProbe, SectionProbe};

/// Counter protected by the selected lock discipline
pub enum SharedCounter<P: SectionProbe = NoProbe> {
    Exclusive(ExclusiveLock<P>),
    ReadWrite(RwCounter<P>),
}

impl SharedCounter<NoProbe> {
    /// Create a fresh counter for `kind`
    pub fn new(kind: LockKind) -> Self {
        Self::with_probe(kind, NoProbe)
    }
}

impl<P: SectionProbe> SharedCounter<P> {
    /// Create a fresh counter for `kind` reporting to `probe`
    pub fn with_probe(kind: LockKind, probe: P) -> Self {
        match kind {
            LockKind::Exclusive => Self::Exclusive(ExclusiveLock::with_probe(probe)),
            LockKind::ReadWrite => Self::ReadWrite(RwCounter::with_probe(probe)),
        }
    }

    pub fn kind(&self) -> LockKind {
        match self {
            Self::Exclusive(_) => LockKind::Exclusive,
            Self::ReadWrite(_) => LockKind::ReadWrite,
        }
    }

    pub fn probe(&self) -> &P {
        match self {
            Self::Exclusive(s) => s.probe(),
            Self::ReadWrite(s) => s.probe(),
        }
    }
}

impl<P: SectionProbe> LockStrategy for SharedCounter<P> {
    #[inline(always)]
    fn write(&self) {
        match self {
            Self::Exclusive(s) => s.write(),
            Self::ReadWrite(s) => s.write(),
        }
    }

    #[inline(always)]
    fn read(&self) -> u64 {
        match self {
            Self::Exclusive(s) => s.read(),
            Self::ReadWrite(s) => s.read(),
        }
    }

    fn current(&self) -> u64 {
        match self {
            Self::Exclusive(s) => s.current(),
            Self::ReadWrite(s) => s.current(),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Exclusive(s) => s.name(),
            Self::ReadWrite(s) => s.name(),
        }
    }
}
