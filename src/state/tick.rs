//! Handle for the recurring one-second tick source

use std::fmt;

/// Identifies one armed tick source.
///
/// Every arm produces a fresh handle, so a scheduler holding an older
/// handle can tell that its interval has been superseded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickHandle(u64);

impl TickHandle {
    pub(crate) fn new(generation: u64) -> Self {
        Self(generation)
    }

    pub fn generation(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TickHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tick#{}", self.0)
    }
}
