//! Derived-table naming.
//!
//! Every operator result gets a fresh name built from the producing table's
//! base name. The generator is owned by the caller's session rather than being
//! process-wide, and the counter is atomic so a session may be shared across
//! threads.

use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

use crate::config::NamingStrategy;

#[derive(Debug)]
pub struct TableNamer {
    strategy: NamingStrategy,
    next: AtomicU64,
}

impl Default for TableNamer {
    fn default() -> Self {
        Self::new(NamingStrategy::default())
    }
}

impl TableNamer {
    pub const fn new(strategy: NamingStrategy) -> Self {
        Self {
            strategy,
            next: AtomicU64::new(0),
        }
    }

    pub fn strategy(&self) -> NamingStrategy {
        self.strategy
    }

    /// Next derived name for a table whose base name is `base`.
    pub fn derive(&self, base: &str) -> String {
        match self.strategy {
            NamingStrategy::Counter => {
                let n = self.next.fetch_add(1, Ordering::Relaxed);
                format!("{}{}", base, n)
            }
            NamingStrategy::Uuid => format!("{}_{}", base, Uuid::new_v4().simple()),
        }
    }

    /// How many counter names have been handed out.
    pub fn issued(&self) -> u64 {
        self.next.load(Ordering::Relaxed)
    }
}
