//! Card identification.
//!
//! Every card instance gets a `CardId` from the engine's `IdAllocator`.
//! The allocator is never rewound, so an id handed out for one deck never
//! names a card in a later deck built by the same engine.
//!
//! ```
//! use memory_pairs::core::{CardId, IdAllocator};
//!
//! let mut ids = IdAllocator::new();
//! assert_eq!(ids.alloc(), CardId(0));
//! assert_eq!(ids.alloc(), CardId(1));
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a card instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for CardId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Sequential `CardId` source.
#[derive(Clone, Debug, Default)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a new card ID.
    pub fn alloc(&mut self) -> CardId {
        let id = CardId(self.next);
        self.next += 1;
        id
    }
}
