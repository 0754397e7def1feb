//! In-memory persistence for the Ucto ledger core.
//!
//! [`MemoryStore`] implements every repository trait declared by
//! `ucto-core` and can be seeded from a JSON [`Snapshot`].

mod memory;
mod snapshot;

pub use memory::MemoryStore;
pub use snapshot::{Snapshot, SnapshotError};
