//! InMemory Repository 実装

pub mod presence;

pub use presence::InMemoryPresenceRepository;
