//! In-memory repository implementations for tests and local runs.

mod save;

pub use save::InMemorySaveRepository;
