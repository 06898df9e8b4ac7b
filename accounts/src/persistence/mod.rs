pub mod memory_store;
pub mod sled_store;

pub use memory_store::InMemoryAccountRepository;
pub use sled_store::SledAccountRepository;
