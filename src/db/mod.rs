pub mod connection;
pub mod memory_store;
pub mod mongo_store;
pub mod store;

pub use memory_store::MemoryStore;
pub use mongo_store::MongoStore;
pub use store::PollStore;
