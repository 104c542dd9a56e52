pub mod db;
pub mod memory;

pub use db::MongoStore;
pub use memory::MemoryStore;
