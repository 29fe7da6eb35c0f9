pub use file::FileStorage;
pub use memory::MemoryStorage;

mod file;
mod memory;
