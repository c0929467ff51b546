//! Small helpers shared by the engine modules.

mod id_allocator;

pub use id_allocator::IdAllocator;
