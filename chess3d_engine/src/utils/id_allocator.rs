/// Hands out monotonically increasing `u32` identifiers.
///
/// Owned by whoever instantiates a scene (node ids, light numbers), so id
/// assignment is deterministic per scene and never shared through globals.
/// Identifiers are never recycled.
///
/// # Example
///
/// ```ignore
/// let mut ids = IdAllocator::starting_at(1);
/// let a = ids.alloc();  // 1
/// let b = ids.alloc();  // 2
/// ids.reset();
/// let c = ids.alloc();  // 1 again
/// ```
#[derive(Debug, Clone)]
pub struct IdAllocator {
    first: u32,
    next_id: u32,
}

impl IdAllocator {
    /// Allocator whose first id is 0
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    /// Allocator whose first id is `first`
    pub fn starting_at(first: u32) -> Self {
        Self {
            first,
            next_id: first,
        }
    }

    /// Allocate the next id
    pub fn alloc(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Id the next call to `alloc` will return
    pub fn peek(&self) -> u32 {
        self.next_id
    }

    /// Number of ids handed out since creation or the last reset
    pub fn issued(&self) -> u32 {
        self.next_id - self.first
    }

    /// Start over from the first id
    pub fn reset(&mut self) {
        self.next_id = self.first;
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "id_allocator_tests.rs"]
mod tests;
