mod memory;
mod provider;

pub use memory::InMemoryIndex;
pub use provider::VectorIndex;

#[cfg(test)]
pub use provider::MockVectorIndex;
