use super::{MAX_FACET_VERTICES, MAX_SIMPLEX_VERTICES, SimplexKey, SmallBuffer, VertexIndex};

/// Typical cavity size during insertion; larger cavities spill to the heap.
pub const CAVITY_BUFFER_SIZE: usize = 16;

/// Vertex indices of one simplex.
pub type SimplexVertexBuffer = SmallBuffer<VertexIndex, MAX_SIMPLEX_VERTICES>;

/// Vertex indices of one facet.
pub type FacetVertexBuffer = SmallBuffer<VertexIndex, MAX_FACET_VERTICES>;

/// Keys of the simplices whose circumsphere contains the vertex being inserted.
pub type BadSimplexBuffer = SmallBuffer<SimplexKey, CAVITY_BUFFER_SIZE>;
