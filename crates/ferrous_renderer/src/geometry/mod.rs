pub mod triangulate;
pub mod vertex;

pub use triangulate::{
    pack_vertices, triangulate, ContourState, Triangle, TriangleKind, Triangulator,
};
pub use vertex::{GlyphVertex, QuadVertex, COMPOSITE_QUAD};
