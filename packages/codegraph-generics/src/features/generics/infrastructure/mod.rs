pub mod cartesian;
pub mod resolution_graph;

pub use cartesian::{cartesian_product, product_len, CartesianProduct};
pub use resolution_graph::{Branch, GraphStats, ResolutionGraph};
