//! Consumer-side helpers for the rendering layer.

mod edges;
mod palette;
mod visual;

pub use edges::{renderable_edges, RenderableEdge, MIN_EDGE_LENGTH};
pub use palette::color_for;
pub use visual::{NodeStyle, VisualScale, VISUAL_FLOOR};
