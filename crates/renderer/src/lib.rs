//! Map figure rendering for unstructured grids.
//!
//! Draws triangulations (wireframe or filled per cell) in a Plate Carree
//! map with reference features, a title and an optional colorbar, and
//! encodes the result as PNG.

pub mod colorbar;
pub mod colormap;
mod draw;
pub mod error;
pub mod features;
pub mod figure;
pub mod layout;
pub mod png;
pub mod style;
pub mod text;
pub mod triangles;

pub use colorbar::Colorbar;
pub use colormap::{Color, Colormap, Normalize};
pub use error::{RenderError, RenderResult};
pub use features::{FeatureLayer, Shape};
pub use figure::{Figure, FigureSpec};
pub use layout::ColorbarSpec;
pub use style::{FeatureStyle, FillStyle, LinePattern, LineStyle};
pub use text::TextRenderer;
