pub mod boundary;
pub mod draw;
pub mod geom;
pub mod halve;
pub mod lineintersect;
pub mod lineoffset;
pub mod lineoverlap;
pub mod split;

pub use boundary::{Boundary, BoundaryCollection, BoundaryGeometry, Provenance};
pub use draw::{DrawSurface, DrawnFeature, MemorySurface};
pub use split::{split, split_with, SplitError, SplitOptions, SplitResult};
