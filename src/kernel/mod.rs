mod delaunay;
mod hull;
mod nearest;
mod overlay;
mod simplify;

pub use delaunay::{delaunay_edges, triangulate};
pub use hull::{convex_hull, convex_hull_indices};
pub use nearest::PointIndex;
pub use overlay::{overlay_areas, OverlayAreas};
pub use simplify::{simplify_polyline, simplify_ring};
