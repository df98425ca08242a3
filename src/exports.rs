pub use geometry::{Length, Point, Ray, RayPair, Vector};

pub use crate::activity::{Activity, Strip};
pub use crate::blob::Blob;
pub use crate::coords::{Coordinate, Coordinates, Crossing, GridIndex, LayerIndex};
pub use crate::grouping::{Grouping, Ident, Node};
pub use crate::ress::{Model, Params};
pub use crate::solving::{Solution, Solving};
pub use crate::tiling::{drop_invalid, make_blobs, prune, Tiling, TilingError};
