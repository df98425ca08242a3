//! Tomographic reconstruction of 3-D regions ("blobs") from 1-D projective
//! intensity measurements taken along several non-parallel wire layers.
//!
//! A detector is described as N "layers", each a regular 1-D grid of
//! parallel rays. Per time slice, each layer reports an [`Activity`]: a run
//! of intensity samples indexed by grid position. [`Tiling`] combines the
//! layers' activities, one layer at a time, into the set of [`Blob`]s
//! consistent with all of them, using the precomputed [`Coordinates`]
//! geometry for O(1) ray-crossing queries. [`Grouping`] then associates
//! measurements with the candidate blobs that could have produced them and
//! [`Solving`] assigns a charge to each blob by solving one small
//! regularized least-squares problem per connected group of ambiguous
//! associations.

mod exports;
pub use exports::*;

pub mod activity;
pub mod blob;
pub mod config;
pub mod coords;
pub mod grouping;
pub mod ress;
pub mod solving;
pub mod tiling;

#[cfg(test)]
pub(crate) mod testlib;
