//! Layer-by-layer construction of blobs from per-layer activities.
//!
//! The first layer's strips each seed one blob; every further layer
//! projects each surviving blob onto its activity, splits the projection
//! into strips, and extends the blob once per strip. Layers are a hard
//! sequential dependency: layer i+1 can only be tiled from the survivors
//! of layer i.

use itertools::Itertools;
use thiserror::Error;

use crate::activity::Activity;
use crate::blob::Blob;
use crate::coords::{Coordinates, GridIndex, LayerIndex};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TilingError {
    #[error("expected one activity for each of {expected} layers, got {got}")]
    ActivityCount { expected: usize, got: usize },
    #[error("activity for layer {layer} out of order or out of range at position {position}")]
    LayerOrder { layer: LayerIndex, position: usize },
}

pub struct Tiling<'a> {
    coords: &'a Coordinates,
}

impl<'a> Tiling<'a> {
    pub fn new(coords: &'a Coordinates) -> Self {
        Self { coords }
    }

    /// Tile the first layer: one single-strip blob per strip of activity.
    pub fn tile(&self, activity: &Activity) -> Vec<Blob> {
        activity
            .make_strips()
            .into_iter()
            .map(|strip| {
                let mut blob = Blob::new();
                blob.add(self.coords, strip);
                blob
            })
            .collect()
    }

    /// Refine existing blobs with the activity of a further layer. Blobs
    /// whose projection is empty, or whose extension keeps no corner, die.
    pub fn refine(&self, prior: &[Blob], activity: &Activity) -> Vec<Blob> {
        let mut ret = vec![];
        for blob in prior {
            let proj = self.projection(blob, activity);
            if proj.is_empty() {
                continue;
            }
            for strip in proj.make_strips() {
                let mut newblob = blob.clone();
                newblob.add(self.coords, strip);
                if newblob.corners().is_empty() {
                    continue;
                }
                ret.push(newblob);
            }
        }
        ret
    }

    /// The part of `activity` which falls in the shadow of `blob`: the
    /// subspan bounded by the extreme corner pitches, floor'ed below and
    /// ceil'ed above so partially covered bins are kept.
    pub fn projection(&self, blob: &Blob, activity: &Activity) -> Activity {
        // A single-strip blob extends to infinity along its rays, so any
        // activity at all projects onto it.
        if blob.strips().len() == 1 {
            return activity.clone();
        }
        let Some((lo, hi)) = blob
            .corners()
            .iter()
            .map(|&(c1, c2)| self.coords.pitch_location(c1, c2, activity.layer()))
            .minmax()
            .into_option()
        else {
            return Activity::empty(activity.layer());
        };

        let pitch_mag = self.coords.pitch_mags()[activity.layer()];
        let pind1 = (lo / pitch_mag).floor() as GridIndex;
        let pind2 = (hi / pitch_mag).ceil() as GridIndex;

        if pind2 <= activity.offset() || pind1 >= activity.end_index() {
            return Activity::empty(activity.layer());
        }

        activity.subspan(pind1.max(activity.offset()), pind2.min(activity.end_index()))
    }
}

/// Remove blobs failing the validity invariant; returns how many were
/// dropped. Idempotent.
pub fn drop_invalid(blobs: &mut Vec<Blob>) -> usize {
    let before = blobs.len();
    blobs.retain(Blob::valid);
    before - blobs.len()
}

/// Shrink every blob's strips to the tightest bounds implied by its
/// surviving corners: the boundary-ray indices of corner-forming strips,
/// and in every other layer the cell containing each corner (its floor'ed
/// pitch index plus that cell's upper edge). Bounds never widen.
pub fn prune(coords: &Coordinates, blobs: &mut [Blob]) {
    for blob in blobs.iter_mut() {
        let nstrips = blob.strips().len();
        let layers: Vec<LayerIndex> = blob.strips().iter().map(|s| s.layer).collect();
        let mut mms: Vec<Vec<GridIndex>> = vec![vec![]; nstrips];

        for &(c1, c2) in blob.corners() {
            for c in [c1, c2] {
                if let Some(si) = layers.iter().position(|&l| l == c.layer) {
                    mms[si].push(c.grid);
                }
            }

            // every layer not forming the corner
            for (si, &layer) in layers.iter().enumerate() {
                if layer == c1.layer || layer == c2.layer {
                    continue;
                }
                let pind = coords.pitch_index(coords.pitch_location(c1, c2, layer), layer);
                mms[si].push(pind);
                mms[si].push(pind + 1);
            }
        }

        for (si, strip) in blob.strips_mut().iter_mut().enumerate() {
            if let Some((lo, hi)) = mms[si].iter().minmax().into_option() {
                strip.bounds = (*lo).max(strip.bounds.start)..(*hi).min(strip.bounds.end);
            }
        }
    }
}

/// One whole per-slice pass: tile the first layer, refine with each
/// remaining layer in order, losing the slice entirely if any layer kills
/// every blob, then prune the survivors.
///
/// Requires exactly one activity per layer, given in layer order.
pub fn make_blobs(coords: &Coordinates, activities: &[Activity]) -> Result<Vec<Blob>, TilingError> {
    if activities.len() != coords.nlayers() {
        return Err(TilingError::ActivityCount { expected: coords.nlayers(), got: activities.len() });
    }
    for (position, activity) in activities.iter().enumerate() {
        if activity.layer() != position {
            return Err(TilingError::LayerOrder { layer: activity.layer(), position });
        }
    }

    let tiling = Tiling::new(coords);
    let mut blobs = vec![];

    for activity in activities {
        if blobs.is_empty() {
            blobs = tiling.tile(activity);
        } else {
            blobs = tiling.refine(&blobs, activity);
            if blobs.is_empty() {
                log::trace!("make_blobs: lost blobs with {activity}");
                return Ok(vec![]);
            }
        }
        drop_invalid(&mut blobs);
    }
    prune(coords, &mut blobs);
    Ok(blobs)
}
