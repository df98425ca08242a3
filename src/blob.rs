//! A candidate 3-D region: one strip per layer visited so far, plus the
//! pairwise ray crossings ("corners") that survive inside every strip.

use std::fmt;

use crate::activity::Strip;
use crate::coords::{Coordinates, Crossing};

fn find_corners(one: &Strip, two: &Strip) -> Vec<Crossing> {
    let (a0, a1) = one.addresses();
    let (b0, b1) = two.addresses();
    vec![(a0, b0), (a0, b1), (a1, b0), (a1, b1)]
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Blob {
    strips: Vec<Strip>,
    corners: Vec<Crossing>,
}

impl Blob {
    pub fn new() -> Self { Self::default() }

    pub fn strips(&self) -> &[Strip] { &self.strips }

    pub(crate) fn strips_mut(&mut self) -> &mut [Strip] { &mut self.strips }

    /// Corners are pairwise ray crossing points contained by all strips.
    pub fn corners(&self) -> &[Crossing] { &self.corners }

    /// A blob of one strip is unconstrained and thus valid; with more
    /// strips it is valid only while some corner survives.
    pub fn valid(&self) -> bool {
        match self.strips.len() {
            0 => false,
            1 => true,
            _ => !self.corners.is_empty(),
        }
    }

    /// Extend this blob into one more layer, keeping only the corners
    /// consistent with the new strip.
    pub fn add(&mut self, coords: &Coordinates, strip: Strip) {
        let nstrips = self.strips.len();

        if nstrips == 0 {
            self.strips.push(strip);
            return;
        }

        if nstrips == 1 {
            self.corners = find_corners(&self.strips[0], &strip);
            self.strips.push(strip);
            return;
        }

        let mut surviving = vec![];

        // Old corners must land inside the new strip.
        for &(c1, c2) in &self.corners {
            let pitch = coords.pitch_location(c1, c2, strip.layer);
            if strip.contains(coords.pitch_index(pitch, strip.layer)) {
                surviving.push((c1, c2));
            }
        }

        // New corners, between the new strip and each old strip, must land
        // inside every *other* old strip.
        for si1 in 0..nstrips {
            for corner in find_corners(&self.strips[si1], &strip) {
                let miss = self.strips.iter().enumerate().any(|(si2, other)| {
                    if si1 == si2 { return false; }
                    let pitch = coords.pitch_location(corner.0, corner.1, other.layer);
                    !other.contains(coords.pitch_index(pitch, other.layer))
                });
                if !miss {
                    surviving.push(corner);
                }
            }
        }

        self.corners = surviving;
        self.strips.push(strip);
    }
}

impl fmt::Display for Blob {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "<blob {} strips, {} corners>", self.strips.len(), self.corners.len())
    }
}
