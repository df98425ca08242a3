//! Per-layer measured intensity, indexed by grid position, and the strips
//! of contiguous activity it decomposes into.
//!
//! Sample n of an [`Activity`] holds the intensity measured between the
//! pitch of ray n and that of ray n+1, so a run of active samples over
//! `[first, last]` corresponds to the half-open ray interval
//! `[first, last+1)` — which is exactly a [`Strip`].

use std::fmt;
use std::ops::Range;

use crate::coords::{Coordinate, Crossing, GridIndex, LayerIndex};

/// A half-open interval of grid indices within one layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Strip {
    pub layer: LayerIndex,
    pub bounds: Range<GridIndex>,
}

impl Strip {
    /// The coordinates of the two boundary rays. The second is one past
    /// the last ray inside the strip.
    pub fn addresses(&self) -> Crossing {
        (Coordinate { layer: self.layer, grid: self.bounds.start },
         Coordinate { layer: self.layer, grid: self.bounds.end })
    }

    pub fn contains(&self, grid: GridIndex) -> bool {
        self.bounds.start <= grid && grid < self.bounds.end
    }

    pub fn width(&self) -> GridIndex {
        self.bounds.end - self.bounds.start
    }
}

impl fmt::Display for Strip {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "<strip L{} pind:[{},{})>", self.layer, self.bounds.start, self.bounds.end)
    }
}

/// One layer's intensity samples for one time slice. Owns its sample
/// buffer; `offset` is the absolute grid index of the first sample.
#[derive(Clone, Debug, PartialEq)]
pub struct Activity {
    layer: LayerIndex,
    samples: Vec<f64>,
    offset: GridIndex,
    threshold: f64,
}

impl Activity {
    pub fn empty(layer: LayerIndex) -> Self {
        Self { layer, samples: vec![], offset: 0, threshold: 0.0 }
    }

    pub fn new(layer: LayerIndex, samples: Vec<f64>, offset: GridIndex, threshold: f64) -> Self {
        Self { layer, samples, offset, threshold }
    }

    /// Like `new`, but with leading and trailing at-or-below-threshold
    /// samples trimmed away, adjusting the offset to compensate.
    fn trimmed(layer: LayerIndex, samples: &[f64], mut offset: GridIndex, threshold: f64) -> Self {
        let mut beg = 0;
        while beg < samples.len() && samples[beg] <= threshold {
            beg += 1;
            offset += 1;
        }
        let mut end = samples.len();
        while end > beg && samples[end - 1] <= threshold {
            end -= 1;
        }
        Self { layer, samples: samples[beg..end].to_vec(), offset, threshold }
    }

    pub fn layer(&self) -> LayerIndex { self.layer }
    pub fn offset(&self) -> GridIndex { self.offset }
    pub fn threshold(&self) -> f64 { self.threshold }
    pub fn values(&self) -> &[f64] { &self.samples }
    pub fn is_empty(&self) -> bool { self.samples.is_empty() }

    /// Absolute grid index of the sample at relative position `pos`.
    pub fn pitch_index(&self, pos: usize) -> GridIndex {
        self.offset + pos as GridIndex
    }

    /// Absolute grid index one past the last sample.
    pub fn end_index(&self) -> GridIndex {
        self.offset + self.samples.len() as GridIndex
    }

    /// A new Activity covering absolute grid indices `[begin, end)`,
    /// trimmed of inactive edges. Out-of-bounds or inverted requests give
    /// the empty Activity.
    pub fn subspan(&self, begin: GridIndex, end: GridIndex) -> Activity {
        let rel_beg = begin - self.offset;
        let rel_end = end - self.offset;

        if rel_beg < 0 || rel_beg >= rel_end || rel_end > self.samples.len() as GridIndex {
            log::debug!("activity subspan bogus absolute:[{},{}] offset={} len={}",
                        begin, end, self.offset, self.samples.len());
            return Activity::empty(self.layer);
        }

        Self::trimmed(self.layer,
                      &self.samples[rel_beg as usize..rel_end as usize],
                      begin, self.threshold)
    }

    /// Maximal runs of samples strictly above threshold, as relative index
    /// ranges. A sample exactly at threshold ends a run.
    pub fn active_ranges(&self) -> Vec<Range<usize>> {
        let mut ret = vec![];
        let mut start: Option<usize> = None;

        for (pos, &value) in self.samples.iter().enumerate() {
            match start {
                None if value > self.threshold => start = Some(pos),
                Some(beg) if value <= self.threshold => {
                    ret.push(beg..pos);
                    start = None;
                }
                _ => (),
            }
        }
        if let Some(beg) = start {
            ret.push(beg..self.samples.len());
        }
        ret
    }

    /// The strip covering a relative sample range of this activity.
    pub fn make_strip(&self, range: &Range<usize>) -> Strip {
        Strip {
            layer: self.layer,
            bounds: self.pitch_index(range.start)..self.pitch_index(range.end),
        }
    }

    /// Strips bounding each contiguous run of activity.
    pub fn make_strips(&self) -> Vec<Strip> {
        self.active_ranges().iter().map(|r| self.make_strip(r)).collect()
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "<activity L{} {} strips over pind:[{},{})>",
               self.layer, self.make_strips().len(), self.offset, self.end_index())
    }
}
