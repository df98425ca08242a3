//! Precomputed geometry of a ray grid: everything needed to answer
//! crossing-point and pitch-location queries in O(1), without touching 3-D
//! vectors again after construction.
//!
//! A grid is built from N ray pairs. Each pair seeds one layer: ray 0 and
//! ray 1 of a uniform linear grid of parallel rays, whose spacing ("pitch")
//! is the perpendicular separation of the pair. All layers are co-planar in
//! one Cartesian axis, so every vector is projected into that plane once,
//! up front.

use geometry::{Point, RayPair, Vector};
use ndarray::{Array2, Array3};

/// Identifies one layer of the grid.
pub type LayerIndex = usize;

/// Identifies one ray within a layer, counted in pitch steps from ray 0.
/// May be negative.
pub type GridIndex = i32;

/// One ray, located by its layer and its position in that layer's grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Coordinate {
    pub layer: LayerIndex,
    pub grid: GridIndex,
}

/// The crossing point of two rays from two different layers.
pub type Crossing = (Coordinate, Coordinate);

/// Immutable once built; shared read-only by all downstream components.
pub struct Coordinates {
    nlayers: usize,

    // Pitch magnitude for each layer.
    pitch_mag: Vec<f64>,

    // Unit vector in the pitch direction for each layer.
    pitch_dir: Vec<Vector>,

    // Center point of ray 0 of each layer.
    center: Vec<Vector>,

    // Crossing points of the ray-0's, indexed by layer pair. Symmetric,
    // diagonal unused.
    zero_crossing: Array2<Vector>,

    // Element (l,m) jumps along layer l's ray 0 between crossings with
    // successive rays of layer m. Not symmetric, diagonal unused.
    ray_jump: Array2<Vector>,

    // Coefficients of the bilinear pitch-location expression, indexed by
    // layer triple.
    a: Array3<f64>,
    b: Array3<f64>,
}

impl Coordinates {
    /// Build the grid geometry from one ray pair per layer. `normal_axis`
    /// names the Cartesian axis in which the detector is planar and
    /// `normal_location` the fixed coordinate of that plane.
    pub fn new(rays: &[RayPair], normal_axis: usize, normal_location: f64) -> Self {
        let nlayers = rays.len();

        // Directions lose their normal component entirely; positions keep
        // the fixed plane coordinate instead.
        let project_dir = |mut v: Vector| { v[normal_axis] = 0.0; v };
        let project_pos = |mut v: Vector| { v[normal_axis] = normal_location; v };

        // Per-layer quantities.
        let mut pitch_mag = vec![0.0; nlayers];
        let mut pitch_dir = vec![Vector::zeros(); nlayers];
        let mut center    = vec![Vector::zeros(); nlayers];
        for (il, (r0, r1)) in rays.iter().enumerate() {
            // perpendicular separation between the two parallel rays
            let rpitch = r0.pitch(r1);
            let rpv = project_dir(rpitch.head - rpitch.tail);

            pitch_mag[il] = rpv.norm();
            pitch_dir[il] = rpv / pitch_mag[il];
            center[il] = project_pos(0.5 * (r0.tail.coords + r0.head.coords));
        }

        // Per-layer-pair quantities, iterating the l < m triangle.
        let mut zero_crossing = Array2::from_elem((nlayers, nlayers), Vector::zeros());
        let mut ray_jump      = Array2::from_elem((nlayers, nlayers), Vector::zeros());
        for il in 0..nlayers {
            for im in (il + 1)..nlayers {
                let (rl0, rl1) = &rays[il];
                let (rm0, rm1) = &rays[im];

                let r00 = rl0.pitch(rm0);
                let pl0 = r00.tail;
                let pm0 = r00.head;

                // These two are the same point after projection.
                zero_crossing[[il, im]] = project_pos(pl0.coords);
                zero_crossing[[im, il]] = project_pos(pm0.coords);

                // Along layer l's ray 0, to the crossing with m's ray 1,
                // and symmetrically.
                ray_jump[[il, im]] = project_dir(rl0.pitch(rm1).tail - pl0);
                ray_jump[[im, il]] = project_dir(rm0.pitch(rl1).tail - pm0);
            }
        }

        // Per-layer-triple coefficients for the bilinear pitch location.
        let mut a = Array3::zeros((nlayers, nlayers, nlayers));
        let mut b = Array3::zeros((nlayers, nlayers, nlayers));
        for inl in 0..nlayers {
            let pn = pitch_dir[inl];
            let cp = center[inl].dot(&pn);

            for il in 0..nlayers {
                if il == inl { continue; }
                for im in 0..il {
                    if im == inl { continue; }

                    let rlmpn = zero_crossing[[il, im]].dot(&pn);
                    let wlmpn = ray_jump[[il, im]].dot(&pn);
                    let wmlpn = ray_jump[[im, il]].dot(&pn);

                    a[[il, im, inl]] = wlmpn;
                    a[[im, il, inl]] = wmlpn;
                    // b is symmetric
                    b[[il, im, inl]] = rlmpn - cp;
                    b[[im, il, inl]] = rlmpn - cp;
                }
            }
        }

        Self { nlayers, pitch_mag, pitch_dir, center, zero_crossing, ray_jump, a, b }
    }

    /// Crossing point of the ray-0's of two layers.
    pub fn zero_crossing(&self, one: LayerIndex, two: LayerIndex) -> Vector {
        self.zero_crossing[[one, two]]
    }

    /// Crossing point of two rays.
    pub fn ray_crossing(&self, one: Coordinate, two: Coordinate) -> Point {
        let (l, m) = (one.layer, two.layer);
        let r00 = self.zero_crossing[[l, m]];
        let wlm = self.ray_jump[[l, m]];
        let wml = self.ray_jump[[m, l]];
        let (i, j) = (one.grid as f64, two.grid as f64);
        Point::from(r00 + j * wlm + i * wml)
    }

    /// Pitch location of the crossing of two rays, measured in a third
    /// layer's pitch units. Bilinear in the two grid indices; no vector
    /// arithmetic.
    pub fn pitch_location(&self, one: Coordinate, two: Coordinate, other: LayerIndex) -> f64 {
        let (il, im, inl) = (one.layer, two.layer, other);
        let (i, j) = (one.grid as f64, two.grid as f64);
        j * self.a[[il, im, inl]] + i * self.a[[im, il, inl]] + self.b[[il, im, inl]]
    }

    /// Grid index of the bin containing the given pitch in the given layer.
    pub fn pitch_index(&self, pitch: f64, layer: LayerIndex) -> GridIndex {
        (pitch / self.pitch_mag[layer]).floor() as GridIndex
    }

    pub fn nlayers(&self) -> usize { self.nlayers }
    pub fn pitch_mags(&self) -> &[f64] { &self.pitch_mag }
    pub fn pitch_dirs(&self) -> &[Vector] { &self.pitch_dir }
    pub fn centers(&self) -> &[Vector] { &self.center }
    pub fn ray_jumps(&self) -> &Array2<Vector> { &self.ray_jump }
}

use std::fmt;
impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "<ray L{} G{}>", self.layer, self.grid)
    }
}
