//! The rectangular detector shared by the integration tests: a 100x100
//! box in the (y, z) plane watched by two bounding layers and three wire
//! layers (+60, -60 and 0 degrees from z) of pitch 5.

#![allow(dead_code)]

use raygrid::{Activity, Coordinates, Point, Ray, RayPair, Vector};

/// Run with RUST_LOG=trace to watch the tiling shed blobs.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub const WIDTH: f64 = 100.0;
pub const HEIGHT: f64 = 100.0;
pub const PITCH: f64 = 5.0;

pub fn make_raypairs() -> Vec<RayPair> {
    let angle = 60.0_f64.to_radians();

    let ll = Point::new(0.0, 0.0, 0.0);
    let lr = Point::new(0.0, 0.0, WIDTH);
    let ul = Point::new(0.0, HEIGHT, 0.0);
    let ur = Point::new(0.0, HEIGHT, WIDTH);

    let eckx = Vector::new(1.0, 0.0, 0.0);
    let why  = Vector::new(0.0, 1.0, 0.0);
    let zee  = Vector::new(0.0, 0.0, 1.0);

    let wire_ray = |corner: Point, pitch_dir: Vector, scale: f64| {
        let pjump = scale * PITCH * pitch_dir;
        let mjump2 = pjump.dot(&pjump);
        Ray::new(corner + why * (mjump2 / why.dot(&pjump)),
                 corner + zee * (mjump2 / zee.dot(&pjump)))
    };

    let du = Vector::new(0.0, angle.cos(), angle.sin());
    let pu = eckx.cross(&du).normalize();
    let dv = Vector::new(0.0, angle.cos(), -angle.sin());
    let pv = eckx.cross(&dv).normalize();
    let pjumpw = PITCH * zee;

    vec![
        (Ray::new(ll, lr), Ray::new(ul, ur)),
        (Ray::new(ll, ul), Ray::new(lr, ur)),
        (wire_ray(ul, pu, 0.5), wire_ray(ul, pu, 1.5)),
        (wire_ray(ll, pv, 0.5), wire_ray(ll, pv, 1.5)),
        (Ray::new(ll, ul), Ray::new(ll + pjumpw, ul + pjumpw)),
    ]
}

pub fn coordinates() -> Coordinates {
    Coordinates::new(&make_raypairs(), 0, 0.0)
}

/// Grid index of the bin containing the point, per layer.
pub fn grid_indices(coords: &Coordinates, y: f64, z: f64) -> Vec<i32> {
    let p = Vector::new(0.0, y, z);
    (0..coords.nlayers())
        .map(|l| coords.pitch_index((p - coords.centers()[l]).dot(&coords.pitch_dirs()[l]), l))
        .collect()
}

/// One activity per layer, with unit intensity deposited in the bin under
/// each point.
pub fn activities_for(coords: &Coordinates, points: &[(f64, f64)]) -> Vec<Activity> {
    let nlayers = coords.nlayers();
    let mut measures: Vec<Vec<f64>> = vec![vec![]; nlayers];
    for &(y, z) in points {
        for (layer, &ind) in grid_indices(coords, y, z).iter().enumerate() {
            let ind = ind as usize;
            let m = &mut measures[layer];
            if m.len() <= ind {
                m.resize(ind + 1, 0.0);
            }
            m[ind] += 1.0;
        }
    }
    measures
        .into_iter()
        .enumerate()
        .map(|(layer, m)| Activity::new(layer, m, 0, 0.0))
        .collect()
}
