//! Shared test geometry: a rectangular box watched by two bounding layers
//! (horizontal and vertical edges) and three wire layers at +60, -60 and 0
//! degrees from the z axis, all planar in x.

use geometry::{Point, Ray, RayPair, Vector};

pub fn make_raypairs(width: f64, height: f64, pitch_mag: f64) -> Vec<RayPair> {
    let angle = 60.0_f64.to_radians();

    // corners
    let ll = Point::new(0.0, 0.0, 0.0);
    let lr = Point::new(0.0, 0.0, width);
    let ul = Point::new(0.0, height, 0.0);
    let ur = Point::new(0.0, height, width);

    let eckx = Vector::new(1.0, 0.0, 0.0);
    let why  = Vector::new(0.0, 1.0, 0.0);
    let zee  = Vector::new(0.0, 0.0, 1.0);

    // Anchor a wire ray at `corner`, offset by `scale` pitches along the
    // wire layer's pitch direction.
    let wire_ray = |corner: Point, pitch_dir: Vector, scale: f64| {
        let pjump = scale * pitch_mag * pitch_dir;
        let mjump2 = pjump.dot(&pjump);
        Ray::new(corner + why * (mjump2 / why.dot(&pjump)),
                 corner + zee * (mjump2 / zee.dot(&pjump)))
    };

    // /-wires
    let du = Vector::new(0.0, angle.cos(), angle.sin());
    let pu = eckx.cross(&du).normalize();

    // \-wires
    let dv = Vector::new(0.0, angle.cos(), -angle.sin());
    let pv = eckx.cross(&dv).normalize();

    // |-wires
    let pjumpw = pitch_mag * zee;

    vec![
        // horizontal bounds
        (Ray::new(ll, lr), Ray::new(ul, ur)),
        // vertical bounds
        (Ray::new(ll, ul), Ray::new(lr, ur)),
        // pitch layers
        (wire_ray(ul, pu, 0.5), wire_ray(ul, pu, 1.5)),
        (wire_ray(ll, pv, 0.5), wire_ray(ll, pv, 1.5)),
        (Ray::new(ll, ul), Ray::new(ll + pjumpw, ul + pjumpw)),
    ]
}
