//! Directed line segments and the mutual-perpendicular ("pitch")
//! construction between two of them.

use crate::{Length, Point, Vector};

/// A directed segment from `tail` to `head`. The direction of the segment
/// matters; its length is incidental, as rays stand in for infinite lines
/// in all the geometry performed here.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub tail: Point,
    pub head: Point,
}

/// Two parallel rays defining one measurement layer: indices 0 and 1 of
/// that layer's uniform grid.
pub type RayPair = (Ray, Ray);

impl Ray {
    pub fn new(tail: Point, head: Point) -> Self { Self { tail, head } }

    pub fn vector(&self) -> Vector { self.head - self.tail }

    pub fn unit(&self) -> Vector { self.vector().normalize() }

    pub fn length(&self) -> Length { self.vector().norm() }

    /// The segment of closest approach from `self` to `other`: its tail
    /// lies on `self`, its head on `other`. For crossing rays the two ends
    /// coincide at the crossing point. For (nearly) parallel rays the foot
    /// on `other` is taken opposite `self.tail`.
    ///
    /// See <http://geomalgorithms.com/a07-_distance.html>
    pub fn pitch(&self, other: &Ray) -> Ray {
        let w0 = self.tail - other.tail;
        let u = self.unit();
        let v = other.unit();
        let a = u.dot(&u);
        let b = u.dot(&v);
        let c = v.dot(&v);
        let d = u.dot(&w0);
        let e = v.dot(&w0);

        let denom = a * c - b * b;
        if denom < 1e-6 {
            // parallel
            let t = e / c;
            return Ray::new(self.tail, other.tail + t * v);
        }
        let s = (b * e - c * d) / denom;
        let t = (a * e - b * d) / denom;
        Ray::new(self.tail + s * u, other.tail + t * v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[allow(unused)] use pretty_assertions::{assert_eq, assert_ne};
    use float_eq::assert_float_eq;
    use rstest::rstest;

    fn ray(t: (f64, f64, f64), h: (f64, f64, f64)) -> Ray {
        Ray::new(Point::new(t.0, t.1, t.2), Point::new(h.0, h.1, h.2))
    }

    #[test]
    fn unit_and_length() {
        let r = ray((0.0, 0.0, 0.0), (0.0, 3.0, 4.0));
        assert_float_eq!(r.length(), 5.0, ulps <= 2);
        assert_float_eq!(r.unit().norm(), 1.0, ulps <= 2);
    }

    #[rstest(/**/             one                  ,                two                 ,     expected_tail,    expected_head,
             // crossing in a plane: both ends at the crossing point
             case(((0.,  0., 0.), (0., 10.,  0.)), ((0., 5., -5.), (0.,  5.,  5.)), (0., 5., 0.), (0., 5., 0.)),
             // skew: perpendicular feet on each ray
             case(((0.,  0., 0.), (0.,  0., 10.)), ((3., -5., 5.), (3.,  5.,  5.)), (0., 0., 5.), (3., 0., 5.)),
             // parallel: separation vector, head opposite tail
             case(((0.,  0., 0.), (0.,  0., 10.)), ((0., 4.,  0.), (0.,  4., 10.)), (0., 0., 0.), (0., 4., 0.)),
    )]
    fn pitch_feet(one: ((f64, f64, f64), (f64, f64, f64)),
                  two: ((f64, f64, f64), (f64, f64, f64)),
                  expected_tail: (f64, f64, f64),
                  expected_head: (f64, f64, f64)) {
        let p = ray(one.0, one.1).pitch(&ray(two.0, two.1));
        let got  = [p.tail.x, p.tail.y, p.tail.z, p.head.x, p.head.y, p.head.z];
        let want = [expected_tail.0, expected_tail.1, expected_tail.2,
                    expected_head.0, expected_head.1, expected_head.2];
        assert_float_eq!(got, want, abs_all <= 1e-12);
    }

    #[test]
    fn pitch_is_perpendicular_to_skew_rays() {
        let one = ray((0.0, 0.0, 0.0), (1.0, 2.0, 3.0));
        let two = ray((5.0, -1.0, 2.0), (4.0, 3.0, 1.0));
        let p = one.pitch(&two).vector();
        assert_float_eq!(p.dot(&one.unit()), 0.0, abs <= 1e-12);
        assert_float_eq!(p.dot(&two.unit()), 0.0, abs <= 1e-12);
    }
}
