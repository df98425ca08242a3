mod ray;

pub use ray::{Ray, RayPair};

/// All detector geometry is plain f64 millimetres.
pub type Length = f64;

pub type Vector = nalgebra::Vector3<Length>;
pub type Point  = nalgebra::Point3 <Length>;
