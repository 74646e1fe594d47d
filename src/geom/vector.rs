use crate::geom::EPS;
use crate::geom::point::Point;
use std::ops::Add;

/// Displacement between two points in 3D.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector {
    pub dx: f64,
    pub dy: f64,
    pub dz: f64,
}

impl Vector {
    pub fn new(dx: f64, dy: f64, dz: f64) -> Self {
        Self { dx, dy, dz }
    }

    pub fn from_points(beg: Point, end: Point) -> Self {
        Self {
            dx: end.x - beg.x,
            dy: end.y - beg.y,
            dz: end.z - beg.z,
        }
    }

    /// Cross product between 2 vectors.
    pub fn cross(self, other: Self) -> Self {
        Self {
            dx: self.dy * other.dz - self.dz * other.dy,
            dy: self.dz * other.dx - self.dx * other.dz,
            dz: self.dx * other.dy - self.dy * other.dx,
        }
    }

    /// Dot product between 2 vectors.
    pub fn dot(self, other: Self) -> f64 {
        self.dx * other.dx + self.dy * other.dy + self.dz * other.dz
    }

    pub fn length(&self) -> f64 {
        self.dot(*self).sqrt()
    }

    /// Unit vector in the same direction, `None` for a zero-length vector.
    pub fn normalize(&self) -> Option<Self> {
        let len = self.length();
        if len < EPS {
            None
        } else {
            Some(Self {
                dx: self.dx / len,
                dy: self.dy / len,
                dz: self.dz / len,
            })
        }
    }

    pub fn to_f32(self) -> [f32; 3] {
        [self.dx as f32, self.dy as f32, self.dz as f32]
    }
}

impl Add for Vector {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            dx: self.dx + other.dx,
            dy: self.dy + other.dy,
            dz: self.dz + other.dz,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cross_and_dot() {
        let vx = Vector::new(1., 0., 0.);
        let vy = Vector::new(0., 1., 0.);
        assert_eq!(vx.cross(vy), Vector::new(0., 0., 1.));
        assert_eq!(vy.cross(vx), Vector::new(0., 0., -1.));
        assert_eq!(vx.dot(vy), 0.);
    }

    #[test]
    fn test_normalize() {
        let v = Vector::from_points(Point::ground(1., 1.), Point::new(1., 4., 4.));
        assert_eq!(v.length(), 5.);
        assert_eq!(v.normalize(), Some(Vector::new(0., 0.6, 0.8)));
        assert!(Vector::new(0., 0., 0.).normalize().is_none());
    }
}
