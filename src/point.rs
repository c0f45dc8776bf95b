//! Planar points shared by clustering and regression

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::utils::squared_distance;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn squared_distance(self, other: Point) -> f64 {
        squared_distance((self.x, self.y), (other.x, other.y))
    }

    pub fn distance(self, other: Point) -> f64 {
        self.squared_distance(other).sqrt()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}
