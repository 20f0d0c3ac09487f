// Copyright 2025 Lars Brubaker
// License: MIT
//
// Geometry utilities for the planar subdivision.
//
// Points double as 2-D vectors: subtracting two points yields the direction
// vector between them. All coordinate comparisons go through EPSILON.

use std::f32::consts::PI;
use std::fmt;
use std::ops::{Add, Sub};

pub type Real = f32;

/// Tolerance used for every coordinate and angle comparison.
pub const EPSILON: Real = 1e-5;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point {
    pub x: Real,
    pub y: Real,
}

impl Point {
    #[inline]
    pub const fn new(x: Real, y: Real) -> Self {
        Self { x, y }
    }
}

impl Sub for Point {
    type Output = Point;

    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Add for Point {
    type Output = Point;

    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl From<(Real, Real)> for Point {
    fn from((x, y): (Real, Real)) -> Self {
        Point::new(x, y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.x, self.y)
    }
}

/// z-component of the 3-D cross product of `a` and `b`.
#[inline]
pub fn cross(a: Point, b: Point) -> Real {
    a.x * b.y - a.y * b.x
}

#[inline]
pub fn dot(a: Point, b: Point) -> Real {
    a.x * b.x + a.y * b.y
}

/// Signed angle in radians rotating `a` onto `b`, in `(-pi, pi]`.
/// Positive when `b` lies counter-clockwise of `a`. Opposite vectors give
/// `+pi` whatever the sign of the zero cross product.
#[inline]
pub fn angle_between_vectors(a: Point, b: Point) -> Real {
    let c = cross(a, b);
    let d = dot(a, b);
    if c == 0.0 && d < 0.0 {
        return PI;
    }
    c.atan2(d)
}

/// Returns true if `u` is left of `v`, or level with it (within EPSILON)
/// and not above it. This is the ordering used to find the
/// leftmost-then-lowest vertex of a set.
#[inline]
pub fn is_left_lower(u: Point, v: Point) -> bool {
    if (u.x - v.x).abs() < EPSILON {
        u.y - v.y < EPSILON
    } else {
        u.x - v.x < EPSILON
    }
}

/// Index of the leftmost-then-lowest point. Points equal within EPSILON
/// resolve to the later one.
pub fn leftmost_index<I>(points: I) -> Option<usize>
where
    I: IntoIterator<Item = Point>,
{
    let mut best: Option<(usize, Point)> = None;
    for (i, p) in points.into_iter().enumerate() {
        match best {
            Some((_, b)) if !is_left_lower(p, b) => {}
            _ => best = Some((i, p)),
        }
    }
    best.map(|(i, _)| i)
}

/// Shoelace area of a closed ring. Counter-clockwise rings are positive.
pub fn signed_area(ring: &[Point]) -> Real {
    let n = ring.len();
    if n < 3 {
        return 0.0;
    }
    let mut area = 0.0;
    for i in 0..n {
        let a = ring[i];
        let b = ring[(i + 1) % n];
        area += a.x * b.y - b.x * a.y;
    }
    area * 0.5
}

/// Even-odd test: does a horizontal ray from `p` towards +x cross the ring an
/// odd number of times?
pub fn ring_contains(ring: &[Point], p: Point) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let a = ring[i];
        let b = ring[j];
        if (a.y > p.y) != (b.y > p.y) {
            let x_at = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if p.x < x_at {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}
