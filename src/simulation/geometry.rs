//! Geometric primitives: points, headings and the rectangular playfield.
//!
//! Everything here is plain value math. Degenerate inputs (coincident points,
//! zero-sized bounds) produce defined sentinel values instead of NaN or panics.

use std::f32::consts::{PI, TAU};
use std::ops::{Add, Neg, Sub};

use geo::algorithm::Distance;
use geo::{Euclidean, Rect};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A position on the field.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate, growing to the right.
    pub x: f32,
    /// Vertical coordinate, growing downwards (screen convention).
    pub y: f32,
}

impl Point {
    /// Creates a point from its coordinates.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance between two points.
    pub fn distance(self, other: Point) -> f32 {
        Euclidean.distance(geo::Point::from(self), geo::Point::from(other))
    }

    /// Returns this point moved `scale` units along `direction`.
    pub fn offset(self, direction: Direction, scale: f32) -> Point {
        Point::new(self.x + direction.x * scale, self.y + direction.y * scale)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<Point> for geo::Point<f32> {
    fn from(p: Point) -> Self {
        geo::Point::new(p.x, p.y)
    }
}

/// A unit (or zero) movement vector.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Direction {
    /// Horizontal component.
    pub x: f32,
    /// Vertical component.
    pub y: f32,
}

impl Direction {
    /// The degenerate direction returned for coincident points.
    pub const ZERO: Direction = Direction { x: 0.0, y: 0.0 };

    /// Creates a direction from raw components without normalizing.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing at `angle` radians.
    pub fn from_angle(angle: f32) -> Self {
        Self::new(angle.cos(), angle.sin())
    }

    /// Unit vector pointing from `src` to `dest`.
    ///
    /// Returns [`Direction::ZERO`] when the points coincide.
    pub fn from_points(src: Point, dest: Point) -> Self {
        Self::new(dest.x - src.x, dest.y - src.y).normalize()
    }

    /// Scales the vector to unit length. A zero vector is returned unchanged.
    pub fn normalize(self) -> Self {
        let length = self.x.hypot(self.y);
        if length == 0.0 || !length.is_finite() {
            return Self::ZERO;
        }
        Self::new(self.x / length, self.y / length)
    }

    /// Angle of the vector in radians, in `(-π, π]`.
    pub fn to_angle(self) -> f32 {
        self.y.atan2(self.x)
    }

    /// Nudges the heading by adding the unit vector of `degrees` and renormalizing.
    pub fn add_angle(self, degrees: f32) -> Self {
        let radians = degrees.to_radians();
        Self::new(self.x + radians.cos(), self.y + radians.sin()).normalize()
    }

    /// True for the zero vector produced by coincident points.
    pub fn is_degenerate(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

impl Neg for Direction {
    type Output = Direction;

    fn neg(self) -> Direction {
        Direction::new(-self.x, -self.y)
    }
}

/// Wraps an angle into `(-π, π]`.
pub fn normalize_angle(angle: f32) -> f32 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI { wrapped + TAU } else { wrapped }
}

/// Turns `current` one `step` toward `target` along the shorter arc.
///
/// Never snaps: the result always differs from `current` by exactly `step`
/// unless the two angles are already equal.
pub fn step_angle_toward(current: f32, target: f32, step: f32) -> f32 {
    let delta = normalize_angle(target - current);
    if delta > 0.0 {
        normalize_angle(current + step)
    } else if delta < 0.0 {
        normalize_angle(current - step)
    } else {
        normalize_angle(current)
    }
}

/// A random heading in whole degrees, returned in radians.
pub fn random_angle<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    (rng.random_range(0..360) as f32).to_radians()
}

/// Perturbs `angle` by a random whole number of degrees in `[-max_degrees, max_degrees]`.
pub fn random_angle_change<R: Rng + ?Sized>(angle: f32, max_degrees: i32, rng: &mut R) -> f32 {
    let change = rng.random_range(-max_degrees..=max_degrees) as f32;
    angle + change.to_radians()
}

/// Axis-aligned playfield rectangle (screen coordinates, `top < bottom`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    rect: Rect<f32>,
}

impl Bounds {
    /// Creates bounds from the top-left and bottom-right corners.
    pub fn new(top_left: Point, bottom_right: Point) -> Self {
        Self {
            rect: Rect::new((top_left.x, top_left.y), (bottom_right.x, bottom_right.y)),
        }
    }

    /// Bounds anchored at the origin with the given size.
    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(Point::new(0.0, 0.0), Point::new(width, height))
    }

    /// The square box of half-size `radius` centered on `center`.
    pub fn around(center: Point, radius: f32) -> Self {
        Self::new(
            Point::new(center.x - radius, center.y - radius),
            Point::new(center.x + radius, center.y + radius),
        )
    }

    /// Left edge.
    pub fn left(&self) -> f32 {
        self.rect.min().x
    }

    /// Right edge.
    pub fn right(&self) -> f32 {
        self.rect.max().x
    }

    /// Top edge.
    pub fn top(&self) -> f32 {
        self.rect.min().y
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f32 {
        self.rect.max().y
    }

    /// Horizontal extent.
    pub fn width(&self) -> f32 {
        self.rect.width()
    }

    /// Vertical extent.
    pub fn height(&self) -> f32 {
        self.rect.height()
    }

    /// Top-left corner.
    pub fn top_left(&self) -> Point {
        Point::new(self.left(), self.top())
    }

    /// Bottom-right corner.
    pub fn bottom_right(&self) -> Point {
        Point::new(self.right(), self.bottom())
    }

    /// Length of the diagonal, the threshold used for wrap-folding distances.
    pub fn span(&self) -> f32 {
        self.top_left().distance(self.bottom_right())
    }

    /// True when `other` lies entirely inside these bounds (edges included).
    pub fn contains_bounds(&self, other: &Bounds) -> bool {
        other.left() >= self.left()
            && other.right() <= self.right()
            && other.top() >= self.top()
            && other.bottom() <= self.bottom()
    }

    /// Half-open point test: left/top edges inclusive, right/bottom exclusive.
    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.left() && p.x < self.right() && p.y >= self.top() && p.y < self.bottom()
    }

    /// True when the interiors overlap. Touching edges do not count.
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// A uniformly random point inside the bounds.
    ///
    /// Collapsed axes yield their single coordinate instead of panicking.
    pub fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Point {
        let x = if self.width() > 0.0 {
            rng.random_range(self.left()..self.right())
        } else {
            self.left()
        };
        let y = if self.height() > 0.0 {
            rng.random_range(self.top()..self.bottom())
        } else {
            self.top()
        };
        Point::new(x, y)
    }
}
