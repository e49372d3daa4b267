// Copyright 2025 the Quadtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry types and helpers.

use core::fmt::Debug;

use crate::error::QuadTreeError;
use crate::util::is_non_negative;

/// Numeric scalar abstraction for coordinates stored in a [`QuadTree`][crate::QuadTree].
///
/// This trait provides the handful of operations the tree needs to split a
/// region into quadrants and to measure distances, plus an associated widened
/// accumulator type for squared distances (e.g., f32→f64, i64→i128).
pub trait Scalar: Copy + PartialOrd + Debug {
    /// Widened accumulator type suitable for squared distances.
    type Acc: Copy
        + PartialOrd
        + core::ops::Add<Output = Self::Acc>
        + core::ops::Sub<Output = Self::Acc>
        + core::ops::Mul<Output = Self::Acc>
        + Debug;

    /// Add two scalar values.
    fn add(a: Self, b: Self) -> Self;

    /// Subtract two scalar values: a - b.
    fn sub(a: Self, b: Self) -> Self;

    /// Zero value for the scalar type.
    fn zero() -> Self;

    /// Half of a non-negative extent (used for quadrant sizes).
    fn half(v: Self) -> Self;

    /// Convert a scalar to the accumulator type.
    fn widen(v: Self) -> Self::Acc;

    /// `dx * dx + dy * dy` in the accumulator, or `None` if it does not fit.
    fn checked_norm_sq(dx: Self::Acc, dy: Self::Acc) -> Option<Self::Acc>;
}

impl Scalar for f32 {
    type Acc = f64;

    #[inline]
    fn add(a: Self, b: Self) -> Self {
        a + b
    }

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a - b
    }

    #[inline(always)]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn half(v: Self) -> Self {
        0.5 * v
    }

    #[inline]
    fn widen(v: Self) -> Self::Acc {
        v as f64
    }

    #[inline]
    fn checked_norm_sq(dx: Self::Acc, dy: Self::Acc) -> Option<Self::Acc> {
        Some(dx * dx + dy * dy)
    }
}

impl Scalar for f64 {
    type Acc = Self;

    #[inline]
    fn add(a: Self, b: Self) -> Self {
        a + b
    }

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a - b
    }

    #[inline(always)]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn half(v: Self) -> Self {
        0.5 * v
    }

    #[inline(always)]
    fn widen(v: Self) -> Self::Acc {
        v
    }

    #[inline]
    fn checked_norm_sq(dx: Self::Acc, dy: Self::Acc) -> Option<Self::Acc> {
        Some(dx * dx + dy * dy)
    }
}

impl Scalar for i64 {
    type Acc = i128;

    #[inline]
    fn add(a: Self, b: Self) -> Self {
        a.saturating_add(b)
    }

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a.saturating_sub(b)
    }

    #[inline(always)]
    fn zero() -> Self {
        0
    }

    #[inline]
    fn half(v: Self) -> Self {
        // Odd extents round down; the far quadrant takes the extra unit.
        v / 2
    }

    #[inline]
    fn widen(v: Self) -> Self::Acc {
        v as i128
    }

    #[inline]
    fn checked_norm_sq(dx: Self::Acc, dy: Self::Acc) -> Option<Self::Acc> {
        // Differences of two i64 fit in i128, their squares may not.
        dx.checked_mul(dx)?.checked_add(dy.checked_mul(dy)?)
    }
}

/// Helper alias for the widened accumulator type `Scalar::Acc` associated with a `T: Scalar`.
pub type ScalarAcc<T> = <T as Scalar>::Acc;

/// One of the four quadrants a node splits into.
///
/// The discriminant is the child slot: children are always stored in the
/// order NE, NW, SW, SE. "North" is the half with the *smaller* y.
///
/// ```text
/// +-------+-------+
/// | NW, 1 | NE, 0 |
/// +-------+-------+
/// | SW, 2 | SE, 3 |
/// +-------+-------+
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Quadrant {
    /// East of the vertical midpoint, north of the horizontal one.
    Ne = 0,
    /// West and north.
    Nw = 1,
    /// West and south.
    Sw = 2,
    /// East and south.
    Se = 3,
}

impl Quadrant {
    /// All quadrants in child order.
    pub const ALL: [Self; 4] = [Self::Ne, Self::Nw, Self::Sw, Self::Se];

    /// Index of this quadrant's child slot.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Axis-aligned rectangle `[x, x + width] × [y, y + height]`.
///
/// Width and height are never negative: [`Rect::new`] rejects such extents.
/// A rectangle with zero width and height is valid and is how a single
/// location is expressed for queries (see [`Rect::point`]).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rect<T> {
    x: T,
    y: T,
    width: T,
    height: T,
}

impl<T: Scalar> Rect<T> {
    /// Create a rectangle from its origin and size.
    ///
    /// # Errors
    ///
    /// Returns [`QuadTreeError::InvalidExtent`] if `width` or `height` is
    /// negative (or not comparable, e.g. NaN).
    pub fn new(x: T, y: T, width: T, height: T) -> Result<Self, QuadTreeError> {
        if !is_non_negative(width) || !is_non_negative(height) {
            return Err(QuadTreeError::InvalidExtent);
        }
        Ok(Self {
            x,
            y,
            width,
            height,
        })
    }

    /// A degenerate rectangle at a single location.
    #[inline]
    pub fn point(x: T, y: T) -> Self {
        Self {
            x,
            y,
            width: T::zero(),
            height: T::zero(),
        }
    }

    /// Minimum x.
    #[inline]
    pub fn x(&self) -> T {
        self.x
    }

    /// Minimum y.
    #[inline]
    pub fn y(&self) -> T {
        self.y
    }

    /// Extent along x.
    #[inline]
    pub fn width(&self) -> T {
        self.width
    }

    /// Extent along y.
    #[inline]
    pub fn height(&self) -> T {
        self.height
    }

    /// Maximum x.
    #[inline]
    pub fn max_x(&self) -> T {
        T::add(self.x, self.width)
    }

    /// Maximum y.
    #[inline]
    pub fn max_y(&self) -> T {
        T::add(self.y, self.height)
    }

    /// The splitting midpoints `(vertical, horizontal)` of this rectangle.
    #[inline]
    pub fn center(&self) -> (T, T) {
        (
            T::add(self.x, T::half(self.width)),
            T::add(self.y, T::half(self.height)),
        )
    }

    /// Whether this rectangle contains the point. Edges are inclusive.
    #[inline]
    pub fn contains_point(&self, x: T, y: T) -> bool {
        self.x <= x && x <= self.max_x() && self.y <= y && y <= self.max_y()
    }

    /// Determines whether this rectangle overlaps with another in any way.
    ///
    /// Both rectangles are closed: two rectangles that only share an edge or a
    /// corner intersect.
    ///
    /// # Examples
    ///
    /// ```
    /// use quadtree::Rect;
    ///
    /// let a = Rect::new(0.0, 0.0, 10.0, 10.0).unwrap();
    /// let b = Rect::new(10.0, 0.0, 10.0, 10.0).unwrap();
    /// assert!(a.intersects(&b));
    ///
    /// let c = Rect::new(11.0, 0.0, 10.0, 10.0).unwrap();
    /// assert!(!a.intersects(&c));
    /// ```
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        !(self.max_x() < other.x
            || self.x > other.max_x()
            || self.max_y() < other.y
            || self.y > other.max_y())
    }

    /// Classify a location into the quadrant of this rectangle it falls in.
    ///
    /// Returns `None` when the location lies exactly on the vertical or the
    /// horizontal midpoint, since it then belongs to no single quadrant.
    pub fn quadrant_of(&self, x: T, y: T) -> Option<Quadrant> {
        let (v_mid, h_mid) = self.center();
        let north = y < h_mid;
        let south = y > h_mid;
        let west = x < v_mid;
        let east = x > v_mid;
        match (east, west, north, south) {
            (true, _, true, _) => Some(Quadrant::Ne),
            (_, true, true, _) => Some(Quadrant::Nw),
            (_, true, _, true) => Some(Quadrant::Sw),
            (true, _, _, true) => Some(Quadrant::Se),
            _ => None,
        }
    }

    /// Classify a whole region: `Some` only if both its corners fall in the
    /// same quadrant, i.e. the region lies entirely inside it.
    pub fn quadrant_of_region(&self, region: &Self) -> Option<Quadrant> {
        self.quadrant_of_span((region.x, region.y), (region.max_x(), region.max_y()))
    }

    /// Like [`quadrant_of_region`][Self::quadrant_of_region], for a region
    /// given by its min and max corners.
    pub(crate) fn quadrant_of_span(&self, min: (T, T), max: (T, T)) -> Option<Quadrant> {
        let lo = self.quadrant_of(min.0, min.1)?;
        let hi = self.quadrant_of(max.0, max.1)?;
        (lo == hi).then_some(lo)
    }

    /// The sub-rectangle covering one quadrant.
    ///
    /// The four quadrants tile `self` with no gap and no overlap.
    pub fn quadrant(&self, quadrant: Quadrant) -> Self {
        let west_w = T::half(self.width);
        let north_h = T::half(self.height);
        let east_w = T::sub(self.width, west_w);
        let south_h = T::sub(self.height, north_h);
        let v_mid = T::add(self.x, west_w);
        let h_mid = T::add(self.y, north_h);
        let (x, y, width, height) = match quadrant {
            Quadrant::Ne => (v_mid, self.y, east_w, north_h),
            Quadrant::Nw => (self.x, self.y, west_w, north_h),
            Quadrant::Sw => (self.x, h_mid, west_w, south_h),
            Quadrant::Se => (v_mid, h_mid, east_w, south_h),
        };
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// A 2D location carrying an opaque payload.
///
/// Equality compares the coordinates only; two points with different payloads
/// at the same location are equal.
#[derive(Copy, Clone, Debug)]
pub struct Point<T, P> {
    x: T,
    y: T,
    data: P,
}

impl<T: Copy, P> Point<T, P> {
    /// Create a point.
    #[inline]
    pub const fn new(x: T, y: T, data: P) -> Self {
        Self { x, y, data }
    }

    /// The x coordinate.
    #[inline]
    pub fn x(&self) -> T {
        self.x
    }

    /// The y coordinate.
    #[inline]
    pub fn y(&self) -> T {
        self.y
    }

    /// The payload.
    #[inline]
    pub fn data(&self) -> &P {
        &self.data
    }

    /// Consume the point, returning its payload.
    #[inline]
    pub fn into_data(self) -> P {
        self.data
    }
}

impl<T: PartialEq, P> PartialEq for Point<T, P> {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}

/// A value stored in the tree: a point, or a rectangle with a payload.
#[derive(Clone, Debug)]
pub enum Item<T, P> {
    /// A point item.
    Point(Point<T, P>),
    /// A rectangle item and its payload.
    Rect(Rect<T>, P),
}

impl<T: Scalar, P> Item<T, P> {
    /// The payload of either kind of item.
    pub fn data(&self) -> &P {
        match self {
            Self::Point(p) => p.data(),
            Self::Rect(_, data) => data,
        }
    }

    /// The point, if this is a point item.
    pub fn as_point(&self) -> Option<&Point<T, P>> {
        match self {
            Self::Point(p) => Some(p),
            Self::Rect(..) => None,
        }
    }
}

impl<T, P> From<Point<T, P>> for Item<T, P> {
    fn from(point: Point<T, P>) -> Self {
        Self::Point(point)
    }
}

/// Anything with an `(x, y)` origin and closed bounds.
///
/// Quadrant classification only looks at [`Locate::origin`]; exact filtering
/// uses [`Locate::bounds`]. For a rectangle the origin is its minimum corner,
/// so its extent plays no part in deciding which child stores it.
pub trait Locate<T: Scalar> {
    /// The location used for quadrant classification.
    fn origin(&self) -> (T, T);

    /// The closed region covered.
    fn bounds(&self) -> Rect<T>;
}

impl<T: Scalar> Locate<T> for Rect<T> {
    #[inline]
    fn origin(&self) -> (T, T) {
        (self.x, self.y)
    }

    #[inline]
    fn bounds(&self) -> Rect<T> {
        *self
    }
}

impl<T: Scalar, P> Locate<T> for Point<T, P> {
    #[inline]
    fn origin(&self) -> (T, T) {
        (self.x, self.y)
    }

    #[inline]
    fn bounds(&self) -> Rect<T> {
        Rect::point(self.x, self.y)
    }
}

impl<T: Scalar, P> Locate<T> for Item<T, P> {
    #[inline]
    fn origin(&self) -> (T, T) {
        match self {
            Self::Point(p) => p.origin(),
            Self::Rect(r, _) => r.origin(),
        }
    }

    #[inline]
    fn bounds(&self) -> Rect<T> {
        match self {
            Self::Point(p) => p.bounds(),
            Self::Rect(r, _) => *r,
        }
    }
}

impl<T: Scalar> Locate<T> for (T, T) {
    #[inline]
    fn origin(&self) -> (T, T) {
        *self
    }

    #[inline]
    fn bounds(&self) -> Rect<T> {
        Rect::point(self.0, self.1)
    }
}

#[cfg(feature = "kurbo")]
impl From<Rect<f64>> for kurbo::Rect {
    fn from(r: Rect<f64>) -> Self {
        Self::new(r.x, r.y, r.max_x(), r.max_y())
    }
}

/// Reversed corners are swapped, so only a NaN coordinate is rejected,
/// with [`QuadTreeError::InvalidExtent`].
#[cfg(feature = "kurbo")]
impl TryFrom<kurbo::Rect> for Rect<f64> {
    type Error = QuadTreeError;

    fn try_from(r: kurbo::Rect) -> Result<Self, Self::Error> {
        fn span(a: f64, b: f64) -> (f64, f64) {
            // A NaN fails the comparison and leaves a NaN extent.
            if a <= b { (a, b - a) } else { (b, a - b) }
        }
        let (x, width) = span(r.x0, r.x1);
        let (y, height) = span(r.y0, r.y1);
        Self::new(x, y, width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f64, y: f64, w: f64, h: f64) -> Rect<f64> {
        Rect::new(x, y, w, h).unwrap()
    }

    #[test]
    fn negative_or_nan_extent_is_rejected() {
        assert_eq!(
            Rect::new(0.0, 0.0, -1.0, 5.0),
            Err(QuadTreeError::InvalidExtent)
        );
        assert_eq!(
            Rect::new(0.0, 0.0, 5.0, f64::NAN),
            Err(QuadTreeError::InvalidExtent)
        );
        assert_eq!(Rect::new(0_i64, 0, 0, -3), Err(QuadTreeError::InvalidExtent));
        assert!(Rect::new(0.0, 0.0, 0.0, 0.0).is_ok());
    }

    #[test]
    fn touching_edges_and_corners_intersect() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&rect(10.0, 10.0, 5.0, 5.0)));
        assert!(a.intersects(&rect(-5.0, 3.0, 5.0, 1.0)));
        assert!(a.intersects(&Rect::point(10.0, 0.0)));
        assert!(!a.intersects(&rect(10.5, 0.0, 5.0, 5.0)));
        assert!(!a.intersects(&rect(0.0, -6.0, 5.0, 5.0)));
    }

    #[test]
    fn quadrant_classification_uses_midpoints() {
        let r = rect(0.0, 0.0, 400.0, 400.0);
        assert_eq!(r.quadrant_of(300.0, 100.0), Some(Quadrant::Ne));
        assert_eq!(r.quadrant_of(100.0, 100.0), Some(Quadrant::Nw));
        assert_eq!(r.quadrant_of(100.0, 300.0), Some(Quadrant::Sw));
        assert_eq!(r.quadrant_of(300.0, 300.0), Some(Quadrant::Se));
        assert_eq!(r.quadrant_of(200.0, 200.0), None);
        assert_eq!(r.quadrant_of(200.0, 50.0), None);
        assert_eq!(r.quadrant_of(50.0, 200.0), None);
    }

    #[test]
    fn region_classification_requires_both_corners() {
        let r = rect(0.0, 0.0, 400.0, 400.0);
        assert_eq!(
            r.quadrant_of_region(&rect(10.0, 10.0, 50.0, 50.0)),
            Some(Quadrant::Nw)
        );
        assert_eq!(r.quadrant_of_region(&rect(150.0, 150.0, 100.0, 100.0)), None);
        assert_eq!(r.quadrant_of_region(&rect(0.0, 0.0, 200.0, 200.0)), None);
    }

    #[test]
    fn quadrants_tile_parent() {
        let r = rect(0.0, 0.0, 400.0, 400.0);
        assert_eq!(r.quadrant(Quadrant::Ne), rect(200.0, 0.0, 200.0, 200.0));
        assert_eq!(r.quadrant(Quadrant::Nw), rect(0.0, 0.0, 200.0, 200.0));
        assert_eq!(r.quadrant(Quadrant::Sw), rect(0.0, 200.0, 200.0, 200.0));
        assert_eq!(r.quadrant(Quadrant::Se), rect(200.0, 200.0, 200.0, 200.0));

        // Odd integer extents leave no gap at the far edge.
        let odd = Rect::new(0_i64, 0, 5, 7).unwrap();
        let se = odd.quadrant(Quadrant::Se);
        assert_eq!((se.x(), se.y()), (2, 3));
        assert_eq!((se.max_x(), se.max_y()), (5, 7));
        let nw = odd.quadrant(Quadrant::Nw);
        assert_eq!((nw.max_x(), nw.max_y()), (2, 3));
    }

    #[test]
    fn point_equality_ignores_payload() {
        let a = Point::new(1.0, 2.0, "a");
        let b = Point::new(1.0, 2.0, "b");
        let c = Point::new(1.0, 2.5, "a");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn item_locates_by_origin() {
        let item: Item<f64, u8> = Item::Rect(rect(5.0, 6.0, 100.0, 100.0), 1);
        assert_eq!(item.origin(), (5.0, 6.0));
        assert_eq!(item.bounds().max_x(), 105.0);
        assert!(item.as_point().is_none());
        assert_eq!(*item.data(), 1);
    }

    #[cfg(feature = "kurbo")]
    #[test]
    fn kurbo_conversion_normalises() {
        let r = Rect::<f64>::try_from(kurbo::Rect::new(10.0, 10.0, 0.0, 5.0)).unwrap();
        assert_eq!(r, rect(0.0, 5.0, 10.0, 5.0));
        let k: kurbo::Rect = r.into();
        assert_eq!(k, kurbo::Rect::new(0.0, 5.0, 10.0, 10.0));
    }

    #[cfg(feature = "kurbo")]
    #[test]
    fn kurbo_nan_is_rejected() {
        let nan = kurbo::Rect::new(0.0, 0.0, f64::NAN, 5.0);
        assert_eq!(Rect::<f64>::try_from(nan), Err(QuadTreeError::InvalidExtent));
    }
}
