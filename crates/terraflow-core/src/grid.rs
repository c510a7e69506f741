//! The [`Grid`] type: a dense, fixed-size 2D array of cell values.
//!
//! Unlike a view into shared storage, a `Grid` owns its cells outright.
//! Every pipeline stage produces a fresh grid, so a grid handed downstream
//! is never mutated behind the reader's back. Dimensions are fixed at
//! construction and always positive.

use crate::error::{Error, Result};
use crate::geom::{Point, Range};

/// A dense `width × height` grid, stored row-major.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "GridRepr<T>"))]
pub struct Grid<T> {
    width: i32,
    height: i32,
    cells: Vec<T>,
}

fn check_dimensions(width: i32, height: i32) -> Result<()> {
    if width <= 0 || height <= 0 {
        return Err(Error::InvalidDimensions { width, height });
    }
    Ok(())
}

impl<T: Clone> Grid<T> {
    /// Create a grid with every cell set to `fill`.
    pub fn new(width: i32, height: i32, fill: T) -> Result<Self> {
        check_dimensions(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![fill; (width as usize) * (height as usize)],
        })
    }
}

impl<T> Grid<T> {
    /// Wrap a row-major cell vector.
    ///
    /// Fails with `DimensionMismatch` when `cells.len()` differs from
    /// `width * height`; `found.x` then holds the actual cell count.
    pub fn from_vec(width: i32, height: i32, cells: Vec<T>) -> Result<Self> {
        check_dimensions(width, height)?;
        if cells.len() != (width as usize) * (height as usize) {
            return Err(Error::DimensionMismatch {
                expected: Point::new(width, height),
                found: Point::new(cells.len() as i32, 1),
            });
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Build a grid by evaluating `f` once per cell, in row-major order.
    pub fn from_fn(width: i32, height: i32, mut f: impl FnMut(Point) -> T) -> Result<Self> {
        check_dimensions(width, height)?;
        let cells = Range::new(0, 0, width, height).iter().map(&mut f).collect();
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Size as a `Point` (x = width, y = height).
    #[inline]
    pub fn size(&self) -> Point {
        Point::new(self.width, self.height)
    }

    /// The range `[0, width) × [0, height)`.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.width, self.height)
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`: grids have positive dimensions.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.width && p.y < self.height
    }

    /// Flat row-major index of `p`, or `None` when out of bounds.
    #[inline]
    pub fn index(&self, p: Point) -> Option<usize> {
        if self.contains(p) {
            Some((p.y as usize) * (self.width as usize) + (p.x as usize))
        } else {
            None
        }
    }

    /// Inverse of [`index`](Grid::index).
    #[inline]
    pub fn point(&self, idx: usize) -> Point {
        let w = self.width as usize;
        Point::new((idx % w) as i32, (idx / w) as i32)
    }

    fn out_of_bounds(&self, p: Point) -> Error {
        Error::OutOfBounds {
            pos: p,
            size: self.size(),
        }
    }

    /// The value at `p`, failing with `OutOfBounds` outside the grid.
    #[inline]
    pub fn at(&self, p: Point) -> Result<&T> {
        match self.index(p) {
            Some(i) => Ok(&self.cells[i]),
            None => Err(self.out_of_bounds(p)),
        }
    }

    /// The value at `p`, or `None` outside the grid.
    #[inline]
    pub fn get(&self, p: Point) -> Option<&T> {
        self.index(p).map(|i| &self.cells[i])
    }

    /// Mutable access to the value at `p`, or `None` outside the grid.
    #[inline]
    pub fn get_mut(&mut self, p: Point) -> Option<&mut T> {
        self.index(p).map(|i| &mut self.cells[i])
    }

    /// Overwrite the value at `p`.
    pub fn set(&mut self, p: Point, value: T) -> Result<()> {
        match self.index(p) {
            Some(i) => {
                self.cells[i] = value;
                Ok(())
            }
            None => Err(self.out_of_bounds(p)),
        }
    }

    /// Row-major cell values.
    #[inline]
    pub fn values(&self) -> &[T] {
        &self.cells
    }

    /// Row `y` as a slice, or `None` when `y` is out of range.
    pub fn row(&self, y: i32) -> Option<&[T]> {
        if y < 0 || y >= self.height {
            return None;
        }
        let w = self.width as usize;
        let start = (y as usize) * w;
        Some(&self.cells[start..start + w])
    }

    pub fn into_vec(self) -> Vec<T> {
        self.cells
    }

    /// Row-major iterator over `(Point, &T)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Point, &T)> + '_ {
        self.bounds().iter().zip(self.cells.iter())
    }

    /// A new grid of the same size whose cells are `f(p, value)`.
    pub fn map<U>(&self, mut f: impl FnMut(Point, &T) -> U) -> Grid<U> {
        Grid {
            width: self.width,
            height: self.height,
            cells: self.iter().map(|(p, v)| f(p, v)).collect(),
        }
    }

    /// Count the cells satisfying a predicate.
    pub fn count_fn(&self, mut f: impl FnMut(&T) -> bool) -> usize {
        self.cells.iter().filter(|v| f(v)).count()
    }

    #[inline]
    pub fn same_size<U>(&self, other: &Grid<U>) -> bool {
        self.size() == other.size()
    }

    /// Fail with `DimensionMismatch` unless `other` has this grid's size.
    pub fn ensure_same_size<U>(&self, other: &Grid<U>) -> Result<()> {
        if self.same_size(other) {
            Ok(())
        } else {
            Err(Error::DimensionMismatch {
                expected: self.size(),
                found: other.size(),
            })
        }
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct GridRepr<T> {
    width: i32,
    height: i32,
    cells: Vec<T>,
}

#[cfg(feature = "serde")]
impl<T> TryFrom<GridRepr<T>> for Grid<T> {
    type Error = Error;

    fn try_from(repr: GridRepr<T>) -> Result<Self> {
        Grid::from_vec(repr.width, repr.height, repr.cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_and_size() {
        let g = Grid::new(10, 5, 0.0f64).unwrap();
        assert_eq!(g.size(), Point::new(10, 5));
        assert_eq!(g.len(), 50);
        assert_eq!(g.bounds(), Range::new(0, 0, 10, 5));
    }

    #[test]
    fn rejects_non_positive_dimensions() {
        assert_eq!(
            Grid::new(0, 3, 1u8),
            Err(Error::InvalidDimensions {
                width: 0,
                height: 3
            })
        );
        assert!(Grid::from_fn(4, -1, |_| 0u8).is_err());
    }

    #[test]
    fn set_and_at() {
        let mut g = Grid::new(4, 4, 0i32).unwrap();
        let p = Point::new(2, 3);
        g.set(p, 42).unwrap();
        assert_eq!(g.at(p), Ok(&42));
        assert_eq!(g.get(Point::new(0, 0)), Some(&0));
        assert_eq!(g.get(Point::new(4, 0)), None);
        assert_eq!(
            g.at(Point::new(-1, 0)),
            Err(Error::OutOfBounds {
                pos: Point::new(-1, 0),
                size: Point::new(4, 4)
            })
        );
        assert!(g.set(Point::new(0, 4), 1).is_err());
    }

    #[test]
    fn get_mut_edits_in_place() {
        let mut g = Grid::new(3, 2, 'a').unwrap();
        *g.get_mut(Point::new(2, 1)).unwrap() = 'b';
        assert_eq!(g.get(Point::new(2, 1)), Some(&'b'));
        assert!(g.get_mut(Point::new(3, 0)).is_none());
        assert!(g.get_mut(Point::new(0, -1)).is_none());
    }

    #[test]
    fn index_round_trips_point() {
        let g = Grid::new(7, 3, ()).unwrap();
        for p in g.bounds() {
            let i = g.index(p).unwrap();
            assert_eq!(g.point(i), p);
        }
    }

    #[test]
    fn from_fn_is_row_major() {
        let g = Grid::from_fn(3, 2, |p| p.y * 10 + p.x).unwrap();
        assert_eq!(g.values(), &[0, 1, 2, 10, 11, 12]);
        assert_eq!(g.row(1), Some(&[10, 11, 12][..]));
        assert_eq!(g.row(2), None);
    }

    #[test]
    fn from_vec_checks_length() {
        assert!(Grid::from_vec(2, 2, vec![1, 2, 3, 4]).is_ok());
        assert_eq!(
            Grid::from_vec(2, 2, vec![1, 2, 3]),
            Err(Error::DimensionMismatch {
                expected: Point::new(2, 2),
                found: Point::new(3, 1)
            })
        );
    }

    #[test]
    fn map_preserves_dimensions() {
        let g = Grid::from_fn(3, 4, |p| p.x).unwrap();
        let doubled = g.map(|_, v| *v as f64 * 2.0);
        assert!(g.same_size(&doubled));
        assert_eq!(doubled.at(Point::new(2, 1)), Ok(&4.0));
    }

    #[test]
    fn ensure_same_size_reports_both_sizes() {
        let a = Grid::new(3, 3, 0u8).unwrap();
        let b = Grid::new(3, 2, 0u8).unwrap();
        assert!(a.ensure_same_size(&a).is_ok());
        assert_eq!(
            a.ensure_same_size(&b),
            Err(Error::DimensionMismatch {
                expected: Point::new(3, 3),
                found: Point::new(3, 2)
            })
        );
    }

    #[test]
    fn iter_and_count() {
        let g = Grid::from_fn(3, 2, |p| p.x == p.y).unwrap();
        let items: Vec<_> = g.iter().collect();
        assert_eq!(items.len(), 6);
        assert_eq!(items[4], (Point::new(1, 1), &true));
        assert_eq!(g.count_fn(|v| *v), 2);
    }
}
