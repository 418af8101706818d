//! Axis-aligned match rectangles in haystack coordinates.

/// Half-open rectangle: `min` is inclusive, `max` is exclusive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    /// Left column (inclusive).
    pub min_x: usize,
    /// Top row (inclusive).
    pub min_y: usize,
    /// Right column (exclusive).
    pub max_x: usize,
    /// Bottom row (exclusive).
    pub max_y: usize,
}

impl Rect {
    pub const fn new(min_x: usize, min_y: usize, max_x: usize, max_y: usize) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Rectangle anchored at `(x, y)` with the given size.
    pub const fn from_anchor(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    /// Column count; zero for an inverted rectangle.
    pub const fn width(&self) -> usize {
        self.max_x.saturating_sub(self.min_x)
    }

    /// Row count; zero for an inverted rectangle.
    pub const fn height(&self) -> usize {
        self.max_y.saturating_sub(self.min_y)
    }

    /// Top-left corner as `(x, y)`.
    pub const fn anchor(&self) -> (usize, usize) {
        (self.min_x, self.min_y)
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        (self.min_x..self.max_x).contains(&x) && (self.min_y..self.max_y).contains(&y)
    }

    /// True when the two rectangles share at least one pixel.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.min_x < other.max_x
            && other.min_x < self.max_x
            && self.min_y < other.max_y
            && other.min_y < self.max_y
    }
}

#[cfg(test)]
mod tests {
    use super::Rect;

    #[test]
    fn from_anchor_is_half_open() {
        let rect = Rect::from_anchor(20, 30, 10, 10);
        assert_eq!(rect, Rect::new(20, 30, 30, 40));
        assert_eq!((rect.width(), rect.height()), (10, 10));
        assert!(rect.contains(20, 30));
        assert!(rect.contains(29, 39));
        assert!(!rect.contains(30, 39));
        assert!(!rect.contains(29, 40));
    }

    #[test]
    fn inverted_rect_is_empty() {
        let rect = Rect::new(5, 5, 3, 3);
        assert_eq!((rect.width(), rect.height()), (0, 0));
        assert!(!rect.contains(4, 4));
    }

    #[test]
    fn overlaps_excludes_touching_edges() {
        let a = Rect::new(0, 0, 4, 4);
        assert!(a.overlaps(&Rect::new(3, 3, 6, 6)));
        assert!(!a.overlaps(&Rect::new(4, 0, 8, 4)));
        assert!(!a.overlaps(&Rect::new(0, 4, 4, 8)));
    }
}
