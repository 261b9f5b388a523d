//! Screen-space geometry for pointer hit testing.

/// A pointer position in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub column: u16,
    pub row: u16,
}

impl Point {
    pub fn new(column: u16, row: u16) -> Self {
        Self { column, row }
    }
}

/// Axis-aligned rectangle covering a control's rendered cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Region {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Region {
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self { x, y, width, height }
    }

    pub fn contains(&self, p: Point) -> bool {
        p.column >= self.x
            && p.column < self.x.saturating_add(self.width)
            && p.row >= self.y
            && p.row < self.y.saturating_add(self.height)
    }

    /// Smallest region covering both `self` and `other`.
    pub fn union(&self, other: Region) -> Region {
        if self.width == 0 || self.height == 0 {
            return other;
        }
        if other.width == 0 || other.height == 0 {
            return *self;
        }
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = (self.x.saturating_add(self.width)).max(other.x.saturating_add(other.width));
        let bottom =
            (self.y.saturating_add(self.height)).max(other.y.saturating_add(other.height));
        Region {
            x,
            y,
            width: right - x,
            height: bottom - y,
        }
    }
}

/// Subscriber to the global pointer-down stream.
///
/// A control that implements this receives every pointer press for as long as
/// it is mounted, wherever the press lands.
pub trait PointerListener {
    fn on_pointer_down(&mut self, at: Point);
}
