/// A layout axis. `Horizontal` is axis 0 and `Vertical` is axis 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    Horizontal = 0,
    Vertical = 1,
}

impl Axis {
    /// Both axes in the order layout passes run them.
    pub const ALL: [Axis; 2] = [Axis::Horizontal, Axis::Vertical];

    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn get(self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }

    pub fn set(&mut self, axis: Axis, value: f32) {
        match axis {
            Axis::Horizontal => self.x = value,
            Axis::Vertical => self.y = value,
        }
    }

    pub fn lerp(self, to: Self, t: f32) -> Self {
        Self {
            x: self.x + (to.x - self.x) * t,
            y: self.y + (to.y - self.y) * t,
        }
    }
}

/// An axis-aligned rectangle in content space (origin at the content's top-left corner,
/// y growing downwards).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_min_size(min: Vec2, size: Vec2) -> Self {
        Self::new(min.x, min.y, size.x, size.y)
    }

    pub fn x_min(&self) -> f32 {
        self.x
    }

    pub fn x_max(&self) -> f32 {
        self.x + self.width
    }

    pub fn y_min(&self) -> f32 {
        self.y
    }

    pub fn y_max(&self) -> f32 {
        self.y + self.height
    }

    /// Start offset along `axis`.
    pub fn offset(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }

    /// Extent along `axis`.
    pub fn size(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    pub fn end(&self, axis: Axis) -> f32 {
        self.offset(axis) + self.size(axis)
    }

    /// Returns a copy with the `axis` offset/size replaced.
    pub fn with_axis(self, axis: Axis, offset: f32, size: f32) -> Self {
        match axis {
            Axis::Horizontal => Self {
                x: offset,
                width: size,
                ..self
            },
            Axis::Vertical => Self {
                y: offset,
                height: size,
                ..self
            },
        }
    }

    /// Strict overlap test: rectangles that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        other.x_max() > self.x_min()
            && other.x_min() < self.x_max()
            && other.y_max() > self.y_min()
            && other.y_min() < self.y_max()
    }
}

/// Min/preferred/flexible sizes of one element along one axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChildSizes {
    pub min: f32,
    pub preferred: f32,
    pub flexible: f32,
}

impl ChildSizes {
    pub const fn new(min: f32, preferred: f32, flexible: f32) -> Self {
        Self {
            min,
            preferred,
            flexible,
        }
    }

    /// A rigid size: `min == preferred == size`, no flexible weight.
    pub const fn fixed(size: f32) -> Self {
        Self::new(size, size, 0.0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Padding {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Padding {
    pub const fn new(left: f32, right: f32, top: f32, bottom: f32) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    pub const fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }

    /// Combined padding along `axis`.
    pub fn combined(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.horizontal(),
            Axis::Vertical => self.vertical(),
        }
    }

    /// Leading padding along `axis` (left or top).
    pub fn leading(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.left,
            Axis::Vertical => self.top,
        }
    }
}

/// Where children sit inside the space the layout gives them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Alignment {
    #[default]
    UpperLeft,
    UpperCenter,
    UpperRight,
    MiddleLeft,
    MiddleCenter,
    MiddleRight,
    LowerLeft,
    LowerCenter,
    LowerRight,
}

impl Alignment {
    /// Fraction of surplus space placed before a child along `axis` (0, 0.5 or 1).
    pub fn on_axis(self, axis: Axis) -> f32 {
        let ordinal = self as usize;
        let step = match axis {
            Axis::Horizontal => ordinal % 3,
            Axis::Vertical => ordinal / 3,
        };
        step as f32 * 0.5
    }
}

/// The direction items stack in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    #[default]
    Vertical,
    Horizontal,
}

impl Direction {
    /// The stacking axis.
    pub fn axis(self) -> Axis {
        match self {
            Self::Vertical => Axis::Vertical,
            Self::Horizontal => Axis::Horizontal,
        }
    }
}

/// How the content container's size along one axis is resolved after the measure pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ContentFit {
    /// The container keeps the viewport's size.
    #[default]
    Unconstrained,
    /// The container shrinks to the total min size.
    MinSize,
    /// The container grows to the total preferred size.
    PreferredSize,
}

/// Aggregated sizes of the whole content along one axis (padding included).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxisTotals {
    pub min: f32,
    pub preferred: f32,
    pub flexible: f32,
}

impl AxisTotals {
    pub fn resolve(&self, fit: ContentFit, viewport: f32) -> f32 {
        match fit {
            ContentFit::Unconstrained => viewport,
            ContentFit::MinSize => self.min,
            ContentFit::PreferredSize => self.preferred,
        }
    }
}
