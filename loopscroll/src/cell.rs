use crate::{Axis, Rect};

/// Geometry and identity of one logical item.
///
/// Records are plain values stored by their source. To change a record, take a copy, modify it
/// with [`CellRecord::with_axis`] and write it back with `CellSource::set_cell`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellRecord {
    pub index: usize,
    /// The `set_data` call this record was produced by.
    pub generation: u32,
    /// Zero until a layout pass completes for this generation.
    pub rect: Rect,
}

impl CellRecord {
    pub fn new(index: usize, generation: u32) -> Self {
        Self {
            index,
            generation,
            rect: Rect::ZERO,
        }
    }

    pub fn offset(&self, axis: Axis) -> f32 {
        self.rect.offset(axis)
    }

    pub fn size(&self, axis: Axis) -> f32 {
        self.rect.size(axis)
    }

    /// Returns a copy with the geometry along `axis` replaced.
    pub fn with_axis(self, axis: Axis, offset: f32, size: f32) -> Self {
        Self {
            rect: self.rect.with_axis(axis, offset, size),
            ..self
        }
    }
}
