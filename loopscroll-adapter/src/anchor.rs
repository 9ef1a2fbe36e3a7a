use core::fmt;

use loopscroll::{Host, ScrollView};

/// A scroll anchor that can be used to preserve visual position across data changes.
///
/// Typical use cases:
/// - chat/timeline "prepend" (load older messages above) without content jumping
/// - any reorder/replace where the viewport should stay on an item identity
#[derive(Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollAnchor<K> {
    pub key: K,
    /// Pixels between the anchor item's start and the viewport's start along the stacking axis.
    /// Negative when the item starts below the viewport's start.
    pub offset_in_viewport: f32,
}

impl<K: fmt::Debug> fmt::Debug for ScrollAnchor<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollAnchor")
            .field("key", &self.key)
            .field("offset_in_viewport", &self.offset_in_viewport)
            .finish()
    }
}

/// Captures an anchor for the first visible item.
///
/// `key_of` maps the item's current index to a stable identity. Returns `None` when nothing is
/// visible.
pub fn capture_first_visible_anchor<H: Host, T, K>(
    view: &ScrollView<H, T>,
    key_of: impl FnOnce(usize) -> K,
) -> Option<ScrollAnchor<K>> {
    let index = *view.visible_indices().first()?;
    capture_anchor_for_index(view, index, key_of)
}

/// Captures an anchor for the item at `index`, visible or not.
pub fn capture_anchor_for_index<H: Host, T, K>(
    view: &ScrollView<H, T>,
    index: usize,
    key_of: impl FnOnce(usize) -> K,
) -> Option<ScrollAnchor<K>> {
    let cell = view.cell(index).ok()?;
    let axis = view.options().layout.stacking_axis();
    let offset_in_viewport = view.viewport_rect().offset(axis) - cell.offset(axis);
    Some(ScrollAnchor {
        key: key_of(index),
        offset_in_viewport,
    })
}

/// Applies a previously captured anchor by moving the scroll position.
///
/// The adapter provides a `key_to_index` mapping for the *current* dataset. Any smooth scroll
/// in flight is cancelled.
///
/// Returns `Ok(true)` when the anchor was applied, `Ok(false)` when its key is gone.
pub fn apply_anchor<H: Host, T, K>(
    view: &mut ScrollView<H, T>,
    anchor: &ScrollAnchor<K>,
    mut key_to_index: impl FnMut(&K) -> Option<usize>,
) -> loopscroll::Result<bool> {
    let Some(index) = key_to_index(&anchor.key) else {
        ladebug!("apply_anchor: anchor key no longer present");
        return Ok(false);
    };
    let axis = view.options().layout.stacking_axis();
    let start = view.cell(index)?.offset(axis);
    let position = view.position_for_offset(axis, start + anchor.offset_in_viewport);
    view.scroll_to_position(position)?;
    ladebug!(index, y = position.y, x = position.x, "apply_anchor");
    Ok(true)
}
