use crate::{Axis, CellSource, ChildSizes, Host, Result, Vec2};

/// Reads the min/preferred/flexible sizes of `element` along `axis`.
///
/// - Without `control_size`, the element keeps its own size: `min == preferred == fixed_size`,
///   `flexible == 0`.
/// - With `control_size`, sizes come from measuring the element's subtree.
/// - With `force_expand`, `flexible` is at least 1.
pub fn child_sizes<H: Host>(
    host: &mut H,
    element: H::Element,
    axis: Axis,
    control_size: bool,
    force_expand: bool,
) -> ChildSizes {
    let mut sizes = if control_size {
        host.measure(element, axis)
    } else {
        ChildSizes::fixed(host.fixed_size(element, axis))
    };

    if force_expand {
        sizes.flexible = sizes.flexible.max(1.0);
    }
    sizes
}

/// Fills `element` with the content for `index` and brings its layout up to date.
///
/// Horizontal geometry is resolved before the vertical pass, so for the vertical axis the
/// element first takes the cell's resolved width. Content that wraps is then measured against
/// its final width.
pub(crate) fn prepare_for_measure<H: Host, S: CellSource<H> + ?Sized>(
    host: &mut H,
    source: &mut S,
    element: H::Element,
    index: usize,
    axis: Axis,
) -> Result<()> {
    if axis == Axis::Vertical {
        let width = source.cell(index)?.rect.width;
        let height = host.fixed_size(element, Axis::Vertical);
        host.set_size(element, Vec2::new(width, height));
    }
    source.refresh_content(host, element, index)?;
    host.force_layout(element);
    Ok(())
}
