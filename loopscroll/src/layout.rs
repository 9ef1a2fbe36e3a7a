use crate::sizing::{child_sizes, prepare_for_measure};
use crate::{
    Axis, AxisTotals, CellSource, ChildSizes, Host, LayoutOptions, ObjectPool, Result, Vec2,
};

/// Result of a full layout pass.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutOutput {
    /// Resolved size of the content container.
    pub content_size: Vec2,
    /// Measured totals per axis, indexed by [`Axis::index`].
    pub totals: [AxisTotals; 2],
}

impl LayoutOutput {
    pub fn totals(&self, axis: Axis) -> AxisTotals {
        self.totals[axis.index()]
    }
}

/// A single-pass linear layout in the style of a flex box.
///
/// Items stack along [`LayoutOptions::direction`] and stretch/align along the cross axis. Every
/// item is measured through a pooled element that goes straight back to the pool, so a pass
/// never keeps more than one element per template checked out. Results are written into the
/// source's records; the engine itself holds no per-item state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LayoutEngine {
    options: LayoutOptions,
}

impl LayoutEngine {
    pub fn new(options: LayoutOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: LayoutOptions) {
        self.options = options;
    }

    /// Lays out every item: measure and arrange horizontally, then vertically.
    ///
    /// Container sizes are resolved from [`LayoutOptions::content_fit`], falling back to the
    /// viewport size for unconstrained axes.
    pub fn layout<H: Host, S: CellSource<H> + ?Sized>(
        &self,
        host: &mut H,
        pool: &mut ObjectPool<H>,
        source: &mut S,
        viewport: Vec2,
    ) -> Result<LayoutOutput> {
        let mut out = LayoutOutput::default();
        for axis in Axis::ALL {
            let totals = self.calc_along_axis(host, pool, source, axis)?;
            let size = totals.resolve(self.options.fit(axis), viewport.get(axis));
            self.set_children_along_axis(host, pool, source, axis, size, &totals)?;
            out.content_size.set(axis, size);
            out.totals[axis.index()] = totals;
        }
        lsdebug!(
            count = source.count(),
            width = out.content_size.x,
            height = out.content_size.y,
            "LayoutEngine::layout"
        );
        Ok(out)
    }

    /// Measure pass: aggregates every item's sizes along `axis`.
    pub fn calc_along_axis<H: Host, S: CellSource<H> + ?Sized>(
        &self,
        host: &mut H,
        pool: &mut ObjectPool<H>,
        source: &mut S,
        axis: Axis,
    ) -> Result<AxisTotals> {
        let padding = self.options.padding.combined(axis);
        let spacing = self.options.spacing;
        let along_stacking = axis == self.options.stacking_axis();
        let count = source.count();

        let mut totals = AxisTotals {
            min: padding,
            preferred: padding,
            flexible: 0.0,
        };

        for index in 0..count {
            let sizes = self.measure_item(host, pool, source, index, axis)?;
            if along_stacking {
                totals.min += sizes.min + spacing;
                totals.preferred += sizes.preferred + spacing;
                totals.flexible += sizes.flexible;
            } else {
                totals.min = totals.min.max(sizes.min + padding);
                totals.preferred = totals.preferred.max(sizes.preferred + padding);
                totals.flexible = totals.flexible.max(sizes.flexible);
            }
        }

        if along_stacking && count > 0 {
            totals.min -= spacing;
            totals.preferred -= spacing;
        }
        totals.preferred = totals.preferred.max(totals.min);
        Ok(totals)
    }

    /// Arrange pass: assigns every item's offset and size along `axis` given the container
    /// `size` and the totals from [`Self::calc_along_axis`].
    pub fn set_children_along_axis<H: Host, S: CellSource<H> + ?Sized>(
        &self,
        host: &mut H,
        pool: &mut ObjectPool<H>,
        source: &mut S,
        axis: Axis,
        size: f32,
        totals: &AxisTotals,
    ) -> Result<()> {
        let control_size = self.options.control_size(axis);
        let alignment = self.options.child_alignment.on_axis(axis);
        let count = source.count();

        if axis != self.options.stacking_axis() {
            let inner = size - self.options.padding.combined(axis);
            for index in 0..count {
                let sizes = self.measure_item(host, pool, source, index, axis)?;
                let upper = if sizes.flexible > 0.0 {
                    inner
                } else {
                    sizes.preferred
                };
                let required = inner.min(upper).max(sizes.min);
                let start = self.start_offset(axis, required, size);
                let (offset, child) = if control_size {
                    (start, required)
                } else {
                    (start + (required - sizes.preferred) * alignment, sizes.preferred)
                };
                source.refresh_cell_size_data(index, axis, offset, child)?;
            }
            return Ok(());
        }

        let spacing = self.options.spacing;
        let mut pos = self.options.padding.leading(axis);
        if totals.flexible == 0.0 && totals.preferred < size {
            pos = self.start_offset(
                axis,
                totals.preferred - self.options.padding.combined(axis),
                size,
            );
        }

        let mut min_max_lerp = 0.0;
        if totals.min != totals.preferred {
            min_max_lerp = ((size - totals.min) / (totals.preferred - totals.min)).clamp(0.0, 1.0);
        }

        let mut flexible_multiplier = 0.0;
        if size > totals.preferred && totals.flexible > 0.0 {
            flexible_multiplier = (size - totals.preferred) / totals.flexible;
        }

        for index in 0..count {
            let sizes = self.measure_item(host, pool, source, index, axis)?;
            let mut child = sizes.min + (sizes.preferred - sizes.min) * min_max_lerp;
            child += sizes.flexible * flexible_multiplier;
            if control_size {
                source.refresh_cell_size_data(index, axis, pos, child)?;
            } else {
                let offset_in_cell = (child - sizes.preferred) * alignment;
                source.refresh_cell_size_data(index, axis, pos + offset_in_cell, sizes.preferred)?;
            }
            pos += child + spacing;
        }
        Ok(())
    }

    /// Offset that aligns a block of `required` size (padding excluded) inside `available`.
    fn start_offset(&self, axis: Axis, required: f32, available: f32) -> f32 {
        let padding = &self.options.padding;
        let surplus = available - (required + padding.combined(axis));
        padding.leading(axis) + surplus * self.options.child_alignment.on_axis(axis)
    }

    fn measure_item<H: Host, S: CellSource<H> + ?Sized>(
        &self,
        host: &mut H,
        pool: &mut ObjectPool<H>,
        source: &mut S,
        index: usize,
        axis: Axis,
    ) -> Result<ChildSizes> {
        let template = source.template_id(index)?;
        let element = pool.get_object(host, template)?;
        let measured = prepare_for_measure(host, source, element, index, axis).map(|()| {
            child_sizes(
                host,
                element,
                axis,
                self.options.control_size(axis),
                self.options.force_expand(axis),
            )
        });
        pool.return_object(host, element)?;
        measured
    }
}
