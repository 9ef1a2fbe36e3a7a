use alloc::vec::Vec;

use crate::key::Map;
use crate::source::{
    IndexSource, IndexTemplateFn, InitFn, PayloadSource, PayloadTemplateFn, Source,
};
use crate::tween::{SmoothScroll, Tween};
use crate::{
    Axis, CellRecord, CellSource, Error, Host, LayoutEngine, LayoutOptions, LayoutOutput,
    ObjectPool, Rect, Result, ScrollViewOptions, SourceKind, Vec2,
};

/// A recycling scroll view over a list of items.
///
/// The view owns the host, the element pool and the data source. It materializes elements only
/// for items overlapping the viewport and recycles everything else through the pool.
///
/// It reacts to two kinds of events, both pushed in by the adapter:
/// - data or geometry changes (`refresh_view_by_*`, `set_viewport_size`, `set_layout_options`)
///   run a full layout and re-render every visible item from scratch;
/// - scroll changes (`on_scroll`, `scroll_to_index`, `tick`) only attach/detach the items that
///   entered or left the viewport.
///
/// Scroll positions are normalized per axis: `0.0` shows the start of the content and `1.0`
/// the end, with `position * (content_size - viewport_size)` giving the pixel offset.
///
/// `T` is the payload type for views initialized with [`ScrollView::init_by_payload`]; index
/// based views leave it at `()`.
pub struct ScrollView<H: Host, T = ()> {
    host: H,
    pool: ObjectPool<H>,
    source: Option<Source<H, T>>,
    engine: LayoutEngine,
    options: ScrollViewOptions<H::Template>,
    layout: LayoutOutput,
    position: Vec2,
    rendered: Map<usize, H::Element>,
    visible: Vec<usize>,
    animation: SmoothScroll,
}

impl<H: Host, T> ScrollView<H, T> {
    pub fn new(host: H, options: ScrollViewOptions<H::Template>) -> Self {
        lsdebug!(
            viewport_width = options.viewport_size.x,
            viewport_height = options.viewport_size.y,
            "ScrollView::new"
        );
        Self {
            host,
            pool: ObjectPool::new(options.default_template.clone()),
            source: None,
            engine: LayoutEngine::new(options.layout),
            options,
            layout: LayoutOutput::default(),
            position: Vec2::ZERO,
            rendered: Map::new(),
            visible: Vec::new(),
            animation: SmoothScroll::Idle,
        }
    }

    /// Selects a payload-backed source.
    ///
    /// `init` runs once per newly created element, `refresh` writes a payload into an element
    /// and `select` picks a template per payload (the default template when absent).
    pub fn init_by_payload(
        &mut self,
        init: Option<InitFn<H>>,
        refresh: impl FnMut(&mut H, H::Element, &T) + 'static,
        select: Option<PayloadTemplateFn<H, T>>,
    ) -> Result<()> {
        self.ensure_uninitialized()?;
        lsdebug!("ScrollView::init_by_payload");
        self.pool.set_init_boxed(init);
        self.source = Some(Source::Payload(PayloadSource::new(refresh, select)));
        Ok(())
    }

    /// Selects an index-backed source. See [`Self::init_by_payload`].
    pub fn init_by_index(
        &mut self,
        init: Option<InitFn<H>>,
        refresh: impl FnMut(&mut H, H::Element, usize) + 'static,
        select: Option<IndexTemplateFn<H>>,
    ) -> Result<()> {
        self.ensure_uninitialized()?;
        lsdebug!("ScrollView::init_by_index");
        self.pool.set_init_boxed(init);
        self.source = Some(Source::Index(IndexSource::new(refresh, select)));
        Ok(())
    }

    fn ensure_uninitialized(&self) -> Result<()> {
        match &self.source {
            None => Ok(()),
            Some(source) => {
                lswarn!(kind = %source.kind(), "ScrollView: already initialized");
                Err(Error::AlreadyInitialized(source.kind()))
            }
        }
    }

    /// Replaces all payloads, lays everything out again and re-renders.
    pub fn refresh_view_by_payload(&mut self, items: Vec<T>) -> Result<()> {
        match self.source.as_mut() {
            None => return Err(not_initialized()),
            Some(Source::Payload(source)) => source.set_data(items),
            Some(Source::Index(_)) => {
                return Err(mismatch(SourceKind::Index, SourceKind::Payload));
            }
        }
        self.relayout()
    }

    /// Replaces the item count, lays everything out again and re-renders.
    pub fn refresh_view_by_count(&mut self, count: usize) -> Result<()> {
        match self.source.as_mut() {
            None => return Err(not_initialized()),
            Some(Source::Index(source)) => source.set_count(count),
            Some(Source::Payload(_)) => {
                return Err(mismatch(SourceKind::Payload, SourceKind::Index));
            }
        }
        self.relayout()
    }

    /// Runs a full layout pass and re-renders every visible item.
    pub fn relayout(&mut self) -> Result<()> {
        let Self {
            host,
            pool,
            source,
            engine,
            options,
            layout,
            ..
        } = self;
        let source = source.as_mut().ok_or_else(not_initialized)?;
        match engine.layout(host, pool, source, options.viewport_size) {
            Ok(output) => *layout = output,
            Err(err) => {
                // The source already holds the new data, so nothing rendered is valid anymore.
                self.release_rendered();
                return Err(err);
            }
        }
        self.render_cells(true)
    }

    /// Returns every rendered element to the pool and empties the visible set.
    fn release_rendered(&mut self) {
        let Self {
            host,
            pool,
            rendered,
            visible,
            ..
        } = self;
        lsdebug!(rendered = rendered.len(), "ScrollView: releasing rendered elements");
        for (_, element) in core::mem::take(rendered) {
            let _ = pool.return_object(host, element);
        }
        visible.clear();
    }

    /// Resizes the viewport. An initialized view is laid out again.
    pub fn set_viewport_size(&mut self, size: Vec2) -> Result<()> {
        if self.options.viewport_size == size {
            return Ok(());
        }
        self.options.viewport_size = size;
        if self.source.is_none() {
            return Ok(());
        }
        self.relayout()
    }

    /// Replaces the layout configuration. An initialized view is laid out again.
    pub fn set_layout_options(&mut self, layout: LayoutOptions) -> Result<()> {
        self.options.layout = layout;
        self.engine.set_options(layout);
        if self.source.is_none() {
            return Ok(());
        }
        self.relayout()
    }

    /// Call this when the host reports a scroll position change (wheel, drag, inertia).
    pub fn on_scroll(&mut self, position: Vec2) -> Result<()> {
        if self.source.is_none() {
            return Err(not_initialized());
        }
        self.position = clamp_position(position);
        self.render_cells(false)
    }

    /// Call this when the user starts dragging the scroll container.
    ///
    /// Cancels an in-flight smooth scroll; the position stays where the last tick put it.
    pub fn on_begin_drag(&mut self) {
        if self.animation.cancel() {
            lsdebug!("ScrollView: smooth scroll cancelled by drag");
        }
    }

    /// Reconciles rendered elements with the items overlapping the viewport.
    ///
    /// With `reset_all`, every rendered element goes back to the pool first (use after geometry
    /// changed). Otherwise elements that are still visible are left untouched.
    ///
    /// Afterwards exactly the visible items are rendered.
    pub fn render_cells(&mut self, reset_all: bool) -> Result<()> {
        let view = self.viewport_rect();
        let stacking = self.engine.options().stacking_axis();
        let spacing = self.engine.options().spacing;
        let Self {
            host,
            pool,
            source,
            rendered,
            visible,
            ..
        } = self;
        let source = source.as_mut().ok_or_else(not_initialized)?;

        collect_visible(source.cells(), &view, stacking, spacing, visible);

        let mut returned = Ok(());
        let _before = rendered.len();
        rendered.retain(|index, element| {
            if !reset_all && visible.binary_search(index).is_ok() {
                return true;
            }
            if let Err(err) = pool.return_object(host, *element) {
                if returned.is_ok() {
                    returned = Err(err);
                }
            }
            false
        });
        let _removed = _before - rendered.len();

        let mut _added = 0usize;
        for &index in visible.iter() {
            if rendered.contains_key(&index) {
                continue;
            }
            let element = pool.get_object(host, source.template_id(index)?)?;
            let cell = match source
                .refresh_content(host, element, index)
                .and_then(|()| source.cell(index))
            {
                Ok(cell) => cell,
                Err(err) => {
                    let _ = pool.return_object(host, element);
                    return Err(err);
                }
            };
            for axis in Axis::ALL {
                host.place(element, axis, cell.offset(axis), cell.size(axis));
            }
            rendered.insert(index, element);
            _added += 1;
        }

        lstrace!(
            reset_all,
            visible = visible.len(),
            removed = _removed,
            added = _added,
            "ScrollView::render_cells"
        );
        returned
    }

    /// The normalized position that puts `index`'s top-left corner at the viewport origin.
    ///
    /// Axes whose content fits inside the viewport resolve to `0.0`; results are clamped to
    /// `[0, 1]`.
    pub fn scroll_target(&self, index: usize) -> Result<Vec2> {
        let source = self.source.as_ref().ok_or_else(not_initialized)?;
        let cell = source.cell(index)?;
        let mut target = Vec2::ZERO;
        for axis in Axis::ALL {
            let range = self.layout.content_size.get(axis) - self.options.viewport_size.get(axis);
            let t = if range > 0.0 {
                cell.offset(axis) / range
            } else {
                0.0
            };
            target.set(axis, t.clamp(0.0, 1.0));
        }
        Ok(target)
    }

    /// Jumps to `index` immediately, cancelling any smooth scroll.
    ///
    /// Returns the applied position.
    pub fn scroll_to_index(&mut self, index: usize) -> Result<Vec2> {
        let target = self.scroll_target(index)?;
        self.animation.cancel();
        self.assign_position(target)?;
        Ok(target)
    }

    /// Jumps to a normalized position (clamped to `[0, 1]`), cancelling any smooth scroll.
    ///
    /// Unlike [`Self::on_scroll`], the position is pushed to the host. Returns the applied
    /// position.
    pub fn scroll_to_position(&mut self, position: Vec2) -> Result<Vec2> {
        if self.source.is_none() {
            return Err(not_initialized());
        }
        let position = clamp_position(position);
        self.animation.cancel();
        self.assign_position(position)?;
        Ok(position)
    }

    /// The normalized position whose viewport starts `offset` pixels into the content along
    /// `axis`. Other axes keep the current position.
    pub fn position_for_offset(&self, axis: Axis, offset: f32) -> Vec2 {
        let range = self.layout.content_size.get(axis) - self.options.viewport_size.get(axis);
        let mut position = self.position;
        let t = if range > 0.0 { offset / range } else { 0.0 };
        position.set(axis, t.clamp(0.0, 1.0));
        position
    }

    /// Starts a smooth scroll to `index` using the configured duration.
    ///
    /// Returns the target position. Drive the animation with [`Self::tick`].
    pub fn smooth_scroll_to_index(&mut self, index: usize, now_ms: u64) -> Result<Vec2> {
        let duration_ms = self.options.smooth_scroll_duration_ms;
        self.smooth_scroll_to_index_with(index, now_ms, duration_ms)
    }

    /// Starts a smooth scroll to `index` over `duration_ms`, replacing any animation in flight.
    pub fn smooth_scroll_to_index_with(
        &mut self,
        index: usize,
        now_ms: u64,
        duration_ms: u64,
    ) -> Result<Vec2> {
        let target = self.scroll_target(index)?;
        let tween = Tween::new(
            self.position,
            target,
            now_ms,
            duration_ms,
            self.options.easing,
        );
        lsdebug!(index, now_ms, duration_ms, "ScrollView: smooth scroll started");
        self.animation.start(tween);
        Ok(target)
    }

    /// Advances a smooth scroll. Call once per frame.
    ///
    /// Returns the newly assigned position, or `None` when no animation is running. The final
    /// tick assigns the exact target.
    pub fn tick(&mut self, now_ms: u64) -> Result<Option<Vec2>> {
        let Some(step) = self.animation.step(now_ms) else {
            return Ok(None);
        };
        self.assign_position(step.position)?;
        Ok(Some(step.position))
    }

    fn assign_position(&mut self, position: Vec2) -> Result<()> {
        self.position = position;
        lstrace!(x = position.x, y = position.y, "ScrollView: assign scroll position");
        self.host.set_scroll_position(position);
        self.render_cells(false)
    }

    /// Releases every element and the pool container, and hands the host back.
    pub fn teardown(self) -> H {
        let Self {
            mut host,
            mut pool,
            mut rendered,
            ..
        } = self;
        lsdebug!(rendered = rendered.len(), "ScrollView::teardown");
        rendered.clear();
        pool.clear_pool(&mut host);
        host
    }

    /// Viewport rectangle in content space.
    pub fn viewport_rect(&self) -> Rect {
        let viewport = self.options.viewport_size;
        let content = self.layout.content_size;
        let mut min = Vec2::ZERO;
        for axis in Axis::ALL {
            let range = (content.get(axis) - viewport.get(axis)).max(0.0);
            min.set(axis, self.position.get(axis) * range);
        }
        Rect::from_min_size(min, viewport)
    }

    pub fn is_initialized(&self) -> bool {
        self.source.is_some()
    }

    pub fn source_kind(&self) -> Option<SourceKind> {
        self.source.as_ref().map(Source::kind)
    }

    pub fn source(&self) -> Option<&Source<H, T>> {
        self.source.as_ref()
    }

    /// The payload at `index` for payload-backed views.
    pub fn payload(&self, index: usize) -> Option<&T> {
        self.source.as_ref()?.as_payload()?.payload(index)
    }

    pub fn count(&self) -> usize {
        self.source.as_ref().map_or(0, |source| source.count())
    }

    pub fn cell(&self, index: usize) -> Result<CellRecord> {
        self.source.as_ref().ok_or_else(not_initialized)?.cell(index)
    }

    /// Indices overlapping the viewport as of the last reconciliation, ascending.
    pub fn visible_indices(&self) -> &[usize] {
        &self.visible
    }

    pub fn rendered_len(&self) -> usize {
        self.rendered.len()
    }

    pub fn is_rendered(&self, index: usize) -> bool {
        self.rendered.contains_key(&index)
    }

    pub fn rendered_element(&self, index: usize) -> Option<H::Element> {
        self.rendered.get(&index).copied()
    }

    /// Rendered `(index, element)` pairs in no particular order.
    pub fn for_each_rendered(&self, mut f: impl FnMut(usize, H::Element)) {
        for (index, element) in &self.rendered {
            f(*index, *element);
        }
    }

    pub fn layout_output(&self) -> &LayoutOutput {
        &self.layout
    }

    pub fn content_size(&self) -> Vec2 {
        self.layout.content_size
    }

    pub fn viewport_size(&self) -> Vec2 {
        self.options.viewport_size
    }

    pub fn scroll_position(&self) -> Vec2 {
        self.position
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_animating()
    }

    /// Stops a smooth scroll without moving.
    pub fn cancel_animation(&mut self) {
        self.animation.cancel();
    }

    pub fn options(&self) -> &ScrollViewOptions<H::Template> {
        &self.options
    }

    pub fn pool(&self) -> &ObjectPool<H> {
        &self.pool
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

impl<H: Host, T> core::fmt::Debug for ScrollView<H, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ScrollView")
            .field("source", &self.source)
            .field("pool", &self.pool)
            .field("layout", &self.layout)
            .field("position", &self.position)
            .field("rendered", &self.rendered.len())
            .field("visible", &self.visible.len())
            .field("animation", &self.animation)
            .finish_non_exhaustive()
    }
}

fn not_initialized() -> Error {
    lswarn!("ScrollView: used before init_by_payload/init_by_index");
    Error::NotInitialized
}

fn mismatch(expected: SourceKind, found: SourceKind) -> Error {
    lswarn!(%expected, %found, "ScrollView: source kind mismatch");
    Error::SourceMismatch { expected, found }
}

fn clamp_position(position: Vec2) -> Vec2 {
    Vec2::new(position.x.clamp(0.0, 1.0), position.y.clamp(0.0, 1.0))
}

/// Collects, in ascending order, the indices of `cells` that overlap `view`.
///
/// Stacking-axis offsets never decrease with the index when spacing is non-negative, so the
/// candidate window is found by binary search and only the cross axis needs per-cell checks.
pub(crate) fn collect_visible(
    cells: &[CellRecord],
    view: &Rect,
    stacking: Axis,
    spacing: f32,
    out: &mut Vec<usize>,
) {
    out.clear();
    if spacing < 0.0 {
        out.extend(
            cells
                .iter()
                .filter(|cell| view.overlaps(&cell.rect))
                .map(|cell| cell.index),
        );
        return;
    }

    let start = cells.partition_point(|cell| cell.rect.end(stacking) <= view.offset(stacking));
    let end = cells.partition_point(|cell| cell.rect.offset(stacking) < view.end(stacking));
    if start >= end {
        return;
    }
    out.extend(
        cells[start..end]
            .iter()
            .filter(|cell| view.overlaps(&cell.rect))
            .map(|cell| cell.index),
    );
}
