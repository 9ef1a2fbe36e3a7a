use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::error::check_index;
use crate::{Axis, CellRecord, Error, Host, Result, SourceKind};

/// Runs once for every newly instantiated element.
pub type InitFn<H> = Box<dyn FnMut(&mut H, <H as Host>::Element)>;

/// Picks a template for a payload. `None` selects the default template.
pub type PayloadTemplateFn<H, T> = Box<dyn Fn(&T) -> Option<<H as Host>::Template>>;
/// Writes a payload's content into an element.
pub type PayloadRefreshFn<H, T> = Box<dyn FnMut(&mut H, <H as Host>::Element, &T)>;

/// Picks a template for an index. `None` selects the default template.
pub type IndexTemplateFn<H> = Box<dyn Fn(usize) -> Option<<H as Host>::Template>>;
/// Writes the content for an index into an element.
pub type IndexRefreshFn<H> = Box<dyn FnMut(&mut H, <H as Host>::Element, usize)>;

/// Index-addressed access to a data source, independent of how items are stored.
///
/// The layout engine and the scroll view only talk to sources through this trait: they see
/// indices, records and template ids, never payloads.
pub trait CellSource<H: Host> {
    fn count(&self) -> usize;

    /// Bumped every time the source's data is replaced.
    fn generation(&self) -> u32;

    /// All records in index order.
    fn cells(&self) -> &[CellRecord];

    fn cell(&self, index: usize) -> Result<CellRecord> {
        let cells = self.cells();
        check_index(index, cells.len())?;
        Ok(cells[index])
    }

    /// Replaces the record at `index`.
    ///
    /// Fails if `index` is out of bounds or `cell` was produced by an older generation.
    fn set_cell(&mut self, index: usize, cell: CellRecord) -> Result<()>;

    /// Writes one axis of resolved geometry for `index` back into the source.
    fn refresh_cell_size_data(
        &mut self,
        index: usize,
        axis: Axis,
        offset: f32,
        size: f32,
    ) -> Result<()> {
        let cell = self.cell(index)?;
        self.set_cell(index, cell.with_axis(axis, offset, size))
    }

    /// Template for the item at `index`; `None` means the configured default.
    fn template_id(&self, index: usize) -> Result<Option<H::Template>>;

    /// Writes the content of the item at `index` into `element`. Never touches geometry.
    fn refresh_content(&mut self, host: &mut H, element: H::Element, index: usize) -> Result<()>;
}

/// Record storage shared by both source variants.
#[derive(Clone, Debug, Default)]
struct CellStore {
    cells: Vec<CellRecord>,
    generation: u32,
}

impl CellStore {
    fn reset(&mut self, count: usize) {
        self.generation = self.generation.wrapping_add(1);
        let generation = self.generation;
        self.cells.clear();
        self.cells
            .extend((0..count).map(|index| CellRecord::new(index, generation)));
    }

    fn set(&mut self, index: usize, cell: CellRecord) -> Result<()> {
        check_index(index, self.cells.len())?;
        if cell.generation != self.generation {
            return Err(Error::StaleCell {
                index,
                expected: self.generation,
                found: cell.generation,
            });
        }
        self.cells[index] = cell;
        Ok(())
    }
}

/// A source keyed by caller-supplied payloads.
pub struct PayloadSource<H: Host, T> {
    items: Vec<T>,
    store: CellStore,
    select: Option<PayloadTemplateFn<H, T>>,
    refresh: PayloadRefreshFn<H, T>,
}

impl<H: Host, T> PayloadSource<H, T> {
    pub fn new(
        refresh: impl FnMut(&mut H, H::Element, &T) + 'static,
        select: Option<PayloadTemplateFn<H, T>>,
    ) -> Self {
        Self {
            items: Vec::new(),
            store: CellStore::default(),
            select,
            refresh: Box::new(refresh),
        }
    }

    /// Replaces every item and rebuilds all records with zeroed geometry.
    pub fn set_data(&mut self, items: Vec<T>) {
        self.items = items;
        self.store.reset(self.items.len());
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn payload(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }
}

impl<H: Host, T> CellSource<H> for PayloadSource<H, T> {
    fn count(&self) -> usize {
        self.items.len()
    }

    fn generation(&self) -> u32 {
        self.store.generation
    }

    fn cells(&self) -> &[CellRecord] {
        &self.store.cells
    }

    fn set_cell(&mut self, index: usize, cell: CellRecord) -> Result<()> {
        self.store.set(index, cell)
    }

    fn template_id(&self, index: usize) -> Result<Option<H::Template>> {
        check_index(index, self.items.len())?;
        Ok(self.select.as_ref().and_then(|f| f(&self.items[index])))
    }

    fn refresh_content(&mut self, host: &mut H, element: H::Element, index: usize) -> Result<()> {
        check_index(index, self.items.len())?;
        (self.refresh)(host, element, &self.items[index]);
        Ok(())
    }
}

impl<H: Host, T> core::fmt::Debug for PayloadSource<H, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PayloadSource")
            .field("count", &self.items.len())
            .field("generation", &self.store.generation)
            .field("has_template_selector", &self.select.is_some())
            .finish_non_exhaustive()
    }
}

/// A source that only knows how many items there are.
pub struct IndexSource<H: Host> {
    store: CellStore,
    select: Option<IndexTemplateFn<H>>,
    refresh: IndexRefreshFn<H>,
}

impl<H: Host> IndexSource<H> {
    pub fn new(
        refresh: impl FnMut(&mut H, H::Element, usize) + 'static,
        select: Option<IndexTemplateFn<H>>,
    ) -> Self {
        Self {
            store: CellStore::default(),
            select,
            refresh: Box::new(refresh),
        }
    }

    /// Replaces the item count and rebuilds all records with zeroed geometry.
    pub fn set_count(&mut self, count: usize) {
        self.store.reset(count);
    }
}

impl<H: Host> CellSource<H> for IndexSource<H> {
    fn count(&self) -> usize {
        self.store.cells.len()
    }

    fn generation(&self) -> u32 {
        self.store.generation
    }

    fn cells(&self) -> &[CellRecord] {
        &self.store.cells
    }

    fn set_cell(&mut self, index: usize, cell: CellRecord) -> Result<()> {
        self.store.set(index, cell)
    }

    fn template_id(&self, index: usize) -> Result<Option<H::Template>> {
        check_index(index, self.store.cells.len())?;
        Ok(self.select.as_ref().and_then(|f| f(index)))
    }

    fn refresh_content(&mut self, host: &mut H, element: H::Element, index: usize) -> Result<()> {
        check_index(index, self.store.cells.len())?;
        (self.refresh)(host, element, index);
        Ok(())
    }
}

impl<H: Host> core::fmt::Debug for IndexSource<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("IndexSource")
            .field("count", &self.store.cells.len())
            .field("generation", &self.store.generation)
            .field("has_template_selector", &self.select.is_some())
            .finish_non_exhaustive()
    }
}

/// The data source a scroll view was initialized with.
pub enum Source<H: Host, T> {
    Payload(PayloadSource<H, T>),
    Index(IndexSource<H>),
}

impl<H: Host, T> Source<H, T> {
    pub fn kind(&self) -> SourceKind {
        match self {
            Self::Payload(_) => SourceKind::Payload,
            Self::Index(_) => SourceKind::Index,
        }
    }

    pub fn as_payload(&self) -> Option<&PayloadSource<H, T>> {
        match self {
            Self::Payload(s) => Some(s),
            Self::Index(_) => None,
        }
    }

    fn as_dyn(&self) -> &dyn CellSource<H> {
        match self {
            Self::Payload(s) => s,
            Self::Index(s) => s,
        }
    }

    fn as_dyn_mut(&mut self) -> &mut dyn CellSource<H> {
        match self {
            Self::Payload(s) => s,
            Self::Index(s) => s,
        }
    }
}

impl<H: Host, T> core::fmt::Debug for Source<H, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Payload(s) => f.debug_tuple("Payload").field(s).finish(),
            Self::Index(s) => f.debug_tuple("Index").field(s).finish(),
        }
    }
}

impl<H: Host, T> CellSource<H> for Source<H, T> {
    fn count(&self) -> usize {
        self.as_dyn().count()
    }

    fn generation(&self) -> u32 {
        self.as_dyn().generation()
    }

    fn cells(&self) -> &[CellRecord] {
        self.as_dyn().cells()
    }

    fn set_cell(&mut self, index: usize, cell: CellRecord) -> Result<()> {
        self.as_dyn_mut().set_cell(index, cell)
    }

    fn template_id(&self, index: usize) -> Result<Option<H::Template>> {
        self.as_dyn().template_id(index)
    }

    fn refresh_content(&mut self, host: &mut H, element: H::Element, index: usize) -> Result<()> {
        self.as_dyn_mut().refresh_content(host, element, index)
    }
}
