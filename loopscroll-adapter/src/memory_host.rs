use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use loopscroll::{Axis, ChildSizes, Host, Rect, Vec2};

/// Measures an element from its content string along one axis.
pub type MeasureFn = Box<dyn Fn(&str, Axis) -> ChildSizes>;

/// Identifies a template registered with [`MemoryHost::register`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TemplateId(pub u32);

/// Handle to an element in a [`MemoryHost`] arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElementId(pub u32);

/// A prototype elements are instantiated from.
pub struct TemplateSpec {
    pub name: String,
    /// Initial size of new elements, also their fixed size until content code changes it.
    pub size: Vec2,
    /// Sizes reported when the layout controls child size. Without it, elements report their
    /// current size as a rigid size.
    pub measure: Option<MeasureFn>,
    /// Makes every instantiation of this template fail.
    pub refuse: bool,
}

impl TemplateSpec {
    pub fn new(name: impl Into<String>, size: Vec2) -> Self {
        Self {
            name: name.into(),
            size,
            measure: None,
            refuse: false,
        }
    }

    pub fn with_measure(mut self, measure: impl Fn(&str, Axis) -> ChildSizes + 'static) -> Self {
        self.measure = Some(Box::new(measure));
        self
    }

    pub fn refusing(mut self) -> Self {
        self.refuse = true;
        self
    }
}

impl fmt::Debug for TemplateSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateSpec")
            .field("name", &self.name)
            .field("size", &self.size)
            .field("measure", &self.measure.is_some())
            .field("refuse", &self.refuse)
            .finish()
    }
}

/// Which container an element currently lives under.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Parent {
    Content,
    PoolContainer,
    Destroyed,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElementNode {
    pub template: TemplateId,
    pub parent: Parent,
    pub active: bool,
    /// Whatever the refresh callback last wrote.
    pub content: String,
    pub size: Vec2,
    /// Rect assigned by the last `place` calls.
    pub placed: Rect,
    pub layout_passes: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    #[error("unknown template {0:?}")]
    UnknownTemplate(TemplateId),
    #[error("template `{0}` refused to instantiate")]
    Refused(String),
}

/// An in-memory [`Host`]: an element arena plus a content and a pool container.
///
/// Useful as a reference implementation and for driving a [`loopscroll::ScrollView`] in tests
/// or headless tools. Elements are never removed from the arena; destroyed ones stay around
/// with [`Parent::Destroyed`] so their history can be inspected.
#[derive(Debug)]
pub struct MemoryHost {
    templates: Vec<TemplateSpec>,
    elements: Vec<ElementNode>,
    pool_container: bool,
    scroll_position: Option<Vec2>,
    created: usize,
    destroyed: usize,
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryHost {
    pub fn new() -> Self {
        Self {
            templates: Vec::new(),
            elements: Vec::new(),
            pool_container: true,
            scroll_position: None,
            created: 0,
            destroyed: 0,
        }
    }

    pub fn register(&mut self, spec: TemplateSpec) -> TemplateId {
        let id = TemplateId(self.templates.len() as u32);
        ladebug!(?id, name = %spec.name, "MemoryHost: template registered");
        self.templates.push(spec);
        id
    }

    pub fn template(&self, id: TemplateId) -> Option<&TemplateSpec> {
        self.templates.get(id.0 as usize)
    }

    pub fn element(&self, id: ElementId) -> Option<&ElementNode> {
        self.elements.get(id.0 as usize)
    }

    fn node_mut(&mut self, id: ElementId) -> Option<&mut ElementNode> {
        self.elements.get_mut(id.0 as usize)
    }

    /// Every element ever created, destroyed ones included.
    pub fn elements(&self) -> impl Iterator<Item = (ElementId, &ElementNode)> + '_ {
        self.elements
            .iter()
            .enumerate()
            .map(|(i, node)| (ElementId(i as u32), node))
    }

    /// Active elements under the content container, i.e. what a user would see.
    pub fn shown(&self) -> impl Iterator<Item = (ElementId, &ElementNode)> + '_ {
        self.elements()
            .filter(|(_, node)| node.active && node.parent == Parent::Content)
    }

    pub fn set_content(&mut self, id: ElementId, content: impl Into<String>) {
        if let Some(node) = self.node_mut(id) {
            node.content = content.into();
        }
    }

    pub fn content(&self, id: ElementId) -> Option<&str> {
        self.element(id).map(|node| node.content.as_str())
    }

    /// Sets an element's own size along `axis`, as content code would.
    pub fn set_extent(&mut self, id: ElementId, axis: Axis, extent: f32) {
        if let Some(node) = self.node_mut(id) {
            node.size.set(axis, extent);
        }
    }

    pub fn created_count(&self) -> usize {
        self.created
    }

    pub fn destroyed_count(&self) -> usize {
        self.destroyed
    }

    pub fn live_count(&self) -> usize {
        self.created - self.destroyed
    }

    pub fn has_pool_container(&self) -> bool {
        self.pool_container
    }

    /// The last position pushed through [`Host::set_scroll_position`].
    pub fn scroll_position(&self) -> Option<Vec2> {
        self.scroll_position
    }
}

impl Host for MemoryHost {
    type Element = ElementId;
    type Template = TemplateId;
    type Error = HostError;

    fn create_element(&mut self, template: &TemplateId) -> Result<ElementId, HostError> {
        let spec = self
            .template(*template)
            .ok_or(HostError::UnknownTemplate(*template))?;
        if spec.refuse {
            lawarn!(name = %spec.name, "MemoryHost: template refused to instantiate");
            return Err(HostError::Refused(spec.name.clone()));
        }

        let node = ElementNode {
            template: *template,
            parent: Parent::Content,
            active: true,
            content: String::new(),
            size: spec.size,
            placed: Rect::ZERO,
            layout_passes: 0,
        };
        let id = ElementId(self.elements.len() as u32);
        self.elements.push(node);
        self.created += 1;
        ladebug!(?id, ?template, "MemoryHost: element created");
        Ok(id)
    }

    fn destroy_element(&mut self, element: ElementId) {
        let Some(node) = self.node_mut(element) else {
            return;
        };
        if node.parent == Parent::Destroyed {
            return;
        }
        node.parent = Parent::Destroyed;
        node.active = false;
        self.destroyed += 1;
    }

    fn release_pool_container(&mut self) {
        self.pool_container = false;
    }

    fn attach(&mut self, element: ElementId) {
        if let Some(node) = self.node_mut(element) {
            node.parent = Parent::Content;
            node.active = true;
        }
    }

    fn detach(&mut self, element: ElementId) {
        if let Some(node) = self.node_mut(element) {
            node.parent = Parent::PoolContainer;
            node.active = false;
        }
    }

    fn measure(&mut self, element: ElementId, axis: Axis) -> ChildSizes {
        let Some(node) = self.element(element) else {
            return ChildSizes::default();
        };
        let measure = self
            .template(node.template)
            .and_then(|spec| spec.measure.as_ref());
        match measure {
            Some(measure) => measure(node.content.as_str(), axis),
            None => ChildSizes::fixed(node.size.get(axis)),
        }
    }

    fn fixed_size(&self, element: ElementId, axis: Axis) -> f32 {
        self.element(element).map_or(0.0, |node| node.size.get(axis))
    }

    fn set_size(&mut self, element: ElementId, size: Vec2) {
        if let Some(node) = self.node_mut(element) {
            node.size = size;
        }
    }

    fn force_layout(&mut self, element: ElementId) {
        if let Some(node) = self.node_mut(element) {
            node.layout_passes += 1;
        }
    }

    fn place(&mut self, element: ElementId, axis: Axis, offset: f32, size: f32) {
        if let Some(node) = self.node_mut(element) {
            node.placed = node.placed.with_axis(axis, offset, size);
        }
    }

    fn set_scroll_position(&mut self, position: Vec2) {
        self.scroll_position = Some(position);
    }
}
