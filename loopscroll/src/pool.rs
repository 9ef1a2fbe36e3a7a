use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::string::ToString;

use crate::key::Map;
use crate::source::InitFn;
use crate::{Error, Host, Result};

/// Lifecycle state of an element the pool created.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ElementState {
    /// Parked in the pool container, inactive, waiting for reuse.
    Idle,
    /// Attached to the content container and owned by a caller.
    Active,
}

/// Per-template element counts. `created == idle + active` always holds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolStats {
    pub created: usize,
    pub idle: usize,
    pub active: usize,
}

#[derive(Clone, Debug)]
struct Slot<T> {
    template: T,
    state: ElementState,
}

/// Recycles elements by template.
///
/// Elements are created lazily the first time a template has no idle instance and are only
/// destroyed by [`ObjectPool::clear_pool`]. Once every template has enough instances for the
/// viewport, `get_object`/`return_object` never create anything.
pub struct ObjectPool<H: Host> {
    idle: Map<H::Template, VecDeque<H::Element>>,
    slots: Map<H::Element, Slot<H::Template>>,
    created: Map<H::Template, usize>,
    default_template: Option<H::Template>,
    init: Option<InitFn<H>>,
    cleared: bool,
}

impl<H: Host> Default for ObjectPool<H> {
    fn default() -> Self {
        Self::new(None)
    }
}

impl<H: Host> ObjectPool<H> {
    pub fn new(default_template: Option<H::Template>) -> Self {
        Self {
            idle: Map::new(),
            slots: Map::new(),
            created: Map::new(),
            default_template,
            init: None,
            cleared: false,
        }
    }

    pub fn default_template(&self) -> Option<&H::Template> {
        self.default_template.as_ref()
    }

    pub fn set_default_template(&mut self, template: Option<H::Template>) {
        self.default_template = template;
    }

    /// Sets the callback run once for every newly created element.
    pub fn set_init_callback(&mut self, init: Option<impl FnMut(&mut H, H::Element) + 'static>) {
        self.init = init.map(|f| Box::new(f) as InitFn<H>);
    }

    pub(crate) fn set_init_boxed(&mut self, init: Option<InitFn<H>>) {
        self.init = init;
    }

    /// Hands out an active element for `template` (or the default template when `None`).
    ///
    /// An idle element of that template is reused when one exists; otherwise a new one is
    /// created and initialized.
    pub fn get_object(&mut self, host: &mut H, template: Option<H::Template>) -> Result<H::Element> {
        if self.cleared {
            return Err(Error::PoolCleared);
        }
        let Some(template) = template.or_else(|| self.default_template.clone()) else {
            lswarn!("ObjectPool::get_object: no template and no default template");
            return Err(Error::NoTemplate);
        };

        let reused = self
            .idle
            .get_mut(&template)
            .and_then(|queue| queue.pop_front());
        let element = match reused {
            Some(element) => element,
            None => self.create(host, &template)?,
        };

        if let Some(slot) = self.slots.get_mut(&element) {
            slot.state = ElementState::Active;
        }
        host.attach(element);
        Ok(element)
    }

    fn create(&mut self, host: &mut H, template: &H::Template) -> Result<H::Element> {
        let element = host.create_element(template).map_err(|err| {
            lswarn!(?template, error = %err, "ObjectPool: element creation failed");
            Error::CreateFailed(err.to_string())
        })?;
        lsdebug!(?template, ?element, "ObjectPool: created element");

        self.slots.insert(
            element,
            Slot {
                template: template.clone(),
                state: ElementState::Idle,
            },
        );
        *self.created.entry(template.clone()).or_insert(0) += 1;
        if !self.idle.contains_key(template) {
            self.idle.insert(template.clone(), VecDeque::new());
        }

        if let Some(init) = self.init.as_mut() {
            init(host, element);
        }
        Ok(element)
    }

    /// Takes back an active element, deactivates it and queues it for reuse.
    ///
    /// Returning an element this pool never created, or one that is already idle, is reported
    /// as an error and changes nothing.
    pub fn return_object(&mut self, host: &mut H, element: H::Element) -> Result<()> {
        if self.cleared {
            return Err(Error::PoolCleared);
        }
        let Some(slot) = self.slots.get_mut(&element) else {
            lswarn!(?element, "ObjectPool::return_object: element not created by this pool");
            return Err(Error::UnknownElement);
        };
        if slot.state == ElementState::Idle {
            lswarn!(?element, "ObjectPool::return_object: element is already idle");
            return Err(Error::AlreadyIdle);
        }

        slot.state = ElementState::Idle;
        host.detach(element);
        match self.idle.get_mut(&slot.template) {
            Some(queue) => queue.push_back(element),
            None => {
                let mut queue = VecDeque::new();
                queue.push_back(element);
                self.idle.insert(slot.template.clone(), queue);
            }
        }
        Ok(())
    }

    /// Destroys every element this pool created plus the pool container.
    ///
    /// Later calls are no-ops; `get_object`/`return_object` fail with [`Error::PoolCleared`].
    pub fn clear_pool(&mut self, host: &mut H) {
        if self.cleared {
            return;
        }
        lsdebug!(elements = self.slots.len(), "ObjectPool::clear_pool");
        for element in self.slots.keys() {
            host.destroy_element(*element);
        }
        host.release_pool_container();

        self.slots.clear();
        self.idle.clear();
        self.created.clear();
        self.init = None;
        self.cleared = true;
    }

    pub fn is_cleared(&self) -> bool {
        self.cleared
    }

    pub fn state(&self, element: H::Element) -> Option<ElementState> {
        self.slots.get(&element).map(|slot| slot.state)
    }

    pub fn is_active(&self, element: H::Element) -> bool {
        self.state(element) == Some(ElementState::Active)
    }

    /// The template `element` was created from.
    pub fn template_of(&self, element: H::Element) -> Option<&H::Template> {
        self.slots.get(&element).map(|slot| &slot.template)
    }

    /// Every template this pool has instantiated.
    pub fn templates(&self) -> impl Iterator<Item = &H::Template> + '_ {
        self.created.keys()
    }

    /// Total number of live elements across all templates.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn stats(&self, template: &H::Template) -> PoolStats {
        let created = self.created.get(template).copied().unwrap_or(0);
        let idle = self.idle.get(template).map_or(0, VecDeque::len);
        let active = self
            .slots
            .values()
            .filter(|slot| slot.state == ElementState::Active && slot.template == *template)
            .count();
        PoolStats {
            created,
            idle,
            active,
        }
    }
}

impl<H: Host> core::fmt::Debug for ObjectPool<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ObjectPool")
            .field("elements", &self.slots.len())
            .field("templates", &self.created.len())
            .field("default_template", &self.default_template)
            .field("cleared", &self.cleared)
            .finish_non_exhaustive()
    }
}
