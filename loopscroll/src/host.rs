use core::fmt::{Debug, Display};

use crate::key::MapKey;
use crate::{Axis, ChildSizes, Vec2};

/// The primitives a UI framework provides to the scroll view.
///
/// The scroll view never holds UI objects itself: it only holds `Element` handles and asks the
/// host to create, measure, move and recycle them. An adapter implements this trait on top of
/// its scene graph (or, for tests, in memory; see `loopscroll-adapter`).
///
/// Handles must be cheap to copy and stable for the element's lifetime.
pub trait Host {
    /// Handle to one instantiated visual element.
    type Element: Copy + Debug + MapKey;
    /// Identity of the prototype an element is instantiated from.
    type Template: Clone + Debug + MapKey;
    /// Error reported when an element cannot be instantiated.
    type Error: Display;

    /// Instantiates a new element from `template`.
    ///
    /// The new element starts parented to the content container.
    fn create_element(&mut self, template: &Self::Template) -> Result<Self::Element, Self::Error>;

    /// Destroys an element. Only called on pool teardown.
    fn destroy_element(&mut self, element: Self::Element);

    /// Destroys the inert container idle elements are parked under.
    fn release_pool_container(&mut self) {}

    /// Activates `element` and parents it to the content container.
    fn attach(&mut self, element: Self::Element);

    /// Deactivates `element` and parents it to the pool container.
    fn detach(&mut self, element: Self::Element);

    /// Measures `element`'s subtree along `axis`.
    fn measure(&mut self, element: Self::Element, axis: Axis) -> ChildSizes;

    /// The element's own (unmanaged) size along `axis`.
    fn fixed_size(&self, element: Self::Element, axis: Axis) -> f32;

    /// Resizes `element` before it is measured.
    fn set_size(&mut self, element: Self::Element, size: Vec2);

    /// Recomputes the element's internal layout after its content or size changed.
    fn force_layout(&mut self, element: Self::Element);

    /// Positions `element` inside the content container along `axis`.
    fn place(&mut self, element: Self::Element, axis: Axis, offset: f32, size: f32);

    /// Applies a normalized scroll position to the host's scroll container.
    ///
    /// The scroll view reconciles itself right after calling this; implementations must not
    /// echo the change back through `ScrollView::on_scroll`.
    fn set_scroll_position(&mut self, position: Vec2);
}
