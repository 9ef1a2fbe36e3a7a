use crate::tween::Easing;
use crate::{Alignment, Axis, ContentFit, Direction, Padding, Vec2};

/// Default length of a smooth scroll-to-index, in milliseconds.
pub const DEFAULT_SMOOTH_SCROLL_MS: u64 = 100;

/// Configuration for the linear (horizontal or vertical) layout.
///
/// Per-axis settings are indexed by [`Axis::index`] (`[horizontal, vertical]`).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutOptions {
    pub direction: Direction,
    pub padding: Padding,
    /// Space between consecutive items along the stacking axis.
    pub spacing: f32,
    pub child_alignment: Alignment,
    /// Whether the layout sizes children from their measured sizes (`true`) or leaves them at
    /// their own fixed size (`false`).
    pub control_child_size: [bool; 2],
    /// Whether every child gets at least a flexible weight of 1.
    pub child_force_expand: [bool; 2],
    /// How the content container is sized after measuring.
    pub content_fit: [ContentFit; 2],
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self::vertical()
    }
}

impl LayoutOptions {
    /// A vertical list: content height follows the preferred height, width follows the viewport.
    pub fn vertical() -> Self {
        Self {
            direction: Direction::Vertical,
            padding: Padding::default(),
            spacing: 0.0,
            child_alignment: Alignment::UpperLeft,
            control_child_size: [false, false],
            child_force_expand: [false, false],
            content_fit: [ContentFit::Unconstrained, ContentFit::PreferredSize],
        }
    }

    /// A horizontal list: content width follows the preferred width, height follows the viewport.
    pub fn horizontal() -> Self {
        Self {
            direction: Direction::Horizontal,
            content_fit: [ContentFit::PreferredSize, ContentFit::Unconstrained],
            ..Self::vertical()
        }
    }

    pub fn stacking_axis(&self) -> Axis {
        self.direction.axis()
    }

    pub fn control_size(&self, axis: Axis) -> bool {
        self.control_child_size[axis.index()]
    }

    pub fn force_expand(&self, axis: Axis) -> bool {
        self.child_force_expand[axis.index()]
    }

    pub fn fit(&self, axis: Axis) -> ContentFit {
        self.content_fit[axis.index()]
    }

    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_child_alignment(mut self, alignment: Alignment) -> Self {
        self.child_alignment = alignment;
        self
    }

    pub fn with_control_child_size(mut self, width: bool, height: bool) -> Self {
        self.control_child_size = [width, height];
        self
    }

    pub fn with_child_force_expand(mut self, width: bool, height: bool) -> Self {
        self.child_force_expand = [width, height];
        self
    }

    pub fn with_content_fit(mut self, width: ContentFit, height: ContentFit) -> Self {
        self.content_fit = [width, height];
        self
    }
}

/// Configuration for [`crate::ScrollView`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollViewOptions<Tmpl> {
    /// Template used whenever a source's selector returns `None` (or there is no selector).
    pub default_template: Option<Tmpl>,
    pub layout: LayoutOptions,
    /// Size of the visible window onto the content.
    pub viewport_size: Vec2,
    pub smooth_scroll_duration_ms: u64,
    pub easing: Easing,
}

impl<Tmpl> ScrollViewOptions<Tmpl> {
    pub fn new(viewport_size: Vec2) -> Self {
        Self {
            default_template: None,
            layout: LayoutOptions::default(),
            viewport_size,
            smooth_scroll_duration_ms: DEFAULT_SMOOTH_SCROLL_MS,
            easing: Easing::Linear,
        }
    }

    pub fn with_default_template(mut self, template: Tmpl) -> Self {
        self.default_template = Some(template);
        self
    }

    pub fn with_layout(mut self, layout: LayoutOptions) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_smooth_scroll_duration_ms(mut self, duration_ms: u64) -> Self {
        self.smooth_scroll_duration_ms = duration_ms;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
}
