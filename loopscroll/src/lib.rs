//! A headless recycling scroll view.
//!
//! `loopscroll` renders a long list inside a fixed-size viewport while only keeping elements
//! alive for the items that overlap it. Elements are recycled through a per-template object pool,
//! so once the pool has warmed up, scrolling does not allocate.
//!
//! The crate is UI-agnostic. A GUI layer implements [`Host`] to provide:
//! - element instantiation and recycling (attach/detach/destroy)
//! - measurement of an element's min/preferred/flexible size
//! - placement of an element inside the content container
//!
//! and pushes viewport size, scroll changes, drag starts and frame ticks into [`ScrollView`].
//!
//! Layout is a single-pass linear (vertical or horizontal) flex layout: items are measured once
//! per data change, the resolved geometry is stored per item, and every scroll event only diffs
//! the set of items overlapping the viewport against the set currently rendered.
//!
//! For a reference in-memory host and scroll anchoring, see the `loopscroll-adapter` crate.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod cell;
mod error;
mod host;
mod key;
mod layout;
mod options;
mod pool;
mod sizing;
mod source;
mod tween;
mod types;
mod view;


pub use cell::CellRecord;
pub use error::{Error, Result, SourceKind};
pub use host::Host;
pub use layout::{LayoutEngine, LayoutOutput};
pub use options::{DEFAULT_SMOOTH_SCROLL_MS, LayoutOptions, ScrollViewOptions};
pub use pool::{ElementState, ObjectPool, PoolStats};
pub use sizing::child_sizes;
pub use source::{
    CellSource, IndexRefreshFn, IndexSource, IndexTemplateFn, InitFn, PayloadRefreshFn,
    PayloadSource, PayloadTemplateFn, Source,
};
pub use tween::{Easing, SmoothScroll, Step, Tween};
pub use types::{
    Alignment, Axis, AxisTotals, ChildSizes, ContentFit, Direction, Padding, Rect, Vec2,
};
pub use view::ScrollView;

#[doc(hidden)]
pub use key::MapKey;
