//! Adapter utilities for the `loopscroll` crate.
//!
//! The `loopscroll` crate is UI-agnostic and talks to a UI framework only through its `Host`
//! trait. This crate provides small, framework-neutral helpers commonly needed by adapters:
//!
//! - [`MemoryHost`], an in-memory host that doubles as a reference implementation
//! - Scroll anchoring (e.g. prepend in chat/timelines without visual jumps)
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod anchor;
mod memory_host;

#[cfg(test)]
mod tests;

pub use anchor::{
    ScrollAnchor, apply_anchor, capture_anchor_for_index, capture_first_visible_anchor,
};
pub use memory_host::{
    ElementId, ElementNode, HostError, MeasureFn, MemoryHost, Parent, TemplateId, TemplateSpec,
};
