//! Static page rendering.
//!
//! This crate turns an immutable [`docpage_mdx::PageContent`] into a markup
//! tree and serializes it to a deterministic HTML fragment, honoring
//! per-element component overrides.

pub mod components;
pub mod markup;
pub mod renderer;

pub use components::{ComponentError, ComponentMap, ComponentOverride, ElementName};
pub use markup::{Attribute, Element, Markup};
pub use renderer::{Props, RenderedPage, StaticPageRenderer};
