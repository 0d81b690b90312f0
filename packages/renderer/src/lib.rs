//! # Pagegrid Renderer
//!
//! Turns a content tree plus its styling configuration into the laid-out
//! document a viewer sees. `render` is pure: the editing and published
//! paths share one layout-resolution algorithm and differ only in the
//! affordances editing mode overlays (placeholders, inert submits).

pub mod html;
pub mod layout;
pub mod renderer;
pub mod vdom;

pub use html::to_html;
pub use layout::{
    resolve_background, resolve_container_padding, resolve_spans, span_classes, video_embed_url,
    ColumnSpans, ContainerPadding,
};
pub use renderer::{render, RenderMode};
pub use vdom::{VDocument, VNode};
