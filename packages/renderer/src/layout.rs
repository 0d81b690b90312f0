//! # Layout Resolution
//!
//! The pure layout decisions shared by the editing and published render
//! paths: background composition, container padding, per-breakpoint
//! column spans, and video embed URLs. Nothing here touches the VDOM.

use pagegrid_content::{Background, Column, ContainerConfig, SectionStyle, VideoProvider};
use tracing::warn;

const DEFAULT_VERTICAL_PADDING: u32 = 32;
const DEFAULT_HORIZONTAL_PADDING: u32 = 16;

/// Resolved 12-unit spans for one column at each breakpoint
///
/// The inheritance chain is desktop → tablet → mobile: an unset override
/// takes the value of the breakpoint above it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpans {
    pub desktop: u8,
    pub tablet: u8,
    pub mobile: u8,
}

impl ColumnSpans {
    /// Whether a tablet-specific rule is needed on top of the mobile base
    pub fn tablet_rule_needed(&self) -> bool {
        self.tablet != self.mobile
    }

    /// Whether a desktop-specific rule is needed on top of tablet
    pub fn desktop_rule_needed(&self) -> bool {
        self.desktop != self.tablet
    }
}

pub fn resolve_spans(column: &Column) -> ColumnSpans {
    let desktop = column.width;
    let tablet = column.width_tablet.unwrap_or(desktop);
    let mobile = column.width_mobile.unwrap_or(tablet);
    ColumnSpans {
        desktop,
        tablet,
        mobile,
    }
}

/// Mobile-first grid classes for a column
///
/// Emits a breakpoint class only where the resolved span differs from the
/// breakpoint beneath it.
pub fn span_classes(spans: ColumnSpans) -> String {
    let mut classes = format!("col-{}", spans.mobile);
    if spans.tablet_rule_needed() {
        classes.push_str(&format!(" col-md-{}", spans.tablet));
    }
    if spans.desktop_rule_needed() {
        classes.push_str(&format!(" col-lg-{}", spans.desktop));
    }
    classes
}

/// CSS background value for a section
pub fn resolve_background(style: &SectionStyle) -> String {
    match &style.background {
        Background::Gradient { color1, color2, angle } => {
            format!("linear-gradient({}deg, {}, {})", angle, color1, color2)
        }
        Background::Solid { color } => color.clone().unwrap_or_else(|| "#ffffff".to_string()),
    }
}

/// Resolved per-edge container padding, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerPadding {
    pub top: u32,
    pub bottom: u32,
    pub left: u32,
    pub right: u32,
}

/// Explicit per-edge values win over the vertical/horizontal fallbacks,
/// which win over the fixed defaults (32px vertical, 16px horizontal).
pub fn resolve_container_padding(container: &ContainerConfig) -> ContainerPadding {
    let vertical = container.vertical_padding.unwrap_or(DEFAULT_VERTICAL_PADDING);
    let horizontal = container
        .horizontal_padding
        .unwrap_or(DEFAULT_HORIZONTAL_PADDING);
    ContainerPadding {
        top: container.padding_top.unwrap_or(vertical),
        bottom: container.padding_bottom.unwrap_or(vertical),
        left: container.padding_left.unwrap_or(horizontal),
        right: container.padding_right.unwrap_or(horizontal),
    }
}

/// Embed URL for a video element
///
/// Unknown or unparseable URLs pass through verbatim; the embed box still
/// renders, it just points at whatever the editor stored.
pub fn video_embed_url(provider: VideoProvider, url: &str) -> String {
    match provider {
        VideoProvider::Youtube => match youtube_video_id(url) {
            Some(id) => format!("https://www.youtube.com/embed/{}", id),
            None => {
                warn!(url, "could not extract youtube video id, embedding url as-is");
                url.to_string()
            }
        },
        VideoProvider::Vimeo => match vimeo_video_id(url) {
            Some(id) => format!("https://player.vimeo.com/video/{}", id),
            None => {
                warn!(url, "could not extract vimeo video id, embedding url as-is");
                url.to_string()
            }
        },
        VideoProvider::Custom => url.to_string(),
    }
}

/// Accepts both `watch?v=<id>` and `youtu.be/<id>` URL forms
fn youtube_video_id(url: &str) -> Option<&str> {
    if let Some(rest) = url.split("watch?v=").nth(1) {
        let id = rest.split(&['&', '#'][..]).next().unwrap_or(rest);
        return (!id.is_empty()).then_some(id);
    }
    if let Some(rest) = url.split("youtu.be/").nth(1) {
        let id = rest.split(&['?', '/', '#'][..]).next().unwrap_or(rest);
        return (!id.is_empty()).then_some(id);
    }
    None
}

fn vimeo_video_id(url: &str) -> Option<&str> {
    let rest = url.split("vimeo.com/").nth(1)?;
    let id = rest.split(&['?', '/', '#'][..]).next().unwrap_or(rest);
    (!id.is_empty() && id.bytes().all(|b| b.is_ascii_digit())).then_some(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagegrid_content::{Column, SequentialIds};

    fn column_with_widths(width: u8, tablet: Option<u8>, mobile: Option<u8>) -> Column {
        let mut ids = SequentialIds::new("layout");
        let mut column = Column::new(width, &mut ids);
        column.width_tablet = tablet;
        column.width_mobile = mobile;
        column
    }

    #[test]
    fn test_breakpoint_fallback_chain() {
        // Only desktop set: tablet and mobile inherit it
        let spans = resolve_spans(&column_with_widths(8, None, None));
        assert_eq!(spans, ColumnSpans { desktop: 8, tablet: 8, mobile: 8 });

        // Mobile override is explicit, tablet still inherits desktop
        let spans = resolve_spans(&column_with_widths(8, None, Some(12)));
        assert_eq!(spans, ColumnSpans { desktop: 8, tablet: 8, mobile: 12 });
    }

    #[test]
    fn test_span_classes_only_emit_differing_breakpoints() {
        assert_eq!(span_classes(resolve_spans(&column_with_widths(8, None, None))), "col-8");
        assert_eq!(
            span_classes(resolve_spans(&column_with_widths(8, None, Some(12)))),
            "col-12 col-md-8"
        );
        assert_eq!(
            span_classes(resolve_spans(&column_with_widths(4, Some(6), Some(12)))),
            "col-12 col-md-6 col-lg-4"
        );
    }

    #[test]
    fn test_gradient_background() {
        let style = SectionStyle {
            background: Background::Gradient {
                color1: "#3b82f6".to_string(),
                color2: "#2f1dbf".to_string(),
                angle: 90,
            },
            ..Default::default()
        };
        assert_eq!(
            resolve_background(&style),
            "linear-gradient(90deg, #3b82f6, #2f1dbf)"
        );
    }

    #[test]
    fn test_background_defaults_to_white() {
        assert_eq!(resolve_background(&SectionStyle::default()), "#ffffff");
    }

    #[test]
    fn test_container_padding_priorities() {
        // Nothing set: fixed defaults
        let padding = resolve_container_padding(&ContainerConfig::default());
        assert_eq!(padding, ContainerPadding { top: 32, bottom: 32, left: 16, right: 16 });

        // Vertical fallback applies to both edges unless overridden
        let config = ContainerConfig {
            vertical_padding: Some(64),
            padding_top: Some(8),
            ..Default::default()
        };
        let padding = resolve_container_padding(&config);
        assert_eq!(padding.top, 8);
        assert_eq!(padding.bottom, 64);
        assert_eq!(padding.left, 16);
    }

    #[test]
    fn test_video_embed_extraction() {
        assert_eq!(
            video_embed_url(VideoProvider::Youtube, "https://youtu.be/dQw4w9WgXcQ"),
            "https://www.youtube.com/embed/dQw4w9WgXcQ"
        );
        assert_eq!(
            video_embed_url(
                VideoProvider::Youtube,
                "https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42"
            ),
            "https://www.youtube.com/embed/dQw4w9WgXcQ"
        );
        assert_eq!(
            video_embed_url(VideoProvider::Vimeo, "https://vimeo.com/12345"),
            "https://player.vimeo.com/video/12345"
        );
        assert_eq!(
            video_embed_url(VideoProvider::Custom, "https://example.com/clip.mp4"),
            "https://example.com/clip.mp4"
        );
        // Unparseable URLs pass through
        assert_eq!(
            video_embed_url(VideoProvider::Youtube, "https://example.com/other"),
            "https://example.com/other"
        );
    }
}
