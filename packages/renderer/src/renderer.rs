//! # Renderer
//!
//! Pure function from a content tree to a virtual DOM. The same tree and
//! mode always produce the same output: no I/O, no randomness.
//!
//! Both render paths share the layout resolution in [`crate::layout`];
//! editing mode only adds affordances on top (empty-column and spacer
//! placeholders, inert form submits).

use pagegrid_content::{
    Column, ContentTree, Element, ElementPayload, ElementStyle, FieldType, FormField, LinkTarget,
    NestedColumn, Section, Spacing, TextAlign,
};
use tracing::debug;

use crate::layout::{
    resolve_background, resolve_container_padding, resolve_spans, span_classes, video_embed_url,
};
use crate::vdom::{VDocument, VNode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Editing,
    Published,
}

impl RenderMode {
    fn is_editing(&self) -> bool {
        matches!(self, RenderMode::Editing)
    }
}

/// Render a tree to a virtual document, one root node per section
pub fn render(tree: &ContentTree, mode: RenderMode) -> VDocument {
    let mut document = VDocument::new();
    for section in &tree.sections {
        document.add_node(render_section(section, mode));
    }
    document
}

fn render_section(section: &Section, mode: RenderMode) -> VNode {
    let padding = resolve_container_padding(&section.style.container);
    let mut node = VNode::element("section")
        .with_source_id(&section.id)
        .with_style("background", resolve_background(&section.style))
        .with_style("padding-top", format!("{}px", padding.top))
        .with_style("padding-bottom", format!("{}px", padding.bottom))
        .with_style("padding-left", format!("{}px", padding.left))
        .with_style("padding-right", format!("{}px", padding.right));

    let mut row = VNode::element("div").with_attr("class", "row");
    for column in &section.columns {
        row = row.with_child(render_column(column, mode));
    }

    match section.style.container.max_width {
        Some(max_width) => {
            let container = VNode::element("div")
                .with_attr("class", "container")
                .with_style("max-width", format!("{}px", max_width))
                .with_style("margin-left", "auto")
                .with_style("margin-right", "auto")
                .with_child(row);
            node = node.with_child(container);
        }
        None => {
            node = node.with_child(row);
        }
    }
    node
}

fn render_column(column: &Column, mode: RenderMode) -> VNode {
    let spans = resolve_spans(column);
    let mut node = VNode::element("div")
        .with_source_id(&column.id)
        .with_attr("class", span_classes(spans));
    node = apply_spacing(node, &column.spacing);
    if column.card {
        node = apply_card(node);
    }

    for element in &column.elements {
        if let Some(child) = render_element(element, mode) {
            node = node.with_child(child);
        }
    }

    if !column.nested.is_empty() {
        let mut nested_row = VNode::element("div").with_attr("class", "row row-nested");
        for nested in &column.nested {
            nested_row = nested_row.with_child(render_nested_column(nested, mode));
        }
        node = node.with_child(nested_row);
    } else if column.elements.is_empty() && mode.is_editing() {
        node = node.with_child(empty_placeholder("Empty column"));
    }

    node
}

fn render_nested_column(nested: &NestedColumn, mode: RenderMode) -> VNode {
    // Nested columns carry one width for all breakpoints
    let mut node = VNode::element("div")
        .with_source_id(&nested.id)
        .with_attr("class", format!("col-{}", nested.width));
    node = apply_spacing(node, &nested.spacing);
    if nested.card {
        node = apply_card(node);
    }

    for element in &nested.elements {
        if let Some(child) = render_element(element, mode) {
            node = node.with_child(child);
        }
    }
    if nested.elements.is_empty() && mode.is_editing() {
        node = node.with_child(empty_placeholder("Empty column"));
    }
    node
}

fn render_element(element: &Element, mode: RenderMode) -> Option<VNode> {
    let node = match &element.payload {
        ElementPayload::Heading { content, level } => apply_typography(
            VNode::element(format!("h{}", level)).with_child(VNode::text(content)),
            &element.style,
        )
        .with_source_id(&element.id),

        ElementPayload::Text { content } => apply_typography(
            VNode::element("p")
                // Literal newlines are preserved, not collapsed
                .with_style("white-space", "pre-line")
                .with_child(VNode::text(content)),
            &element.style,
        )
        .with_source_id(&element.id),

        ElementPayload::Image { src, alt } => apply_spacing(
            VNode::element("img")
                .with_attr("src", src)
                .with_attr("alt", alt)
                .with_style("max-width", "100%"),
            &element.style.spacing,
        )
        .with_source_id(&element.id),

        ElementPayload::Button { text, link, target } => {
            let mut node = VNode::element("a")
                .with_attr("class", "btn")
                .with_attr("href", link)
                .with_child(VNode::text(text));
            if *target == LinkTarget::NewTab {
                node = node
                    .with_attr("target", "_blank")
                    .with_attr("rel", "noopener");
            }
            apply_typography(node, &element.style).with_source_id(&element.id)
        }

        ElementPayload::Video { url, provider } => {
            let iframe = VNode::element("iframe")
                .with_attr("src", video_embed_url(*provider, url))
                .with_attr("allowfullscreen", "")
                .with_style("width", "100%")
                .with_style("height", "100%");
            apply_spacing(
                VNode::element("div")
                    .with_attr("class", "video-embed")
                    .with_style("aspect-ratio", "16 / 9")
                    .with_child(iframe),
                &element.style.spacing,
            )
            .with_source_id(&element.id)
        }

        ElementPayload::Form { fields, submit_text } => {
            let mut form = VNode::element("form");
            for field in fields {
                form = form.with_child(render_form_field(field));
            }
            // Submit is inert while editing
            let submit = VNode::element("button")
                .with_attr(
                    "type",
                    if mode.is_editing() { "button" } else { "submit" },
                )
                .with_child(VNode::text(submit_text));
            apply_spacing(form.with_child(submit), &element.style.spacing)
                .with_source_id(&element.id)
        }

        ElementPayload::Spacer { height } => {
            // Spacers take layout-affecting style only, no typography
            let mut node = VNode::element("div").with_style("height", height);
            if mode.is_editing() {
                node = node
                    .with_attr("class", "spacer-placeholder")
                    .with_style("border", "1px dashed #cbd5e1");
            }
            apply_spacing(node, &element.style.spacing).with_source_id(&element.id)
        }

        // Preserved in the tree for round-tripping, but has no markup here
        ElementPayload::Unknown(_) => {
            debug!(element_id = %element.id, "skipping element of unrecognized type");
            return None;
        }
    };
    Some(node)
}

fn render_form_field(field: &FormField) -> VNode {
    let mut wrapper = VNode::element("div").with_attr("class", "form-field");

    let label_text = if field.required {
        format!("{} *", field.label)
    } else {
        field.label.clone()
    };

    match field.field_type {
        FieldType::Checkbox => {
            let mut input = VNode::element("input")
                .with_attr("type", "checkbox")
                .with_attr("name", &field.id);
            if field.required {
                input = input.with_attr("required", "");
            }
            let label = VNode::element("label")
                .with_child(input)
                .with_child(VNode::text(label_text));
            wrapper = wrapper.with_child(label);
        }
        FieldType::Textarea => {
            let mut input = VNode::element("textarea").with_attr("name", &field.id);
            if let Some(placeholder) = &field.placeholder {
                input = input.with_attr("placeholder", placeholder);
            }
            if field.required {
                input = input.with_attr("required", "");
            }
            wrapper = wrapper
                .with_child(VNode::element("label").with_child(VNode::text(label_text)))
                .with_child(input);
        }
        FieldType::Select => {
            let mut select = VNode::element("select").with_attr("name", &field.id);
            if field.required {
                select = select.with_attr("required", "");
            }
            for option in field.options.as_deref().unwrap_or_default() {
                select = select.with_child(
                    VNode::element("option")
                        .with_attr("value", option)
                        .with_child(VNode::text(option)),
                );
            }
            wrapper = wrapper
                .with_child(VNode::element("label").with_child(VNode::text(label_text)))
                .with_child(select);
        }
        FieldType::Text | FieldType::Email | FieldType::Tel => {
            let input_type = match field.field_type {
                FieldType::Email => "email",
                FieldType::Tel => "tel",
                _ => "text",
            };
            let mut input = VNode::element("input")
                .with_attr("type", input_type)
                .with_attr("name", &field.id);
            if let Some(placeholder) = &field.placeholder {
                input = input.with_attr("placeholder", placeholder);
            }
            if field.required {
                input = input.with_attr("required", "");
            }
            wrapper = wrapper
                .with_child(VNode::element("label").with_child(VNode::text(label_text)))
                .with_child(input);
        }
    }

    wrapper
}

fn empty_placeholder(message: &str) -> VNode {
    VNode::element("div")
        .with_attr("class", "empty-placeholder")
        .with_style("border", "1px dashed #cbd5e1")
        .with_style("color", "#94a3b8")
        .with_child(VNode::text(message))
}

fn apply_card(node: VNode) -> VNode {
    node.with_style("background", "#ffffff")
        .with_style("border", "1px solid #e2e8f0")
        .with_style("border-radius", "8px")
        .with_style("box-shadow", "0 1px 3px rgba(0, 0, 0, 0.1)")
}

fn apply_typography(node: VNode, style: &ElementStyle) -> VNode {
    let mut node = node;
    if let Some(color) = &style.color {
        node = node.with_style("color", color);
    }
    if let Some(size) = style.font_size {
        node = node.with_style("font-size", format!("{}px", size));
    }
    if let Some(align) = style.align {
        let value = match align {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        };
        node = node.with_style("text-align", value);
    }
    if let Some(line_height) = style.line_height {
        node = node.with_style("line-height", format!("{}", line_height));
    }
    if let Some(letter_spacing) = style.letter_spacing {
        node = node.with_style("letter-spacing", format!("{}px", letter_spacing));
    }
    apply_spacing(node, &style.spacing)
}

fn apply_spacing(node: VNode, spacing: &Spacing) -> VNode {
    let mut node = node;
    for (key, value) in [
        ("margin-top", spacing.margin_top),
        ("margin-bottom", spacing.margin_bottom),
        ("margin-left", spacing.margin_left),
        ("margin-right", spacing.margin_right),
        ("padding-top", spacing.padding_top),
        ("padding-bottom", spacing.padding_bottom),
        ("padding-left", spacing.padding_left),
        ("padding-right", spacing.padding_right),
    ] {
        if let Some(v) = value {
            node = node.with_style(key, format!("{}px", v));
        }
    }
    node
}
