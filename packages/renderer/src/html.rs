//! HTML emission for the published render path.

use crate::vdom::{VDocument, VNode};

/// Serialize a rendered document to an HTML string
pub fn to_html(document: &VDocument) -> String {
    let mut out = String::new();
    for node in &document.nodes {
        write_node(&mut out, node);
    }
    out
}

fn write_node(out: &mut String, node: &VNode) {
    match node {
        VNode::Text { content } => out.push_str(&escape_text(content)),
        VNode::Element {
            tag,
            attributes,
            styles,
            children,
            source_id: _,
        } => {
            out.push('<');
            out.push_str(tag);
            for (key, value) in attributes {
                out.push(' ');
                out.push_str(key);
                if !value.is_empty() {
                    out.push_str("=\"");
                    out.push_str(&escape_attr(value));
                    out.push('"');
                }
            }
            if !styles.is_empty() {
                out.push_str(" style=\"");
                let mut first = true;
                for (key, value) in styles {
                    if !first {
                        out.push_str("; ");
                    }
                    out.push_str(key);
                    out.push_str(": ");
                    out.push_str(&escape_attr(value));
                    first = false;
                }
                out.push('"');
            }
            if is_void_element(tag) {
                out.push_str(" />");
                return;
            }
            out.push('>');
            for child in children {
                write_node(out, child);
            }
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
    }
}

fn is_void_element(tag: &str) -> bool {
    matches!(tag, "img" | "input" | "br" | "hr" | "meta" | "link")
}

fn escape_text(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_with_attrs_and_styles() {
        let node = VNode::element("a")
            .with_attr("href", "https://example.com?a=1&b=2")
            .with_style("color", "#fff")
            .with_child(VNode::text("Click <here>"));
        let mut out = String::new();
        write_node(&mut out, &node);
        assert_eq!(
            out,
            "<a href=\"https://example.com?a=1&amp;b=2\" style=\"color: #fff\">Click &lt;here&gt;</a>"
        );
    }

    #[test]
    fn test_void_and_boolean_attributes() {
        let node = VNode::element("input")
            .with_attr("type", "email")
            .with_attr("required", "");
        let mut out = String::new();
        write_node(&mut out, &node);
        assert_eq!(out, "<input required type=\"email\" />");
    }
}
