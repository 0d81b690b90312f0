//! Serialization boundary with the page-storage collaborator.
//!
//! Two persisted shapes are accepted on load:
//! - the current `sections[]` shape (round-trips losslessly)
//! - the legacy `rows[]` shape: no responsive widths, no nesting; mapped to
//!   sections with the single stored width and read only when `sections`
//!   is absent
//!
//! Save always emits the `sections[]` shape. Malformed content degrades
//! node-by-node (defaults substituted); elements of unrecognized types are
//! carried through verbatim so a load/save cycle never loses them. Only
//! unparseable JSON is an error.

use serde_json::{json, Map, Value};
use tracing::warn;

use crate::error::ContentError;
use crate::id::{IdSource, UuidIds};
use crate::model::*;

/// Parse persisted page content into a [`ContentTree`]
pub fn load_tree(source: &str) -> Result<ContentTree, ContentError> {
    let value: Value = serde_json::from_str(source)?;
    Ok(load_tree_value(&value))
}

/// Build a [`ContentTree`] from an already-parsed JSON value
pub fn load_tree_value(value: &Value) -> ContentTree {
    let mut ids = UuidIds;
    let obj = match value.as_object() {
        Some(obj) => obj,
        None => {
            warn!("persisted content is not an object, loading empty tree");
            return ContentTree::new();
        }
    };

    if let Some(sections) = obj.get("sections").and_then(Value::as_array) {
        return ContentTree {
            sections: sections
                .iter()
                .map(|s| load_section(s, &mut ids))
                .collect(),
        };
    }

    // Legacy shape: rows without responsive widths or nesting
    if let Some(rows) = obj.get("rows").and_then(Value::as_array) {
        return ContentTree {
            sections: rows.iter().map(|r| load_legacy_row(r, &mut ids)).collect(),
        };
    }

    warn!("persisted content has neither sections nor rows, loading empty tree");
    ContentTree::new()
}

/// Serialize a [`ContentTree`] to the current persisted shape
pub fn save_tree(tree: &ContentTree) -> Value {
    json!({
        "sections": tree.sections.iter().map(save_section).collect::<Vec<_>>(),
    })
}

fn load_section(value: &Value, ids: &mut dyn IdSource) -> Section {
    let obj = as_object_or_empty(value);
    Section {
        id: load_id(obj, ids),
        columns: obj
            .get("columns")
            .and_then(Value::as_array)
            .map(|cols| cols.iter().map(|c| load_column(c, ids)).collect())
            .unwrap_or_default(),
        style: SectionStyle {
            background: load_background(obj.get("background_config")),
            container: load_container(obj.get("container_config")),
        },
    }
}

fn load_legacy_row(value: &Value, ids: &mut dyn IdSource) -> Section {
    let obj = as_object_or_empty(value);
    let columns = obj
        .get("columns")
        .and_then(Value::as_array)
        .map(|cols| {
            cols.iter()
                .map(|c| {
                    let mut column = load_column(c, ids);
                    // Legacy columns carry one width and never nest
                    column.width_tablet = None;
                    column.width_mobile = None;
                    column.nested.clear();
                    column
                })
                .collect()
        })
        .unwrap_or_default();

    Section {
        id: load_id(obj, ids),
        columns,
        style: SectionStyle::default(),
    }
}

fn load_background(value: Option<&Value>) -> Background {
    let obj = match value.and_then(Value::as_object) {
        Some(obj) => obj,
        None => return Background::default(),
    };
    match obj.get("type").and_then(Value::as_str) {
        Some("gradient") => {
            let gradient = obj
                .get("gradient")
                .and_then(Value::as_object)
                .cloned()
                .unwrap_or_default();
            Background::Gradient {
                color1: str_field(&gradient, "color1").unwrap_or_else(|| "#ffffff".to_string()),
                color2: str_field(&gradient, "color2").unwrap_or_else(|| "#ffffff".to_string()),
                angle: gradient.get("angle").and_then(Value::as_i64).unwrap_or(180) as i32,
            }
        }
        _ => Background::Solid {
            color: str_field(obj, "color"),
        },
    }
}

fn load_container(value: Option<&Value>) -> ContainerConfig {
    let obj = match value.and_then(Value::as_object) {
        Some(obj) => obj,
        None => return ContainerConfig::default(),
    };
    ContainerConfig {
        max_width: u32_field(obj, "maxWidth"),
        horizontal_padding: u32_field(obj, "horizontalPadding"),
        vertical_padding: u32_field(obj, "verticalPadding"),
        padding_top: u32_field(obj, "paddingTop"),
        padding_bottom: u32_field(obj, "paddingBottom"),
        padding_left: u32_field(obj, "paddingLeft"),
        padding_right: u32_field(obj, "paddingRight"),
    }
}

fn load_column(value: &Value, ids: &mut dyn IdSource) -> Column {
    let obj = as_object_or_empty(value);
    Column {
        id: load_id(obj, ids),
        width: width_field(obj, "width").unwrap_or(12),
        width_tablet: width_field(obj, "widthTablet"),
        width_mobile: width_field(obj, "widthMobile"),
        card: obj.get("card").and_then(Value::as_bool).unwrap_or(false),
        spacing: load_spacing(obj),
        elements: obj
            .get("elements")
            .and_then(Value::as_array)
            .map(|els| els.iter().filter_map(|e| load_element(e, ids)).collect())
            .unwrap_or_default(),
        nested: obj
            .get("columns")
            .and_then(Value::as_array)
            .map(|cols| cols.iter().map(|c| load_nested_column(c, ids)).collect())
            .unwrap_or_default(),
    }
}

fn load_nested_column(value: &Value, ids: &mut dyn IdSource) -> NestedColumn {
    let obj = as_object_or_empty(value);
    // A third nesting level in the input is ignored outright
    NestedColumn {
        id: load_id(obj, ids),
        width: width_field(obj, "width").unwrap_or(12),
        card: obj.get("card").and_then(Value::as_bool).unwrap_or(false),
        spacing: load_spacing(obj),
        elements: obj
            .get("elements")
            .and_then(Value::as_array)
            .map(|els| els.iter().filter_map(|e| load_element(e, ids)).collect())
            .unwrap_or_default(),
    }
}

fn load_spacing(obj: &Map<String, Value>) -> Spacing {
    Spacing {
        margin_top: i32_field(obj, "marginTop"),
        margin_bottom: i32_field(obj, "marginBottom"),
        margin_left: i32_field(obj, "marginLeft"),
        margin_right: i32_field(obj, "marginRight"),
        padding_top: i32_field(obj, "paddingTop"),
        padding_bottom: i32_field(obj, "paddingBottom"),
        padding_left: i32_field(obj, "paddingLeft"),
        padding_right: i32_field(obj, "paddingRight"),
    }
}

fn load_element(value: &Value, ids: &mut dyn IdSource) -> Option<Element> {
    let obj = as_object_or_empty(value);
    let element_type = obj.get("type").and_then(Value::as_str).unwrap_or("");

    let payload = match element_type {
        "heading" => ElementPayload::Heading {
            content: content_field(obj).unwrap_or_else(|| "Heading".to_string()),
            level: obj
                .get("level")
                .and_then(Value::as_u64)
                .map(|l| l.clamp(1, 6) as u8)
                .unwrap_or(2),
        },
        "text" => ElementPayload::Text {
            content: content_field(obj).unwrap_or_default(),
        },
        "image" => ElementPayload::Image {
            src: str_field(obj, "src").unwrap_or_default(),
            alt: str_field(obj, "alt").unwrap_or_default(),
        },
        "button" => ElementPayload::Button {
            text: str_field(obj, "text").unwrap_or_else(|| "Button".to_string()),
            link: str_field(obj, "link").unwrap_or_else(|| "#".to_string()),
            target: match obj.get("target").and_then(Value::as_str) {
                Some("_blank") => LinkTarget::NewTab,
                _ => LinkTarget::SelfTab,
            },
        },
        "video" => ElementPayload::Video {
            url: str_field(obj, "url").unwrap_or_default(),
            provider: match obj.get("provider").and_then(Value::as_str) {
                Some("vimeo") => VideoProvider::Vimeo,
                Some("custom") => VideoProvider::Custom,
                _ => VideoProvider::Youtube,
            },
        },
        "form" => ElementPayload::Form {
            fields: obj
                .get("fields")
                .and_then(Value::as_array)
                .map(|fields| fields.iter().filter_map(load_form_field).collect())
                .unwrap_or_default(),
            submit_text: str_field(obj, "submitText").unwrap_or_else(|| "Submit".to_string()),
        },
        "spacer" => ElementPayload::Spacer {
            height: str_field(obj, "height").unwrap_or_else(|| "40px".to_string()),
        },
        unknown => {
            warn!(element_type = unknown, "carrying element of unrecognized type verbatim");
            ElementPayload::Unknown(value.clone())
        }
    };

    Some(Element {
        id: load_id(obj, ids),
        style: load_element_style(obj),
        payload,
    })
}

fn load_form_field(value: &Value) -> Option<FormField> {
    let obj = value.as_object()?;
    let field_type = match obj.get("type").and_then(Value::as_str) {
        Some("text") | None => FieldType::Text,
        Some("email") => FieldType::Email,
        Some("tel") => FieldType::Tel,
        Some("textarea") => FieldType::Textarea,
        Some("select") => FieldType::Select,
        Some("checkbox") => FieldType::Checkbox,
        Some(unknown) => {
            warn!(field_type = unknown, "dropping form field of unknown type");
            return None;
        }
    };
    Some(FormField {
        id: str_field(obj, "id").unwrap_or_default(),
        field_type,
        label: str_field(obj, "label").unwrap_or_default(),
        placeholder: str_field(obj, "placeholder"),
        required: obj.get("required").and_then(Value::as_bool).unwrap_or(false),
        options: obj.get("options").and_then(Value::as_array).map(|opts| {
            opts.iter()
                .filter_map(Value::as_str)
                .map(String::from)
                .collect()
        }),
    })
}

fn load_element_style(obj: &Map<String, Value>) -> ElementStyle {
    ElementStyle {
        color: str_field(obj, "color"),
        font_size: u32_field(obj, "fontSize"),
        align: match obj.get("align").and_then(Value::as_str) {
            Some("left") => Some(TextAlign::Left),
            Some("center") => Some(TextAlign::Center),
            Some("right") => Some(TextAlign::Right),
            _ => None,
        },
        line_height: obj.get("lineHeight").and_then(Value::as_f64),
        letter_spacing: obj.get("letterSpacing").and_then(Value::as_f64),
        spacing: load_spacing(obj),
    }
}

fn save_section(section: &Section) -> Value {
    let mut obj = Map::new();
    obj.insert("id".to_string(), json!(section.id));

    match &section.style.background {
        Background::Solid { color: None } => {}
        Background::Solid { color: Some(color) } => {
            obj.insert(
                "background_config".to_string(),
                json!({ "type": "solid", "color": color }),
            );
        }
        Background::Gradient { color1, color2, angle } => {
            obj.insert(
                "background_config".to_string(),
                json!({
                    "type": "gradient",
                    "gradient": { "color1": color1, "color2": color2, "angle": angle },
                }),
            );
        }
    }

    if let Some(container) = save_container(&section.style.container) {
        obj.insert("container_config".to_string(), container);
    }

    obj.insert(
        "columns".to_string(),
        Value::Array(section.columns.iter().map(save_column).collect()),
    );
    Value::Object(obj)
}

fn save_container(container: &ContainerConfig) -> Option<Value> {
    if *container == ContainerConfig::default() {
        return None;
    }
    let mut obj = Map::new();
    insert_opt(&mut obj, "maxWidth", container.max_width);
    insert_opt(&mut obj, "horizontalPadding", container.horizontal_padding);
    insert_opt(&mut obj, "verticalPadding", container.vertical_padding);
    insert_opt(&mut obj, "paddingTop", container.padding_top);
    insert_opt(&mut obj, "paddingBottom", container.padding_bottom);
    insert_opt(&mut obj, "paddingLeft", container.padding_left);
    insert_opt(&mut obj, "paddingRight", container.padding_right);
    Some(Value::Object(obj))
}

fn save_column(column: &Column) -> Value {
    let mut obj = Map::new();
    obj.insert("id".to_string(), json!(column.id));
    obj.insert("width".to_string(), json!(column.width));
    insert_opt(&mut obj, "widthTablet", column.width_tablet);
    insert_opt(&mut obj, "widthMobile", column.width_mobile);
    obj.insert("card".to_string(), json!(column.card));
    save_spacing(&mut obj, &column.spacing);
    obj.insert(
        "elements".to_string(),
        Value::Array(column.elements.iter().map(save_element).collect()),
    );
    if !column.nested.is_empty() {
        obj.insert(
            "columns".to_string(),
            Value::Array(column.nested.iter().map(save_nested_column).collect()),
        );
    }
    Value::Object(obj)
}

fn save_nested_column(nested: &NestedColumn) -> Value {
    let mut obj = Map::new();
    obj.insert("id".to_string(), json!(nested.id));
    obj.insert("width".to_string(), json!(nested.width));
    obj.insert("card".to_string(), json!(nested.card));
    save_spacing(&mut obj, &nested.spacing);
    obj.insert(
        "elements".to_string(),
        Value::Array(nested.elements.iter().map(save_element).collect()),
    );
    Value::Object(obj)
}

fn save_spacing(obj: &mut Map<String, Value>, spacing: &Spacing) {
    insert_opt(obj, "marginTop", spacing.margin_top);
    insert_opt(obj, "marginBottom", spacing.margin_bottom);
    insert_opt(obj, "marginLeft", spacing.margin_left);
    insert_opt(obj, "marginRight", spacing.margin_right);
    insert_opt(obj, "paddingTop", spacing.padding_top);
    insert_opt(obj, "paddingBottom", spacing.padding_bottom);
    insert_opt(obj, "paddingLeft", spacing.padding_left);
    insert_opt(obj, "paddingRight", spacing.padding_right);
}

fn save_element(element: &Element) -> Value {
    let mut obj = Map::new();
    obj.insert("id".to_string(), json!(element.id));

    match &element.payload {
        ElementPayload::Heading { content, level } => {
            obj.insert("type".to_string(), json!("heading"));
            obj.insert("content".to_string(), json!(content));
            obj.insert("level".to_string(), json!(level));
        }
        ElementPayload::Text { content } => {
            obj.insert("type".to_string(), json!("text"));
            obj.insert("content".to_string(), json!(content));
        }
        ElementPayload::Image { src, alt } => {
            obj.insert("type".to_string(), json!("image"));
            obj.insert("src".to_string(), json!(src));
            obj.insert("alt".to_string(), json!(alt));
        }
        ElementPayload::Button { text, link, target } => {
            obj.insert("type".to_string(), json!("button"));
            obj.insert("text".to_string(), json!(text));
            obj.insert("link".to_string(), json!(link));
            obj.insert(
                "target".to_string(),
                json!(match target {
                    LinkTarget::SelfTab => "_self",
                    LinkTarget::NewTab => "_blank",
                }),
            );
        }
        ElementPayload::Video { url, provider } => {
            obj.insert("type".to_string(), json!("video"));
            obj.insert("url".to_string(), json!(url));
            obj.insert(
                "provider".to_string(),
                json!(match provider {
                    VideoProvider::Youtube => "youtube",
                    VideoProvider::Vimeo => "vimeo",
                    VideoProvider::Custom => "custom",
                }),
            );
        }
        ElementPayload::Form { fields, submit_text } => {
            obj.insert("type".to_string(), json!("form"));
            obj.insert(
                "fields".to_string(),
                Value::Array(fields.iter().map(save_form_field).collect()),
            );
            obj.insert("submitText".to_string(), json!(submit_text));
        }
        ElementPayload::Spacer { height } => {
            obj.insert("type".to_string(), json!("spacer"));
            obj.insert("height".to_string(), json!(height));
        }
        ElementPayload::Unknown(raw) => {
            // Emitted verbatim; the current id and any style edits win.
            let mut kept = as_object_or_empty(raw).clone();
            kept.insert("id".to_string(), json!(element.id));
            save_element_style(&mut kept, &element.style);
            return Value::Object(kept);
        }
    }

    save_element_style(&mut obj, &element.style);
    Value::Object(obj)
}

fn save_form_field(field: &FormField) -> Value {
    let mut obj = Map::new();
    obj.insert("id".to_string(), json!(field.id));
    obj.insert(
        "type".to_string(),
        json!(match field.field_type {
            FieldType::Text => "text",
            FieldType::Email => "email",
            FieldType::Tel => "tel",
            FieldType::Textarea => "textarea",
            FieldType::Select => "select",
            FieldType::Checkbox => "checkbox",
        }),
    );
    obj.insert("label".to_string(), json!(field.label));
    if let Some(placeholder) = &field.placeholder {
        obj.insert("placeholder".to_string(), json!(placeholder));
    }
    obj.insert("required".to_string(), json!(field.required));
    if let Some(options) = &field.options {
        obj.insert("options".to_string(), json!(options));
    }
    Value::Object(obj)
}

fn save_element_style(obj: &mut Map<String, Value>, style: &ElementStyle) {
    if let Some(color) = &style.color {
        obj.insert("color".to_string(), json!(color));
    }
    insert_opt(obj, "fontSize", style.font_size);
    if let Some(align) = style.align {
        obj.insert(
            "align".to_string(),
            json!(match align {
                TextAlign::Left => "left",
                TextAlign::Center => "center",
                TextAlign::Right => "right",
            }),
        );
    }
    if let Some(line_height) = style.line_height {
        obj.insert("lineHeight".to_string(), json!(line_height));
    }
    if let Some(letter_spacing) = style.letter_spacing {
        obj.insert("letterSpacing".to_string(), json!(letter_spacing));
    }
    save_spacing(obj, &style.spacing);
}

fn as_object_or_empty(value: &Value) -> &Map<String, Value> {
    static EMPTY: std::sync::OnceLock<Map<String, Value>> = std::sync::OnceLock::new();
    value
        .as_object()
        .unwrap_or_else(|| EMPTY.get_or_init(Map::new))
}

fn load_id(obj: &Map<String, Value>, ids: &mut dyn IdSource) -> String {
    match str_field(obj, "id") {
        Some(id) if !id.is_empty() => id,
        _ => ids.next_id(),
    }
}

/// Text payload lives under `content` today, `value` in older documents
fn content_field(obj: &Map<String, Value>) -> Option<String> {
    str_field(obj, "content").or_else(|| str_field(obj, "value"))
}

fn str_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(String::from)
}

fn u32_field(obj: &Map<String, Value>, key: &str) -> Option<u32> {
    obj.get(key).and_then(Value::as_u64).map(|v| v as u32)
}

fn i32_field(obj: &Map<String, Value>, key: &str) -> Option<i32> {
    obj.get(key).and_then(Value::as_i64).map(|v| v as i32)
}

fn width_field(obj: &Map<String, Value>, key: &str) -> Option<u8> {
    obj.get(key)
        .and_then(Value::as_u64)
        .map(|v| v.clamp(1, 12) as u8)
}

fn insert_opt<T: Into<serde_json::Number>>(obj: &mut Map<String, Value>, key: &str, value: Option<T>) {
    if let Some(v) = value {
        obj.insert(key.to_string(), Value::Number(v.into()));
    }
}
