use serde::{Deserialize, Serialize};

use crate::id::IdSource;

/// Root content tree for a page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ContentTree {
    pub sections: Vec<Section>,
}

/// Top-level horizontal row of the page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub columns: Vec<Column>,
    pub style: SectionStyle,
}

/// Background + container styling owned by a section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SectionStyle {
    pub background: Background,
    pub container: ContainerConfig,
}

/// Section background fill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Background {
    Solid { color: Option<String> },
    Gradient { color1: String, color2: String, angle: i32 },
}

impl Default for Background {
    fn default() -> Self {
        Background::Solid { color: None }
    }
}

/// Container sizing and padding config
///
/// Explicit per-edge paddings take priority over the vertical/horizontal
/// fallbacks; the renderer supplies the final defaults when everything
/// here is unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ContainerConfig {
    pub max_width: Option<u32>,
    pub horizontal_padding: Option<u32>,
    pub vertical_padding: Option<u32>,
    pub padding_top: Option<u32>,
    pub padding_bottom: Option<u32>,
    pub padding_left: Option<u32>,
    pub padding_right: Option<u32>,
}

/// Vertical slot within a section
///
/// `width_tablet`/`width_mobile` are overrides: `None` means "inherit"
/// (tablet from desktop, mobile from tablet), not zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub id: String,
    pub width: u8,
    pub width_tablet: Option<u8>,
    pub width_mobile: Option<u8>,
    pub card: bool,
    pub spacing: Spacing,
    pub elements: Vec<Element>,
    pub nested: Vec<NestedColumn>,
}

/// Column nested one level inside another column
///
/// Deliberately a distinct type with no `nested` field: the single-level
/// nesting cap is a structural fact, not a runtime check. Nested columns
/// carry one width for all breakpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NestedColumn {
    pub id: String,
    pub width: u8,
    pub card: bool,
    pub spacing: Spacing,
    pub elements: Vec<Element>,
}

/// Per-edge margin/padding, in pixels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Spacing {
    pub margin_top: Option<i32>,
    pub margin_bottom: Option<i32>,
    pub margin_left: Option<i32>,
    pub margin_right: Option<i32>,
    pub padding_top: Option<i32>,
    pub padding_bottom: Option<i32>,
    pub padding_left: Option<i32>,
    pub padding_right: Option<i32>,
}

/// Typed leaf content unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: String,
    pub style: ElementStyle,
    pub payload: ElementPayload,
}

/// Per-element visual attributes
///
/// Spacer elements only honor the spacing fields; typography is ignored
/// for them at render time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ElementStyle {
    pub color: Option<String>,
    pub font_size: Option<u32>,
    pub align: Option<TextAlign>,
    pub line_height: Option<f64>,
    pub letter_spacing: Option<f64>,
    pub spacing: Spacing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkTarget {
    #[serde(rename = "_self")]
    SelfTab,
    #[serde(rename = "_blank")]
    NewTab,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoProvider {
    Youtube,
    Vimeo,
    Custom,
}

/// Type-specific element payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementPayload {
    Heading {
        content: String,
        level: u8,
    },
    Text {
        content: String,
    },
    Image {
        src: String,
        alt: String,
    },
    Button {
        text: String,
        link: String,
        target: LinkTarget,
    },
    Video {
        url: String,
        provider: VideoProvider,
    },
    Form {
        fields: Vec<FormField>,
        submit_text: String,
    },
    Spacer {
        height: String,
    },
    /// Element of a type this build does not recognize, carried verbatim
    /// so a load/save cycle never drops it.
    #[serde(untagged)]
    Unknown(serde_json::Value),
}

/// Questionnaire/contact form field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormField {
    pub id: String,
    pub field_type: FieldType,
    pub label: String,
    pub placeholder: Option<String>,
    pub required: bool,
    pub options: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Email,
    Tel,
    Textarea,
    Select,
    Checkbox,
}

/// Element type discriminants, used to pick default payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Heading,
    Text,
    Image,
    Button,
    Video,
    Form,
    Spacer,
}

impl ElementPayload {
    /// Type-appropriate default payload for a freshly created element
    pub fn default_for(kind: ElementKind) -> Self {
        match kind {
            ElementKind::Heading => ElementPayload::Heading {
                content: "Heading".to_string(),
                level: 2,
            },
            ElementKind::Text => ElementPayload::Text {
                content: "Text".to_string(),
            },
            ElementKind::Image => ElementPayload::Image {
                src: String::new(),
                alt: String::new(),
            },
            ElementKind::Button => ElementPayload::Button {
                text: "Button".to_string(),
                link: "#".to_string(),
                target: LinkTarget::SelfTab,
            },
            ElementKind::Video => ElementPayload::Video {
                url: String::new(),
                provider: VideoProvider::Youtube,
            },
            ElementKind::Form => ElementPayload::Form {
                fields: Vec::new(),
                submit_text: "Submit".to_string(),
            },
            ElementKind::Spacer => ElementPayload::Spacer {
                height: "40px".to_string(),
            },
        }
    }

    /// Kind discriminant, `None` for payloads this build does not recognize
    pub fn kind(&self) -> Option<ElementKind> {
        match self {
            ElementPayload::Heading { .. } => Some(ElementKind::Heading),
            ElementPayload::Text { .. } => Some(ElementKind::Text),
            ElementPayload::Image { .. } => Some(ElementKind::Image),
            ElementPayload::Button { .. } => Some(ElementKind::Button),
            ElementPayload::Video { .. } => Some(ElementKind::Video),
            ElementPayload::Form { .. } => Some(ElementKind::Form),
            ElementPayload::Spacer { .. } => Some(ElementKind::Spacer),
            ElementPayload::Unknown(_) => None,
        }
    }
}

impl ContentTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find_section(&self, section_id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == section_id)
    }

    pub fn find_section_mut(&mut self, section_id: &str) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.id == section_id)
    }

    pub fn section_index(&self, section_id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id == section_id)
    }

    /// All ids in the tree, at every level
    pub fn all_ids(&self) -> Vec<&str> {
        let mut ids = Vec::new();
        for section in &self.sections {
            ids.push(section.id.as_str());
            for column in &section.columns {
                ids.push(column.id.as_str());
                for element in &column.elements {
                    ids.push(element.id.as_str());
                }
                for nested in &column.nested {
                    ids.push(nested.id.as_str());
                    for element in &nested.elements {
                        ids.push(element.id.as_str());
                    }
                }
            }
        }
        ids
    }
}

impl Section {
    /// New section seeded per the layout preset
    pub fn with_preset(preset: LayoutPreset, ids: &mut dyn IdSource) -> Self {
        let columns = preset
            .widths()
            .iter()
            .map(|w| Column::new(*w, ids))
            .collect();
        Self {
            id: ids.next_id(),
            columns,
            style: SectionStyle::default(),
        }
    }

    pub fn find_column(&self, column_id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == column_id)
    }

    pub fn find_column_mut(&mut self, column_id: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.id == column_id)
    }

    /// Deep clone with every descendant id regenerated
    pub fn clone_with_fresh_ids(&self, ids: &mut dyn IdSource) -> Self {
        let mut copy = self.clone();
        copy.id = ids.next_id();
        for column in &mut copy.columns {
            column.refresh_ids(ids);
        }
        copy
    }
}

/// Column layouts a new section can be seeded with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutPreset {
    OneColumn,
    TwoColumn,
    ThreeColumn,
}

impl LayoutPreset {
    pub fn widths(&self) -> &'static [u8] {
        match self {
            LayoutPreset::OneColumn => &[12],
            LayoutPreset::TwoColumn => &[6, 6],
            LayoutPreset::ThreeColumn => &[4, 4, 4],
        }
    }
}

impl Column {
    pub fn new(width: u8, ids: &mut dyn IdSource) -> Self {
        Self {
            id: ids.next_id(),
            width,
            width_tablet: None,
            width_mobile: None,
            card: false,
            spacing: Spacing::default(),
            elements: Vec::new(),
            nested: Vec::new(),
        }
    }

    pub fn find_element(&self, element_id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == element_id)
    }

    pub fn find_nested(&self, nested_id: &str) -> Option<&NestedColumn> {
        self.nested.iter().find(|n| n.id == nested_id)
    }

    pub fn find_nested_mut(&mut self, nested_id: &str) -> Option<&mut NestedColumn> {
        self.nested.iter_mut().find(|n| n.id == nested_id)
    }

    fn refresh_ids(&mut self, ids: &mut dyn IdSource) {
        self.id = ids.next_id();
        for element in &mut self.elements {
            element.id = ids.next_id();
        }
        for nested in &mut self.nested {
            nested.id = ids.next_id();
            for element in &mut nested.elements {
                element.id = ids.next_id();
            }
        }
    }
}

impl NestedColumn {
    pub fn new(width: u8, ids: &mut dyn IdSource) -> Self {
        Self {
            id: ids.next_id(),
            width,
            card: false,
            spacing: Spacing::default(),
            elements: Vec::new(),
        }
    }
}

impl Element {
    pub fn new(kind: ElementKind, ids: &mut dyn IdSource) -> Self {
        Self {
            id: ids.next_id(),
            style: ElementStyle::default(),
            payload: ElementPayload::default_for(kind),
        }
    }

    /// Clone with a fresh id, used by duplication
    pub fn clone_with_fresh_id(&self, ids: &mut dyn IdSource) -> Self {
        let mut copy = self.clone();
        copy.id = ids.next_id();
        copy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::SequentialIds;

    #[test]
    fn test_section_preset_widths() {
        let mut ids = SequentialIds::new("page");
        let section = Section::with_preset(LayoutPreset::ThreeColumn, &mut ids);
        let widths: Vec<u8> = section.columns.iter().map(|c| c.width).collect();
        assert_eq!(widths, vec![4, 4, 4]);
    }

    #[test]
    fn test_clone_with_fresh_ids_regenerates_everything() {
        let mut ids = SequentialIds::new("page");
        let mut section = Section::with_preset(LayoutPreset::TwoColumn, &mut ids);
        section.columns[0]
            .elements
            .push(Element::new(ElementKind::Text, &mut ids));
        let mut nested = NestedColumn::new(6, &mut ids);
        nested.elements.push(Element::new(ElementKind::Heading, &mut ids));
        section.columns[1].nested.push(nested);

        let copy = section.clone_with_fresh_ids(&mut ids);

        let mut original_ids = vec![section.id.clone()];
        for c in &section.columns {
            original_ids.push(c.id.clone());
            original_ids.extend(c.elements.iter().map(|e| e.id.clone()));
            for n in &c.nested {
                original_ids.push(n.id.clone());
                original_ids.extend(n.elements.iter().map(|e| e.id.clone()));
            }
        }

        assert!(!original_ids.contains(&copy.id));
        for c in &copy.columns {
            assert!(!original_ids.contains(&c.id));
            for e in &c.elements {
                assert!(!original_ids.contains(&e.id));
            }
            for n in &c.nested {
                assert!(!original_ids.contains(&n.id));
                for e in &n.elements {
                    assert!(!original_ids.contains(&e.id));
                }
            }
        }
    }

    #[test]
    fn test_default_payloads_carry_required_fields() {
        match ElementPayload::default_for(ElementKind::Heading) {
            ElementPayload::Heading { level, .. } => assert!((1..=6).contains(&level)),
            other => panic!("unexpected payload: {:?}", other),
        }
        match ElementPayload::default_for(ElementKind::Button) {
            ElementPayload::Button { target, .. } => assert_eq!(target, LinkTarget::SelfTab),
            other => panic!("unexpected payload: {:?}", other),
        }
    }
}
