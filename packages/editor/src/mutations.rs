//! # Tree Mutations
//!
//! Structural operations on the content tree.
//!
//! ## Semantics
//!
//! - Every mutation is pure: it takes the current tree and returns the next
//!   tree. Untouched state is simply cloned.
//! - Every mutation is total over coordinates. A referenced id that does not
//!   exist makes the whole operation a no-op returning the input tree —
//!   stale editor selection must never corrupt state, and never partially
//!   applies.
//! - Move operations swap with the adjacent sibling and are no-ops at array
//!   boundaries.
//! - Duplication regenerates every id in the cloned subtree.
//! - Update operations are partial: present patch fields overwrite, absent
//!   fields are preserved. A payload type change resets fields not meaningful
//!   to the new type to type-appropriate defaults.

use pagegrid_content::{
    Column, ContentTree, Element, ElementKind, ElementPayload, FormField, IdSource, LayoutPreset,
    LinkTarget, NestedColumn, Section, TextAlign, VideoProvider,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    Up,
    Down,
}

/// Semantic mutations on the content tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Mutation {
    AddSection {
        at_index: Option<usize>,
        preset: Option<LayoutPreset>,
    },
    RemoveSection {
        section_id: String,
    },
    DuplicateSection {
        section_id: String,
    },
    MoveSection {
        section_id: String,
        direction: MoveDirection,
    },

    AddColumn {
        section_id: String,
        width: Option<u8>,
    },
    RemoveColumn {
        section_id: String,
        column_id: String,
    },
    UpdateColumnWidth {
        section_id: String,
        column_id: String,
        width: u8,
    },
    UpdateColumnStyle {
        section_id: String,
        column_id: String,
        patch: ColumnStylePatch,
    },

    AddElement {
        section_id: String,
        column_id: String,
        template: Element,
    },
    RemoveElement {
        section_id: String,
        column_id: String,
        element_id: String,
    },
    UpdateElement {
        section_id: String,
        column_id: String,
        element_id: String,
        patch: ElementPatch,
    },
    DuplicateElement {
        section_id: String,
        column_id: String,
        element_id: String,
    },
    MoveElement {
        section_id: String,
        column_id: String,
        element_id: String,
        direction: MoveDirection,
    },

    // Nested-column variants: same semantics, one extra coordinate.
    // Nested columns cannot hold further columns, so no deeper variant
    // exists to misuse.
    AddNestedColumn {
        section_id: String,
        column_id: String,
        width: Option<u8>,
    },
    RemoveNestedColumn {
        section_id: String,
        column_id: String,
        nested_id: String,
    },
    UpdateNestedColumnWidth {
        section_id: String,
        column_id: String,
        nested_id: String,
        width: u8,
    },
    UpdateNestedColumnStyle {
        section_id: String,
        column_id: String,
        nested_id: String,
        patch: NestedColumnStylePatch,
    },
    AddNestedElement {
        section_id: String,
        column_id: String,
        nested_id: String,
        template: Element,
    },
    RemoveNestedElement {
        section_id: String,
        column_id: String,
        nested_id: String,
        element_id: String,
    },
    UpdateNestedElement {
        section_id: String,
        column_id: String,
        nested_id: String,
        element_id: String,
        patch: ElementPatch,
    },
    DuplicateNestedElement {
        section_id: String,
        column_id: String,
        nested_id: String,
        element_id: String,
    },
    MoveNestedElement {
        section_id: String,
        column_id: String,
        nested_id: String,
        element_id: String,
        direction: MoveDirection,
    },
}

/// Partial update for a column's visual settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ColumnStylePatch {
    pub width: Option<u8>,
    pub width_tablet: Option<u8>,
    pub width_mobile: Option<u8>,
    pub card: Option<bool>,
    pub margin_top: Option<i32>,
    pub margin_bottom: Option<i32>,
    pub margin_left: Option<i32>,
    pub margin_right: Option<i32>,
    pub padding_top: Option<i32>,
    pub padding_bottom: Option<i32>,
    pub padding_left: Option<i32>,
    pub padding_right: Option<i32>,
}

/// Partial update for a nested column's visual settings
///
/// Nested columns carry a single width across breakpoints, so there are no
/// tablet or mobile fields here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct NestedColumnStylePatch {
    pub width: Option<u8>,
    pub card: Option<bool>,
    pub margin_top: Option<i32>,
    pub margin_bottom: Option<i32>,
    pub margin_left: Option<i32>,
    pub margin_right: Option<i32>,
    pub padding_top: Option<i32>,
    pub padding_bottom: Option<i32>,
    pub padding_left: Option<i32>,
    pub padding_right: Option<i32>,
}

/// Partial update for an element
///
/// `kind` switches the payload type (resetting it to defaults first);
/// `content` fields then apply to whichever payload variant is current,
/// ignoring fields the variant does not carry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ElementPatch {
    pub kind: Option<ElementKind>,
    pub content: ContentPatch,
    pub style: StylePatch,
}

/// Partial update over the union of payload fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ContentPatch {
    pub content: Option<String>,
    pub level: Option<u8>,
    pub src: Option<String>,
    pub alt: Option<String>,
    pub text: Option<String>,
    pub link: Option<String>,
    pub target: Option<LinkTarget>,
    pub url: Option<String>,
    pub provider: Option<VideoProvider>,
    pub fields: Option<Vec<FormField>>,
    pub submit_text: Option<String>,
    pub height: Option<String>,
}

/// Partial update for element style
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StylePatch {
    pub color: Option<String>,
    pub font_size: Option<u32>,
    pub align: Option<TextAlign>,
    pub line_height: Option<f64>,
    pub letter_spacing: Option<f64>,
    pub margin_top: Option<i32>,
    pub margin_bottom: Option<i32>,
    pub margin_left: Option<i32>,
    pub margin_right: Option<i32>,
    pub padding_top: Option<i32>,
    pub padding_bottom: Option<i32>,
    pub padding_left: Option<i32>,
    pub padding_right: Option<i32>,
}

impl Mutation {
    /// Apply to a tree, producing the next tree.
    ///
    /// Returns the input tree unchanged when any referenced id is missing
    /// or a move is already at its boundary.
    pub fn apply(&self, tree: &ContentTree, ids: &mut dyn IdSource) -> ContentTree {
        let mut next = tree.clone();
        let applied = match self {
            Mutation::AddSection { at_index, preset } => {
                let section =
                    Section::with_preset(preset.unwrap_or(LayoutPreset::OneColumn), ids);
                let index = at_index.unwrap_or(next.sections.len()).min(next.sections.len());
                next.sections.insert(index, section);
                true
            }

            Mutation::RemoveSection { section_id } => match next.section_index(section_id) {
                Some(index) => {
                    next.sections.remove(index);
                    true
                }
                None => false,
            },

            Mutation::DuplicateSection { section_id } => match next.section_index(section_id) {
                Some(index) => {
                    let copy = next.sections[index].clone_with_fresh_ids(ids);
                    next.sections.insert(index + 1, copy);
                    true
                }
                None => false,
            },

            Mutation::MoveSection { section_id, direction } => {
                match next.section_index(section_id) {
                    Some(index) => swap_adjacent(&mut next.sections, index, *direction),
                    None => false,
                }
            }

            Mutation::AddColumn { section_id, width } => {
                match next.find_section_mut(section_id) {
                    Some(section) => {
                        let column = Column::new(width.unwrap_or(6).clamp(1, 12), ids);
                        section.columns.push(column);
                        true
                    }
                    None => false,
                }
            }

            Mutation::RemoveColumn { section_id, column_id } => {
                match next.find_section_mut(section_id) {
                    Some(section) => {
                        match section.columns.iter().position(|c| c.id == *column_id) {
                            Some(index) => {
                                section.columns.remove(index);
                                true
                            }
                            None => false,
                        }
                    }
                    None => false,
                }
            }

            Mutation::UpdateColumnWidth { section_id, column_id, width } => {
                match find_column_mut(&mut next, section_id, column_id) {
                    Some(column) => {
                        column.width = (*width).clamp(1, 12);
                        true
                    }
                    None => false,
                }
            }

            Mutation::UpdateColumnStyle { section_id, column_id, patch } => {
                match find_column_mut(&mut next, section_id, column_id) {
                    Some(column) => {
                        apply_column_style_patch(column, patch);
                        true
                    }
                    None => false,
                }
            }

            Mutation::AddElement { section_id, column_id, template } => {
                match find_column_mut(&mut next, section_id, column_id) {
                    Some(column) => add_element(&mut column.elements, template, ids),
                    None => false,
                }
            }

            Mutation::RemoveElement { section_id, column_id, element_id } => {
                match find_column_mut(&mut next, section_id, column_id) {
                    Some(column) => remove_element(&mut column.elements, element_id),
                    None => false,
                }
            }

            Mutation::UpdateElement { section_id, column_id, element_id, patch } => {
                match find_column_mut(&mut next, section_id, column_id) {
                    Some(column) => update_element(&mut column.elements, element_id, patch),
                    None => false,
                }
            }

            Mutation::DuplicateElement { section_id, column_id, element_id } => {
                match find_column_mut(&mut next, section_id, column_id) {
                    Some(column) => duplicate_element(&mut column.elements, element_id, ids),
                    None => false,
                }
            }

            Mutation::MoveElement { section_id, column_id, element_id, direction } => {
                match find_column_mut(&mut next, section_id, column_id) {
                    Some(column) => move_element(&mut column.elements, element_id, *direction),
                    None => false,
                }
            }

            Mutation::AddNestedColumn { section_id, column_id, width } => {
                match find_column_mut(&mut next, section_id, column_id) {
                    Some(column) => {
                        let nested = NestedColumn::new(width.unwrap_or(6).clamp(1, 12), ids);
                        column.nested.push(nested);
                        true
                    }
                    None => false,
                }
            }

            Mutation::RemoveNestedColumn { section_id, column_id, nested_id } => {
                match find_column_mut(&mut next, section_id, column_id) {
                    Some(column) => {
                        match column.nested.iter().position(|n| n.id == *nested_id) {
                            Some(index) => {
                                column.nested.remove(index);
                                true
                            }
                            None => false,
                        }
                    }
                    None => false,
                }
            }

            Mutation::UpdateNestedColumnWidth { section_id, column_id, nested_id, width } => {
                match find_nested_mut(&mut next, section_id, column_id, nested_id) {
                    Some(nested) => {
                        nested.width = (*width).clamp(1, 12);
                        true
                    }
                    None => false,
                }
            }

            Mutation::UpdateNestedColumnStyle { section_id, column_id, nested_id, patch } => {
                match find_nested_mut(&mut next, section_id, column_id, nested_id) {
                    Some(nested) => {
                        apply_nested_column_style_patch(nested, patch);
                        true
                    }
                    None => false,
                }
            }

            Mutation::AddNestedElement { section_id, column_id, nested_id, template } => {
                match find_nested_mut(&mut next, section_id, column_id, nested_id) {
                    Some(nested) => add_element(&mut nested.elements, template, ids),
                    None => false,
                }
            }

            Mutation::RemoveNestedElement { section_id, column_id, nested_id, element_id } => {
                match find_nested_mut(&mut next, section_id, column_id, nested_id) {
                    Some(nested) => remove_element(&mut nested.elements, element_id),
                    None => false,
                }
            }

            Mutation::UpdateNestedElement {
                section_id,
                column_id,
                nested_id,
                element_id,
                patch,
            } => match find_nested_mut(&mut next, section_id, column_id, nested_id) {
                Some(nested) => update_element(&mut nested.elements, element_id, patch),
                None => false,
            },

            Mutation::DuplicateNestedElement { section_id, column_id, nested_id, element_id } => {
                match find_nested_mut(&mut next, section_id, column_id, nested_id) {
                    Some(nested) => duplicate_element(&mut nested.elements, element_id, ids),
                    None => false,
                }
            }

            Mutation::MoveNestedElement {
                section_id,
                column_id,
                nested_id,
                element_id,
                direction,
            } => match find_nested_mut(&mut next, section_id, column_id, nested_id) {
                Some(nested) => move_element(&mut nested.elements, element_id, *direction),
                None => false,
            },
        };

        if !applied {
            debug!(mutation = self.name(), "mutation was a no-op");
        }
        next
    }

    /// Debug name of this mutation
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::AddSection { .. } => "add_section",
            Mutation::RemoveSection { .. } => "remove_section",
            Mutation::DuplicateSection { .. } => "duplicate_section",
            Mutation::MoveSection { .. } => "move_section",
            Mutation::AddColumn { .. } => "add_column",
            Mutation::RemoveColumn { .. } => "remove_column",
            Mutation::UpdateColumnWidth { .. } => "update_column_width",
            Mutation::UpdateColumnStyle { .. } => "update_column_style",
            Mutation::AddElement { .. } => "add_element",
            Mutation::RemoveElement { .. } => "remove_element",
            Mutation::UpdateElement { .. } => "update_element",
            Mutation::DuplicateElement { .. } => "duplicate_element",
            Mutation::MoveElement { .. } => "move_element",
            Mutation::AddNestedColumn { .. } => "add_nested_column",
            Mutation::RemoveNestedColumn { .. } => "remove_nested_column",
            Mutation::UpdateNestedColumnWidth { .. } => "update_nested_column_width",
            Mutation::UpdateNestedColumnStyle { .. } => "update_nested_column_style",
            Mutation::AddNestedElement { .. } => "add_nested_element",
            Mutation::RemoveNestedElement { .. } => "remove_nested_element",
            Mutation::UpdateNestedElement { .. } => "update_nested_element",
            Mutation::DuplicateNestedElement { .. } => "duplicate_nested_element",
            Mutation::MoveNestedElement { .. } => "move_nested_element",
        }
    }
}

fn find_column_mut<'a>(
    tree: &'a mut ContentTree,
    section_id: &str,
    column_id: &str,
) -> Option<&'a mut Column> {
    tree.find_section_mut(section_id)?.find_column_mut(column_id)
}

fn find_nested_mut<'a>(
    tree: &'a mut ContentTree,
    section_id: &str,
    column_id: &str,
    nested_id: &str,
) -> Option<&'a mut NestedColumn> {
    find_column_mut(tree, section_id, column_id)?.find_nested_mut(nested_id)
}

fn swap_adjacent<T>(items: &mut [T], index: usize, direction: MoveDirection) -> bool {
    match direction {
        MoveDirection::Up if index > 0 => {
            items.swap(index, index - 1);
            true
        }
        MoveDirection::Down if index + 1 < items.len() => {
            items.swap(index, index + 1);
            true
        }
        _ => false,
    }
}

fn add_element(elements: &mut Vec<Element>, template: &Element, ids: &mut dyn IdSource) -> bool {
    // Any id on the template is discarded
    elements.push(template.clone_with_fresh_id(ids));
    true
}

fn remove_element(elements: &mut Vec<Element>, element_id: &str) -> bool {
    match elements.iter().position(|e| e.id == element_id) {
        Some(index) => {
            elements.remove(index);
            true
        }
        None => false,
    }
}

fn update_element(elements: &mut [Element], element_id: &str, patch: &ElementPatch) -> bool {
    match elements.iter_mut().find(|e| e.id == element_id) {
        Some(element) => {
            apply_element_patch(element, patch);
            true
        }
        None => false,
    }
}

fn duplicate_element(elements: &mut Vec<Element>, element_id: &str, ids: &mut dyn IdSource) -> bool {
    match elements.iter().position(|e| e.id == element_id) {
        Some(index) => {
            let copy = elements[index].clone_with_fresh_id(ids);
            elements.insert(index + 1, copy);
            true
        }
        None => false,
    }
}

fn move_element(elements: &mut [Element], element_id: &str, direction: MoveDirection) -> bool {
    match elements.iter().position(|e| e.id == element_id) {
        Some(index) => swap_adjacent(elements, index, direction),
        None => false,
    }
}

fn apply_column_style_patch(column: &mut Column, patch: &ColumnStylePatch) {
    if let Some(width) = patch.width {
        column.width = width.clamp(1, 12);
    }
    if let Some(width) = patch.width_tablet {
        column.width_tablet = Some(width.clamp(1, 12));
    }
    if let Some(width) = patch.width_mobile {
        column.width_mobile = Some(width.clamp(1, 12));
    }
    if let Some(card) = patch.card {
        column.card = card;
    }
    let spacing = &mut column.spacing;
    merge_opt(&mut spacing.margin_top, patch.margin_top);
    merge_opt(&mut spacing.margin_bottom, patch.margin_bottom);
    merge_opt(&mut spacing.margin_left, patch.margin_left);
    merge_opt(&mut spacing.margin_right, patch.margin_right);
    merge_opt(&mut spacing.padding_top, patch.padding_top);
    merge_opt(&mut spacing.padding_bottom, patch.padding_bottom);
    merge_opt(&mut spacing.padding_left, patch.padding_left);
    merge_opt(&mut spacing.padding_right, patch.padding_right);
}

fn apply_nested_column_style_patch(nested: &mut NestedColumn, patch: &NestedColumnStylePatch) {
    if let Some(width) = patch.width {
        nested.width = width.clamp(1, 12);
    }
    if let Some(card) = patch.card {
        nested.card = card;
    }
    let spacing = &mut nested.spacing;
    merge_opt(&mut spacing.margin_top, patch.margin_top);
    merge_opt(&mut spacing.margin_bottom, patch.margin_bottom);
    merge_opt(&mut spacing.margin_left, patch.margin_left);
    merge_opt(&mut spacing.margin_right, patch.margin_right);
    merge_opt(&mut spacing.padding_top, patch.padding_top);
    merge_opt(&mut spacing.padding_bottom, patch.padding_bottom);
    merge_opt(&mut spacing.padding_left, patch.padding_left);
    merge_opt(&mut spacing.padding_right, patch.padding_right);
}

fn apply_element_patch(element: &mut Element, patch: &ElementPatch) {
    // A type change resets the payload to the new type's defaults before
    // content fields are merged; stale fields never carry over.
    if let Some(kind) = patch.kind {
        if Some(kind) != element.payload.kind() {
            element.payload = ElementPayload::default_for(kind);
        }
    }

    let content = &patch.content;
    match &mut element.payload {
        ElementPayload::Heading { content: text, level } => {
            if let Some(v) = &content.content {
                *text = v.clone();
            }
            if let Some(v) = content.level {
                *level = v.clamp(1, 6);
            }
        }
        ElementPayload::Text { content: text } => {
            if let Some(v) = &content.content {
                *text = v.clone();
            }
        }
        ElementPayload::Image { src, alt } => {
            if let Some(v) = &content.src {
                *src = v.clone();
            }
            if let Some(v) = &content.alt {
                *alt = v.clone();
            }
        }
        ElementPayload::Button { text, link, target } => {
            if let Some(v) = &content.text {
                *text = v.clone();
            }
            if let Some(v) = &content.link {
                *link = v.clone();
            }
            if let Some(v) = content.target {
                *target = v;
            }
        }
        ElementPayload::Video { url, provider } => {
            if let Some(v) = &content.url {
                *url = v.clone();
            }
            if let Some(v) = content.provider {
                *provider = v;
            }
        }
        ElementPayload::Form { fields, submit_text } => {
            if let Some(v) = &content.fields {
                *fields = v.clone();
            }
            if let Some(v) = &content.submit_text {
                *submit_text = v.clone();
            }
        }
        ElementPayload::Spacer { height } => {
            if let Some(v) = &content.height {
                *height = v.clone();
            }
        }
        // Unrecognized payloads are opaque; only style fields apply.
        ElementPayload::Unknown(_) => {}
    }

    let style = &mut element.style;
    let sp = &patch.style;
    if let Some(v) = &sp.color {
        style.color = Some(v.clone());
    }
    if let Some(v) = sp.font_size {
        style.font_size = Some(v);
    }
    if let Some(v) = sp.align {
        style.align = Some(v);
    }
    if let Some(v) = sp.line_height {
        style.line_height = Some(v);
    }
    if let Some(v) = sp.letter_spacing {
        style.letter_spacing = Some(v);
    }
    let spacing = &mut style.spacing;
    merge_opt(&mut spacing.margin_top, sp.margin_top);
    merge_opt(&mut spacing.margin_bottom, sp.margin_bottom);
    merge_opt(&mut spacing.margin_left, sp.margin_left);
    merge_opt(&mut spacing.margin_right, sp.margin_right);
    merge_opt(&mut spacing.padding_top, sp.padding_top);
    merge_opt(&mut spacing.padding_bottom, sp.padding_bottom);
    merge_opt(&mut spacing.padding_left, sp.padding_left);
    merge_opt(&mut spacing.padding_right, sp.padding_right);
}

fn merge_opt<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}
