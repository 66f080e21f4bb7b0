use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::animation::scheduler::{Animatable, NativeAnimation, PreviewHandle};
use crate::foundation::core::{ElementId, Insets, Size};

/// Horizontal text alignment from computed style.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Start,
    Left,
    Center,
    Right,
    End,
    Justify,
}

/// Computed `line-height`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineHeight {
    #[default]
    Normal,
    Px(f32),
}

/// Snapshot of an element's live computed style and box.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComputedStyle {
    /// Border-box size; zero until laid out.
    pub size: Size,
    pub padding: Insets,
    /// Full family list as computed (`"Inter", sans-serif`).
    pub font_family: String,
    pub font_size_px: f32,
    pub font_weight: f32,
    pub text_align: TextAlign,
    pub letter_spacing_px: f32,
    pub line_height: LineHeight,
    /// Computed text color, e.g. `rgb(0, 0, 0)`.
    pub color: String,
    /// Computed background image, `none` when unset.
    pub background_image: String,
    pub text_stroke_width_px: f64,
    pub text_stroke_color: String,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            size: Size::ZERO,
            padding: Insets::ZERO,
            font_family: "sans-serif".to_owned(),
            font_size_px: 16.0,
            font_weight: 400.0,
            text_align: TextAlign::Start,
            letter_spacing_px: 0.0,
            line_height: LineHeight::Normal,
            color: "rgb(0, 0, 0)".to_owned(),
            background_image: "none".to_owned(),
            text_stroke_width_px: 0.0,
            text_stroke_color: "rgb(0, 0, 0)".to_owned(),
        }
    }
}

impl ComputedStyle {
    /// First family of the computed family list, unquoted.
    pub fn primary_family(&self) -> &str {
        self.font_family
            .split(',')
            .next()
            .map(|f| f.trim().trim_matches(['"', '\'']))
            .filter(|f| !f.is_empty())
            .unwrap_or("sans-serif")
    }

    /// Resolved line height in pixels (`normal` is 1.2em).
    pub fn line_height_px(&self) -> f32 {
        match self.line_height {
            LineHeight::Px(px) if px.is_finite() && px > 0.0 => px,
            _ => self.font_size_px * 1.2,
        }
    }
}

/// A styled element as seen through the host editor: attributes, inline style, computed style.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    attributes: BTreeMap<String, String>,
    #[serde(default)]
    inline_style: BTreeMap<String, String>,
    #[serde(default)]
    pub computed: ComputedStyle,
    #[serde(skip)]
    animations: Vec<NativeAnimation>,
}

impl Element {
    pub fn new(id: ElementId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            attributes: BTreeMap::new(),
            inline_style: BTreeMap::new(),
            computed: ComputedStyle::default(),
            animations: Vec::new(),
        }
    }

    pub fn with_computed(mut self, computed: ComputedStyle) -> Self {
        self.computed = computed;
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        self.attributes.remove(name)
    }

    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    /// Remove every attribute matching `pred`, returning the removed names.
    pub fn remove_attrs_where(&mut self, mut pred: impl FnMut(&str) -> bool) -> Vec<String> {
        let names: Vec<String> = self
            .attributes
            .keys()
            .filter(|k| pred(k))
            .cloned()
            .collect();
        for n in &names {
            self.attributes.remove(n);
        }
        names
    }

    pub fn style(&self, prop: &str) -> Option<&str> {
        self.inline_style.get(prop).map(String::as_str)
    }

    pub fn set_style(&mut self, prop: impl Into<String>, value: impl Into<String>) {
        self.inline_style.insert(prop.into(), value.into());
    }

    pub fn remove_style(&mut self, prop: &str) -> Option<String> {
        self.inline_style.remove(prop)
    }

    pub fn inline_style(&self) -> &BTreeMap<String, String> {
        &self.inline_style
    }

    /// Inline style rendered as a `style` attribute value.
    pub fn style_text(&self) -> String {
        self.inline_style
            .iter()
            .map(|(k, v)| format!("{k}: {v};"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Animatable for Element {
    fn play(&mut self, animation: NativeAnimation) {
        self.animations.push(animation);
    }

    fn cancel_animation(&mut self, handle: PreviewHandle) -> bool {
        let before = self.animations.len();
        self.animations.retain(|a| a.handle != handle);
        before != self.animations.len()
    }

    fn running_animations(&self) -> &[NativeAnimation] {
        &self.animations
    }
}

/// Host editor collaborator: resolves live elements and receives change notifications.
pub trait HostEditor {
    fn element(&self, id: ElementId) -> Option<&Element>;
    fn element_mut(&mut self, id: ElementId) -> Option<&mut Element>;
    /// Called after a committed change (debounced by the session).
    fn on_update(&mut self);
}

/// In-memory host holding a page of elements.
#[derive(Debug, Default)]
pub struct Document {
    elements: BTreeMap<ElementId, Element>,
    updates: u64,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, element: Element) -> ElementId {
        let id = element.id;
        self.elements.insert(id, element);
        id
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    /// Number of `on_update` notifications received.
    pub fn update_count(&self) -> u64 {
        self.updates
    }
}

impl HostEditor for Document {
    fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(&id)
    }

    fn on_update(&mut self) {
        self.updates += 1;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/element.rs"]
mod tests;
