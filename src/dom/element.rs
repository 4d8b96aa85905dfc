use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A DOM element node as captured by the page extraction script
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ElementNode {
    /// HTML tag name (e.g., "div", "section", "img")
    pub tag_name: String,

    /// Element attributes (id, class, etc.)
    #[serde(default)]
    pub attributes: HashMap<String, String>,

    /// Bounding box relative to the viewport
    #[serde(default)]
    pub rect: BoundingBox,

    /// Computed style values, kept as raw CSS text
    #[serde(default)]
    pub style: ComputedStyle,

    /// 1-based position among element siblings, as seen by the live DOM
    ///
    /// Recorded at capture time so CSS nth-child paths stay correct even
    /// when the extraction script skips script/style subtrees.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nth: Option<usize>,

    /// Child elements
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ElementNode>,
}

/// Bounding box coordinates relative to the viewport
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Computed style values relevant to salience scoring
///
/// Values are the raw strings reported by `getComputedStyle`; parsing
/// happens at scoring time so a malformed value degrades locally.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ComputedStyle {
    #[serde(default)]
    pub color: String,

    #[serde(default)]
    pub background_color: String,

    #[serde(default)]
    pub margin_top: String,

    #[serde(default)]
    pub margin_right: String,

    #[serde(default)]
    pub margin_bottom: String,

    #[serde(default)]
    pub margin_left: String,
}

impl ElementNode {
    /// Create a new ElementNode
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            attributes: HashMap::new(),
            rect: BoundingBox::default(),
            style: ComputedStyle::default(),
            nth: None,
            children: Vec::new(),
        }
    }

    /// Builder method: set attributes
    pub fn with_attributes(mut self, attributes: HashMap<String, String>) -> Self {
        self.attributes = attributes;
        self
    }

    /// Builder method: set the bounding box
    pub fn with_rect(mut self, x: f64, y: f64, width: f64, height: f64) -> Self {
        self.rect = BoundingBox { x, y, width, height };
        self
    }

    /// Builder method: set computed style
    pub fn with_style(mut self, style: ComputedStyle) -> Self {
        self.style = style;
        self
    }

    /// Builder method: set the sibling position
    pub fn with_nth(mut self, nth: usize) -> Self {
        self.nth = Some(nth);
        self
    }

    /// Builder method: set children
    pub fn with_children(mut self, children: Vec<ElementNode>) -> Self {
        self.children = children;
        self
    }

    /// Add a single attribute
    pub fn add_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// Add a child element
    pub fn add_child(&mut self, child: ElementNode) {
        self.children.push(child);
    }

    /// Get attribute value by key
    pub fn get_attribute(&self, key: &str) -> Option<&String> {
        self.attributes.get(key)
    }

    /// Get element ID
    pub fn id(&self) -> Option<&String> {
        self.attributes.get("id")
    }

    /// Check if element is a specific tag
    pub fn is_tag(&self, tag: &str) -> bool {
        self.tag_name.eq_ignore_ascii_case(tag)
    }
}

impl BoundingBox {
    /// Create a new BoundingBox
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Right edge relative to the viewport
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge relative to the viewport
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Content-box area, before margins
    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

impl ComputedStyle {
    /// Create an empty style record
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the foreground color
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Builder method: set the background color
    pub fn with_background(mut self, background: impl Into<String>) -> Self {
        self.background_color = background.into();
        self
    }

    /// Builder method: set all four margins to the same value
    pub fn with_margin(mut self, margin: impl Into<String>) -> Self {
        let margin = margin.into();
        self.margin_top = margin.clone();
        self.margin_right = margin.clone();
        self.margin_bottom = margin.clone();
        self.margin_left = margin;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_node_creation() {
        let mut attrs = HashMap::new();
        attrs.insert("id".to_string(), "hero".to_string());
        attrs.insert("class".to_string(), "banner wide".to_string());

        let element = ElementNode::new("section")
            .with_attributes(attrs)
            .with_rect(0.0, 0.0, 800.0, 400.0)
            .with_nth(2);

        assert_eq!(element.tag_name, "section");
        assert_eq!(element.id(), Some(&"hero".to_string()));
        assert_eq!(element.rect.area(), 320000.0);
        assert_eq!(element.nth, Some(2));
    }

    #[test]
    fn test_bounding_box_edges() {
        let rect = BoundingBox::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(rect.right(), 110.0);
        assert_eq!(rect.bottom(), 70.0);
        assert_eq!(rect.area(), 5000.0);
    }

    #[test]
    fn test_computed_style_builder() {
        let style = ComputedStyle::new()
            .with_color("rgb(255, 255, 255)")
            .with_background("rgb(200, 0, 0)")
            .with_margin("8px");

        assert_eq!(style.color, "rgb(255, 255, 255)");
        assert_eq!(style.background_color, "rgb(200, 0, 0)");
        assert_eq!(style.margin_top, "8px");
        assert_eq!(style.margin_left, "8px");
    }

    #[test]
    fn test_serialization_round_trip() {
        let mut root = ElementNode::new("body").with_rect(0.0, 0.0, 1280.0, 720.0);
        root.add_child(
            ElementNode::new("div")
                .with_style(ComputedStyle::new().with_background("rgb(0, 0, 255)")),
        );

        let json = serde_json::to_string(&root).unwrap();
        let parsed: ElementNode = serde_json::from_str(&json).unwrap();
        assert_eq!(root, parsed);
    }

    #[test]
    fn test_deserialize_with_defaults() {
        // Fields omitted by a sparse extraction payload fall back cleanly
        let json = r#"{"tag_name": "div"}"#;
        let node: ElementNode = serde_json::from_str(json).unwrap();

        assert_eq!(node.tag_name, "div");
        assert_eq!(node.rect, BoundingBox::default());
        assert!(node.style.color.is_empty());
        assert!(node.children.is_empty());
    }
}
