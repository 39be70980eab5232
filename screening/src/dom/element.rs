use std::collections::BTreeMap;
use std::fmt::Write as _;

/// Inline `style` declarations of an element, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineStyle {
    declarations: Vec<(String, String)>,
}

impl InlineStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `style` attribute such as `"width:100%; height:6px"`
    pub fn parse(css: &str) -> Self {
        let mut style = Self::new();
        for declaration in css.split(';') {
            if let Some((property, value)) = declaration.split_once(':') {
                let property = property.trim();
                let value = value.trim();
                if !property.is_empty() && !value.is_empty() {
                    style.set(property, value);
                }
            }
        }
        style
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(property))
            .map(|(_, value)| value.as_str())
    }

    /// Set a declaration, keeping its position when it already exists
    pub fn set<P: Into<String>, V: Into<String>>(&mut self, property: P, value: V) {
        let property = property.into().to_ascii_lowercase();
        let value = value.into();
        match self
            .declarations
            .iter_mut()
            .find(|(name, _)| *name == property)
        {
            Some((_, slot)) => *slot = value,
            None => self.declarations.push((property, value)),
        }
    }

    pub fn remove(&mut self, property: &str) -> Option<String> {
        let index = self
            .declarations
            .iter()
            .position(|(name, _)| name.eq_ignore_ascii_case(property))?;
        Some(self.declarations.remove(index).1)
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub fn to_css(&self) -> String {
        self.declarations
            .iter()
            .map(|(name, value)| format!("{name}: {value}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// A node of the in-memory report tree.
///
/// Text content is rendered before the children. Cloning is deep.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub style: InlineStyle,
    pub attributes: BTreeMap<String, String>,
    pub text: Option<String>,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new<S: Into<String>>(tag: S) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn with_id<S: Into<String>>(mut self, id: S) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_class<S: Into<String>>(mut self, class: S) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn with_style(mut self, css: &str) -> Self {
        self.style = InlineStyle::parse(css);
        self
    }

    pub fn with_attribute<K: Into<String>, V: Into<String>>(mut self, name: K, value: V) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_text<S: Into<String>>(mut self, text: S) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn is_id(&self, id: &str) -> bool {
        self.id.as_deref() == Some(id)
    }

    /// Replace the whole content (text and children) of this element
    pub fn replace_content(&mut self, text: Option<String>, children: Vec<Element>) {
        self.text = text;
        self.children = children;
    }

    pub fn set_text<S: Into<String>>(&mut self, text: S) {
        self.replace_content(Some(text.into()), Vec::new());
    }

    /// Concatenated text of this element and its descendants, in document order
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if let Some(text) = &self.text {
            out.push_str(text);
        }
        for child in &self.children {
            child.collect_text(out);
        }
    }

    /// First element (self included) with the given id, depth-first
    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        if self.is_id(id) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find_by_id(id))
    }

    pub fn find_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        if self.is_id(id) {
            return Some(self);
        }
        self.children
            .iter_mut()
            .find_map(|child| child.find_by_id_mut(id))
    }

    /// Detach the first descendant with the given id
    pub fn remove_by_id(&mut self, id: &str) -> Option<Element> {
        if let Some(index) = self.children.iter().position(|child| child.is_id(id)) {
            return Some(self.children.remove(index));
        }
        self.children
            .iter_mut()
            .find_map(|child| child.remove_by_id(id))
    }

    /// All descendants carrying a class, in document order
    pub fn find_by_class(&self, class: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.for_each_descendant(&mut |element| {
            if element.has_class(class) {
                found.push(element);
            }
        });
        found
    }

    /// Visit every descendant (not `self`) in document order
    pub fn for_each_descendant<'a>(&'a self, visit: &mut impl FnMut(&'a Element)) {
        for child in &self.children {
            visit(child);
            child.for_each_descendant(visit);
        }
    }

    /// Visit every descendant (not `self`) in document order, mutably
    pub fn for_each_descendant_mut(&mut self, visit: &mut impl FnMut(&mut Element)) {
        for child in &mut self.children {
            visit(child);
            child.for_each_descendant_mut(visit);
        }
    }

    /// Serialize to HTML
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        let _ = write!(out, "<{}", self.tag);
        if let Some(id) = &self.id {
            let _ = write!(out, " id=\"{}\"", html_escape(id));
        }
        if !self.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", html_escape(&self.classes.join(" ")));
        }
        if !self.style.is_empty() {
            let _ = write!(out, " style=\"{}\"", html_escape(&self.style.to_css()));
        }
        for (name, value) in &self.attributes {
            let _ = write!(out, " {}=\"{}\"", name, html_escape(value));
        }
        out.push('>');

        if let Some(text) = &self.text {
            out.push_str(&html_escape(text));
        }
        for child in &self.children {
            child.write_html(out);
        }

        let _ = write!(out, "</{}>", self.tag);
    }
}

/// Simple HTML escaping
pub fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> Element {
        Element::new("div")
            .with_id("root")
            .with_child(
                Element::new("p")
                    .with_class("lead")
                    .with_text("Hello ")
                    .with_child(Element::new("strong").with_id("name").with_text("Ana")),
            )
            .with_child(Element::new("button").with_id("btnPdf").with_text("Export"))
    }

    #[test]
    fn test_style_parse_and_update() {
        let mut style = InlineStyle::parse("width:100%; height:6px; ;broken");
        assert_eq!(style.get("width"), Some("100%"));
        assert_eq!(style.get("HEIGHT"), Some("6px"));

        style.set("width", "50%");
        style.set("Color", "#000000");
        assert_eq!(style.to_css(), "width: 50%; height: 6px; color: #000000");

        assert_eq!(style.remove("height"), Some("6px".to_string()));
        assert_eq!(style.get("height"), None);
    }

    #[test]
    fn test_find_and_remove_by_id() {
        let mut tree = sample_tree();
        assert_eq!(tree.find_by_id("name").unwrap().text.as_deref(), Some("Ana"));

        tree.find_by_id_mut("name").unwrap().set_text("Budi");
        assert_eq!(tree.text_content(), "Hello BudiExport");

        let removed = tree.remove_by_id("btnPdf").unwrap();
        assert_eq!(removed.tag, "button");
        assert!(tree.find_by_id("btnPdf").is_none());
        assert!(tree.remove_by_id("btnPdf").is_none());
    }

    #[test]
    fn test_clone_is_deep() {
        let live = sample_tree();
        let mut copy = live.clone();
        copy.find_by_id_mut("name").unwrap().style.set("color", "red");

        assert_eq!(live.find_by_id("name").unwrap().style.get("color"), None);
        assert_ne!(live, copy);
    }

    #[test]
    fn test_descendants_in_document_order() {
        let tree = sample_tree();
        let mut tags = Vec::new();
        tree.for_each_descendant(&mut |element| tags.push(element.tag.clone()));
        assert_eq!(tags, vec!["p", "strong", "button"]);
        assert_eq!(tree.find_by_class("lead").len(), 1);
    }

    #[test]
    fn test_html_serialization_escapes_content() {
        let element = Element::new("li")
            .with_class("row")
            .with_style("color: red")
            .with_attribute("disabled", "disabled")
            .with_text("<b>5 & 6</b>");
        assert_eq!(
            element.to_html(),
            r#"<li class="row" style="color: red" disabled="disabled">&lt;b&gt;5 &amp; 6&lt;/b&gt;</li>"#
        );
    }
}
