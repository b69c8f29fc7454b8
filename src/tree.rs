//! The document tree (spec §3 "Document tree").
//!
//! A mutable n-ary tree of [`Element`]s. Text is stored in two slots per
//! element — `text` (before the first child) and `tail` (after the element,
//! in its parent's child list) — matching the shape every pass in the
//! pipeline (block parser, inline expansion, prettify, serializer) expects.

use std::collections::HashMap;

/// A string value that may be flagged "do not re-parse as inline" (spec §3
/// "Atomic string"). Behaves like a plain string for concatenation and
/// serialization; only the inline engine inspects the flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Value {
    pub body: String,
    pub atomic: bool,
}

impl Value {
    pub fn plain(body: impl Into<String>) -> Self {
        Self { body: body.into(), atomic: false }
    }

    pub fn atomic(body: impl Into<String>) -> Self {
        Self { body: body.into(), atomic: true }
    }

    pub fn push_str(&mut self, s: &str) {
        self.body.push_str(s);
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

impl From<String> for Value {
    fn from(body: String) -> Self {
        Value::plain(body)
    }
}

impl From<&str> for Value {
    fn from(body: &str) -> Self {
        Value::plain(body)
    }
}

/// An ordered attribute mapping: insertion order preserved, keys unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    order: Vec<String>,
    values: HashMap<String, String>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite `key`. Overwriting an existing key keeps its
    /// original position in iteration order.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        if !self.values.contains_key(&key) {
            self.order.push(key.clone());
        }
        self.values.insert(key, value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|s| s.as_str())
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        if let Some(v) = self.values.remove(key) {
            self.order.retain(|k| k != key);
            Some(v)
        } else {
            None
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.order.iter().map(move |k| (k.as_str(), self.values[k].as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// What an [`Element`] represents during serialization (spec §4.7).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tag {
    /// An ordinary (possibly namespaced) element, e.g. `p`, `svg:circle`.
    Element { ns: Option<String>, local: String },
    /// The `None`-sentinel: serializes as its text and children only, with
    /// no wrapping tag of its own. Used to splice a run of sibling nodes
    /// into a parent without an extra wrapper (e.g. top-level inline
    /// expansion results).
    Fragment,
    /// An HTML/XML comment; `text` holds the comment body.
    Comment,
    /// A processing instruction `<?target ...?>`; `text` holds the body.
    ProcessingInstruction { target: String },
}

impl Tag {
    pub fn element(local: impl Into<String>) -> Self {
        Tag::Element { ns: None, local: local.into() }
    }

    pub fn namespaced(ns: impl Into<String>, local: impl Into<String>) -> Self {
        Tag::Element { ns: Some(ns.into()), local: local.into() }
    }

    /// The bare tag name used for ancestor-exclusion checks and block-level
    /// classification; namespace prefix is ignored.
    pub fn local_name(&self) -> Option<&str> {
        match self {
            Tag::Element { local, .. } => Some(local.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Element {
    pub tag: Tag,
    pub attrs: Attributes,
    pub text: Option<Value>,
    pub tail: Option<Value>,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            attrs: Attributes::new(),
            text: None,
            tail: None,
            children: Vec::new(),
        }
    }

    pub fn named(local: impl Into<String>) -> Self {
        Self::new(Tag::element(local))
    }

    pub fn fragment() -> Self {
        Self::new(Tag::Fragment)
    }

    pub fn with_text(mut self, text: impl Into<Value>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key, value);
        self
    }

    pub fn push_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// A document root: a `Fragment`-tagged element whose children are the
    /// top-level blocks.
    pub fn document_root() -> Self {
        Self::fragment()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attributes_preserve_insertion_order() {
        let mut attrs = Attributes::new();
        attrs.insert("class", "a");
        attrs.insert("id", "b");
        attrs.insert("class", "c");
        let collected: Vec<_> = attrs.iter().collect();
        assert_eq!(collected, vec![("class", "c"), ("id", "b")]);
    }

    #[test]
    fn atomic_value_flag_is_independent_of_content() {
        let v = Value::atomic("<script>");
        assert!(v.atomic);
        assert_eq!(v.body, "<script>");
    }
}
