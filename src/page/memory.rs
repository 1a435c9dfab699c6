use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::Serialize;

use super::node::{ElementId, NodeSpec, Rect, Viewport};
use super::traits::PageSurface;

pub const ROOT_ID: &str = "body";

#[derive(Debug, Clone, Default)]
struct Element {
    tag: String,
    classes: BTreeSet<String>,
    attrs: BTreeMap<String, String>,
    text: Option<String>,
    value: Option<String>,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    rect: Option<Rect>,
}

/// In-memory document used by the terminal playground, replay, and tests.
#[derive(Debug)]
pub struct MemoryPage {
    elements: HashMap<ElementId, Element>,
    root: ElementId,
    focused: Option<ElementId>,
    scroll_y: f64,
    viewport: Viewport,
    document_height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementSnapshot {
    pub tag: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageSnapshot {
    pub scroll_y: f64,
    pub viewport: Viewport,
    pub focused: Option<ElementId>,
    pub elements: BTreeMap<ElementId, ElementSnapshot>,
}

impl MemoryPage {
    pub fn new(viewport: Viewport) -> Self {
        let root = ElementId::new(ROOT_ID);
        let mut elements = HashMap::new();
        elements.insert(
            root.clone(),
            Element {
                tag: "body".to_string(),
                ..Element::default()
            },
        );
        Self {
            elements,
            root,
            focused: None,
            scroll_y: 0.0,
            viewport,
            document_height: viewport.height,
        }
    }

    pub fn root(&self) -> &ElementId {
        &self.root
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.scroll_y = self.scroll_y.min(self.max_scroll());
    }

    pub fn set_document_height(&mut self, height: f64) {
        self.document_height = height.max(0.0);
        self.scroll_y = self.scroll_y.min(self.max_scroll());
    }

    pub fn document_height(&self) -> f64 {
        self.document_height
    }

    pub fn max_scroll(&self) -> f64 {
        (self.document_height - self.viewport.height).max(0.0)
    }

    pub fn set_rect(&mut self, id: &ElementId, rect: Rect) {
        if let Some(element) = self.elements.get_mut(id) {
            element.rect = Some(rect);
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.len() <= 1
    }

    pub fn snapshot(&self) -> PageSnapshot {
        let elements = self
            .elements
            .iter()
            .map(|(id, element)| {
                (
                    id.clone(),
                    ElementSnapshot {
                        tag: element.tag.clone(),
                        classes: element.classes.iter().cloned().collect(),
                        attrs: element.attrs.clone(),
                        text: element.text.clone(),
                        value: element.value.clone(),
                    },
                )
            })
            .collect();
        PageSnapshot {
            scroll_y: self.scroll_y,
            viewport: self.viewport,
            focused: self.focused.clone(),
            elements,
        }
    }

    fn document_order(&self) -> Vec<ElementId> {
        let mut out = Vec::with_capacity(self.elements.len());
        let mut stack = vec![self.root.clone()];
        while let Some(id) = stack.pop() {
            if let Some(element) = self.elements.get(&id) {
                stack.extend(element.children.iter().rev().cloned());
            }
            out.push(id);
        }
        out
    }

    fn subtree_ids(&self, id: &ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack = vec![id.clone()];
        while let Some(current) = stack.pop() {
            if let Some(element) = self.elements.get(&current) {
                stack.extend(element.children.iter().cloned());
            }
            out.push(current);
        }
        out
    }

    fn attach_subtree(&mut self, parent: &ElementId, node: NodeSpec) {
        let NodeSpec {
            id,
            tag,
            classes,
            attrs,
            text,
            children,
        } = node;
        let value = match tag.as_str() {
            "input" | "textarea" => Some(String::new()),
            _ => None,
        };
        self.elements.insert(
            id.clone(),
            Element {
                tag,
                classes: classes.into_iter().collect(),
                attrs: attrs.into_iter().collect(),
                text,
                value,
                parent: Some(parent.clone()),
                children: Vec::new(),
                rect: None,
            },
        );
        if let Some(parent_element) = self.elements.get_mut(parent) {
            parent_element.children.push(id.clone());
        }
        for child in children {
            self.attach_subtree(&id, child);
        }
    }
}

impl PageSurface for MemoryPage {
    fn exists(&self, id: &ElementId) -> bool {
        self.elements.contains_key(id)
    }

    fn tag(&self, id: &ElementId) -> Option<String> {
        self.elements.get(id).map(|element| element.tag.clone())
    }

    fn parent(&self, id: &ElementId) -> Option<ElementId> {
        self.elements.get(id).and_then(|element| element.parent.clone())
    }

    fn children(&self, id: &ElementId) -> Vec<ElementId> {
        self.elements
            .get(id)
            .map(|element| element.children.clone())
            .unwrap_or_default()
    }

    fn query_class(&self, class: &str) -> Vec<ElementId> {
        self.document_order()
            .into_iter()
            .filter(|id| self.has_class(id, class))
            .collect()
    }

    fn query_attr(&self, name: &str) -> Vec<ElementId> {
        self.document_order()
            .into_iter()
            .filter(|id| {
                self.elements
                    .get(id)
                    .is_some_and(|element| element.attrs.contains_key(name))
            })
            .collect()
    }

    fn has_class(&self, id: &ElementId, class: &str) -> bool {
        self.elements
            .get(id)
            .is_some_and(|element| element.classes.contains(class))
    }

    fn add_class(&mut self, id: &ElementId, class: &str) {
        if let Some(element) = self.elements.get_mut(id) {
            element.classes.insert(class.to_string());
        }
    }

    fn remove_class(&mut self, id: &ElementId, class: &str) {
        if let Some(element) = self.elements.get_mut(id) {
            element.classes.remove(class);
        }
    }

    fn attr(&self, id: &ElementId, name: &str) -> Option<String> {
        self.elements
            .get(id)
            .and_then(|element| element.attrs.get(name).cloned())
    }

    fn set_attr(&mut self, id: &ElementId, name: &str, value: &str) {
        if let Some(element) = self.elements.get_mut(id) {
            element.attrs.insert(name.to_string(), value.to_string());
        }
    }

    fn remove_attr(&mut self, id: &ElementId, name: &str) {
        if let Some(element) = self.elements.get_mut(id) {
            element.attrs.remove(name);
        }
    }

    fn text(&self, id: &ElementId) -> Option<String> {
        self.elements.get(id).and_then(|element| element.text.clone())
    }

    fn set_text(&mut self, id: &ElementId, text: &str) {
        if let Some(element) = self.elements.get_mut(id) {
            element.text = Some(text.to_string());
        }
    }

    fn value(&self, id: &ElementId) -> Option<String> {
        self.elements.get(id).and_then(|element| element.value.clone())
    }

    fn set_value(&mut self, id: &ElementId, value: &str) {
        if let Some(element) = self.elements.get_mut(id) {
            element.value = Some(value.to_string());
        }
    }

    fn insert(&mut self, parent: &ElementId, node: NodeSpec) -> bool {
        if !self.elements.contains_key(parent) {
            return false;
        }
        if node.ids().iter().any(|id| self.elements.contains_key(id)) {
            return false;
        }
        self.attach_subtree(parent, node);
        true
    }

    fn remove(&mut self, id: &ElementId) -> bool {
        if id == &self.root || !self.elements.contains_key(id) {
            return false;
        }
        if let Some(parent) = self.parent(id)
            && let Some(parent_element) = self.elements.get_mut(&parent)
        {
            parent_element.children.retain(|child| child != id);
        }
        for removed in self.subtree_ids(id) {
            self.elements.remove(&removed);
            if self.focused.as_ref() == Some(&removed) {
                self.focused = None;
            }
        }
        true
    }

    fn focused(&self) -> Option<ElementId> {
        self.focused.clone()
    }

    fn focus(&mut self, id: &ElementId) -> bool {
        if !self.elements.contains_key(id) {
            return false;
        }
        self.focused = Some(id.clone());
        true
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn scroll_to(&mut self, y: f64, _smooth: bool) {
        let y = if y.is_finite() { y } else { 0.0 };
        self.scroll_y = y.clamp(0.0, self.max_scroll());
    }

    fn rect(&self, id: &ElementId) -> Option<Rect> {
        self.elements.get(id).and_then(|element| element.rect)
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }
}
