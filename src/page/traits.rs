use super::node::{ElementId, NodeSpec, Rect, Viewport};

/// The DOM operations the orchestration layer relies on.
///
/// Every mutator is a silent no-op when the element does not exist; readers
/// return `None`/`false`. Components probe with [`PageSurface::exists`] at
/// attach time and never fail on a missing target afterwards.
pub trait PageSurface {
    fn exists(&self, id: &ElementId) -> bool;

    fn tag(&self, id: &ElementId) -> Option<String>;

    fn parent(&self, id: &ElementId) -> Option<ElementId>;

    fn children(&self, id: &ElementId) -> Vec<ElementId>;

    /// Elements carrying `class`, in document order.
    fn query_class(&self, class: &str) -> Vec<ElementId>;

    /// Elements carrying attribute `name`, in document order.
    fn query_attr(&self, name: &str) -> Vec<ElementId>;

    fn has_class(&self, id: &ElementId, class: &str) -> bool;

    fn add_class(&mut self, id: &ElementId, class: &str);

    fn remove_class(&mut self, id: &ElementId, class: &str);

    fn attr(&self, id: &ElementId, name: &str) -> Option<String>;

    fn set_attr(&mut self, id: &ElementId, name: &str, value: &str);

    fn remove_attr(&mut self, id: &ElementId, name: &str);

    fn text(&self, id: &ElementId) -> Option<String>;

    fn set_text(&mut self, id: &ElementId, text: &str);

    fn value(&self, id: &ElementId) -> Option<String>;

    fn set_value(&mut self, id: &ElementId, value: &str);

    /// Appends `node` (and its subtree) under `parent`. Returns false when the
    /// parent is missing or an id in the subtree is already taken.
    fn insert(&mut self, parent: &ElementId, node: NodeSpec) -> bool;

    /// Removes the element and its subtree. Returns true when something was removed.
    fn remove(&mut self, id: &ElementId) -> bool;

    fn focused(&self) -> Option<ElementId>;

    /// Moves focus; returns false when the element is missing.
    fn focus(&mut self, id: &ElementId) -> bool;

    fn scroll_y(&self) -> f64;

    /// Scrolls the document; `smooth` is a presentation hint only.
    fn scroll_to(&mut self, y: f64, smooth: bool);

    /// Layout box in document coordinates.
    fn rect(&self, id: &ElementId) -> Option<Rect>;

    fn viewport(&self) -> Viewport;

    fn closest_with_class(&self, id: &ElementId, class: &str) -> Option<ElementId> {
        let mut current = Some(id.clone());
        while let Some(candidate) = current {
            if self.has_class(&candidate, class) {
                return Some(candidate);
            }
            current = self.parent(&candidate);
        }
        None
    }

    fn is_within(&self, id: &ElementId, ancestor: &ElementId) -> bool {
        let mut current = Some(id.clone());
        while let Some(candidate) = current {
            if &candidate == ancestor {
                return true;
            }
            current = self.parent(&candidate);
        }
        false
    }

    fn toggle_class(&mut self, id: &ElementId, class: &str, on: bool) {
        if on {
            self.add_class(id, class);
        } else {
            self.remove_class(id, class);
        }
    }

    /// `id` and its subtree in document order, with depth relative to `id`.
    fn descendants(&self, id: &ElementId) -> Vec<(usize, ElementId)> {
        let mut out = Vec::new();
        let mut stack = vec![(0, id.clone())];
        while let Some((depth, current)) = stack.pop() {
            if !self.exists(&current) {
                continue;
            }
            for child in self.children(&current).into_iter().rev() {
                stack.push((depth + 1, child));
            }
            out.push((depth, current));
        }
        out
    }

    fn remove_children(&mut self, id: &ElementId) {
        for child in self.children(id) {
            self.remove(&child);
        }
    }
}
