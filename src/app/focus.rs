use crate::overlay::EVENT_CLASS;
use crate::page::{ElementId, PageSurface, ids};

const FOCUSABLE_TAGS: [&str; 4] = ["a", "button", "input", "textarea"];
const FOCUSABLE_CLASSES: [&str; 3] = [ids::FEATURE_CLASS, ids::BLOG_CARD_CLASS, EVENT_CLASS];

/// Keyboard-reachable elements under `scope` in document order. Hidden
/// subtrees are skipped.
pub(crate) fn focusable(page: &dyn PageSurface, scope: &ElementId) -> Vec<ElementId> {
    let mut out = Vec::new();
    let mut hidden_below: Option<usize> = None;
    for (depth, id) in page.descendants(scope) {
        if let Some(limit) = hidden_below {
            if depth > limit {
                continue;
            }
            hidden_below = None;
        }
        if page.has_class(&id, ids::HIDDEN_CLASS) {
            hidden_below = Some(depth);
            continue;
        }
        let by_tag = page
            .tag(&id)
            .is_some_and(|tag| FOCUSABLE_TAGS.contains(&tag.as_str()));
        let by_class = FOCUSABLE_CLASSES
            .iter()
            .any(|class| page.has_class(&id, class));
        if by_tag || by_class {
            out.push(id);
        }
    }
    out
}

/// The element after (or before) `current` in `order`, wrapping around.
pub(crate) fn cycle(
    order: &[ElementId],
    current: Option<&ElementId>,
    forward: bool,
) -> Option<ElementId> {
    if order.is_empty() {
        return None;
    }
    let pos = current.and_then(|current| order.iter().position(|id| id == current));
    let next = match (pos, forward) {
        (None, true) => 0,
        (None, false) => order.len() - 1,
        (Some(pos), true) => (pos + 1) % order.len(),
        (Some(pos), false) => (pos + order.len() - 1) % order.len(),
    };
    Some(order[next].clone())
}

/// Editable text inputs; checkboxes are clicked, not typed into.
pub(crate) fn is_text_field(page: &dyn PageSurface, id: &ElementId) -> bool {
    match page.tag(id).as_deref() {
        Some("textarea") => true,
        Some("input") => page
            .attr(id, "type")
            .is_none_or(|kind| kind == "text" || kind == "email" || kind == "tel"),
        _ => false,
    }
}

pub(crate) fn enclosing_form(page: &dyn PageSurface, id: &ElementId) -> Option<ElementId> {
    let mut current = Some(id.clone());
    while let Some(candidate) = current {
        if page.tag(&candidate).as_deref() == Some("form") {
            return Some(candidate);
        }
        current = page.parent(&candidate);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::{cycle, enclosing_form, focusable, is_text_field};
    use crate::page::{ElementId, PageSurface, Viewport, blueprint, ids};

    #[test]
    fn focus_order_follows_the_document_and_skips_hidden_controls() {
        let page = blueprint::build(Viewport::new(1280.0, 800.0));
        let order = focusable(&page, page.root());
        let pos = |id: &str| order.iter().position(|candidate| candidate.as_str() == id);

        let logo = pos(ids::LOGO).expect("logo is a link");
        let cta = pos("cta-0").expect("cta is a button");
        let field = pos(ids::FIELD_NAME).expect("form field");
        assert!(logo < cta && cta < field);
        assert!(pos("blog-card-1").is_some());
        assert_eq!(pos(ids::BACK_TO_TOP), None);
    }

    #[test]
    fn cycle_wraps_in_both_directions() {
        let order = vec![ElementId::new("a"), ElementId::new("b")];
        assert_eq!(cycle(&order, None, true), Some(ElementId::new("a")));
        assert_eq!(cycle(&order, None, false), Some(ElementId::new("b")));
        assert_eq!(
            cycle(&order, Some(&ElementId::new("b")), true),
            Some(ElementId::new("a"))
        );
        assert_eq!(
            cycle(&order, Some(&ElementId::new("a")), false),
            Some(ElementId::new("b"))
        );
        assert_eq!(cycle(&[], None, true), None);
    }

    #[test]
    fn text_fields_belong_to_the_contact_form() {
        let page = blueprint::build(Viewport::new(1280.0, 800.0));
        let message = ElementId::new(ids::FIELD_MESSAGE);
        assert!(is_text_field(&page, &message));
        assert!(!is_text_field(&page, &ElementId::new("cta-0")));
        assert_eq!(
            enclosing_form(&page, &message),
            Some(ElementId::new(ids::CONTACT_FORM))
        );
        assert_eq!(enclosing_form(&page, &ElementId::new(ids::LOGO)), None);
        assert!(page.exists(&ElementId::new("contact-submit")));
    }
}
