use super::*;

/// How a form-associated element behaves for typing, submission and
/// validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ControlKind {
    Text,
    Toggle,
    Submit,
    Inert,
    Hidden,
    File,
    Select,
}

fn control_kind(element: &Element) -> Option<ControlKind> {
    match element.tag_name.as_str() {
        "textarea" => Some(ControlKind::Text),
        "select" => Some(ControlKind::Select),
        "button" => Some(
            match element.attrs.get("type").map(|kind| kind.to_ascii_lowercase()) {
                None => ControlKind::Submit,
                Some(kind) if kind == "submit" => ControlKind::Submit,
                Some(_) => ControlKind::Inert,
            },
        ),
        "input" => {
            let kind = element
                .attrs
                .get("type")
                .map(|kind| kind.to_ascii_lowercase())
                .unwrap_or_default();
            Some(match kind.as_str() {
                "submit" | "image" => ControlKind::Submit,
                "reset" | "button" => ControlKind::Inert,
                "checkbox" | "radio" => ControlKind::Toggle,
                "hidden" => ControlKind::Hidden,
                "file" => ControlKind::File,
                _ => ControlKind::Text,
            })
        }
        _ => None,
    }
}

fn kind_of(dom: &Dom, node_id: NodeId) -> Option<ControlKind> {
    dom.element(node_id).and_then(control_kind)
}

pub(crate) fn is_submit_control(dom: &Dom, node_id: NodeId) -> bool {
    kind_of(dom, node_id) == Some(ControlKind::Submit)
}

/// Controls whose value is typed by the user.
pub(crate) fn is_text_entry_control(dom: &Dom, node_id: NodeId) -> bool {
    kind_of(dom, node_id) == Some(ControlKind::Text)
}

/// Controls that take part in constraint validation and submission.
pub(crate) fn is_submittable_control(dom: &Dom, node_id: NodeId) -> bool {
    matches!(
        kind_of(dom, node_id),
        Some(ControlKind::Text | ControlKind::Select | ControlKind::Toggle | ControlKind::Hidden)
    )
}
