use super::*;

pub(crate) fn has_class(element: &Element, class_name: &str) -> bool {
    element
        .attrs
        .get("class")
        .is_some_and(|classes| classes.split_ascii_whitespace().any(|c| c == class_name))
}

/// Escapes text content for serialization.
pub(crate) fn escape_text(value: &str) -> String {
    escape_markup(value, false)
}

/// Escapes a value for a double-quoted attribute.
pub(crate) fn escape_attr(value: &str) -> String {
    escape_markup(value, true)
}

fn escape_markup(value: &str, quotes: bool) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if quotes => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

/// The declarations of a `style` attribute, in source order. A property
/// declared twice keeps its position and takes the later value.
#[derive(Debug, Default)]
pub(crate) struct InlineStyle {
    decls: Vec<(String, String)>,
}

impl InlineStyle {
    pub(crate) fn parse(attr: Option<&str>) -> Self {
        let mut style = Self::default();
        let Some(attr) = attr else {
            return style;
        };

        let mut depth = 0usize;
        let mut quote = None;
        let mut escaped = false;
        let mut start = 0;
        for (idx, ch) in attr.char_indices() {
            if escaped {
                escaped = false;
                continue;
            }
            match (quote, ch) {
                (Some(_), '\\') => escaped = true,
                (Some(q), _) if ch == q => quote = None,
                (Some(_), _) => {}
                (None, '"' | '\'') => quote = Some(ch),
                (None, '(') => depth += 1,
                (None, ')') => depth = depth.saturating_sub(1),
                (None, ';') if depth == 0 => {
                    style.push_raw(&attr[start..idx]);
                    start = idx + 1;
                }
                (None, _) => {}
            }
        }
        style.push_raw(&attr[start..]);
        style
    }

    fn push_raw(&mut self, raw: &str) {
        let Some((name, value)) = raw.split_once(':') else {
            return;
        };
        let name = name.trim().to_ascii_lowercase();
        if !name.is_empty() {
            self.set(name, value.trim());
        }
    }

    pub(crate) fn get(&self, name: &str) -> Option<&str> {
        self.decls
            .iter()
            .find(|(prop, _)| prop == name)
            .map(|(_, value)| value.as_str())
    }

    /// Sets `name`, or removes it when `value` is empty.
    pub(crate) fn set(&mut self, name: String, value: &str) {
        let existing = self.decls.iter().position(|(prop, _)| *prop == name);
        match (existing, value.is_empty()) {
            (Some(pos), true) => {
                self.decls.remove(pos);
            }
            (Some(pos), false) => self.decls[pos].1 = value.to_string(),
            (None, false) => self.decls.push((name, value.to_string())),
            (None, true) => {}
        }
    }

    pub(crate) fn to_attr(&self) -> String {
        self.decls
            .iter()
            .map(|(name, value)| format!("{name}: {value};"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// The first `max_chars` characters, with `...` when anything was cut.
pub(crate) fn ellipsize(value: &str, max_chars: usize) -> String {
    match value.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &value[..cut]),
        None => value.to_string(),
    }
}
