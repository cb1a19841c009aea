use super::*;

/// In-page links scroll to their target instead of navigating.
pub(super) fn install(harness: &mut Harness) -> Result<()> {
    for anchor in harness.dom.query_selector_all(r##"a[href^="#"]"##)? {
        harness.add_event_listener(anchor, "click", move |h, event| {
            event.prevent_default();
            let href = h.dom.attr(anchor, "href").unwrap_or_default();
            // `#` alone is not a valid selector; nothing to scroll to.
            let target = h.dom.query_selector(&href).unwrap_or(None);
            if let Some(target) = target {
                h.scroll_into_view(target);
            }
            Ok(())
        });
    }
    Ok(())
}
