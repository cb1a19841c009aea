use super::*;

const CONTACT_FIELDS: [&str; 4] = ["name", "email", "subject", "message"];

pub(super) fn install(harness: &mut Harness, wiring: &Wiring) -> Result<()> {
    wire_contact_form(harness, wiring);
    wire_faq_toggles(harness)
}

fn wire_contact_form(harness: &mut Harness, wiring: &Wiring) {
    let form_id = wiring.lookup(Defect::ContactFormId, "contact-form", "contact-form-submit");
    let Some(form) = element_by_id(harness, form_id) else {
        return;
    };
    let message = element_by_id(harness, "contact-message");

    harness.add_event_listener(form, "submit", move |h, event| {
        event.prevent_default();
        let mut values = Vec::with_capacity(CONTACT_FIELDS.len());
        for field in CONTACT_FIELDS {
            values.push(element_value(h, field)?);
        }
        if values.iter().any(String::is_empty) {
            return Ok(());
        }
        if let Some(message) = message {
            let name = &values[0];
            h.dom.set_text_content(
                message,
                &format!("Thank you, {name}! Your message has been sent."),
            )?;
            h.dom.style_set(message, "color", CONFIRMATION_COLOR)?;
        }
        h.reset_form(form)
    });
}

fn wire_faq_toggles(harness: &mut Harness) -> Result<()> {
    for button in harness.dom.query_selector_all(".toggle-faq")? {
        harness.add_event_listener(button, "click", move |h, _| {
            let Some(item) = h.dom.closest(button, ".faq-item")? else {
                return Ok(());
            };
            let Some(answer) = h.dom.query_selector_from(item, ".faq-answer")? else {
                return Ok(());
            };
            if h.dom.style_get(answer, "display")? == "none" {
                h.dom.style_set(answer, "display", "block")?;
                h.dom.set_text_content(button, "Hide Answer")
            } else {
                h.dom.style_set(answer, "display", "none")?;
                h.dom.set_text_content(button, "Show Answer")
            }
        });
    }
    Ok(())
}
