use std::cell::Cell;
use std::rc::Rc;

use super::*;

pub(super) fn install(harness: &mut Harness, wiring: &Wiring) -> Result<()> {
    wire_explore(harness, wiring);
    wire_counter(harness, wiring)?;
    wire_newsletter(harness, wiring);
    Ok(())
}

fn wire_explore(harness: &mut Harness, wiring: &Wiring) {
    let Some(button) = element_by_id(harness, "explore-btn") else {
        return;
    };
    let destination = wiring.lookup(Defect::ExplorePath, "pages/pokedex.html", "pokedex.html");
    harness.add_event_listener(button, "click", move |h, _| h.set_location_href(destination));
}

/// Page-lifetime counter shared by the increment and reset buttons.
#[derive(Debug, Default)]
pub(super) struct Counter {
    count: Cell<i64>,
}

impl Counter {
    pub(super) fn increment(&self) -> i64 {
        let next = self.count.get() + 1;
        self.count.set(next);
        next
    }

    pub(super) fn reset(&self) -> i64 {
        self.count.set(0);
        0
    }
}

fn wire_counter(harness: &mut Harness, wiring: &Wiring) -> Result<()> {
    let increment_selector =
        wiring.lookup(Defect::IncrementSelector, ".increment-btn", ".increment-button");
    let increment = harness.dom.query_selector(increment_selector)?;
    let Some(display) = element_by_id(harness, "counter-value") else {
        return Ok(());
    };
    let reset = element_by_id(harness, "reset-btn");
    let counter = Rc::new(Counter::default());

    if let Some(increment) = increment {
        let counter = Rc::clone(&counter);
        harness.add_event_listener(increment, "click", move |h, _| {
            let count = counter.increment();
            h.dom.set_text_content(display, &count.to_string())
        });
    }

    if let Some(reset) = reset {
        harness.add_event_listener(reset, "click", move |h, _| {
            let count = counter.reset();
            h.dom.set_text_content(display, &count.to_string())
        });
    }
    Ok(())
}

fn wire_newsletter(harness: &mut Harness, wiring: &Wiring) {
    let form_id = wiring.lookup(Defect::NewsletterFormId, "newsletter-form", "subscribe-form");
    let Some(form) = element_by_id(harness, form_id) else {
        return;
    };
    let message = element_by_id(harness, "form-message");

    harness.add_event_listener(form, "submit", move |h, event| {
        event.prevent_default();
        let Some(email) = element_by_id(h, "email-input") else {
            return Ok(());
        };
        if h.dom.value(email)?.is_empty() {
            return Ok(());
        }
        if let Some(message) = message {
            h.dom.set_text_content(message, "Thank you for subscribing!")?;
            h.dom.style_set(message, "color", CONFIRMATION_COLOR)?;
        }
        h.dom.set_value(email, "")
    });
}
