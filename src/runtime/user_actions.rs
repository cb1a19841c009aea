use super::*;

const STACK_RED_ZONE: usize = 32 * 1024 * 1024;

impl Harness {
    pub fn click(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        stacker::grow(STACK_RED_ZONE, || self.click_node(target))
    }

    /// Replaces the control's value and fires `input`, like typing into it.
    pub fn type_text(&mut self, selector: &str, text: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        if !is_text_entry_control(&self.dom, target) {
            return Err(Error::TypeMismatch {
                selector: selector.to_string(),
                expected: "text input or textarea".into(),
                actual: self.describe_control(target),
            });
        }
        let Some(element) = self.dom.element(target) else {
            return Ok(());
        };
        if element.disabled || element.readonly {
            return Ok(());
        }

        stacker::grow(STACK_RED_ZONE, || {
            self.dom.set_value(target, text)?;
            self.dispatch_event(target, "input")?;
            Ok(())
        })
    }

    /// Picks the option whose value is `value`, then fires `input` and
    /// `change`.
    pub fn select_option(&mut self, selector: &str, value: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        if self.dom.tag_name(target) != Some("select") {
            return Err(Error::TypeMismatch {
                selector: selector.to_string(),
                expected: "select".into(),
                actual: self.describe_control(target),
            });
        }
        if !self.dom.select_has_option(target, value)? {
            return Err(Error::SelectorNotFound(format!(
                "{selector} option[value=\"{value}\"]"
            )));
        }
        if self.dom.element(target).is_some_and(|element| element.disabled) {
            return Ok(());
        }

        stacker::grow(STACK_RED_ZONE, || {
            self.dom.set_value(target, value)?;
            self.dispatch_event(target, "input")?;
            self.dispatch_event(target, "change")?;
            Ok(())
        })
    }

    /// `form.requestSubmit()` on the matched form, or on the form owner of the
    /// matched control.
    pub fn submit(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let Some(form) = self.resolve_form_for_submit(target) else {
            return Err(Error::TypeMismatch {
                selector: selector.to_string(),
                expected: "form or form control".into(),
                actual: self.describe_control(target),
            });
        };
        stacker::grow(STACK_RED_ZONE, || self.request_form_submit(form))
    }

    pub fn dispatch(&mut self, selector: &str, event: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        stacker::grow(STACK_RED_ZONE, || {
            self.dispatch_synthetic_event(target, event)?;
            Ok(())
        })
    }

    pub(crate) fn click_node(&mut self, target: NodeId) -> Result<()> {
        if self.dom.element(target).is_some_and(|element| element.disabled) {
            return Ok(());
        }

        let click_outcome = self.dispatch_event(target, "click")?;
        if click_outcome.default_prevented {
            return Ok(());
        }

        if is_submit_control(&self.dom, target) {
            if let Some(form) = self.dom.form_owner(target) {
                self.request_form_submit(form)?;
            }
            return Ok(());
        }

        if let Some(anchor) = self.dom.closest(target, "a[href]")? {
            self.follow_hyperlink(anchor)?;
        }
        Ok(())
    }

    pub(crate) fn request_form_submit(&mut self, form: NodeId) -> Result<()> {
        let skip_validation = self.dom.attr(form, "novalidate").is_some();
        if !skip_validation {
            if let Some(invalid) = self.dom.first_invalid_control(form) {
                let form_label = self.trace_node_label(form);
                let control_label = self.trace_node_label(invalid);
                self.trace_line(format!(
                    "[form] submit blocked {form_label} invalid={control_label}"
                ));
                return Ok(());
            }
        }

        let submit_outcome = self.dispatch_event(form, "submit")?;
        if !submit_outcome.default_prevented {
            self.submit_form_natively(form)?;
        }
        Ok(())
    }

    /// `form.reset()`.
    pub(crate) fn reset_form(&mut self, form: NodeId) -> Result<()> {
        let reset_outcome = self.dispatch_event(form, "reset")?;
        if reset_outcome.default_prevented {
            return Ok(());
        }
        self.dom.reset_form(form)
    }

    fn resolve_form_for_submit(&self, target: NodeId) -> Option<NodeId> {
        if self.dom.tag_name(target) == Some("form") {
            return Some(target);
        }
        self.dom.form_owner(target)
    }

    fn describe_control(&self, node: NodeId) -> String {
        match self.dom.tag_name(node) {
            Some("input") => format!(
                "input[type={}]",
                self.dom
                    .attr(node, "type")
                    .unwrap_or_else(|| "text".to_string())
                    .to_ascii_lowercase()
            ),
            Some(tag) => tag.to_string(),
            None => "non-element".to_string(),
        }
    }
}
