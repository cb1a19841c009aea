impl Dom {
    pub(crate) fn value(&self, node_id: NodeId) -> Result<String> {
        let element = self
            .element(node_id)
            .ok_or_else(|| Error::Dom("value target is not an element".into()))?;
        Ok(element.value.clone())
    }

    pub(crate) fn set_value(&mut self, node_id: NodeId, value: &str) -> Result<()> {
        if self.tag_name(node_id) == Some("select") {
            return self.set_select_value(node_id, value);
        }

        let element = self
            .element_mut(node_id)
            .ok_or_else(|| Error::Dom("value target is not an element".into()))?;
        element.value = value.to_string();
        Ok(())
    }

    pub(crate) fn find_ancestor_by_tag(&self, node_id: NodeId, tag: &str) -> Option<NodeId> {
        let mut cursor = self.parent(node_id);
        while let Some(current) = cursor {
            if self.tag_name(current) == Some(tag) {
                return Some(current);
            }
            cursor = self.parent(current);
        }
        None
    }

    /// Form owner: the `form` attribute when it names a form, else the
    /// nearest `form` ancestor.
    pub(crate) fn form_owner(&self, node_id: NodeId) -> Option<NodeId> {
        if let Some(form_id) = self.attr(node_id, "form") {
            return self
                .by_id(&form_id)
                .filter(|form| self.tag_name(*form) == Some("form"));
        }
        self.find_ancestor_by_tag(node_id, "form")
    }

    pub(crate) fn form_controls(&self, form: NodeId) -> Vec<NodeId> {
        let mut nodes = Vec::new();
        self.collect_elements_descendants_dfs(form, &mut nodes);
        nodes
            .into_iter()
            .filter(|node| is_submittable_control(self, *node))
            .collect()
    }

    /// First enabled control that fails the `required` constraint.
    pub(crate) fn first_invalid_control(&self, form: NodeId) -> Option<NodeId> {
        self.form_controls(form).into_iter().find(|node| {
            self.element(*node).is_some_and(|element| {
                element.required && !element.disabled && element.value.is_empty()
            })
        })
    }

    /// Name/value pairs of a form submission, in tree order.
    pub(crate) fn form_data(&self, form: NodeId) -> Vec<(String, String)> {
        self.form_controls(form)
            .into_iter()
            .filter_map(|node| {
                let element = self.element(node)?;
                if element.disabled {
                    return None;
                }
                let name = element.attrs.get("name")?;
                if name.is_empty() {
                    return None;
                }
                Some((name.clone(), element.value.clone()))
            })
            .collect()
    }

    pub(crate) fn reset_form(&mut self, form: NodeId) -> Result<()> {
        for node in self.form_controls(form) {
            match self.tag_name(node) {
                Some("select") => self.sync_select_value(node)?,
                Some("textarea") => {
                    let text = self.text_content(node);
                    if let Some(element) = self.element_mut(node) {
                        element.value = text;
                    }
                }
                _ => {
                    if let Some(element) = self.element_mut(node) {
                        element.value = element.attrs.get("value").cloned().unwrap_or_default();
                    }
                }
            }
        }
        Ok(())
    }
}
