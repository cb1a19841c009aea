impl Dom {
    /// Seeds `value` for controls whose initial value does not come from a
    /// `value` attribute.
    pub(crate) fn initialize_form_control_values(&mut self) -> Result<()> {
        for node in self.all_element_nodes() {
            match self.tag_name(node) {
                Some("textarea") => {
                    let text = self.text_content(node);
                    self.store_value(node, text)?;
                }
                Some("select") => self.sync_select_value(node)?,
                _ => {}
            }
        }
        Ok(())
    }

    // The `selected` attribute is the default selectedness; only the select's
    // current value moves when the user picks an option.
    pub(crate) fn set_select_value(&mut self, select: NodeId, requested: &str) -> Result<()> {
        if self.tag_name(select) != Some("select") {
            return Err(Error::Dom("set value target is not a select".into()));
        }
        let value = if self.select_has_option(select, requested)? {
            requested.to_string()
        } else {
            String::new()
        };
        self.store_value(select, value)
    }

    pub(crate) fn select_has_option(&self, select: NodeId, value: &str) -> Result<bool> {
        for option in self.select_options(select) {
            if self.option_value(option)? == value {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Resets the select to its default option: the first `selected` one,
    /// else the first option, else nothing.
    pub(crate) fn sync_select_value(&mut self, select: NodeId) -> Result<()> {
        if self.tag_name(select) != Some("select") {
            return Err(Error::Dom("select value target is not a select".into()));
        }
        let options = self.select_options(select);
        let default = options
            .iter()
            .copied()
            .find(|option| self.attr(*option, "selected").is_some())
            .or_else(|| options.first().copied());
        let value = match default {
            Some(option) => self.option_value(option)?,
            None => String::new(),
        };
        self.store_value(select, value)
    }

    fn store_value(&mut self, node: NodeId, value: String) -> Result<()> {
        self.element_mut(node)
            .ok_or_else(|| Error::Dom("value target is not an element".into()))?
            .value = value;
        Ok(())
    }

    /// Options anywhere under the select, `<optgroup>` children included.
    fn select_options(&self, select: NodeId) -> Vec<NodeId> {
        let mut nodes = Vec::new();
        self.collect_elements_descendants_dfs(select, &mut nodes);
        nodes.retain(|node| self.tag_name(*node) == Some("option"));
        nodes
    }

    /// The `value` attribute, or the option's text with whitespace collapsed.
    fn option_value(&self, option: NodeId) -> Result<String> {
        let element = self
            .element(option)
            .ok_or_else(|| Error::Dom("option target is not an element".into()))?;
        Ok(match element.attrs.get("value") {
            Some(value) => value.clone(),
            None => self
                .text_content(option)
                .split_ascii_whitespace()
                .collect::<Vec<_>>()
                .join(" "),
        })
    }
}
