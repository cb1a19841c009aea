impl Dom {
    pub(crate) fn attr(&self, node_id: NodeId, name: &str) -> Option<String> {
        self.element(node_id)
            .and_then(|element| element.attrs.get(&name.to_ascii_lowercase()).cloned())
    }

    pub(crate) fn set_attr(&mut self, node_id: NodeId, name: &str, value: &str) -> Result<()> {
        let name = name.to_ascii_lowercase();
        let element = self
            .element_mut(node_id)
            .ok_or_else(|| Error::Dom("setAttribute target is not an element".into()))?;
        match name.as_str() {
            "required" => element.required = true,
            "disabled" => element.disabled = true,
            "readonly" => element.readonly = true,
            _ => {}
        }
        element.attrs.insert(name.clone(), value.to_string());
        if name == "id" {
            self.rebuild_id_index();
        }
        Ok(())
    }

    pub(crate) fn style_get(&self, node_id: NodeId, key: &str) -> Result<String> {
        let element = self
            .element(node_id)
            .ok_or_else(|| Error::Dom("style target is not an element".into()))?;
        let style = InlineStyle::parse(element.attrs.get("style").map(String::as_str));
        Ok(style
            .get(&css_property_name(key))
            .unwrap_or_default()
            .to_string())
    }

    /// Sets one inline style property. An empty value removes it.
    pub(crate) fn style_set(&mut self, node_id: NodeId, key: &str, value: &str) -> Result<()> {
        let element = self
            .element_mut(node_id)
            .ok_or_else(|| Error::Dom("style target is not an element".into()))?;
        let mut style = InlineStyle::parse(element.attrs.get("style").map(String::as_str));
        style.set(css_property_name(key), value);
        element.attrs.insert("style".to_string(), style.to_attr());
        Ok(())
    }
}

// `backgroundColor` and `background-color` name the same property.
fn css_property_name(key: &str) -> String {
    key.trim()
        .chars()
        .flat_map(|ch| {
            let dash = ch.is_ascii_uppercase().then_some('-');
            dash.into_iter().chain([ch.to_ascii_lowercase()])
        })
        .collect()
}
