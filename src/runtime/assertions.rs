use super::*;

impl Harness {
    pub fn text_content(&self, selector: &str) -> Result<String> {
        let target = self.select_one(selector)?;
        Ok(self.dom.text_content(target))
    }

    /// Text of every match, in document order.
    pub fn text_contents(&self, selector: &str) -> Result<Vec<String>> {
        Ok(self
            .dom
            .query_selector_all(selector)?
            .into_iter()
            .map(|node| self.dom.text_content(node))
            .collect())
    }

    pub fn value(&self, selector: &str) -> Result<String> {
        let target = self.select_one(selector)?;
        self.dom.value(target)
    }

    pub fn count(&self, selector: &str) -> Result<usize> {
        Ok(self.dom.query_selector_all(selector)?.len())
    }

    pub fn attr(&self, selector: &str, name: &str) -> Result<Option<String>> {
        let target = self.select_one(selector)?;
        Ok(self.dom.attr(target, name))
    }

    /// Inline style value, e.g. `style_property("#form-message", "color")`.
    pub fn style_property(&self, selector: &str, property: &str) -> Result<String> {
        let target = self.select_one(selector)?;
        self.dom.style_get(target, property)
    }

    pub fn dump_dom(&self, selector: &str) -> Result<String> {
        let target = self.select_one(selector)?;
        Ok(self.dom.dump_node(target))
    }

    pub fn assert_text(&self, selector: &str, expected: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.text_content(target);
        if actual != expected {
            return Err(Error::AssertionFailed {
                selector: selector.to_string(),
                expected: expected.to_string(),
                actual,
                dom_snippet: self.dom.snippet(target),
            });
        }
        Ok(())
    }

    pub fn assert_text_contains(&self, selector: &str, expected: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.text_content(target);
        if !actual.contains(expected) {
            return Err(Error::AssertionFailed {
                selector: selector.to_string(),
                expected: format!("text containing {expected:?}"),
                actual,
                dom_snippet: self.dom.snippet(target),
            });
        }
        Ok(())
    }

    pub fn assert_value(&self, selector: &str, expected: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.value(target)?;
        if actual != expected {
            return Err(Error::AssertionFailed {
                selector: selector.to_string(),
                expected: expected.to_string(),
                actual,
                dom_snippet: self.dom.snippet(target),
            });
        }
        Ok(())
    }

    pub fn assert_count(&self, selector: &str, expected: usize) -> Result<()> {
        let matched = self.dom.query_selector_all(selector)?;
        if matched.len() != expected {
            let dom_snippet = matched
                .first()
                .map(|node| self.dom.snippet(*node))
                .unwrap_or_default();
            return Err(Error::AssertionFailed {
                selector: selector.to_string(),
                expected: expected.to_string(),
                actual: matched.len().to_string(),
                dom_snippet,
            });
        }
        Ok(())
    }

    pub fn assert_exists(&self, selector: &str) -> Result<()> {
        let _ = self.select_one(selector)?;
        Ok(())
    }

    pub(crate) fn select_one(&self, selector: &str) -> Result<NodeId> {
        self.dom
            .query_selector(selector)?
            .ok_or_else(|| Error::SelectorNotFound(selector.to_string()))
    }
}
