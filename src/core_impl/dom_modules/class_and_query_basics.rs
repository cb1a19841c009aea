impl Dom {
    pub(crate) fn query_selector(&self, selector: &str) -> Result<Option<NodeId>> {
        Ok(self.query_selector_all(selector)?.into_iter().next())
    }

    /// Every match in document order, each element once.
    pub(crate) fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>> {
        let list = parse_selector(selector)?;
        if let Some(id) = list.lone_id() {
            return Ok(self.by_id_all(id));
        }

        let mut candidates = Vec::new();
        self.collect_elements_dfs(self.root, &mut candidates);
        candidates.retain(|node| self.matches_list(*node, &list));
        Ok(candidates)
    }

    pub(crate) fn query_selector_from(
        &self,
        root: NodeId,
        selector: &str,
    ) -> Result<Option<NodeId>> {
        Ok(self.query_selector_all_from(root, selector)?.into_iter().next())
    }

    /// Matches among the descendants of `root`. Combinators may still look
    /// above `root` the way `element.querySelectorAll` does.
    pub(crate) fn query_selector_all_from(
        &self,
        root: NodeId,
        selector: &str,
    ) -> Result<Vec<NodeId>> {
        let list = parse_selector(selector)?;
        let mut candidates = Vec::new();
        self.collect_elements_descendants_dfs(root, &mut candidates);
        candidates.retain(|node| self.matches_list(*node, &list));
        Ok(candidates)
    }

    /// The nearest inclusive ancestor matching `selector`.
    pub(crate) fn closest(&self, node_id: NodeId, selector: &str) -> Result<Option<NodeId>> {
        if self.element(node_id).is_none() {
            return Ok(None);
        }
        let list = parse_selector(selector)?;
        Ok(std::iter::successors(Some(node_id), |node| self.parent(*node))
            .find(|node| self.matches_list(*node, &list)))
    }
}
