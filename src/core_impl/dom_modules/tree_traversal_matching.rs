impl Dom {
    /// Elements in document order, starting with `node_id` itself when it is
    /// one.
    pub(crate) fn collect_elements_dfs(&self, node_id: NodeId, out: &mut Vec<NodeId>) {
        let mut stack = vec![node_id];
        while let Some(current) = stack.pop() {
            if self.element(current).is_some() {
                out.push(current);
            }
            stack.extend(self.nodes[current.0].children.iter().rev().copied());
        }
    }

    pub(crate) fn collect_elements_descendants_dfs(&self, node_id: NodeId, out: &mut Vec<NodeId>) {
        for child in &self.nodes[node_id.0].children {
            self.collect_elements_dfs(*child, out);
        }
    }

    pub(crate) fn all_element_nodes(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_elements_dfs(self.root, &mut out);
        out
    }

    fn previous_element_sibling(&self, node_id: NodeId) -> Option<NodeId> {
        let parent = self.parent(node_id)?;
        let siblings = &self.nodes[parent.0].children;
        let pos = siblings.iter().position(|id| *id == node_id)?;
        siblings[..pos]
            .iter()
            .rev()
            .copied()
            .find(|sibling| self.element(*sibling).is_some())
    }

    pub(crate) fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        if self.nodes.get(child.0).is_none() || self.nodes.get(parent.0).is_none() {
            return Err(Error::Dom("appendChild node is invalid".into()));
        }
        if matches!(self.nodes[parent.0].node_type, NodeType::Text(_)) {
            return Err(Error::Dom("appendChild target cannot have children".into()));
        }
        if child == self.root || child == parent {
            return Err(Error::Dom("invalid appendChild node".into()));
        }

        // The parent must not sit inside the child's subtree.
        let mut cursor = Some(parent);
        while let Some(node) = cursor {
            if node == child {
                return Err(Error::Dom("appendChild would create a cycle".into()));
            }
            cursor = self.parent(node);
        }

        if let Some(old_parent) = self.parent(child) {
            self.nodes[old_parent.0].children.retain(|id| *id != child);
        }
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
        self.rebuild_id_index();
        Ok(())
    }

    fn compound_matches(&self, node_id: NodeId, compound: &Compound) -> bool {
        self.element(node_id)
            .is_some_and(|element| compound.matches(element))
    }

    pub(crate) fn matches_list(&self, node_id: NodeId, list: &SelectorList) -> bool {
        list.0.iter().any(|complex| {
            self.compound_matches(node_id, &complex.subject)
                && self.matches_links(node_id, &complex.links)
        })
    }

    /// Walks the remaining links leftwards from `anchor`, which already
    /// matched. Descendant and later-sibling links try every candidate, so
    /// a near match that fails further left does not hide a farther one.
    fn matches_links(&self, anchor: NodeId, links: &[(Combinator, Compound)]) -> bool {
        let Some(((combinator, compound), rest)) = links.split_first() else {
            return true;
        };
        let accepts = |candidate: NodeId| {
            self.compound_matches(candidate, compound) && self.matches_links(candidate, rest)
        };

        match combinator {
            Combinator::Child => self.parent(anchor).is_some_and(accepts),
            Combinator::NextSibling => self.previous_element_sibling(anchor).is_some_and(accepts),
            Combinator::Descendant => {
                std::iter::successors(self.parent(anchor), |node| self.parent(*node)).any(accepts)
            }
            Combinator::LaterSibling => std::iter::successors(
                self.previous_element_sibling(anchor),
                |node| self.previous_element_sibling(*node),
            )
            .any(accepts),
        }
    }
}
