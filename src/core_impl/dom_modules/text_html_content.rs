impl Dom {
    /// Concatenated text of every descendant text node, in document order.
    pub(crate) fn text_content(&self, node_id: NodeId) -> String {
        let mut out = String::new();
        let mut stack = vec![node_id];
        while let Some(current) = stack.pop() {
            let Some(node) = self.nodes.get(current.0) else {
                continue;
            };
            match &node.node_type {
                NodeType::Text(text) => out.push_str(text),
                NodeType::Document | NodeType::Element(_) => {
                    stack.extend(node.children.iter().rev().copied());
                }
            }
        }
        out
    }

    pub(crate) fn set_text_content(&mut self, node_id: NodeId, value: &str) -> Result<()> {
        self.clear_children(node_id)?;
        if !value.is_empty() {
            self.create_text(node_id, value.to_string());
        }
        Ok(())
    }

    /// Replaces the children of `node_id` with the parsed `html`.
    pub(crate) fn set_inner_html(&mut self, node_id: NodeId, html: &str) -> Result<()> {
        if self.element(node_id).is_none() {
            return Err(Error::Dom("innerHTML target is not an element".into()));
        }
        let fragment = parse_html(html)?;
        self.detach_children(node_id);
        for child in &fragment.nodes[fragment.root.0].children {
            self.graft(&fragment, *child, node_id);
        }
        self.rebuild_id_index();
        Ok(())
    }

    pub(crate) fn clear_children(&mut self, node_id: NodeId) -> Result<()> {
        if self.element(node_id).is_none() {
            return Err(Error::Dom("clear target is not an element".into()));
        }
        self.detach_children(node_id);
        self.rebuild_id_index();
        Ok(())
    }

    fn detach_children(&mut self, node_id: NodeId) {
        let old_children = std::mem::take(&mut self.nodes[node_id.0].children);
        for child in old_children {
            self.nodes[child.0].parent = None;
        }
    }

    /// Copies `source_node` and its subtree from another document under
    /// `parent`.
    fn graft(&mut self, source: &Dom, source_node: NodeId, parent: NodeId) {
        let copied = self.create_node(Some(parent), source.nodes[source_node.0].node_type.clone());
        for child in &source.nodes[source_node.0].children {
            self.graft(source, *child, copied);
        }
    }
}
