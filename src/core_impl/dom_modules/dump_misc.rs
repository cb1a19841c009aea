const SNIPPET_MAX_CHARS: usize = 200;

impl Dom {
    /// Serializes a node and its subtree. Attributes are written in name
    /// order so the output is stable.
    pub(crate) fn dump_node(&self, node_id: NodeId) -> String {
        let mut out = String::new();
        self.write_node(node_id, &mut out);
        out
    }

    pub(crate) fn snippet(&self, node_id: NodeId) -> String {
        ellipsize(&self.dump_node(node_id), SNIPPET_MAX_CHARS)
    }

    fn write_node(&self, node_id: NodeId, out: &mut String) {
        let Some(node) = self.nodes.get(node_id.0) else {
            return;
        };
        let element = match &node.node_type {
            NodeType::Text(text) => {
                out.push_str(&escape_text(text));
                return;
            }
            NodeType::Document => {
                for child in &node.children {
                    self.write_node(*child, out);
                }
                return;
            }
            NodeType::Element(element) => element,
        };

        let tag = element.tag_name.as_str();
        out.push('<');
        out.push_str(tag);
        let mut attrs = element.attrs.iter().collect::<Vec<_>>();
        attrs.sort_unstable_by(|(left, _), (right, _)| left.cmp(right));
        for (name, value) in attrs {
            out.push(' ');
            out.push_str(name);
            if !value.is_empty() {
                out.push_str(&format!("=\"{}\"", escape_attr(value)));
            }
        }
        out.push('>');
        if is_void_tag(tag) {
            return;
        }

        let verbatim = matches!(tag, "script" | "style");
        for child in &node.children {
            match &self.nodes[child.0].node_type {
                NodeType::Text(text) if verbatim => out.push_str(text),
                _ => self.write_node(*child, out),
            }
        }
        out.push_str(&format!("</{tag}>"));
    }
}
