impl Dom {
    pub(crate) fn new() -> Self {
        let root = Node {
            parent: None,
            children: Vec::new(),
            node_type: NodeType::Document,
        };
        Self {
            nodes: vec![root],
            root: NodeId(0),
            id_index: HashMap::new(),
        }
    }

    pub(crate) fn create_node(&mut self, parent: Option<NodeId>, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent,
            children: Vec::new(),
            node_type,
        });
        if let Some(parent_id) = parent {
            self.nodes[parent_id.0].children.push(id);
        }
        id
    }

    fn new_element(tag_name: String, attrs: HashMap<String, String>) -> Element {
        let flag = |name: &str| attrs.contains_key(name);
        Element {
            value: attrs.get("value").cloned().unwrap_or_default(),
            disabled: flag("disabled"),
            readonly: flag("readonly"),
            required: flag("required"),
            tag_name,
            attrs,
        }
    }

    /// Appends a new element under `parent`. Ids are indexed as the parser
    /// goes, which keeps document order because the parser only appends.
    pub(crate) fn create_element(
        &mut self,
        parent: NodeId,
        tag_name: String,
        attrs: HashMap<String, String>,
    ) -> NodeId {
        let id_attr = attrs.get("id").filter(|id| !id.is_empty()).cloned();
        let node = self.create_node(
            Some(parent),
            NodeType::Element(Self::new_element(tag_name, attrs)),
        );
        if let Some(id_attr) = id_attr {
            self.id_index.entry(id_attr).or_default().push(node);
        }
        node
    }

    pub(crate) fn create_detached_element(&mut self, tag_name: &str) -> NodeId {
        let element = Self::new_element(tag_name.to_ascii_lowercase(), HashMap::new());
        self.create_node(None, NodeType::Element(element))
    }

    pub(crate) fn create_text(&mut self, parent: NodeId, text: String) -> NodeId {
        self.create_node(Some(parent), NodeType::Text(text))
    }

    pub(crate) fn element(&self, node_id: NodeId) -> Option<&Element> {
        match &self.nodes.get(node_id.0)?.node_type {
            NodeType::Element(element) => Some(element),
            _ => None,
        }
    }

    pub(crate) fn element_mut(&mut self, node_id: NodeId) -> Option<&mut Element> {
        match &mut self.nodes.get_mut(node_id.0)?.node_type {
            NodeType::Element(element) => Some(element),
            _ => None,
        }
    }

    pub(crate) fn tag_name(&self, node_id: NodeId) -> Option<&str> {
        self.element(node_id).map(|e| e.tag_name.as_str())
    }

    pub(crate) fn parent(&self, node_id: NodeId) -> Option<NodeId> {
        self.nodes.get(node_id.0)?.parent
    }

    /// The first element carrying `id`, in document order.
    pub(crate) fn by_id(&self, id: &str) -> Option<NodeId> {
        self.id_index.get(id)?.first().copied()
    }

    pub(crate) fn by_id_all(&self, id: &str) -> Vec<NodeId> {
        self.id_index.get(id).cloned().unwrap_or_default()
    }

    /// Recomputes the id index from the attached tree. Detached nodes drop
    /// out and duplicates stay in document order.
    pub(crate) fn rebuild_id_index(&mut self) {
        let mut index: HashMap<String, Vec<NodeId>> = HashMap::new();
        for node in self.all_element_nodes() {
            if let Some(id) = self.attr(node, "id").filter(|id| !id.is_empty()) {
                index.entry(id).or_default().push(node);
            }
        }
        self.id_index = index;
    }
}
