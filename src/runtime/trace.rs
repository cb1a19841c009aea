use super::*;

const DEFAULT_LOG_LIMIT: usize = 10_000;

#[derive(Debug, Clone)]
pub(super) struct TraceState {
    pub(super) enabled: bool,
    logs: VecDeque<String>,
    log_limit: usize,
}

impl Default for TraceState {
    fn default() -> Self {
        Self {
            enabled: false,
            logs: VecDeque::new(),
            log_limit: DEFAULT_LOG_LIMIT,
        }
    }
}

impl Harness {
    pub fn enable_trace(&mut self, enabled: bool) {
        self.trace_state.enabled = enabled;
    }

    pub fn take_trace_logs(&mut self) -> Vec<String> {
        self.trace_state.logs.drain(..).collect()
    }

    pub fn set_trace_log_limit(&mut self, max_entries: usize) -> Result<()> {
        if max_entries == 0 {
            return Err(Error::Config(
                "set_trace_log_limit requires at least 1 entry".into(),
            ));
        }
        self.trace_state.log_limit = max_entries;
        while self.trace_state.logs.len() > self.trace_state.log_limit {
            self.trace_state.logs.pop_front();
        }
        Ok(())
    }

    pub(crate) fn trace_line(&mut self, line: String) {
        tracing::debug!(target: "pokemon_index::harness", "{line}");
        if !self.trace_state.enabled {
            return;
        }
        if self.trace_state.logs.len() >= self.trace_state.log_limit {
            self.trace_state.logs.pop_front();
        }
        self.trace_state.logs.push_back(line);
    }

    pub(crate) fn trace_node_label(&self, node: NodeId) -> String {
        if let Some(id) = self.dom.attr(node, "id") {
            if !id.is_empty() {
                return format!("#{id}");
            }
        }
        self.dom
            .tag_name(node)
            .map(ToOwned::to_owned)
            .unwrap_or_else(|| format!("node-{}", node.0))
    }
}
