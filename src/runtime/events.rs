use super::*;

pub(crate) type Handler = Rc<dyn Fn(&mut Harness, &mut EventState) -> Result<()>>;

#[derive(Debug, Clone)]
pub struct EventState {
    pub(crate) event_type: String,
    pub(crate) target: NodeId,
    pub(crate) current_target: NodeId,
    pub(crate) bubbles: bool,
    pub(crate) default_prevented: bool,
    pub(crate) propagation_stopped: bool,
    pub(crate) immediate_propagation_stopped: bool,
}

impl EventState {
    pub(crate) fn new(event_type: &str, target: NodeId) -> Self {
        Self {
            event_type: event_type.to_string(),
            target,
            current_target: target,
            bubbles: true,
            default_prevented: false,
            propagation_stopped: false,
            immediate_propagation_stopped: false,
        }
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn stop_immediate_propagation(&mut self) {
        self.propagation_stopped = true;
        self.immediate_propagation_stopped = true;
    }
}

#[derive(Default, Clone)]
pub(crate) struct ListenerStore {
    map: HashMap<NodeId, HashMap<String, Vec<Handler>>>,
}

impl ListenerStore {
    pub(crate) fn add(&mut self, node_id: NodeId, event: &str, handler: Handler) {
        self.map
            .entry(node_id)
            .or_default()
            .entry(event.to_string())
            .or_default()
            .push(handler);
    }

    pub(crate) fn get(&self, node_id: NodeId, event: &str) -> Vec<Handler> {
        self.map
            .get(&node_id)
            .and_then(|events| events.get(event))
            .cloned()
            .unwrap_or_default()
    }
}

impl Harness {
    /// Registers `handler` for `event` on the first element matching
    /// `selector`.
    pub fn add_listener<F>(&mut self, selector: &str, event: &str, handler: F) -> Result<()>
    where
        F: Fn(&mut Harness, &mut EventState) -> Result<()> + 'static,
    {
        let target = self.select_one(selector)?;
        self.add_event_listener(target, event, handler);
        Ok(())
    }

    pub(crate) fn add_event_listener<F>(&mut self, node_id: NodeId, event: &str, handler: F)
    where
        F: Fn(&mut Harness, &mut EventState) -> Result<()> + 'static,
    {
        self.listeners.add(node_id, event, Rc::new(handler));
    }

    /// Runs the target's listeners, then bubbles to each ancestor up to the
    /// document.
    pub(crate) fn dispatch_event(&mut self, target: NodeId, event_type: &str) -> Result<EventState> {
        let mut event = EventState::new(event_type, target);
        self.dispatch_prepared_event(&mut event)?;
        Ok(event)
    }

    /// Synthetic events do not bubble, like `new Event(type)`.
    pub(crate) fn dispatch_synthetic_event(
        &mut self,
        target: NodeId,
        event_type: &str,
    ) -> Result<EventState> {
        let mut event = EventState::new(event_type, target);
        event.bubbles = false;
        self.dispatch_prepared_event(&mut event)?;
        Ok(event)
    }

    fn dispatch_prepared_event(&mut self, event: &mut EventState) -> Result<()> {
        let mut path = Vec::new();
        let mut cursor = Some(event.target);
        while let Some(node) = cursor {
            path.push(node);
            cursor = self.dom.parent(node);
        }

        for (depth, node) in path.into_iter().enumerate() {
            if depth > 0 && !event.bubbles {
                break;
            }
            event.current_target = node;
            self.invoke_listeners(node, event)?;
            if event.propagation_stopped {
                self.trace_event_done(event, "propagation_stopped");
                return Ok(());
            }
        }

        self.trace_event_done(event, "completed");
        Ok(())
    }

    fn invoke_listeners(&mut self, node_id: NodeId, event: &mut EventState) -> Result<()> {
        let listeners = self.listeners.get(node_id, &event.event_type);
        for handler in listeners {
            if self.trace_state.enabled {
                let target_label = self.trace_node_label(event.target);
                let current_label = self.trace_node_label(event.current_target);
                self.trace_line(format!(
                    "[event] {} target={} current={} default_prevented={}",
                    event.event_type, target_label, current_label, event.default_prevented
                ));
            }
            handler(self, event)?;
            if event.immediate_propagation_stopped {
                break;
            }
        }
        Ok(())
    }

    fn trace_event_done(&mut self, event: &EventState, outcome: &str) {
        if !self.trace_state.enabled {
            return;
        }
        let target_label = self.trace_node_label(event.target);
        self.trace_line(format!(
            "[event] done {} target={} outcome={} default_prevented={}",
            event.event_type, target_label, outcome, event.default_prevented
        ));
    }
}
