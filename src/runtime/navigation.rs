use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationNavigationKind {
    HrefSet,
    Hyperlink,
    FormSubmit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationNavigation {
    pub kind: LocationNavigationKind,
    pub from: String,
    pub to: String,
}

impl Harness {
    pub fn url(&self) -> String {
        self.document_url.to_string()
    }

    pub fn take_location_navigations(&mut self) -> Vec<LocationNavigation> {
        std::mem::take(&mut self.navigations)
    }

    /// Id of the element last scrolled into view by an in-page link.
    pub fn scrolled_into_view(&self) -> Option<String> {
        self.scrolled_to.map(|node| self.trace_node_label(node))
    }

    /// Whether an action asked to leave this document and nothing has
    /// followed the request yet.
    pub fn has_pending_navigation(&self) -> bool {
        self.pending_navigation.is_some()
    }

    pub(crate) fn take_pending_navigation(&mut self) -> Option<Url> {
        self.pending_navigation.take()
    }

    pub(crate) fn resolve_url(&self, href: &str) -> Result<Url> {
        match self.document_url.join(href) {
            Ok(url) => Ok(url),
            Err(url::ParseError::RelativeUrlWithCannotBeABaseBase) => Ok(Url::parse(href)?),
            Err(err) => Err(Error::Navigation(format!("cannot resolve {href}: {err}"))),
        }
    }

    /// `location.href = href`.
    pub(crate) fn set_location_href(&mut self, href: &str) -> Result<()> {
        let to = self.resolve_url(href)?;
        self.navigate_location(LocationNavigationKind::HrefSet, to);
        Ok(())
    }

    pub(crate) fn scroll_into_view(&mut self, node: NodeId) {
        self.scrolled_to = Some(node);
        let label = self.trace_node_label(node);
        self.trace_line(format!("[scroll] into view {label}"));
    }

    fn navigate_location(&mut self, kind: LocationNavigationKind, to: Url) {
        let from = self.document_url.to_string();
        self.trace_line(format!("[navigation] {kind:?} {from} -> {to}"));
        self.navigations.push(LocationNavigation {
            kind,
            from,
            to: to.to_string(),
        });
        self.pending_navigation = Some(to);
    }

    pub(crate) fn follow_hyperlink(&mut self, anchor: NodeId) -> Result<()> {
        let Some(href) = self.dom.attr(anchor, "href") else {
            return Ok(());
        };
        let to = self.resolve_url(&href)?;

        // Fragment-only moves stay on the current document.
        let mut current = self.document_url.clone();
        current.set_fragment(to.fragment());
        if current == to {
            self.document_url = to;
            return Ok(());
        }

        self.navigate_location(LocationNavigationKind::Hyperlink, to);
        Ok(())
    }

    /// Native submission: the form's `action` (or the document URL) with the
    /// named control values as its query.
    pub(crate) fn submit_form_natively(&mut self, form: NodeId) -> Result<()> {
        let action = self
            .dom
            .attr(form, "action")
            .filter(|action| !action.trim().is_empty());
        let mut to = match action {
            Some(action) => self.resolve_url(&action)?,
            None => self.document_url.clone(),
        };
        to.set_fragment(None);

        let method = self
            .dom
            .attr(form, "method")
            .unwrap_or_default()
            .to_ascii_lowercase();
        if method != "post" {
            let data = self.dom.form_data(form);
            to.query_pairs_mut().clear().extend_pairs(data);
        }

        self.navigate_location(LocationNavigationKind::FormSubmit, to);
        Ok(())
    }
}
