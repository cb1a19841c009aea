use super::*;

mod dom;
mod form_controls;
mod html;

pub(crate) use form_controls::{is_submit_control, is_text_entry_control};

pub(crate) fn parse_html(html: &str) -> Result<Dom> {
    html::parse_html(html)
}
