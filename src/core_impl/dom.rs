use super::form_controls::is_submittable_control;
use super::html::{is_void_tag, parse_html};
use super::*;

include!("dom_modules/core_nodes_identity.rs");
include!("dom_modules/text_html_content.rs");
include!("dom_modules/attrs_class_style.rs");
include!("dom_modules/form_control_value_selection.rs");
include!("dom_modules/select_and_option_sync.rs");
include!("dom_modules/class_and_query_basics.rs");
include!("dom_modules/tree_traversal_matching.rs");
include!("dom_modules/dump_misc.rs");
