use super::*;

mod dom_and_selector;
mod harness_actions;
mod pokedex_and_render;

fn site_page(path: &str) -> &'static str {
    site::embedded_asset(path).unwrap_or_default()
}

fn load_page(path: &str, wiring: &Wiring) -> Result<Harness> {
    Harness::load(
        &format!("http://127.0.0.1:8080/{path}"),
        site_page(path),
        wiring,
    )
}
