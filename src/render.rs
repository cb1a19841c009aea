//! Card and search-result rendering into a page document.

use super::*;
use crate::pokedex::Pokemon;

pub(crate) fn create_pokemon_card(dom: &mut Dom, pokemon: &Pokemon) -> Result<NodeId> {
    let card = dom.create_detached_element("div");
    dom.set_attr(card, "class", "pokemon-card")?;
    let kind = pokemon.kind.key();
    let markup = format!(
        r#"<img src="{src}" alt="{alt}"><h3>{name}</h3><span class="pokemon-type type-{kind}">{kind}</span>"#,
        src = escape_attr(&pokemon.img),
        alt = escape_attr(&pokemon.name),
        name = escape_text(&pokemon.name),
    );
    dom.set_inner_html(card, &markup)?;
    Ok(card)
}

/// Replaces the container's children with one card per entry, in order.
pub(crate) fn render_cards(dom: &mut Dom, container: NodeId, entries: &[&Pokemon]) -> Result<()> {
    dom.clear_children(container)?;
    for pokemon in entries {
        let card = create_pokemon_card(dom, pokemon)?;
        dom.append_child(container, card)?;
    }
    Ok(())
}

pub(crate) fn load_pokemon(dom: &mut Dom, entries: &[Pokemon]) -> Result<()> {
    let Some(container) = dom.by_id("pokemon-container") else {
        return Ok(());
    };
    let entries = entries.iter().collect::<Vec<_>>();
    render_cards(dom, container, &entries)
}

pub(crate) fn render_search_results(
    dom: &mut Dom,
    panel: NodeId,
    query: &str,
    matches: &[&Pokemon],
) -> Result<()> {
    dom.clear_children(panel)?;
    if query.is_empty() {
        return Ok(());
    }
    if matches.is_empty() {
        return dom.set_inner_html(panel, "<p>No Pokemon found</p>");
    }
    for pokemon in matches {
        let item = dom.create_detached_element("div");
        dom.set_text_content(item, &pokemon.name)?;
        dom.style_set(item, "padding", "0.5rem")?;
        dom.style_set(item, "cursor", "pointer")?;
        dom.style_set(item, "borderBottom", "1px solid #ddd")?;
        dom.append_child(panel, item)?;
    }
    Ok(())
}
