use super::*;
use crate::pokedex::TypeFilter;
use crate::render::{load_pokemon, render_cards, render_search_results};

pub(super) fn install(harness: &mut Harness, wiring: &Wiring) -> Result<()> {
    wire_search(harness, wiring);
    load_pokemon(&mut harness.dom, wiring.pokedex.entries())?;
    wire_type_filter(harness, wiring);
    Ok(())
}

fn wire_search(harness: &mut Harness, wiring: &Wiring) {
    let (Some(input), Some(panel)) = (
        element_by_id(harness, "search-input"),
        element_by_id(harness, "search-results"),
    ) else {
        return;
    };
    let pokedex = Arc::clone(&wiring.pokedex);
    let case_sensitive = wiring.seeded_with(Defect::CaseSensitiveSearch);

    harness.add_event_listener(input, "input", move |h, _| {
        let query = h.dom.value(input)?;
        let matches = if case_sensitive {
            pokedex.search_case_sensitive(&query)
        } else {
            pokedex.search(&query)
        };
        render_search_results(&mut h.dom, panel, &query, &matches)
    });
}

fn wire_type_filter(harness: &mut Harness, wiring: &Wiring) {
    let filter_id = wiring.lookup(Defect::TypeFilterId, "type-filter", "pokemon-filter");
    let (Some(select), Some(container)) = (
        element_by_id(harness, filter_id),
        element_by_id(harness, "pokemon-container"),
    ) else {
        return;
    };
    let pokedex = Arc::clone(&wiring.pokedex);

    harness.add_event_listener(select, "change", move |h, _| {
        let filter = TypeFilter::from_value(&h.dom.value(select)?);
        let entries = pokedex.filter(&filter);
        render_cards(&mut h.dom, container, &entries)
    });
}
