use super::*;
use crate::core_impl::parse_html;
use crate::render::{load_pokemon, render_cards, render_search_results};

fn names(entries: &[&Pokemon]) -> Vec<String> {
    entries.iter().map(|pokemon| pokemon.name.clone()).collect()
}

#[test]
fn builtin_pokedex_has_twelve_entries_with_artwork_urls() {
    let pokedex = Pokedex::builtin();
    assert_eq!(pokedex.len(), 12);
    assert!(!pokedex.is_empty());
    let pikachu = &pokedex.entries()[3];
    assert_eq!(pikachu.id, 25);
    assert_eq!(pikachu.kind, PokemonType::Electric);
    assert!(pikachu.img.ends_with("/official-artwork/25.png"));
}

#[test]
fn search_ignores_case_and_unicode_composition() {
    let pokedex = Pokedex::new(vec![
        Pokemon::new(25, "Pikachu", PokemonType::Electric),
        Pokemon::new(669, "Flabe\u{301}be\u{301}", PokemonType::Psychic),
        Pokemon::new(4, "Charmander", PokemonType::Fire),
    ]);

    assert_eq!(names(&pokedex.search("pikachu")), vec!["Pikachu"]);
    assert_eq!(names(&pokedex.search("PIKA")), vec!["Pikachu"]);
    assert_eq!(names(&pokedex.search("flab\u{e9}b\u{e9}")).len(), 1);
    assert_eq!(names(&pokedex.search("a")).len(), 3);
    assert!(pokedex.search("").is_empty());
    assert!(pokedex.search("zzz").is_empty());
}

#[test]
fn case_sensitive_search_misses_lowercase_queries() {
    let pokedex = Pokedex::builtin();
    assert!(pokedex.search_case_sensitive("pikachu").is_empty());
    assert_eq!(names(&pokedex.search_case_sensitive("Pika")), vec!["Pikachu"]);
}

#[test]
fn type_filter_keeps_order_and_all_returns_everything() {
    let pokedex = Pokedex::builtin();
    let fire = pokedex.filter(&TypeFilter::from_value("fire"));
    assert_eq!(
        names(&fire),
        vec!["Charmander", "Eevee", "Snorlax", "Charizard"]
    );
    assert!(fire.iter().all(|pokemon| pokemon.kind == PokemonType::Fire));
    assert_eq!(pokedex.filter(&TypeFilter::from_value("all")).len(), 12);
    assert!(pokedex.filter(&TypeFilter::from_value("dragon")).is_empty());
}

#[test]
fn pokemon_types_parse_from_their_keys() -> Result<()> {
    for kind in PokemonType::ALL {
        assert_eq!(kind.key().parse::<PokemonType>()?, kind);
        assert_eq!(kind.to_string(), kind.key());
    }
    assert!(matches!("Fire".parse::<PokemonType>(), Err(Error::Config(_))));
    Ok(())
}

#[test]
fn pokemon_serializes_kind_as_type() -> Result<()> {
    let pokemon = Pokemon::new(7, "Squirtle", PokemonType::Water);
    let json = serde_json::to_value(&pokemon).map_err(|err| Error::Config(err.to_string()))?;
    assert_eq!(json["type"], "water");
    assert_eq!(json["name"], "Squirtle");
    Ok(())
}

#[test]
fn load_pokemon_renders_one_card_per_entry_in_order() -> Result<()> {
    let mut dom = parse_html(r#"<div id="pokemon-container"><p>stale</p></div>"#)?;
    let pokedex = Pokedex::builtin();
    load_pokemon(&mut dom, pokedex.entries())?;

    let cards = dom.query_selector_all("#pokemon-container > .pokemon-card")?;
    assert_eq!(cards.len(), pokedex.len());
    assert_eq!(dom.query_selector_all("#pokemon-container > p")?.len(), 0);

    let headings = dom
        .query_selector_all(".pokemon-card h3")?
        .into_iter()
        .map(|node| dom.text_content(node))
        .collect::<Vec<_>>();
    let expected = pokedex
        .entries()
        .iter()
        .map(|pokemon| pokemon.name.clone())
        .collect::<Vec<_>>();
    assert_eq!(headings, expected);

    let first_type = dom
        .query_selector(".pokemon-card .pokemon-type")?
        .ok_or_else(|| Error::SelectorNotFound(".pokemon-type".into()))?;
    assert_eq!(dom.text_content(first_type), "grass");
    assert!(dom.attr(first_type, "class").is_some_and(|class| class.contains("type-grass")));
    Ok(())
}

#[test]
fn load_pokemon_without_container_is_a_no_op() -> Result<()> {
    let mut dom = parse_html("<main></main>")?;
    load_pokemon(&mut dom, Pokedex::builtin().entries())?;
    assert_eq!(dom.query_selector_all(".pokemon-card")?.len(), 0);
    Ok(())
}

#[test]
fn cards_escape_names() -> Result<()> {
    let mut dom = parse_html(r#"<div id="grid"></div>"#)?;
    let grid = dom
        .by_id("grid")
        .ok_or_else(|| Error::SelectorNotFound("#grid".into()))?;
    let odd = Pokemon::new(0, "<b>Missing\"No</b>", PokemonType::Psychic);
    render_cards(&mut dom, grid, &[&odd])?;

    assert_eq!(dom.query_selector_all("#grid b")?.len(), 0);
    let heading = dom
        .query_selector("#grid h3")?
        .ok_or_else(|| Error::SelectorNotFound("h3".into()))?;
    assert_eq!(dom.text_content(heading), "<b>Missing\"No</b>");
    let img = dom
        .query_selector("#grid img")?
        .ok_or_else(|| Error::SelectorNotFound("img".into()))?;
    assert_eq!(dom.attr(img, "alt").as_deref(), Some("<b>Missing\"No</b>"));
    Ok(())
}

#[test]
fn search_results_cover_empty_missing_and_matching_queries() -> Result<()> {
    let mut dom = parse_html(r#"<div id="search-results"><p>old</p></div>"#)?;
    let panel = dom
        .by_id("search-results")
        .ok_or_else(|| Error::SelectorNotFound("#search-results".into()))?;
    let pokedex = Pokedex::builtin();

    render_search_results(&mut dom, panel, "", &[])?;
    assert_eq!(dom.text_content(panel), "");

    render_search_results(&mut dom, panel, "zzz", &[])?;
    assert_eq!(dom.dump_node(panel), r#"<div id="search-results"><p>No Pokemon found</p></div>"#);

    let matches = pokedex.search("char");
    render_search_results(&mut dom, panel, "char", &matches)?;
    let rows = dom.query_selector_all("#search-results > div")?;
    assert_eq!(rows.len(), 2);
    assert_eq!(dom.text_content(panel), "CharmanderCharizard");
    assert_eq!(dom.style_get(rows[0], "cursor")?, "pointer");
    assert_eq!(dom.style_get(rows[0], "borderBottom")?, "1px solid #ddd");
    Ok(())
}
