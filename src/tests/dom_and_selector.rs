use super::*;
use crate::core_impl::parse_html;

fn node(dom: &Dom, selector: &str) -> Result<NodeId> {
    dom.query_selector(selector)?
        .ok_or_else(|| Error::SelectorNotFound(selector.to_string()))
}

#[test]
fn parser_builds_tree_with_decoded_text_and_id_index() -> Result<()> {
    let dom = parse_html(
        r#"<div id="card"><h3>Mr. Mime &amp; Jynx</h3><img src="a.png" alt="x"><span class="pokemon-type">psychic</span></div>"#,
    )?;

    let card = dom.by_id("card").ok_or_else(|| Error::SelectorNotFound("#card".into()))?;
    assert_eq!(dom.text_content(card), "Mr. Mime & Jynxpsychic");
    assert_eq!(dom.query_selector_all("div > *")?.len(), 3);
    assert_eq!(dom.tag_name(card), Some("div"));
    Ok(())
}

#[test]
fn parser_lowercases_tags_and_keeps_first_duplicate_attribute() -> Result<()> {
    let dom = parse_html(r#"<BUTTON ID="go" class="a" CLASS="b" disabled>Go</BUTTON>"#)?;
    let button = node(&dom, "button")?;
    assert_eq!(dom.attr(button, "class").as_deref(), Some("a"));
    assert_eq!(dom.attr(button, "disabled").as_deref(), Some(""));
    assert!(dom.element(button).is_some_and(|element| element.disabled));
    Ok(())
}

#[test]
fn parser_closes_optional_list_items_options_and_paragraphs() -> Result<()> {
    let dom = parse_html(
        "<ul><li>one<li>two</ul><select id=\"s\"><option value=\"a\">A<option value=\"b\">B</select><p>first<div>block</div>",
    )?;
    assert_eq!(dom.query_selector_all("ul > li")?.len(), 2);
    assert_eq!(dom.query_selector_all("select > option")?.len(), 2);
    assert_eq!(dom.query_selector_all("p div")?.len(), 0);
    Ok(())
}

#[test]
fn parser_keeps_raw_text_bodies_verbatim() -> Result<()> {
    let dom = parse_html(
        r#"<script>if (a < b) { document.title = "</div>"; }</script><textarea id="t">a &lt; b</textarea><p id="after">ok</p>"#,
    )?;
    let script = node(&dom, "script")?;
    assert!(dom.text_content(script).contains("a < b"));
    let textarea = node(&dom, "#t")?;
    assert_eq!(dom.value(textarea)?, "a < b");
    assert_eq!(dom.query_selector_all("p")?.len(), 1);
    Ok(())
}

#[test]
fn parser_drops_stray_end_tags_and_comments() -> Result<()> {
    let dom = parse_html("<div id=\"a\"><!-- note --></span>text</div>")?;
    let div = node(&dom, "#a")?;
    assert_eq!(dom.text_content(div), "text");
    Ok(())
}

#[test]
fn parser_rejects_unclosed_raw_text_and_comments() {
    assert!(matches!(
        parse_html("<script>let x = 1;"),
        Err(Error::HtmlParse(msg)) if msg.contains("<script>")
    ));
    assert!(matches!(
        parse_html("<p>hi<!-- never closed"),
        Err(Error::HtmlParse(_))
    ));
}

#[test]
fn selector_combinators_and_attribute_operators_match() -> Result<()> {
    let dom = parse_html(
        r##"<nav><ul class="nav-links"><li><a href="index.html">Home</a></li><li><a href="pages/pokedex.html" lang="en-US">Dex</a></li></ul></nav><h2 id="t">T</h2><p class="x">one</p><p class="x y">two</p><a href="#features" rel="nofollow noopener">skip</a>"##,
    )?;

    assert_eq!(dom.query_selector_all(".nav-links a")?.len(), 2);
    assert_eq!(dom.query_selector_all("ul > li > a")?.len(), 2);
    assert_eq!(dom.query_selector_all("nav > a")?.len(), 0);
    assert_eq!(dom.query_selector_all("#t + p")?.len(), 1);
    assert_eq!(dom.query_selector_all("#t ~ p")?.len(), 2);
    assert_eq!(dom.query_selector_all("p.x.y")?.len(), 1);
    assert_eq!(dom.query_selector_all(r##"a[href^="#"]"##)?.len(), 1);
    assert_eq!(dom.query_selector_all(r#"a[href$=".html"]"#)?.len(), 2);
    assert_eq!(dom.query_selector_all(r#"a[href*="pokedex"]"#)?.len(), 1);
    assert_eq!(dom.query_selector_all("a[rel~=noopener]")?.len(), 1);
    assert_eq!(dom.query_selector_all("a[lang|=en]")?.len(), 1);
    assert_eq!(dom.query_selector_all("a[lang]")?.len(), 1);
    assert_eq!(dom.query_selector_all("h2, p.y, h2")?.len(), 2);
    assert_eq!(dom.query_selector_all("*")?.len(), 10);
    Ok(())
}

#[test]
fn selector_results_follow_document_order() -> Result<()> {
    let dom = parse_html(r#"<p id="b">b</p><div><p id="a">a</p></div>"#)?;
    let ids = dom
        .query_selector_all("div > p, #b")?
        .into_iter()
        .filter_map(|node| dom.attr(node, "id"))
        .collect::<Vec<_>>();
    assert_eq!(ids, vec!["b", "a"]);
    Ok(())
}

#[test]
fn pseudo_classes_and_malformed_selectors_are_rejected() -> Result<()> {
    let dom = parse_html("<p>x</p>")?;
    for selector in ["p:first-child", "a:hover", "p[", "", "p >"] {
        match dom.query_selector_all(selector) {
            Err(Error::UnsupportedSelector(_)) => {}
            other => panic!("expected unsupported selector for {selector:?}, got {other:?}"),
        }
    }
    Ok(())
}

#[test]
fn closest_and_scoped_queries_stay_inside_their_roots() -> Result<()> {
    let dom = parse_html(
        r#"<div class="faq-item"><button class="toggle-faq">Show</button><div class="faq-answer">A1</div></div><div class="faq-item"><div class="faq-answer">A2</div></div>"#,
    )?;
    let button = node(&dom, ".toggle-faq")?;
    let item = dom
        .closest(button, ".faq-item")?
        .ok_or_else(|| Error::SelectorNotFound(".faq-item".into()))?;
    let answer = dom
        .query_selector_from(item, ".faq-answer")?
        .ok_or_else(|| Error::SelectorNotFound(".faq-answer".into()))?;
    assert_eq!(dom.text_content(answer), "A1");
    assert_eq!(dom.closest(button, "form")?, None);
    Ok(())
}

#[test]
fn inner_html_replacement_reindexes_ids() -> Result<()> {
    let mut dom = parse_html(r#"<div id="box"><span id="old">O</span></div>"#)?;
    let boxed = node(&dom, "#box")?;
    dom.set_inner_html(boxed, r#"<span id="new">N</span><b>B</b>"#)?;
    assert_eq!(dom.by_id("old"), None);
    assert!(dom.by_id("new").is_some());
    assert_eq!(dom.text_content(boxed), "NB");
    assert_eq!(dom.dump_node(boxed), r#"<div id="box"><span id="new">N</span><b>B</b></div>"#);
    Ok(())
}

#[test]
fn append_child_moves_nodes_and_refuses_cycles() -> Result<()> {
    let mut dom = parse_html(r#"<div id="outer"><div id="inner"></div></div><p id="p">x</p>"#)?;
    let outer = node(&dom, "#outer")?;
    let inner = node(&dom, "#inner")?;
    let p = node(&dom, "#p")?;

    dom.append_child(inner, p)?;
    assert_eq!(dom.parent(p), Some(inner));
    assert_eq!(dom.query_selector_all("#outer p")?.len(), 1);

    assert!(matches!(dom.append_child(inner, outer), Err(Error::Dom(_))));
    Ok(())
}

#[test]
fn inline_styles_accept_camel_case_and_drop_empty_values() -> Result<()> {
    let mut dom = parse_html(r#"<p id="m" style="display: none">x</p>"#)?;
    let p = node(&dom, "#m")?;
    assert_eq!(dom.style_get(p, "display")?, "none");

    dom.style_set(p, "borderBottom", "1px solid #ddd")?;
    dom.style_set(p, "display", "block")?;
    assert_eq!(dom.style_get(p, "border-bottom")?, "1px solid #ddd");
    assert_eq!(
        dom.attr(p, "style").as_deref(),
        Some("display: block; border-bottom: 1px solid #ddd;")
    );

    dom.style_set(p, "display", "")?;
    assert_eq!(dom.style_get(p, "display")?, "");
    Ok(())
}

#[test]
fn select_value_tracks_selected_option_and_resets_to_default() -> Result<()> {
    let mut dom = parse_html(
        r#"<form id="f"><select id="s" name="kind"><option value="all">All</option><option selected>fire</option></select><input id="q" name="q" value="pika"><textarea id="t" name="t">hello</textarea></form>"#,
    )?;
    let form = node(&dom, "#f")?;
    let select = node(&dom, "#s")?;
    let input = node(&dom, "#q")?;
    assert_eq!(dom.value(select)?, "fire");
    assert!(dom.select_has_option(select, "all")?);
    assert!(!dom.select_has_option(select, "water")?);

    dom.set_value(select, "all")?;
    dom.set_value(input, "char")?;
    assert_eq!(dom.value(select)?, "all");

    dom.reset_form(form)?;
    assert_eq!(dom.value(select)?, "fire");
    assert_eq!(dom.value(input)?, "pika");
    assert_eq!(dom.value(node(&dom, "#t")?)?, "hello");
    Ok(())
}

#[test]
fn form_data_skips_unnamed_disabled_and_button_controls() -> Result<()> {
    let dom = parse_html(
        r#"<form id="f"><input name="email" value="a@b.c"><input value="anon"><input name="off" value="x" disabled><button type="submit" name="go">Go</button><select name="kind"><option>fire</option></select></form>"#,
    )?;
    let form = node(&dom, "#f")?;
    assert_eq!(
        dom.form_data(form),
        vec![
            ("email".to_string(), "a@b.c".to_string()),
            ("kind".to_string(), "fire".to_string()),
        ]
    );
    Ok(())
}

#[test]
fn first_invalid_control_reports_empty_required_fields() -> Result<()> {
    let mut dom = parse_html(
        r#"<form id="f"><input id="a" required><input id="b" required disabled><textarea id="c" required></textarea></form>"#,
    )?;
    let form = node(&dom, "#f")?;
    let a = node(&dom, "#a")?;
    let c = node(&dom, "#c")?;
    assert_eq!(dom.first_invalid_control(form), Some(a));
    dom.set_value(a, "x")?;
    assert_eq!(dom.first_invalid_control(form), Some(c));
    dom.set_value(c, "y")?;
    assert_eq!(dom.first_invalid_control(form), None);
    Ok(())
}

#[test]
fn form_owner_prefers_form_attribute() -> Result<()> {
    let dom = parse_html(
        r#"<form id="outer"><button id="inside">a</button></form><form id="other"></form><button id="remote" form="other">b</button>"#,
    )?;
    assert_eq!(dom.form_owner(node(&dom, "#inside")?), dom.by_id("outer"));
    assert_eq!(dom.form_owner(node(&dom, "#remote")?), dom.by_id("other"));
    Ok(())
}

#[test]
fn snippets_are_truncated_dumps() -> Result<()> {
    let long = "x".repeat(400);
    let dom = parse_html(&format!(r#"<p id="p" hidden>{long}</p>"#))?;
    let p = node(&dom, "#p")?;
    let snippet = dom.snippet(p);
    assert!(snippet.starts_with(r#"<p hidden id="p">xxx"#));
    assert!(snippet.chars().count() <= 203);
    Ok(())
}
