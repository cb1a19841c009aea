use std::cell::RefCell;

use super::*;

type Log = Rc<RefCell<Vec<String>>>;

fn record(log: &Log, entry: &str) -> impl Fn(&mut Harness, &mut EventState) -> Result<()> + 'static {
    let log = Rc::clone(log);
    let entry = entry.to_string();
    move |_, event| {
        log.borrow_mut()
            .push(format!("{entry}:{}", event.event_type()));
        Ok(())
    }
}

#[test]
fn click_bubbles_from_target_to_ancestors() -> Result<()> {
    let mut h = Harness::from_html(
        r#"<div id="outer"><section id="mid"><button id="btn" type="button">go</button></section></div>"#,
    )?;
    let log: Log = Rc::default();
    h.add_listener("#outer", "click", record(&log, "outer"))?;
    h.add_listener("#btn", "click", record(&log, "btn"))?;
    h.add_listener("#mid", "click", record(&log, "mid"))?;

    h.click("#btn")?;
    assert_eq!(
        *log.borrow(),
        vec!["btn:click", "mid:click", "outer:click"]
    );
    Ok(())
}

#[test]
fn stop_propagation_and_stop_immediate_propagation_cut_dispatch() -> Result<()> {
    let mut h = Harness::from_html(r#"<div id="outer"><button id="btn" type="button">go</button></div>"#)?;
    let log: Log = Rc::default();
    h.add_listener("#btn", "click", |_, event| {
        event.stop_immediate_propagation();
        Ok(())
    })?;
    h.add_listener("#btn", "click", record(&log, "second"))?;
    h.add_listener("#outer", "click", record(&log, "outer"))?;
    h.click("#btn")?;
    assert!(log.borrow().is_empty());

    let mut h = Harness::from_html(r#"<div id="outer"><button id="btn" type="button">go</button></div>"#)?;
    h.add_listener("#btn", "click", |_, event| {
        event.stop_propagation();
        Ok(())
    })?;
    h.add_listener("#btn", "click", record(&log, "second"))?;
    h.add_listener("#outer", "click", record(&log, "outer"))?;
    h.click("#btn")?;
    assert_eq!(*log.borrow(), vec!["second:click"]);
    Ok(())
}

#[test]
fn synthetic_events_stay_on_their_target() -> Result<()> {
    let mut h = Harness::from_html(r#"<form id="f"><input id="q"></form>"#)?;
    let log: Log = Rc::default();
    h.add_listener("#q", "focus", record(&log, "input"))?;
    h.add_listener("#f", "focus", record(&log, "form"))?;
    h.dispatch("#q", "focus")?;
    assert_eq!(*log.borrow(), vec!["input:focus"]);
    Ok(())
}

#[test]
fn listener_errors_propagate_to_the_caller() -> Result<()> {
    let mut h = Harness::from_html(r#"<button id="btn" type="button">go</button>"#)?;
    h.add_listener("#btn", "click", |_, _| Err(Error::Dom("handler failed".into())))?;
    assert_eq!(h.click("#btn"), Err(Error::Dom("handler failed".into())));
    Ok(())
}

#[test]
fn disabled_buttons_ignore_clicks() -> Result<()> {
    let mut h = Harness::from_html(r#"<button id="btn" disabled>go</button>"#)?;
    let log: Log = Rc::default();
    h.add_listener("#btn", "click", record(&log, "btn"))?;
    h.click("#btn")?;
    assert!(log.borrow().is_empty());
    Ok(())
}

#[test]
fn type_text_sets_value_and_fires_input() -> Result<()> {
    let mut h = Harness::from_html(
        r#"<input id="q"><input id="ro" readonly value="keep"><textarea id="t"></textarea><p id="out"></p>"#,
    )?;
    h.add_listener("#q", "input", |h, _| {
        let value = h.value("#q")?;
        let out = h.select_one("#out")?;
        h.dom.set_text_content(out, &value.to_uppercase())
    })?;

    h.type_text("#q", "eevee")?;
    h.assert_value("#q", "eevee")?;
    h.assert_text("#out", "EEVEE")?;

    h.type_text("#ro", "changed")?;
    h.assert_value("#ro", "keep")?;

    h.type_text("#t", "multi\nline")?;
    h.assert_value("#t", "multi\nline")?;
    Ok(())
}

#[test]
fn type_text_rejects_non_text_controls() -> Result<()> {
    let mut h = Harness::from_html(r#"<input id="c" type="checkbox"><div id="d"></div>"#)?;
    match h.type_text("#c", "x") {
        Err(Error::TypeMismatch { actual, .. }) => assert_eq!(actual, "input[type=checkbox]"),
        other => panic!("unexpected result: {other:?}"),
    }
    assert!(matches!(h.type_text("#d", "x"), Err(Error::TypeMismatch { .. })));
    assert!(matches!(
        h.type_text("#missing", "x"),
        Err(Error::SelectorNotFound(_))
    ));
    Ok(())
}

#[test]
fn select_option_fires_input_then_change() -> Result<()> {
    let mut h = Harness::from_html(
        r#"<select id="s"><option value="all">All</option><option value="fire">Fire</option></select>"#,
    )?;
    let log: Log = Rc::default();
    h.add_listener("#s", "input", record(&log, "s"))?;
    h.add_listener("#s", "change", record(&log, "s"))?;

    h.select_option("#s", "fire")?;
    h.assert_value("#s", "fire")?;
    assert_eq!(*log.borrow(), vec!["s:input", "s:change"]);

    assert!(matches!(
        h.select_option("#s", "dragon"),
        Err(Error::SelectorNotFound(_))
    ));
    h.assert_value("#s", "fire")?;
    Ok(())
}

#[test]
fn required_controls_block_submission() -> Result<()> {
    let mut h = Harness::from_html_with_url(
        "http://localhost/form.html",
        r#"<form id="f"><input id="email" name="email" required><button id="go">Go</button></form>"#,
    )?;
    let log: Log = Rc::default();
    h.add_listener("#f", "submit", record(&log, "f"))?;

    h.click("#go")?;
    assert!(log.borrow().is_empty());
    assert_eq!(h.take_pending_navigation(), None);

    h.type_text("#email", "a@b.c")?;
    h.click("#go")?;
    assert_eq!(*log.borrow(), vec!["f:submit"]);
    assert_eq!(
        h.take_pending_navigation().map(|url| url.to_string()),
        Some("http://localhost/form.html?email=a%40b.c".to_string())
    );
    Ok(())
}

#[test]
fn novalidate_forms_submit_with_empty_required_fields() -> Result<()> {
    let mut h = Harness::from_html_with_url(
        "http://localhost/a/b.html#top",
        r#"<form id="f" action="../search" novalidate><input name="q" required></form>"#,
    )?;
    h.submit("#f")?;
    assert_eq!(
        h.take_pending_navigation().map(|url| url.to_string()),
        Some("http://localhost/search?q=".to_string())
    );
    Ok(())
}

#[test]
fn post_forms_navigate_without_a_query() -> Result<()> {
    let mut h = Harness::from_html_with_url(
        "http://localhost/contact.html",
        r#"<form id="f" method="POST" action="/send"><input name="q" value="x"></form>"#,
    )?;
    h.submit("#f")?;
    assert_eq!(
        h.take_pending_navigation().map(|url| url.to_string()),
        Some("http://localhost/send".to_string())
    );
    Ok(())
}

#[test]
fn prevented_submit_stays_on_the_page() -> Result<()> {
    let mut h = Harness::from_html_with_url(
        "http://localhost/",
        r#"<form id="f"><input id="q" name="q"></form>"#,
    )?;
    h.add_listener("#f", "submit", |_, event| {
        event.prevent_default();
        Ok(())
    })?;
    h.submit("#q")?;
    assert_eq!(h.take_pending_navigation(), None);
    assert!(matches!(h.submit("#missing"), Err(Error::SelectorNotFound(_))));
    Ok(())
}

#[test]
fn hyperlinks_navigate_and_fragments_stay_put() -> Result<()> {
    let mut h = Harness::from_html_with_url(
        "http://localhost/pages/a.html",
        r##"<a id="next" href="b.html"><span id="inner">next</span></a><a id="frag" href="#top">top</a>"##,
    )?;
    h.click("#inner")?;
    assert_eq!(
        h.take_pending_navigation().map(|url| url.to_string()),
        Some("http://localhost/pages/b.html".to_string())
    );

    h.click("#frag")?;
    assert_eq!(h.take_pending_navigation(), None);
    assert_eq!(h.url(), "http://localhost/pages/a.html#top");

    let kinds = h
        .take_location_navigations()
        .into_iter()
        .map(|navigation| navigation.kind)
        .collect::<Vec<_>>();
    assert_eq!(kinds, vec![LocationNavigationKind::Hyperlink]);
    Ok(())
}

#[test]
fn blank_documents_cannot_resolve_relative_links() -> Result<()> {
    let mut h = Harness::from_html(r#"<a id="rel" href="b.html">b</a><a id="abs" href="http://localhost/x">x</a>"#)?;
    assert_eq!(h.url(), "about:blank");
    assert!(matches!(h.click("#rel"), Err(Error::Navigation(_))));
    h.click("#abs")?;
    assert_eq!(
        h.take_pending_navigation().map(|url| url.to_string()),
        Some("http://localhost/x".to_string())
    );
    Ok(())
}

#[test]
fn trace_logs_events_and_respects_the_limit() -> Result<()> {
    let mut h = Harness::from_html(r#"<button id="btn" type="button">go</button>"#)?;
    h.add_listener("#btn", "click", |_, _| Ok(()))?;

    h.click("#btn")?;
    assert!(h.take_trace_logs().is_empty());

    h.enable_trace(true);
    h.click("#btn")?;
    let logs = h.take_trace_logs();
    assert_eq!(
        logs,
        vec![
            "[event] click target=#btn current=#btn default_prevented=false",
            "[event] done click target=#btn outcome=completed default_prevented=false",
        ]
    );

    h.set_trace_log_limit(3)?;
    for _ in 0..4 {
        h.click("#btn")?;
    }
    let logs = h.take_trace_logs();
    assert_eq!(logs.len(), 3);
    assert!(logs[2].starts_with("[event] done click"));

    assert!(matches!(h.set_trace_log_limit(0), Err(Error::Config(_))));
    Ok(())
}

#[test]
fn assertion_failures_carry_expected_actual_and_snippet() -> Result<()> {
    let h = Harness::from_html(r#"<p id="msg" class="note">hello</p>"#)?;
    match h.assert_text("#msg", "bye") {
        Err(Error::AssertionFailed {
            selector,
            expected,
            actual,
            dom_snippet,
        }) => {
            assert_eq!(selector, "#msg");
            assert_eq!(expected, "bye");
            assert_eq!(actual, "hello");
            assert_eq!(dom_snippet, r#"<p class="note" id="msg">hello</p>"#);
        }
        other => panic!("unexpected result: {other:?}"),
    }

    let err = h.assert_text_contains("#msg", "world").err();
    assert!(err.is_some_and(|err| err.to_string().contains("text containing \"world\"")));
    assert!(h.assert_count("p", 2).is_err());
    assert!(matches!(h.assert_exists("#nope"), Err(Error::SelectorNotFound(_))));
    assert_eq!(h.attr("#msg", "class")?.as_deref(), Some("note"));
    assert_eq!(h.dump_dom("#msg")?, r#"<p class="note" id="msg">hello</p>"#);
    Ok(())
}
