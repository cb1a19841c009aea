use super::*;
use crate::site::PAGES;

const INDEX: &str = "index.html";
const POKEDEX: &str = "pages/pokedex.html";
const CALCULATOR: &str = "pages/calculator.html";
const CONTACT: &str = "pages/contact.html";

const NAV_LINKS: &str = ".nav-links a";
const EXPECTED_NAV_LINKS: usize = 4;

pub(super) async fn explore_navigation(s: &mut Session) -> Result<()> {
    s.open(INDEX).await?;
    s.browser.click("#explore-btn").await?;
    let url = s.browser.url().unwrap_or_default();
    let path = Url::parse(&url).map(|url| url.path().to_string())?;
    expect(
        path.ends_with(POKEDEX),
        "location",
        format!("URL ending with {POKEDEX:?}"),
        url,
    )
}

pub(super) async fn counter_increment(s: &mut Session) -> Result<()> {
    s.open(INDEX).await?;
    s.browser.click(".increment-btn").await?;
    s.settle(|page| text_is(page, "#counter-value", "1")).await?;
    s.page()?.assert_text("#counter-value", "1")
}

pub(super) async fn counter_reset(s: &mut Session) -> Result<()> {
    s.open(INDEX).await?;
    s.browser.click(".increment-btn").await?;
    s.browser.click(".increment-btn").await?;
    s.browser.click("#reset-btn").await?;
    s.settle(|page| text_is(page, "#counter-value", "0")).await?;
    s.page()?.assert_text("#counter-value", "0")
}

pub(super) async fn newsletter_submit(s: &mut Session) -> Result<()> {
    s.open(INDEX).await?;
    s.browser.fill("#email-input", "ash@pallet.town").await?;
    s.browser.click(".newsletter button[type=\"submit\"]").await?;
    s.settle(|page| text_contains(page, "#form-message", "Thank you"))
        .await?;
    let page = s.page()?;
    page.assert_text_contains("#form-message", "Thank you for subscribing!")?;
    page.assert_value("#email-input", "")
}

pub(super) async fn case_insensitive_search(s: &mut Session) -> Result<()> {
    s.open(POKEDEX).await?;
    s.browser.fill("#search-input", "pikachu").await?;
    s.settle(|page| text_contains(page, "#search-results", "Pikachu"))
        .await?;
    s.page()?.assert_text_contains("#search-results", "Pikachu")
}

pub(super) async fn search_no_match(s: &mut Session) -> Result<()> {
    s.open(POKEDEX).await?;
    s.browser.fill("#search-input", "zzz").await?;
    s.settle(|page| text_is(page, "#search-results", "No Pokemon found"))
        .await?;
    s.page()?.assert_text("#search-results", "No Pokemon found")
}

pub(super) async fn type_filter(s: &mut Session) -> Result<()> {
    s.open(POKEDEX).await?;
    let unfiltered = s.browser.count(".pokemon-card")?;
    s.browser.select_option("#type-filter", "fire").await?;
    s.settle(|page| count_of(page, ".pokemon-card") < unfiltered)
        .await?;

    let filtered = s.browser.count(".pokemon-card")?;
    expect(
        filtered > 0 && filtered < unfiltered,
        ".pokemon-card",
        format!("between 1 and {} cards", unfiltered.saturating_sub(1)),
        filtered,
    )?;
    let kinds = s.page()?.text_contents(".pokemon-card .pokemon-type")?;
    match kinds.iter().find(|kind| kind.as_str() != "fire") {
        Some(other) => expect(false, ".pokemon-type", "fire", other),
        None => Ok(()),
    }
}

pub(super) async fn type_filter_all(s: &mut Session) -> Result<()> {
    s.open(POKEDEX).await?;
    s.browser.select_option("#type-filter", "fire").await?;
    s.browser.select_option("#type-filter", "all").await?;
    let expected = s.catalogue.len();
    s.settle(|page| count_of(page, ".pokemon-card") == expected)
        .await?;
    s.page()?.assert_count(".pokemon-card", expected)
}

pub(super) async fn damage_sum(s: &mut Session) -> Result<()> {
    s.open(CALCULATOR).await?;
    s.browser.fill("#attack1", "10").await?;
    s.browser.fill("#attack2", "20").await?;
    s.browser.fill("#attack3", "30").await?;
    s.browser.click("#calculate-damage").await?;
    s.settle(|page| text_is(page, "#total-damage", "60")).await?;
    s.page()?.assert_text("#total-damage", "60")
}

pub(super) async fn stats_calculation(s: &mut Session) -> Result<()> {
    s.open(CALCULATOR).await?;
    s.browser.fill("#base-power", "100").await?;
    s.browser.fill("#level", "50").await?;
    s.browser.select_option("#multiplier", "2").await?;
    s.browser.click("#calculate-stats").await?;
    s.settle(|page| text_is(page, "#battle-power", "1000")).await?;
    s.page()?.assert_text("#battle-power", "1000")
}

pub(super) async fn contact_submit(s: &mut Session) -> Result<()> {
    const NAME: &str = "Ash Ketchum";

    s.open(CONTACT).await?;
    s.browser.fill("#name", NAME).await?;
    s.browser.fill("#email", "ash@pallet.town").await?;
    s.browser.fill("#subject", "Gym badges").await?;
    s.browser
        .fill("#message", "How many badges do I need for the league?")
        .await?;
    s.browser
        .click("#contact-form button[type=\"submit\"]")
        .await?;
    s.settle(|page| text_contains(page, "#contact-message", "Thank you"))
        .await?;
    let page = s.page()?;
    page.assert_text_contains("#contact-message", "Thank you")?;
    page.assert_text_contains("#contact-message", NAME)
}

pub(super) async fn faq_toggle(s: &mut Session) -> Result<()> {
    s.open(CONTACT).await?;
    s.browser.click(".toggle-faq").await?;
    expect_faq_state(s.page()?, "block", "Hide Answer")?;
    s.browser.click(".toggle-faq").await?;
    expect_faq_state(s.page()?, "none", "Show Answer")
}

pub(super) async fn pages_load(s: &mut Session) -> Result<()> {
    for page in PAGES {
        s.open(page).await?;
    }
    Ok(())
}

pub(super) async fn navigation_links(s: &mut Session) -> Result<()> {
    for page in PAGES {
        s.open(page).await?;
        s.page()?.assert_count(NAV_LINKS, EXPECTED_NAV_LINKS)?;
    }
    Ok(())
}

pub(super) async fn pokedex_grid(s: &mut Session) -> Result<()> {
    s.open(POKEDEX).await?;
    let names = s.page()?.text_contents(".pokemon-card h3")?;
    expect(
        !names.is_empty(),
        ".pokemon-card",
        "at least one card",
        0,
    )?;
    expect(
        names == s.catalogue,
        ".pokemon-card h3",
        s.catalogue.join(", "),
        names.join(", "),
    )
}

fn expect_faq_state(page: &Harness, display: &str, label: &str) -> Result<()> {
    let actual = page.style_property(".faq-answer", "display")?;
    expect(actual == display, ".faq-answer display", display, actual)?;
    page.assert_text(".toggle-faq", label)
}

fn expect(
    holds: bool,
    subject: &str,
    expected: impl fmt::Display,
    actual: impl fmt::Display,
) -> Result<()> {
    if holds {
        return Ok(());
    }
    Err(Error::AssertionFailed {
        selector: subject.to_string(),
        expected: expected.to_string(),
        actual: actual.to_string(),
        dom_snippet: String::new(),
    })
}

fn text_is(page: &Harness, selector: &str, expected: &str) -> bool {
    page.text_content(selector)
        .is_ok_and(|text| text == expected)
}

fn text_contains(page: &Harness, selector: &str, needle: &str) -> bool {
    page.text_content(selector)
        .is_ok_and(|text| text.contains(needle))
}

fn count_of(page: &Harness, selector: &str) -> usize {
    page.count(selector).unwrap_or_default()
}
