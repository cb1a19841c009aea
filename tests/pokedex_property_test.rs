use pokemon_index::calc::{battle_power, damage_total};
use pokemon_index::numeric::format_number;
use pokemon_index::{Harness, Pokedex, Wiring};
use proptest::collection::vec;
use proptest::prelude::*;
use proptest::test_runner::TestCaseResult;

const DEFAULT_POKEDEX_PROPTEST_CASES: u32 = 64;
const INDEX_HTML: &str = include_str!("../site/index.html");

#[derive(Clone, Debug)]
enum CounterAction {
    Increment,
    Reset,
}

fn env_proptest_cases(var_name: &str, default_cases: u32) -> u32 {
    std::env::var(var_name)
        .ok()
        .and_then(|raw| raw.parse::<u32>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(default_cases)
}

fn pokedex_proptest_cases() -> u32 {
    env_proptest_cases("POKEMON_INDEX_PROPTEST_CASES", DEFAULT_POKEDEX_PROPTEST_CASES)
}

fn builtin_name_strategy() -> impl Strategy<Value = String> {
    let names = Pokedex::builtin()
        .entries()
        .iter()
        .map(|pokemon| pokemon.name.clone())
        .collect::<Vec<_>>();
    proptest::sample::select(names)
}

fn counter_action_strategy() -> impl Strategy<Value = CounterAction> {
    prop_oneof![
        3 => Just(CounterAction::Increment),
        1 => Just(CounterAction::Reset),
    ]
}

fn assert_counter_matches_model(actions: &[CounterAction]) -> TestCaseResult {
    let mut harness = Harness::load(
        "http://127.0.0.1:8080/index.html",
        INDEX_HTML,
        &Wiring::default(),
    )
    .map_err(|err| TestCaseError::fail(err.to_string()))?;

    let mut model = 0u64;
    for action in actions {
        let selector = match action {
            CounterAction::Increment => {
                model += 1;
                ".increment-btn"
            }
            CounterAction::Reset => {
                model = 0;
                "#reset-btn"
            }
        };
        harness
            .click(selector)
            .map_err(|err| TestCaseError::fail(format!("{action:?}: {err}")))?;
        let shown = harness
            .text_content("#counter-value")
            .map_err(|err| TestCaseError::fail(err.to_string()))?;
        prop_assert_eq!(shown, model.to_string());
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: pokedex_proptest_cases(),
        failure_persistence: None,
        .. ProptestConfig::default()
    })]

    #[test]
    fn search_ignores_query_casing(
        name in builtin_name_strategy(),
        flips in vec(any::<bool>(), 16),
    ) {
        let query = name
            .chars()
            .zip(flips.iter().cycle())
            .map(|(ch, upper)| if *upper { ch.to_ascii_uppercase() } else { ch.to_ascii_lowercase() })
            .collect::<String>();
        let pokedex = Pokedex::builtin();
        let hits = pokedex.search(&query);
        prop_assert!(hits.iter().any(|pokemon| pokemon.name == name), "{query} missed {name}");
    }

    #[test]
    fn lowercase_substrings_find_their_entry(
        name in builtin_name_strategy(),
        start in 0usize..16,
        len in 1usize..16,
    ) {
        let lower = name.to_lowercase();
        let start = start % lower.len();
        let end = (start + len).min(lower.len());
        let needle = &lower[start..end];
        let pokedex = Pokedex::builtin();
        prop_assert!(pokedex.search(needle).iter().any(|pokemon| pokemon.name == name));
        prop_assert!(pokedex.search(needle).len() <= pokedex.len());
    }

    #[test]
    fn damage_total_is_the_integer_sum(values in vec(0u32..100_000, 1..6)) {
        let inputs = values.iter().map(u32::to_string).collect::<Vec<_>>();
        let expected = values.iter().map(|value| u64::from(*value)).sum::<u64>();
        prop_assert_eq!(format_number(damage_total(&inputs)), expected.to_string());
    }

    #[test]
    fn battle_power_floors_the_scaled_product(
        base in 0u32..1_000,
        level in 0u32..=100,
        multiplier in prop_oneof![Just("0.5"), Just("1"), Just("1.5"), Just("2")],
    ) {
        let factor = multiplier.parse::<f64>().unwrap();
        let expected = (f64::from(base) * (f64::from(level) / 10.0) * factor).floor();
        let actual = battle_power(&base.to_string(), &level.to_string(), multiplier);
        prop_assert_eq!(actual, expected);
        prop_assert_eq!(format_number(actual), format!("{expected}"));
    }

    #[test]
    fn counter_tracks_increment_and_reset_sequences(
        actions in vec(counter_action_strategy(), 1..24),
    ) {
        assert_counter_matches_model(&actions)?;
    }
}
