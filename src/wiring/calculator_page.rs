use super::*;
use crate::calc::{battle_power, damage_concatenated, damage_total};
use crate::numeric::format_number;

pub(super) fn install(harness: &mut Harness, wiring: &Wiring) -> Result<()> {
    wire_damage(harness, wiring);
    wire_stats(harness, wiring);
    Ok(())
}

fn wire_damage(harness: &mut Harness, wiring: &Wiring) {
    let (Some(button), Some(display)) = (
        element_by_id(harness, "calculate-damage"),
        element_by_id(harness, "total-damage"),
    ) else {
        return;
    };
    let concatenate = wiring.seeded_with(Defect::DamageConcatenation);

    harness.add_event_listener(button, "click", move |h, _| {
        let inputs = [
            element_value(h, "attack1")?,
            element_value(h, "attack2")?,
            element_value(h, "attack3")?,
        ];
        let total = if concatenate {
            damage_concatenated(&inputs)
        } else {
            format_number(damage_total(&inputs))
        };
        h.dom.set_text_content(display, &total)
    });
}

fn wire_stats(harness: &mut Harness, wiring: &Wiring) {
    let button_id = wiring.lookup(Defect::StatsButtonId, "calculate-stats", "calc-stats");
    let (Some(button), Some(display)) = (
        element_by_id(harness, button_id),
        element_by_id(harness, "battle-power"),
    ) else {
        return;
    };

    harness.add_event_listener(button, "click", move |h, _| {
        let power = battle_power(
            &element_value(h, "base-power")?,
            &element_value(h, "level")?,
            &element_value(h, "multiplier")?,
        );
        h.dom.set_text_content(display, &format_number(power))
    });
}
