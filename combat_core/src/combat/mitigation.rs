//! Shield-then-hp damage application

use super::result::Mitigation;
use crate::fighter::FighterState;

/// Apply incoming damage to a fighter
///
/// The shield absorbs first (`absorbed = min(shield, incoming)`), the rest
/// comes off hp, floored at zero. Non-positive damage and dead fighters are
/// left untouched and report an empty result.
pub fn absorb_damage(fighter: &mut FighterState, incoming: i64) -> Mitigation {
    let mut result = Mitigation {
        incoming: incoming.max(0),
        shield_before: fighter.shield,
        shield_after: fighter.shield,
        hp_before: fighter.hp,
        hp_after: fighter.hp,
        ..Default::default()
    };

    if incoming <= 0 || fighter.is_dead() {
        result.incoming = 0;
        return result;
    }

    let absorbed = incoming.min(fighter.shield);
    fighter.shield -= absorbed;
    result.absorbed = absorbed;

    let remaining = incoming - absorbed;
    let hp_lost = remaining.min(fighter.hp);
    fighter.hp -= hp_lost;
    result.hp_lost = hp_lost;

    result.shield_after = fighter.shield;
    result.hp_after = fighter.hp;
    result.is_killing_blow = fighter.is_dead();

    result
}
