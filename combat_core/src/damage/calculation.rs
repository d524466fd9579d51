//! Damage calculation - turning attack and defense into a hit value

/// Every resolved hit deals at least this much, so an unbeatable defense
/// stat can never stall a fight
pub const MIN_DAMAGE: i64 = 1;

/// Calculate base damage for a hit
///
/// `max(1, atk - def)`. Pure; callers layer multipliers (crit, skill,
/// override) on top of this value.
pub fn compute_damage(atk: i64, def: i64) -> i64 {
    atk.saturating_sub(def).max(MIN_DAMAGE)
}

/// Attack stat after a temporary multiplier
///
/// Non-finite or negative multipliers are treated as no buff.
pub fn effective_attack(atk: i64, multiplier: f64) -> i64 {
    if !multiplier.is_finite() || multiplier < 0.0 {
        return atk;
    }
    (atk as f64 * multiplier).round() as i64
}

/// Scale a base damage value for ability hits
///
/// `round(base × multiplier) + flat_bonus`. The result may be zero or
/// negative, in which case the caller treats the hit as a no-op.
pub fn scaled_damage(base: i64, multiplier: f64, flat_bonus: i64) -> i64 {
    let multiplier = if multiplier.is_finite() { multiplier } else { 0.0 };
    ((base as f64 * multiplier).round() as i64).saturating_add(flat_bonus)
}
