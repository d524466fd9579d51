//! Status timers - stun and temporary attack buff

use super::FighterState;
use crate::damage::effective_attack;
use crate::time::{to_micros, Micros};

/// What expired during a timer decay step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimerExpiry {
    pub stun_ended: bool,
    pub buff_ended: bool,
}

impl FighterState {
    pub fn is_stunned(&self) -> bool {
        self.stun_timer > 0
    }

    pub fn has_attack_buff(&self) -> bool {
        self.atk_buff_timer > 0
    }

    /// Attack stat with the active buff multiplier applied
    pub fn effective_atk(&self) -> i64 {
        if self.has_attack_buff() {
            effective_attack(self.atk, self.atk_buff_multiplier)
        } else {
            self.atk
        }
    }

    /// Stun for `seconds`, never shortening an existing stun
    ///
    /// Returns whether the timer changed.
    pub fn stun(&mut self, seconds: f64) -> bool {
        if !seconds.is_finite() || self.is_dead() {
            return false;
        }
        let duration = to_micros(seconds);
        if duration > self.stun_timer {
            self.stun_timer = duration;
            true
        } else {
            false
        }
    }

    /// Replace the attack buff
    pub fn buff_attack(&mut self, multiplier: f64, seconds: f64) -> bool {
        if !multiplier.is_finite() || multiplier <= 0.0 || !seconds.is_finite() {
            return false;
        }
        let duration = to_micros(seconds);
        if duration == 0 || self.is_dead() {
            return false;
        }
        self.atk_buff_multiplier = multiplier;
        self.atk_buff_timer = duration;
        true
    }

    /// Tick stun and buff timers down by `elapsed`
    ///
    /// Timers stop at zero; an expired buff resets the multiplier to 1.0.
    pub fn decay_timers(&mut self, elapsed: Micros) -> TimerExpiry {
        let mut expiry = TimerExpiry::default();
        if elapsed == 0 {
            return expiry;
        }

        if self.stun_timer > 0 {
            self.stun_timer = self.stun_timer.saturating_sub(elapsed);
            expiry.stun_ended = self.stun_timer == 0;
        }

        if self.atk_buff_timer > 0 {
            self.atk_buff_timer = self.atk_buff_timer.saturating_sub(elapsed);
            if self.atk_buff_timer == 0 {
                self.atk_buff_multiplier = 1.0;
                expiry.buff_ended = true;
            }
        }

        expiry
    }

    /// Time until the next timer on this fighter runs out, if any
    pub fn next_timer_expiry(&self) -> Option<Micros> {
        [self.stun_timer, self.atk_buff_timer]
            .into_iter()
            .filter(|t| *t > 0)
            .min()
    }
}
