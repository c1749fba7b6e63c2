//! Player actor components.
//!
//! The persistent player is an entity carrying [`PlayerActor`] together with
//! [`PlayerCombat`], [`CoinPurse`], [`RigidBody`](super::rigidbody::RigidBody),
//! [`ActorTimers`](super::actortimer::ActorTimers) and
//! [`MapPosition`](super::mapposition::MapPosition).
//!
//! Combat state is transient: it is wiped on every scene transition. The
//! coin purse is gameplay progress and is never touched by a reset.

use bevy_ecs::prelude::Component;

/// Behavior-kind marker of the player actor.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct PlayerActor;

/// Attack and animation state of the player.
#[derive(Component, Clone, Debug, Default, PartialEq)]
pub struct PlayerCombat {
    /// An attack is currently in progress.
    pub attacking: bool,
    /// An attack input arrived during the current attack.
    pub attack_queued: bool,
    /// Position in the current combo chain, 0 when idle.
    pub combo_step: u8,
    /// Animation currently driven by combat, if any.
    pub animation: Option<String>,
}

impl PlayerCombat {
    /// Start an attack, or queue one if an attack is already in progress.
    ///
    /// Returns true when a new attack started.
    pub fn begin_attack(&mut self) -> bool {
        if self.attacking {
            self.attack_queued = true;
            return false;
        }
        self.attacking = true;
        self.combo_step = self.combo_step.saturating_add(1);
        self.animation = Some(format!("attack_{}", self.combo_step));
        true
    }

    /// Finish the attack in progress. A queued attack chains into the next
    /// combo step; otherwise the combo is over.
    pub fn end_attack(&mut self) {
        self.attacking = false;
        if self.attack_queued {
            self.attack_queued = false;
            self.begin_attack();
        } else {
            self.combo_step = 0;
            self.animation = None;
        }
    }

    /// Clear every attack and animation flag.
    pub fn reset(&mut self) {
        *self = PlayerCombat::default();
    }

    pub fn is_idle(&self) -> bool {
        !self.attacking && !self.attack_queued && self.combo_step == 0
    }
}

/// Coins collected by the player during the session.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CoinPurse {
    pub coins: u32,
}

impl CoinPurse {
    pub fn new(coins: u32) -> Self {
        Self { coins }
    }

    pub fn add(&mut self, amount: u32) {
        self.coins = self.coins.saturating_add(amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_attack_from_idle() {
        let mut combat = PlayerCombat::default();
        assert!(combat.begin_attack());
        assert!(combat.attacking);
        assert_eq!(combat.combo_step, 1);
        assert_eq!(combat.animation.as_deref(), Some("attack_1"));
    }

    #[test]
    fn test_attack_during_attack_is_queued_and_chains() {
        let mut combat = PlayerCombat::default();
        combat.begin_attack();
        assert!(!combat.begin_attack());
        assert!(combat.attack_queued);

        combat.end_attack();
        assert!(combat.attacking);
        assert!(!combat.attack_queued);
        assert_eq!(combat.combo_step, 2);

        combat.end_attack();
        assert!(combat.is_idle());
        assert!(combat.animation.is_none());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut combat = PlayerCombat::default();
        combat.begin_attack();
        combat.begin_attack();
        combat.reset();
        assert_eq!(combat, PlayerCombat::default());
    }

    #[test]
    fn test_coin_purse_add_saturates() {
        let mut purse = CoinPurse::new(u32::MAX - 1);
        purse.add(5);
        assert_eq!(purse.coins, u32::MAX);
    }
}
