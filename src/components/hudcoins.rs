//! HUD coin counter label.
//!
//! A [`HudCoinLabel`] is a per-scene UI object showing the player's coins. It
//! binds to the persistent actor's [`CoinPurse`](super::player::CoinPurse)
//! the same way the camera binds to the actor's position.

use bevy_ecs::prelude::Component;

use crate::components::binding::ActorBinding;

#[derive(Component, Clone, Debug, Default)]
pub struct HudCoinLabel {
    /// Non-owning reference to the actor holding the coin purse.
    pub binding: ActorBinding,
    /// Text currently shown.
    pub text: String,
}

impl HudCoinLabel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn format_coins(coins: u32) -> String {
        format!("Coins: {}", coins)
    }
}
