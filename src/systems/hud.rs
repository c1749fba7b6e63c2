//! HUD coin label system.

use bevy_ecs::prelude::*;

use crate::components::hudcoins::HudCoinLabel;
use crate::components::inactive::Inactive;
use crate::components::player::CoinPurse;

/// Refresh each bound label from the actor's [`CoinPurse`].
///
/// Unbound labels keep their last text.
pub fn hud_display_system(
    mut labels: Query<&mut HudCoinLabel, Without<Inactive>>,
    purses: Query<&CoinPurse>,
) {
    for mut label in labels.iter_mut() {
        let Some(target) = label.binding.target() else {
            continue;
        };
        if let Ok(purse) = purses.get(target) {
            let text = HudCoinLabel::format_coins(purse.coins);
            if label.text != text {
                label.text = text;
            }
        }
    }
}
