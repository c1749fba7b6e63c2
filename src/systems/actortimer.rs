//! Actor timer processing.
//!
//! Counts down each active actor's [`ActorTimers`] and applies what expired.
//! The only timed behavior the player carries today is the attack window:
//! when it runs out the attack ends, and a queued attack immediately opens
//! the next window.
//!
//! Inactive actors are frozen: their timers do not advance.

use bevy_ecs::prelude::*;

use crate::components::actortimer::ActorTimers;
use crate::components::inactive::Inactive;
use crate::components::player::PlayerCombat;
use crate::resources::worldtime::WorldTime;

/// Label of the attack window timer.
pub const ATTACK_TIMER: &str = "attack";
/// Length of one attack window, in seconds.
pub const ATTACK_DURATION: f32 = 0.4;

/// Start (or queue) an attack and open its timer window when it started.
pub fn start_attack(combat: &mut PlayerCombat, timers: &mut ActorTimers) -> bool {
    let started = combat.begin_attack();
    if started {
        timers.schedule(ATTACK_TIMER, ATTACK_DURATION);
    }
    started
}

pub fn update_actor_timers(
    time: Res<WorldTime>,
    mut actors: Query<(Entity, &mut ActorTimers, Option<&mut PlayerCombat>), Without<Inactive>>,
) {
    for (entity, mut timers, mut combat) in actors.iter_mut() {
        if timers.is_empty() {
            continue;
        }
        for label in timers.tick(time.delta) {
            match (label.as_str(), combat.as_deref_mut()) {
                (ATTACK_TIMER, Some(combat)) => {
                    combat.end_attack();
                    if combat.attacking {
                        timers.schedule(ATTACK_TIMER, ATTACK_DURATION);
                    }
                }
                _ => log::debug!("Timer '{}' expired on {:?}", label, entity),
            }
        }
    }
}
