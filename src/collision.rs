/// Player ↔ enemy and player ↔ pickup contact.
///
/// The player's box is read once, before any entity is flagged, so every
/// overlap test in a pass sees the same snapshot.  Entities are only
/// flagged here; the pools drop them at the end of the tick.

use rand::Rng;
use tracing::{info, trace};

use crate::effects::{CollisionFlash, FloatingMessage};
use crate::player::{Player, PlayerState};
use crate::world::TickContext;

/// Where reward popups drift to: the absolute top-left score corner, as in
/// the original game, not an offset from the enemy.
const POPUP_TARGET: (f64, f64) = (0.0, 0.0);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Enemies destroyed while invulnerable.
    pub enemies_defeated: u32,
    /// Enemies that hurt the player.
    pub hits_taken: u32,
    pub pickups_collected: u32,
    /// A hit took the last life and debug mode is off.
    pub lives_exhausted: bool,
}

pub fn resolve<R: Rng>(player: &mut Player, ctx: &mut TickContext<'_, R>) -> CollisionReport {
    let mut report = CollisionReport::default();
    let bounds = player.rect();
    let pools = &mut *ctx.pools;
    let easing = ctx.config.effects.message_easing;
    let lifetime = ctx.config.effects.message_lifetime;

    for enemy in pools.enemies.iter_mut() {
        if enemy.marked || !enemy.rect().overlaps(&bounds) {
            continue;
        }
        // the enemy never survives contact
        enemy.marked = true;
        ctx.ledger.enemies_destroyed += 1;
        let (cx, cy) = enemy.rect().center();
        pools.flashes.push(CollisionFlash::new(cx, cy, ctx.rng));

        if player.state.is_invulnerable() {
            ctx.ledger.add_score(1);
            ctx.ledger.add_energy(1.0);
            pools.messages.push(FloatingMessage::moving(
                "+1",
                (enemy.x, enemy.y),
                POPUP_TARGET,
                easing,
                lifetime,
            ));
            report.enemies_defeated += 1;
            trace!(kind = ?enemy.kind.class(), "enemy defeated");
        } else {
            player.set_state(PlayerState::Hit, ctx.ledger);
            ctx.ledger.add_score(-1);
            let lives = ctx.ledger.lose_life();
            report.hits_taken += 1;
            trace!(kind = ?enemy.kind.class(), lives, "player hit");
            if lives == 0 && !ctx.debug {
                info!("out of lives");
                report.lives_exhausted = true;
            }
        }
    }

    for pickup in pools.pickups.iter_mut() {
        if pickup.marked || !pickup.rect().overlaps(&bounds) {
            continue;
        }
        pickup.marked = true;
        let (cx, cy) = pickup.rect().center();
        pools.flashes.push(CollisionFlash::new(cx, cy, ctx.rng));
        ctx.ledger.pickups_collected += 1;
        ctx.ledger.gain_life();
        ctx.ledger.add_energy(2.0);
        pools.messages.push(FloatingMessage::moving(
            "life +1",
            (pickup.x, pickup.y),
            POPUP_TARGET,
            easing,
            lifetime,
        ));
        report.pickups_collected += 1;
        trace!(lives = ctx.ledger.lives, "pickup collected");
    }

    report
}
