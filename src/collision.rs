use rand::Rng;

use crate::entities::{Entity, ExplosionEffect, Player};

/// What a collision pass produced for the caller to apply
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionReport {
    /// Points earned from enemies destroyed this pass
    pub score: u32,
    /// Explosions to queue, one per destroyed enemy
    pub explosions: Vec<ExplosionEffect>,
    pub kills: u32,
}

/// Runs every collision check for one frame.
///
/// Passes run in a fixed order: friendly bullets against enemies, hostile
/// bullets against the player, then enemy contact and power-up pickup against
/// the player. Anything deactivated by an earlier pass is skipped by later ones.
pub fn resolve<R: Rng>(
    entities: &mut [Entity],
    player: &mut Player,
    rng: &mut R,
) -> CollisionReport {
    let mut report = CollisionReport::default();

    let mut bullets = Vec::new();
    let mut enemies = Vec::new();
    let mut power_ups = Vec::new();
    for (idx, entity) in entities.iter().enumerate() {
        if !entity.is_active() {
            continue;
        }
        match entity {
            Entity::Bullet(_) => bullets.push(idx),
            Entity::Enemy(_) => enemies.push(idx),
            Entity::PowerUp(_) => power_ups.push(idx),
            Entity::Explosion(_) => {}
        }
    }

    // Friendly bullets vs enemies
    for &b_idx in &bullets {
        let (bullet_body, damage) = match &entities[b_idx] {
            Entity::Bullet(bullet) if bullet.is_friendly() && bullet.body.active => {
                (bullet.body.clone(), bullet.damage)
            }
            _ => continue,
        };

        for &e_idx in &enemies {
            let Entity::Enemy(enemy) = &mut entities[e_idx] else {
                continue;
            };
            if !enemy.body.active || !bullet_body.overlaps(&enemy.body) {
                continue;
            }

            if enemy.take_damage(damage) {
                report.score += enemy.score_value;
                report.kills += 1;
                report.explosions.push(ExplosionEffect::new(
                    enemy.body.center_x(),
                    enemy.body.center_y(),
                    rng,
                ));
            }
            if let Entity::Bullet(bullet) = &mut entities[b_idx] {
                bullet.on_hit();
            }
            break;
        }
    }

    // Hostile bullets vs player
    for &b_idx in &bullets {
        let Entity::Bullet(bullet) = &mut entities[b_idx] else {
            continue;
        };
        if bullet.is_friendly() || !bullet.body.active {
            continue;
        }
        if bullet.body.overlaps(&player.body) {
            bullet.on_hit();
            player.take_damage(bullet.damage);
        }
    }

    // Enemy contact
    for &e_idx in &enemies {
        let Entity::Enemy(enemy) = &entities[e_idx] else {
            continue;
        };
        if enemy.body.active && enemy.body.overlaps(&player.body) {
            player.take_damage(enemy.contact_damage);
        }
    }

    // Pickups
    for &p_idx in &power_ups {
        let Entity::PowerUp(power_up) = &mut entities[p_idx] else {
            continue;
        };
        if power_up.body.active && power_up.body.overlaps(&player.body) {
            power_up.collect(player);
        }
    }

    if report.kills > 0 {
        log::debug!("collisions: {} kills for {} points", report.kills, report.score);
    }
    report
}
