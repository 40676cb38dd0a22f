use super::body::Body;
use super::bullet::{Bullet, BulletOwner};
use super::physics;
use super::platform::Platform;
use super::player::Facing;
use crate::consts::{ENEMY_AIM_RANGE, ENEMY_BULLET_SPEED_X, ENEMY_BULLET_SPEED_Y};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyKind {
    Basic,
    Fast,
    Boss,
}

/// Fixed per-kind tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyStats {
    pub width: i32,
    pub height: i32,
    pub health: i32,
    pub contact_damage: i32,
    pub score_value: u32,
    /// Seconds between shots
    pub shoot_interval: f32,
    pub speed: f32,
}

impl EnemyKind {
    pub fn stats(&self) -> EnemyStats {
        match self {
            EnemyKind::Basic => EnemyStats {
                width: 55,
                height: 70,
                health: 50,
                contact_damage: 15,
                score_value: 100,
                shoot_interval: 3.0,
                speed: 80.0,
            },
            EnemyKind::Fast => EnemyStats {
                width: 46,
                height: 62,
                health: 30,
                contact_damage: 10,
                score_value: 150,
                shoot_interval: 2.0,
                speed: 165.0,
            },
            EnemyKind::Boss => EnemyStats {
                width: 110,
                height: 130,
                health: 500,
                contact_damage: 25,
                score_value: 1000,
                shoot_interval: 0.9,
                speed: 60.0,
            },
        }
    }
}

/// Horizontal steering, one implementation per enemy kind
pub trait Movable {
    /// Returns the horizontal velocity and facing for this frame
    fn steer(&mut self, dt: f32, body: &Body, facing: Facing, target_x: f32) -> (f32, Facing);
}

/// Walks toward the target and stops once close enough to touch
#[derive(Debug, Clone, PartialEq)]
pub struct Walker {
    speed: f32,
}

impl Movable for Walker {
    fn steer(&mut self, _dt: f32, body: &Body, facing: Facing, target_x: f32) -> (f32, Facing) {
        let center = body.center_x();
        if (target_x - center).abs() > body.width as f32 + 15.0 {
            if target_x < center {
                (-self.speed, Facing::Left)
            } else {
                (self.speed, Facing::Right)
            }
        } else {
            (0.0, facing)
        }
    }
}

/// Chases the target while swerving side to side
#[derive(Debug, Clone, PartialEq)]
pub struct Zigzagger {
    speed: f32,
    zig_timer: f32,
    zig_dir: f32,
}

impl Zigzagger {
    const PERIOD: f32 = 0.45;
    const SWERVE: f32 = 70.0;
}

impl Movable for Zigzagger {
    fn steer(&mut self, dt: f32, body: &Body, _facing: Facing, target_x: f32) -> (f32, Facing) {
        self.zig_timer += dt;
        if self.zig_timer > Self::PERIOD {
            self.zig_timer = 0.0;
            self.zig_dir = -self.zig_dir;
        }

        let center = body.center_x();
        let base = if target_x < center { -self.speed } else { self.speed };
        let facing = if target_x > center { Facing::Right } else { Facing::Left };
        (base + self.zig_dir * Self::SWERVE, facing)
    }
}

/// Ignores the target and paces back and forth; gravity does the descending
#[derive(Debug, Clone, PartialEq)]
pub struct Patroller {
    patrol_timer: f32,
}

impl Patroller {
    const LEG: f32 = 2.0;
}

impl Movable for Patroller {
    fn steer(&mut self, dt: f32, body: &Body, facing: Facing, _target_x: f32) -> (f32, Facing) {
        self.patrol_timer += dt;
        if self.patrol_timer > Self::LEG {
            self.patrol_timer = 0.0;
            let flipped = match facing {
                Facing::Left => Facing::Right,
                Facing::Right => Facing::Left,
            };
            return (-body.vel_x, flipped);
        }
        (body.vel_x, facing)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Brain {
    Walker(Walker),
    Zigzagger(Zigzagger),
    Patroller(Patroller),
}

impl Brain {
    fn for_kind(kind: EnemyKind) -> Self {
        let speed = kind.stats().speed;
        match kind {
            EnemyKind::Basic => Brain::Walker(Walker { speed }),
            EnemyKind::Fast => Brain::Zigzagger(Zigzagger {
                speed,
                zig_timer: 0.0,
                zig_dir: 1.0,
            }),
            EnemyKind::Boss => Brain::Patroller(Patroller { patrol_timer: 0.0 }),
        }
    }
}

impl Movable for Brain {
    fn steer(&mut self, dt: f32, body: &Body, facing: Facing, target_x: f32) -> (f32, Facing) {
        match self {
            Brain::Walker(walker) => walker.steer(dt, body, facing, target_x),
            Brain::Zigzagger(zigzagger) => zigzagger.steer(dt, body, facing, target_x),
            Brain::Patroller(patroller) => patroller.steer(dt, body, facing, target_x),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub body: Body,
    pub kind: EnemyKind,
    pub health: i32,
    pub max_health: i32,
    pub contact_damage: i32,
    pub score_value: u32,
    pub facing: Facing,
    pub on_ground: bool,
    /// Seconds until the next shot
    pub shoot_timer: f32,
    pub shoot_interval: f32,
    brain: Brain,
    pending_bullets: Vec<Bullet>,
}

impl Enemy {
    pub fn new(x: f32, y: f32, kind: EnemyKind) -> Self {
        let stats = kind.stats();
        let mut body = Body::new(x, y, stats.width, stats.height);
        let mut facing = Facing::Right;
        if kind == EnemyKind::Boss {
            body.vel_x = stats.speed;
            facing = Facing::Left;
        }

        Self {
            body,
            kind,
            health: stats.health,
            max_health: stats.health,
            contact_damage: stats.contact_damage,
            score_value: stats.score_value,
            facing,
            on_ground: false,
            // First shot comes after half an interval so a wave does not fire in unison
            shoot_timer: stats.shoot_interval * 0.5,
            shoot_interval: stats.shoot_interval,
            brain: Brain::for_kind(kind),
            pending_bullets: Vec::new(),
        }
    }

    /// Advance one frame, chasing and shooting at `target`
    pub fn update(
        &mut self,
        dt: f32,
        target: &Body,
        platforms: &[Platform],
        world_width: f32,
        world_height: f32,
    ) {
        if !self.body.active {
            return;
        }

        let (vel_x, facing) = self
            .brain
            .steer(dt, &self.body, self.facing, target.center_x());
        self.body.vel_x = vel_x;
        self.facing = facing;

        self.shoot_timer -= dt;
        if self.shoot_timer <= 0.0 {
            self.shoot_timer = self.shoot_interval;
            self.try_shoot(target);
        }

        physics::apply_gravity(&mut self.body, dt);
        physics::integrate(&mut self.body, dt);
        physics::clamp_horizontal_bounce(&mut self.body, world_width);
        let on_platform = physics::land_on_platforms(&mut self.body, dt, platforms);
        let on_floor = physics::clamp_vertical(&mut self.body, world_height, true);
        self.on_ground = on_platform || on_floor;

        if self.health <= 0 {
            self.body.active = false;
        }
    }

    /// Aims a bullet at the target's centre when it is within range
    fn try_shoot(&mut self, target: &Body) {
        let cx = self.body.center_x();
        let cy = self.body.center_y() + 5.0;
        let dx = target.center_x() - cx;
        let dy = target.center_y() - cy;
        let len = (dx * dx + dy * dy).sqrt();
        if len > 0.0 && len < ENEMY_AIM_RANGE {
            self.pending_bullets.push(Bullet::new(
                cx,
                cy,
                dx / len * ENEMY_BULLET_SPEED_X,
                dy / len * ENEMY_BULLET_SPEED_Y,
                BulletOwner::Enemy,
            ));
        }
    }

    pub fn take_pending_bullets(&mut self) -> Vec<Bullet> {
        std::mem::take(&mut self.pending_bullets)
    }

    /// Returns true when this hit destroyed the enemy
    pub fn take_damage(&mut self, damage: i32) -> bool {
        let was_alive = self.is_alive();
        self.health = (self.health - damage.max(0)).clamp(0, self.max_health);
        if self.health == 0 {
            self.body.active = false;
        }
        was_alive && !self.is_alive()
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn is_boss(&self) -> bool {
        self.kind == EnemyKind::Boss
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{WORLD_HEIGHT, WORLD_WIDTH};

    const DT: f32 = 1.0 / 60.0;

    fn target_at(x: f32, y: f32) -> Body {
        Body::new(x, y, 55, 72)
    }

    fn step(enemy: &mut Enemy, target: &Body) {
        enemy.update(DT, target, &[], WORLD_WIDTH, WORLD_HEIGHT);
    }

    #[test]
    fn test_enemy_stats_by_kind() {
        let basic = Enemy::new(10.0, 10.0, EnemyKind::Basic);
        assert_eq!(basic.health, 50);
        assert_eq!(basic.contact_damage, 15);
        assert_eq!(basic.score_value, 100);

        let fast = Enemy::new(10.0, 10.0, EnemyKind::Fast);
        assert_eq!(fast.health, 30);
        assert_eq!(fast.score_value, 150);

        let boss = Enemy::new(10.0, 10.0, EnemyKind::Boss);
        assert_eq!(boss.health, 500);
        assert_eq!(boss.max_health, 500);
        assert_eq!(boss.score_value, 1000);
        assert_eq!((boss.body.width, boss.body.height), (110, 130));
        assert_eq!(boss.facing, Facing::Left);
        assert_eq!(basic.facing, Facing::Right);
    }

    #[test]
    fn test_first_shot_is_staggered() {
        let basic = Enemy::new(10.0, 10.0, EnemyKind::Basic);
        assert_eq!(basic.shoot_timer, 1.5);
    }

    #[test]
    fn test_basic_walks_toward_target() {
        let mut enemy = Enemy::new(600.0, 630.0, EnemyKind::Basic);
        step(&mut enemy, &target_at(100.0, 628.0));
        assert_eq!(enemy.body.vel_x, -80.0);
        assert_eq!(enemy.facing, Facing::Left);

        let mut enemy = Enemy::new(100.0, 630.0, EnemyKind::Basic);
        step(&mut enemy, &target_at(600.0, 628.0));
        assert_eq!(enemy.body.vel_x, 80.0);
        assert_eq!(enemy.facing, Facing::Right);
    }

    #[test]
    fn test_basic_stops_when_close() {
        let mut enemy = Enemy::new(100.0, 630.0, EnemyKind::Basic);
        step(&mut enemy, &target_at(130.0, 628.0));
        assert_eq!(enemy.body.vel_x, 0.0);
    }

    #[test]
    fn test_fast_enemy_zigzags() {
        let target = target_at(800.0, 628.0);
        let mut enemy = Enemy::new(100.0, 638.0, EnemyKind::Fast);
        step(&mut enemy, &target);
        assert_eq!(enemy.body.vel_x, 165.0 + 70.0);

        // Past the 0.45 s swerve period the offset flips
        for _ in 0..30 {
            step(&mut enemy, &target);
        }
        assert_eq!(enemy.body.vel_x, 165.0 - 70.0);
    }

    #[test]
    fn test_boss_patrol_reverses() {
        let target = target_at(100.0, 628.0);
        let mut boss = Enemy::new(400.0, 570.0, EnemyKind::Boss);
        step(&mut boss, &target);
        assert_eq!(boss.body.vel_x, 60.0);
        assert_eq!(boss.facing, Facing::Left);

        for _ in 0..125 {
            step(&mut boss, &target);
        }
        assert_eq!(boss.body.vel_x, -60.0);
        assert_eq!(boss.facing, Facing::Right);
    }

    #[test]
    fn test_boss_descends_under_gravity() {
        let mut boss = Enemy::new(400.0, 0.0, EnemyKind::Boss);
        let start_y = boss.body.y;
        for _ in 0..10 {
            step(&mut boss, &target_at(100.0, 628.0));
        }
        assert!(boss.body.y > start_y);
    }

    #[test]
    fn test_enemy_shoots_at_target_in_range() {
        let mut enemy = Enemy::new(400.0, 630.0, EnemyKind::Basic);
        enemy.shoot_timer = 0.0;
        step(&mut enemy, &target_at(100.0, 628.0));
        let bullets = enemy.take_pending_bullets();
        assert_eq!(bullets.len(), 1);
        assert!(!bullets[0].is_friendly());
        assert!(bullets[0].body.vel_x < 0.0);
        assert_eq!(enemy.shoot_timer, 3.0);
    }

    #[test]
    fn test_enemy_holds_fire_out_of_range() {
        let mut enemy = Enemy::new(800.0, 630.0, EnemyKind::Basic);
        enemy.shoot_timer = 0.0;
        step(&mut enemy, &target_at(10.0, 628.0));
        assert!(enemy.take_pending_bullets().is_empty());
        assert_eq!(enemy.shoot_timer, 3.0);
    }

    #[test]
    fn test_enemy_spawned_above_world_is_clamped() {
        let mut enemy = Enemy::new(400.0, -80.0, EnemyKind::Basic);
        step(&mut enemy, &target_at(100.0, 628.0));
        assert_eq!(enemy.body.y, 0.0);
    }

    #[test]
    fn test_enemy_take_damage() {
        let mut enemy = Enemy::new(10.0, 10.0, EnemyKind::Basic);
        assert!(!enemy.take_damage(25));
        assert_eq!(enemy.health, 25);
        assert!(enemy.body.active);

        assert!(enemy.take_damage(25));
        assert_eq!(enemy.health, 0);
        assert!(!enemy.body.active);

        // Already dead: no second kill
        assert!(!enemy.take_damage(25));
        assert_eq!(enemy.health, 0);
    }

    #[test]
    fn test_inactive_enemy_does_not_move() {
        let mut enemy = Enemy::new(400.0, 300.0, EnemyKind::Basic);
        enemy.body.active = false;
        let before = enemy.clone();
        step(&mut enemy, &target_at(100.0, 628.0));
        assert_eq!(enemy, before);
    }

    // Property-based tests
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_enemy_health_stays_in_range(
                kind in prop::sample::select(vec![EnemyKind::Basic, EnemyKind::Fast, EnemyKind::Boss]),
                damage_amounts in prop::collection::vec(-20i32..120, 0..20)
            ) {
                let mut enemy = Enemy::new(10.0, 10.0, kind);
                for damage in damage_amounts {
                    enemy.take_damage(damage);
                    prop_assert!(enemy.health >= 0);
                    prop_assert!(enemy.health <= enemy.max_health);
                }
            }
        }
    }
}
