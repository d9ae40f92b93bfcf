use crate::config::RulesConfig;
use crate::objects::ObjectManager;
use crate::powerups::PowerUpKind;
use crate::ship::Spaceship;
use log::{debug, info};

/// The held-item slot plus the gun state it feeds.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    held: Option<PowerUpKind>,
    rapid_shots: u32,
    cooldown: f64,
    rules: FireRules,
}

#[derive(Debug, Clone, Copy)]
struct FireRules {
    cooldown: f64,
    rapid_cooldown: f64,
    rapid_grant: u32,
}

impl Default for FireRules {
    fn default() -> Self {
        FireRules::from(&RulesConfig::default())
    }
}

impl From<&RulesConfig> for FireRules {
    fn from(rules: &RulesConfig) -> Self {
        FireRules {
            cooldown: rules.fire_cooldown,
            rapid_cooldown: rules.rapid_fire_cooldown,
            rapid_grant: rules.rapid_fire_shots,
        }
    }
}

impl Inventory {
    pub fn new(rules: &RulesConfig) -> Self {
        Inventory {
            rules: FireRules::from(rules),
            ..Inventory::default()
        }
    }

    /// A new pickup replaces whatever was held.
    pub fn stage(&mut self, kind: PowerUpKind) {
        if let Some(previous) = self.held.replace(kind) {
            debug!("Held {:?} replaced by {:?}", previous, kind);
        }
        info!("Power-up {:?} ready", kind);
    }

    /// Spends the held item. Returns what was used, if anything.
    pub fn use_item(&mut self, player: &mut Spaceship) -> Option<PowerUpKind> {
        let kind = self.held.take()?;
        match kind {
            PowerUpKind::RapidFire => self.rapid_shots = self.rules.rapid_grant,
            PowerUpKind::Shield => player.activate_shield(),
            PowerUpKind::ExtraLife => player.add_life(),
        }
        info!("Activated {:?}", kind);
        Some(kind)
    }

    pub fn tick(&mut self, dt: f64) {
        if self.cooldown > 0.0 {
            self.cooldown -= dt;
        }
    }

    /// Fires from the ship's muzzle if the gun has cooled down.
    pub fn try_fire(&mut self, player: &Spaceship, objects: &mut ObjectManager) -> bool {
        if self.cooldown > 0.0 {
            return false;
        }
        objects.fire_projectile(player.muzzle(), player.rotation);

        if self.rapid_shots > 0 {
            self.cooldown = self.rules.rapid_cooldown;
            self.rapid_shots -= 1;
            if self.rapid_shots == 0 {
                info!("Rapid fire depleted");
            }
        } else {
            self.cooldown = self.rules.cooldown;
        }
        true
    }

    pub fn reset(&mut self) {
        self.held = None;
        self.rapid_shots = 0;
        self.cooldown = 0.0;
    }

    pub fn held(&self) -> Option<PowerUpKind> {
        self.held
    }

    pub fn has_rapid_fire(&self) -> bool {
        self.rapid_shots > 0
    }

    pub fn rapid_shots_left(&self) -> u32 {
        self.rapid_shots
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ObjectsConfig;
    use crate::constants::*;
    use crate::types::Arena;

    fn setup() -> (Inventory, Spaceship, ObjectManager) {
        let arena = Arena::new(SCREEN_WIDTH, SCREEN_HEIGHT);
        (
            Inventory::new(&RulesConfig::default()),
            Spaceship::new(arena, STARTING_LIVES),
            ObjectManager::new(arena, &ObjectsConfig::default()),
        )
    }

    #[test]
    fn using_an_empty_slot_does_nothing() {
        let (mut inventory, mut ship, _) = setup();
        assert_eq!(inventory.use_item(&mut ship), None);
        assert!(!ship.is_shield_active());
    }

    #[test]
    fn staged_shield_activates_on_use() {
        let (mut inventory, mut ship, _) = setup();
        inventory.stage(PowerUpKind::RapidFire);
        inventory.stage(PowerUpKind::Shield);
        assert_eq!(inventory.use_item(&mut ship), Some(PowerUpKind::Shield));
        assert!(ship.is_shield_active());
        assert_eq!(inventory.held(), None);
        assert!(!inventory.has_rapid_fire());
    }

    #[test]
    fn cooldown_gates_fire() {
        let (mut inventory, ship, mut objects) = setup();
        assert!(inventory.try_fire(&ship, &mut objects));
        assert!(!inventory.try_fire(&ship, &mut objects));
        inventory.tick(FIRE_COOLDOWN + 0.01);
        assert!(inventory.try_fire(&ship, &mut objects));
        assert_eq!(objects.projectiles().active_count(), 2);
        let shot = objects.projectiles().get(0).unwrap();
        assert_eq!(shot.position, ship.muzzle());
    }

    #[test]
    fn rapid_fire_shortens_cooldown_and_runs_out() {
        let (mut inventory, mut ship, mut objects) = setup();
        inventory.stage(PowerUpKind::RapidFire);
        inventory.use_item(&mut ship);
        assert_eq!(inventory.rapid_shots_left(), RAPID_FIRE_SHOTS);

        assert!(inventory.try_fire(&ship, &mut objects));
        inventory.tick(RAPID_FIRE_COOLDOWN + 0.001);
        assert!(inventory.try_fire(&ship, &mut objects));
        assert_eq!(inventory.rapid_shots_left(), RAPID_FIRE_SHOTS - 2);

        for _ in 0..RAPID_FIRE_SHOTS {
            inventory.tick(1.0);
            inventory.try_fire(&ship, &mut objects);
        }
        assert!(!inventory.has_rapid_fire());
    }
}
