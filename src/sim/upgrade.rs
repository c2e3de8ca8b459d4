//! Between-level upgrades

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::actor::Player;
use crate::tuning::UpgradeTuning;

/// One of the four stat upgrades
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Upgrade {
    /// +1 shot per second
    Firerate,
    /// Heal up to max hp
    Healing,
    /// Raise max hp without healing
    MoreHp,
    /// Raise bullet damage
    Damage,
}

/// Every upgrade, in catalog order
pub const CATALOG: [Upgrade; 4] = [
    Upgrade::Firerate,
    Upgrade::Healing,
    Upgrade::MoreHp,
    Upgrade::Damage,
];

impl Upgrade {
    pub fn id(&self) -> &'static str {
        match self {
            Upgrade::Firerate => "firerate",
            Upgrade::Healing => "healing",
            Upgrade::MoreHp => "moreHp",
            Upgrade::Damage => "damage",
        }
    }

    /// Menu text shown for the upgrade
    pub fn label(&self) -> &'static str {
        match self {
            Upgrade::Firerate => "Firerate +1",
            Upgrade::Healing => "Heal +50",
            Upgrade::MoreHp => "Healthpoints +25",
            Upgrade::Damage => "Damage +2",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        CATALOG.iter().copied().find(|u| u.id() == id)
    }

    /// Apply this upgrade to the player's stats once
    pub fn apply(&self, player: &mut Player, amounts: &UpgradeTuning) {
        match self {
            Upgrade::Firerate => player.core.fire_rate += amounts.fire_rate,
            Upgrade::Healing => {
                player.core.hp = (player.core.hp + amounts.heal).min(player.core.max_hp);
            }
            Upgrade::MoreHp => player.core.max_hp += amounts.max_hp,
            Upgrade::Damage => player.bullet_damage += amounts.damage,
        }
    }
}

/// Shuffle the catalog and offer the first two entries
pub fn draw_choices<R: Rng>(rng: &mut R) -> [Upgrade; 2] {
    let mut deck = CATALOG;
    deck.shuffle(rng);
    [deck[0], deck[1]]
}
