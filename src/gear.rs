//! Items and equipped gear

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{Result, SimError};
use crate::item_sets::ItemSet;
use crate::unit_stats::{Stat, Stats};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemSlot {
    Head,
    Neck,
    Shoulder,
    Back,
    Chest,
    Wrist,
    Hands,
    Waist,
    Legs,
    Feet,
    Finger1,
    Finger2,
    Trinket1,
    Trinket2,
    MainHand,
    OffHand,
    Ranged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandType {
    OneHand,
    TwoHand,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeaponStats {
    pub min_damage: f64,
    pub max_damage: f64,
    pub speed: f64,
    pub hand_type: HandType,
}

impl WeaponStats {
    pub fn average_damage(&self) -> f64 {
        (self.min_damage + self.max_damage) / 2.0
    }

    pub fn dps(&self) -> f64 {
        if self.speed > 0.0 {
            self.average_damage() / self.speed
        } else {
            0.0
        }
    }
}

/// Unarmed fallback
pub const FISTS: WeaponStats = WeaponStats {
    min_damage: 1.0,
    max_damage: 2.0,
    speed: 2.0,
    hand_type: HandType::OneHand,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: u32,
    pub name: String,
    pub slot: ItemSlot,
    #[serde(default)]
    pub stats: Stats,
    #[serde(default)]
    pub weapon: Option<WeaponStats>,
    #[serde(default)]
    pub set: Option<ItemSet>,
    /// Shield items carry their block value as "equipped" block value
    #[serde(default)]
    pub is_shield: bool,
}

impl Item {
    pub fn new(id: u32, name: &str, slot: ItemSlot, stats: &[(Stat, f64)]) -> Self {
        Self {
            id,
            name: name.to_string(),
            slot,
            stats: Stats::from_pairs(stats),
            weapon: None,
            set: None,
            is_shield: false,
        }
    }

    pub fn with_set(mut self, set: ItemSet) -> Self {
        self.set = Some(set);
        self
    }

    pub fn with_weapon(mut self, min_damage: f64, max_damage: f64, speed: f64, hand_type: HandType) -> Self {
        self.weapon = Some(WeaponStats { min_damage, max_damage, speed, hand_type });
        self
    }

    pub fn shield(mut self) -> Self {
        self.is_shield = true;
        self
    }
}

/// Equipped items, one per slot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Gear {
    pub items: Vec<Item>,
}

impl Gear {
    /// Build gear, rejecting two items in one slot and an off-hand with a two-hander
    pub fn new(items: Vec<Item>) -> Result<Self> {
        let gear = Self { items };
        gear.validate()?;
        Ok(gear)
    }

    pub fn validate(&self) -> Result<()> {
        let mut seen = BTreeMap::new();
        for item in &self.items {
            if let Some(other) = seen.insert(item.slot, &item.name) {
                return Err(SimError::InvalidConfig(format!(
                    "slot {:?} holds both {} and {}",
                    item.slot, other, item.name
                )));
            }
        }
        if let Some(mh) = self.main_hand() {
            if mh.hand_type == HandType::TwoHand && self.item(ItemSlot::OffHand).is_some() {
                return Err(SimError::InvalidConfig("off-hand equipped with a two-handed weapon".into()));
            }
        }
        Ok(())
    }

    pub fn item(&self, slot: ItemSlot) -> Option<&Item> {
        self.items.iter().find(|i| i.slot == slot)
    }

    /// Sum of all item stats
    pub fn stats(&self) -> Stats {
        self.items.iter().fold(Stats::default(), |acc, i| acc + i.stats)
    }

    /// Armor from items only; talents like Toughness scale this part
    pub fn equip_armor(&self) -> f64 {
        self.items.iter().map(|i| i.stats[Stat::Armor]).sum()
    }

    /// Block value from items only; Shield Specialization and Aegis scale this part
    pub fn equip_block_value(&self) -> f64 {
        self.items.iter().map(|i| i.stats[Stat::BlockValue]).sum()
    }

    pub fn main_hand(&self) -> Option<WeaponStats> {
        self.item(ItemSlot::MainHand).and_then(|i| i.weapon)
    }

    /// Equipped off-hand when it is a shield
    pub fn shield(&self) -> Option<&Item> {
        self.item(ItemSlot::OffHand).filter(|i| i.is_shield)
    }

    pub fn has_shield(&self) -> bool {
        self.shield().is_some()
    }

    /// Equipped piece count per item set
    pub fn set_piece_counts(&self) -> BTreeMap<ItemSet, i32> {
        let mut counts = BTreeMap::new();
        for set in self.items.iter().filter_map(|i| i.set) {
            *counts.entry(set).or_insert(0) += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sword() -> Item {
        Item::new(1, "Sword", ItemSlot::MainHand, &[(Stat::Strength, 5.0)]).with_weapon(50.0, 100.0, 2.5, HandType::OneHand)
    }

    #[test]
    fn sums_stats_and_counts_sets() {
        let gear = Gear::new(vec![
            sword(),
            Item::new(2, "Helm", ItemSlot::Head, &[(Stat::Armor, 500.0), (Stat::Stamina, 20.0)])
                .with_set(ItemSet::LawbringerWill),
            Item::new(3, "Chest", ItemSlot::Chest, &[(Stat::Armor, 700.0)]).with_set(ItemSet::LawbringerWill),
            Item::new(4, "Shield", ItemSlot::OffHand, &[(Stat::Armor, 2000.0), (Stat::BlockValue, 40.0)]).shield(),
        ])
        .unwrap();

        let stats = gear.stats();
        assert_eq!(stats[Stat::Armor], 3200.0);
        assert_eq!(stats[Stat::Strength], 5.0);
        assert_eq!(gear.equip_block_value(), 40.0);
        assert!(gear.has_shield());
        assert_eq!(gear.set_piece_counts().get(&ItemSet::LawbringerWill), Some(&2));
        assert!((gear.main_hand().unwrap().dps() - 30.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_duplicate_slots() {
        let res = Gear::new(vec![sword(), sword()]);
        assert!(res.is_err());
    }

    #[test]
    fn rejects_offhand_with_two_hander() {
        let greatsword = Item::new(1, "Greatsword", ItemSlot::MainHand, &[]).with_weapon(100.0, 200.0, 3.5, HandType::TwoHand);
        let shield = Item::new(2, "Shield", ItemSlot::OffHand, &[]).shield();
        assert!(Gear::new(vec![greatsword, shield]).is_err());
    }
}
