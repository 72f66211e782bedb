use crate::skill::SkillKind;

/// Level-derived bonus, one per skill.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum BonusKind {
    MiningDoubleDrop,
    WoodcuttingDoubleDrop,
    FarmingDoubleCrop,
    CombatDamage,
    FishingTreasure,
    EnchantingCostReduction,
    TradingDiscount,
}

impl BonusKind {
    pub const ALL: [BonusKind; 7] = [
        BonusKind::MiningDoubleDrop,
        BonusKind::WoodcuttingDoubleDrop,
        BonusKind::FarmingDoubleCrop,
        BonusKind::CombatDamage,
        BonusKind::FishingTreasure,
        BonusKind::EnchantingCostReduction,
        BonusKind::TradingDiscount,
    ];

    /// Configuration key of the per-level rate.
    pub const fn key(self) -> &'static str {
        match self {
            BonusKind::MiningDoubleDrop => "mining.double-drop-chance-per-level",
            BonusKind::WoodcuttingDoubleDrop => "woodcutting.double-drop-chance-per-level",
            BonusKind::FarmingDoubleCrop => "farming.double-crop-chance-per-level",
            BonusKind::CombatDamage => "combat.damage-bonus-per-level",
            BonusKind::FishingTreasure => "fishing.treasure-chance-per-level",
            BonusKind::EnchantingCostReduction => "enchanting.cost-reduction-per-level",
            BonusKind::TradingDiscount => "trading.discount-per-level",
        }
    }

    /// Upper bound of the accumulated bonus in percent. Combat damage is uncapped.
    pub const fn cap(self) -> Option<f64> {
        match self {
            BonusKind::MiningDoubleDrop
            | BonusKind::WoodcuttingDoubleDrop
            | BonusKind::FarmingDoubleCrop => Some(100.0),
            BonusKind::CombatDamage => None,
            BonusKind::FishingTreasure => Some(50.0),
            BonusKind::EnchantingCostReduction => Some(80.0),
            BonusKind::TradingDiscount => Some(50.0),
        }
    }

    pub const fn default_rate(self) -> f64 {
        match self {
            BonusKind::FishingTreasure | BonusKind::TradingDiscount => 0.3,
            _ => 0.5,
        }
    }

    /// Skill whose level drives this bonus.
    pub const fn skill(self) -> SkillKind {
        match self {
            BonusKind::MiningDoubleDrop => SkillKind::Mining,
            BonusKind::WoodcuttingDoubleDrop => SkillKind::Woodcutting,
            BonusKind::FarmingDoubleCrop => SkillKind::Farming,
            BonusKind::CombatDamage => SkillKind::Combat,
            BonusKind::FishingTreasure => SkillKind::Fishing,
            BonusKind::EnchantingCostReduction => SkillKind::Enchanting,
            BonusKind::TradingDiscount => SkillKind::Trading,
        }
    }

    pub const fn for_skill(kind: SkillKind) -> BonusKind {
        match kind {
            SkillKind::Mining => BonusKind::MiningDoubleDrop,
            SkillKind::Woodcutting => BonusKind::WoodcuttingDoubleDrop,
            SkillKind::Farming => BonusKind::FarmingDoubleCrop,
            SkillKind::Combat => BonusKind::CombatDamage,
            SkillKind::Fishing => BonusKind::FishingTreasure,
            SkillKind::Enchanting => BonusKind::EnchantingCostReduction,
            SkillKind::Trading => BonusKind::TradingDiscount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_skill_owns_exactly_one_bonus() {
        for kind in SkillKind::ALL {
            assert_eq!(BonusKind::for_skill(kind).skill(), kind);
        }
    }

    #[test]
    fn keys_are_prefixed_by_owning_skill() {
        for kind in SkillKind::ALL {
            let bonus = BonusKind::for_skill(kind);
            let prefix = kind.display_name().to_ascii_lowercase();
            assert!(bonus.key().starts_with(&prefix), "{}", bonus.key());
        }
    }
}
