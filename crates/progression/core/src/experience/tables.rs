//! Base experience tables, before the per-skill multiplier.
//!
//! Every table is a tiered bucket lookup; inputs without a bucket fall to the
//! table's default (zero for gathering skills, a small flat value for combat,
//! fishing and trading).

use super::{EntityKind, Material};

pub const FISHING_BASE_XP: f64 = 10.0;
pub const ENCHANTING_XP_PER_LEVEL: f64 = 5.0;
pub const TRADE_BASE_XP: f64 = 10.0;
pub const COMBAT_DEFAULT_XP: f64 = 5.0;

pub const fn mining(material: Material) -> f64 {
    use Material::*;
    match material {
        Stone | Cobblestone | Andesite | Diorite | Granite => 1.0,
        CoalOre | DeepslateCoalOre => 5.0,
        CopperOre | DeepslateCopperOre | RawCopperBlock => 8.0,
        IronOre | DeepslateIronOre | RawIronBlock => 10.0,
        NetherQuartzOre => 10.0,
        RedstoneOre | DeepslateRedstoneOre => 12.0,
        LapisOre | DeepslateLapisOre => 12.0,
        GoldOre | DeepslateGoldOre | RawGoldBlock | NetherGoldOre => 15.0,
        Obsidian | CryingObsidian => 20.0,
        DiamondOre | DeepslateDiamondOre => 25.0,
        EmeraldOre | DeepslateEmeraldOre => 30.0,
        AncientDebris => 50.0,
        _ => 0.0,
    }
}

pub const fn woodcutting(material: Material) -> f64 {
    use Material::*;
    match material {
        OakLog | OakWood | StrippedOakLog | StrippedOakWood => 5.0,
        SpruceLog | SpruceWood | StrippedSpruceLog | StrippedSpruceWood => 5.0,
        BirchLog | BirchWood | StrippedBirchLog | StrippedBirchWood => 5.0,
        AcaciaLog | AcaciaWood | StrippedAcaciaLog | StrippedAcaciaWood => 6.0,
        JungleLog | JungleWood | StrippedJungleLog | StrippedJungleWood => 7.0,
        MangroveLog | MangroveWood | StrippedMangroveLog | StrippedMangroveWood => 7.0,
        CherryLog | CherryWood | StrippedCherryLog | StrippedCherryWood => 7.0,
        DarkOakLog | DarkOakWood | StrippedDarkOakLog | StrippedDarkOakWood => 8.0,
        CrimsonStem | CrimsonHyphae | StrippedCrimsonStem | StrippedCrimsonHyphae => 10.0,
        WarpedStem | WarpedHyphae | StrippedWarpedStem | StrippedWarpedHyphae => 10.0,
        _ => 0.0,
    }
}

pub const fn combat(entity: EntityKind) -> f64 {
    use EntityKind::*;
    match entity {
        Chicken | Cow | Pig | Sheep | Rabbit => 2.0,
        Zombie | Skeleton | Creeper | Spider | CaveSpider => 10.0,
        Phantom | Drowned => 12.0,
        Enderman | Witch => 15.0,
        Piglin | PiglinBrute | Hoglin => 15.0,
        Pillager | Vindicator | Evoker | Ravager => 18.0,
        Blaze | Ghast | MagmaCube | WitherSkeleton => 20.0,
        Shulker => 25.0,
        Guardian | ElderGuardian => 30.0,
        Warden => 200.0,
        Wither => 300.0,
        EnderDragon => 500.0,
        _ => COMBAT_DEFAULT_XP,
    }
}

pub const fn farming(crop: Material) -> f64 {
    use Material::*;
    match crop {
        Bamboo => 1.0,
        SugarCane | Cactus => 2.0,
        Melon | SweetBerryBush => 3.0,
        Pumpkin | Cocoa => 4.0,
        Wheat | Carrots | Potatoes | Beetroots => 5.0,
        NetherWart => 6.0,
        _ => 0.0,
    }
}

/// Whether breaking `material` counts as a harvest for farming.
pub const fn is_crop(material: Material) -> bool {
    farming(material) > 0.0
}

pub const fn fishing(caught: Material) -> f64 {
    use Material::*;
    match caught {
        EnchantedBook | NameTag | Saddle | NautilusShell => 25.0,
        Bow | FishingRod => 20.0,
        Cod | Salmon => 10.0,
        TropicalFish => 12.0,
        Pufferfish => 15.0,
        LeatherBoots | Leather | Bone | Thread | Bowl | Stick | InkSac | TripwireHook
        | LilyPad | RottenFlesh | Bamboo => 5.0,
        _ => FISHING_BASE_XP,
    }
}

/// Per-item value of a trade result.
pub const fn trade_value(result: Material) -> f64 {
    use Material::*;
    match result {
        Diamond | DiamondSword | DiamondPickaxe | DiamondAxe | DiamondShovel | DiamondHoe
        | DiamondHelmet | DiamondChestplate | DiamondLeggings | DiamondBoots => 30.0,
        Emerald | EmeraldBlock => 25.0,
        IronIngot | GoldIngot | IronSword | IronPickaxe | IronAxe | IronHelmet
        | IronChestplate | IronLeggings | IronBoots => 15.0,
        EnchantedBook => 35.0,
        EnderPearl | Glowstone | Redstone => 12.0,
        _ => TRADE_BASE_XP,
    }
}

/// Items the fishing treasure bonus draws from, uniformly.
pub const TREASURE: [Material; 7] = [
    Material::NameTag,
    Material::Saddle,
    Material::Bow,
    Material::FishingRod,
    Material::Book,
    Material::NautilusShell,
    Material::LilyPad,
];
