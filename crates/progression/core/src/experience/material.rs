/// Block and item kinds that appear in progression stimuli.
///
/// Names follow the host engine's identifiers (`DEEPSLATE_IRON_ORE`); parsing
/// is case-insensitive. Kinds without a table entry (dirt, sand, ...) are
/// valid input and simply earn nothing.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Material {
    // Stone and ores
    Stone,
    Cobblestone,
    Andesite,
    Diorite,
    Granite,
    CoalOre,
    DeepslateCoalOre,
    CopperOre,
    DeepslateCopperOre,
    RawCopperBlock,
    IronOre,
    DeepslateIronOre,
    RawIronBlock,
    NetherQuartzOre,
    RedstoneOre,
    DeepslateRedstoneOre,
    LapisOre,
    DeepslateLapisOre,
    GoldOre,
    DeepslateGoldOre,
    RawGoldBlock,
    NetherGoldOre,
    Obsidian,
    CryingObsidian,
    DiamondOre,
    DeepslateDiamondOre,
    EmeraldOre,
    DeepslateEmeraldOre,
    AncientDebris,

    // Logs and wood
    OakLog,
    OakWood,
    StrippedOakLog,
    StrippedOakWood,
    SpruceLog,
    SpruceWood,
    StrippedSpruceLog,
    StrippedSpruceWood,
    BirchLog,
    BirchWood,
    StrippedBirchLog,
    StrippedBirchWood,
    JungleLog,
    JungleWood,
    StrippedJungleLog,
    StrippedJungleWood,
    AcaciaLog,
    AcaciaWood,
    StrippedAcaciaLog,
    StrippedAcaciaWood,
    DarkOakLog,
    DarkOakWood,
    StrippedDarkOakLog,
    StrippedDarkOakWood,
    MangroveLog,
    MangroveWood,
    StrippedMangroveLog,
    StrippedMangroveWood,
    CherryLog,
    CherryWood,
    StrippedCherryLog,
    StrippedCherryWood,
    CrimsonStem,
    CrimsonHyphae,
    StrippedCrimsonStem,
    StrippedCrimsonHyphae,
    WarpedStem,
    WarpedHyphae,
    StrippedWarpedStem,
    StrippedWarpedHyphae,

    // Crop blocks
    Wheat,
    Carrots,
    Potatoes,
    Beetroots,
    Melon,
    Pumpkin,
    SugarCane,
    Cactus,
    Bamboo,
    SweetBerryBush,
    Cocoa,
    NetherWart,

    // Crop drops
    Carrot,
    Potato,
    Beetroot,
    MelonSlice,
    CocoaBeans,
    SweetBerries,

    // Fish
    Cod,
    Salmon,
    TropicalFish,
    Pufferfish,

    // Treasure
    EnchantedBook,
    NameTag,
    Saddle,
    NautilusShell,
    Bow,
    FishingRod,
    Book,

    // Junk
    LeatherBoots,
    Leather,
    Bone,
    #[strum(serialize = "STRING")]
    #[cfg_attr(feature = "serde", serde(rename = "STRING"))]
    Thread,
    Bowl,
    Stick,
    InkSac,
    TripwireHook,
    LilyPad,
    RottenFlesh,

    // Trade goods
    Diamond,
    DiamondSword,
    DiamondPickaxe,
    DiamondAxe,
    DiamondShovel,
    DiamondHoe,
    DiamondHelmet,
    DiamondChestplate,
    DiamondLeggings,
    DiamondBoots,
    Emerald,
    EmeraldBlock,
    IronIngot,
    GoldIngot,
    IronSword,
    IronPickaxe,
    IronAxe,
    IronHelmet,
    IronChestplate,
    IronLeggings,
    IronBoots,
    EnderPearl,
    Glowstone,
    Redstone,
    Bread,

    // Unlisted terrain
    Dirt,
    Sand,
    Gravel,
}

impl Material {
    /// Item dropped when the farming bonus doubles a harvest of this crop block.
    pub const fn crop_drop(self) -> Option<Material> {
        match self {
            Material::Wheat => Some(Material::Wheat),
            Material::Carrots => Some(Material::Carrot),
            Material::Potatoes => Some(Material::Potato),
            Material::Beetroots => Some(Material::Beetroot),
            Material::NetherWart => Some(Material::NetherWart),
            Material::Melon => Some(Material::MelonSlice),
            Material::Pumpkin => Some(Material::Pumpkin),
            Material::SugarCane => Some(Material::SugarCane),
            Material::Cactus => Some(Material::Cactus),
            Material::Bamboo => Some(Material::Bamboo),
            Material::Cocoa => Some(Material::CocoaBeans),
            Material::SweetBerryBush => Some(Material::SweetBerries),
            _ => None,
        }
    }
}

/// Stack of items, e.g. the result slot of a trade.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemStack {
    pub material: Material,
    pub amount: u32,
}

impl ItemStack {
    pub const fn new(material: Material, amount: u32) -> Self {
        Self { material, amount }
    }
}

/// Completed villager trade. `result` is `None` when the offer had no output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TradeOffer {
    pub result: Option<ItemStack>,
}

impl TradeOffer {
    pub const fn new(result: ItemStack) -> Self {
        Self {
            result: Some(result),
        }
    }

    pub const fn empty() -> Self {
        Self { result: None }
    }
}
