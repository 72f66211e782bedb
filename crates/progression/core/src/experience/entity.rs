/// Entity kinds a player can kill for combat experience.
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
pub enum EntityKind {
    // Passive
    Chicken,
    Cow,
    Pig,
    Sheep,
    Rabbit,

    // Common hostile
    Zombie,
    Skeleton,
    Creeper,
    Spider,
    CaveSpider,
    Phantom,
    Drowned,

    // Stronger hostile
    Enderman,
    Witch,
    Piglin,
    PiglinBrute,
    Hoglin,
    Pillager,
    Vindicator,
    Evoker,
    Ravager,

    // Nether
    Blaze,
    Ghast,
    MagmaCube,
    WitherSkeleton,

    // Structure guardians
    Shulker,
    Guardian,
    ElderGuardian,

    // Bosses
    Warden,
    Wither,
    EnderDragon,

    // Everything else earns the default
    Slime,
    Bat,
    Villager,
    IronGolem,
}

impl EntityKind {
    pub const fn is_boss(self) -> bool {
        matches!(
            self,
            EntityKind::Warden | EntityKind::Wither | EntityKind::EnderDragon
        )
    }
}
