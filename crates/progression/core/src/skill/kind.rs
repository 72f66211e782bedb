/// The fixed set of progression tracks a player levels independently.
///
/// The string form (`MINING`, `WOODCUTTING`, ...) is the key used in persisted
/// records; parsing is case-insensitive so operator input like `mining` works.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum SkillKind {
    Mining,
    Woodcutting,
    Combat,
    Farming,
    Fishing,
    Enchanting,
    Trading,
}

impl SkillKind {
    /// Number of skill kinds.
    pub const COUNT: usize = 7;

    /// Every skill kind, in declaration order.
    pub const ALL: [SkillKind; Self::COUNT] = [
        SkillKind::Mining,
        SkillKind::Woodcutting,
        SkillKind::Combat,
        SkillKind::Farming,
        SkillKind::Fishing,
        SkillKind::Enchanting,
        SkillKind::Trading,
    ];

    /// Dense index in `0..COUNT`, used for array-backed per-skill settings.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Upper-case identifier used in records and environment keys.
    pub fn key(self) -> &'static str {
        self.into()
    }

    /// Human-facing name, e.g. `Woodcutting`.
    pub const fn display_name(self) -> &'static str {
        match self {
            SkillKind::Mining => "Mining",
            SkillKind::Woodcutting => "Woodcutting",
            SkillKind::Combat => "Combat",
            SkillKind::Farming => "Farming",
            SkillKind::Fishing => "Fishing",
            SkillKind::Enchanting => "Enchanting",
            SkillKind::Trading => "Trading",
        }
    }
}
