//! Equipment attributes, slots, class requirements and skill names

use serde::{Deserialize, Serialize};

use crate::CatalogError;

/// Body slot an equipment piece occupies (`Part` in the data tables)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum EquipSlot {
    Mask = 1,
    Top = 2,
    RightHand = 3,
    LeftHand = 4,
    Bottoms = 5,
    Special = 6,
    Shoes = 8,
    Head = 9,
}

impl EquipSlot {
    pub const ALL: [EquipSlot; 8] = [
        Self::Head,
        Self::Mask,
        Self::Top,
        Self::Bottoms,
        Self::Shoes,
        Self::RightHand,
        Self::LeftHand,
        Self::Special,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Mask => "Mask",
            Self::Top => "Top",
            Self::RightHand => "Right Hand",
            Self::LeftHand => "Left Hand",
            Self::Bottoms => "Bottoms",
            Self::Special => "Special",
            Self::Shoes => "Shoes",
            Self::Head => "Head",
        }
    }
}

impl TryFrom<u8> for EquipSlot {
    type Error = CatalogError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Mask),
            2 => Ok(Self::Top),
            3 => Ok(Self::RightHand),
            4 => Ok(Self::LeftHand),
            5 => Ok(Self::Bottoms),
            6 => Ok(Self::Special),
            8 => Ok(Self::Shoes),
            9 => Ok(Self::Head),
            other => Err(CatalogError::UnknownSlot(other)),
        }
    }
}

impl From<EquipSlot> for u8 {
    fn from(slot: EquipSlot) -> Self {
        slot as u8
    }
}

/// Playable character class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacterClass {
    Fighter,
    Armsdancer,
    Psychic,
    Gunner,
}

/// Class restriction on an equipment piece (`NeedClass`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum ClassRequirement {
    Only(CharacterClass),
    #[default]
    Any,
    FighterOrArmsdancer,
    PsychicOrGunner,
}

impl ClassRequirement {
    /// Whether a character of `class` may equip the item
    pub fn allows(&self, class: CharacterClass) -> bool {
        use CharacterClass::*;
        match self {
            Self::Only(c) => *c == class,
            Self::Any => true,
            Self::FighterOrArmsdancer => matches!(class, Fighter | Armsdancer),
            Self::PsychicOrGunner => matches!(class, Psychic | Gunner),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Only(CharacterClass::Fighter) => "Fighter",
            Self::Only(CharacterClass::Armsdancer) => "Armsdancer",
            Self::Only(CharacterClass::Psychic) => "Psychic",
            Self::Only(CharacterClass::Gunner) => "Gunner",
            Self::Any => "Any",
            Self::FighterOrArmsdancer => "Fighter/Armsdancer",
            Self::PsychicOrGunner => "Psychic/Gunner",
        }
    }
}

impl TryFrom<u16> for ClassRequirement {
    type Error = CatalogError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Only(CharacterClass::Fighter)),
            2 => Ok(Self::Only(CharacterClass::Armsdancer)),
            6 => Ok(Self::Only(CharacterClass::Psychic)),
            7 => Ok(Self::Only(CharacterClass::Gunner)),
            100 => Ok(Self::Any),
            101 => Ok(Self::FighterOrArmsdancer),
            102 => Ok(Self::PsychicOrGunner),
            other => Err(CatalogError::UnknownClass(other)),
        }
    }
}

impl From<ClassRequirement> for u16 {
    fn from(req: ClassRequirement) -> Self {
        match req {
            ClassRequirement::Only(CharacterClass::Fighter) => 0,
            ClassRequirement::Only(CharacterClass::Armsdancer) => 2,
            ClassRequirement::Only(CharacterClass::Psychic) => 6,
            ClassRequirement::Only(CharacterClass::Gunner) => 7,
            ClassRequirement::Any => 100,
            ClassRequirement::FighterOrArmsdancer => 101,
            ClassRequirement::PsychicOrGunner => 102,
        }
    }
}

/// Skill name for a skill id (`AddSkill[].K`)
pub fn skill_name(id: u32) -> Option<&'static str> {
    let name = match id {
        1 | 10 => "Charge",
        2 | 11 => "Heavenly Strike",
        3 => "Gale",
        4 => "High-Energy Wave",
        5 => "Dragon Wind",
        6 | 15 => "Hundred-Break Fist",
        7 => "Paralyze",
        8 => "Graft",
        9 => "Turn the Tide",
        12 => "Thrust",
        13 => "Fire Wheel",
        14 => "Wind Blade",
        16 => "Hurricane Fury",
        17 => "Seven Star Chain",
        18 => "Inferno",
        19 => "Thunder Quake",
        20 => "Mind Attack",
        21 => "Mind Attack II",
        22 => "Spike",
        23 => "Spike II",
        24 => "Meteor Fire",
        25 => "Psionic Grip",
        26 => "Blast Attack",
        27 => "Blast Attack II",
        28 | 29 => "Not Yet Available",
        30 => "Reversal",
        _ => return None,
    };
    Some(name)
}

/// One skill level bonus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillBonus {
    #[serde(rename = "K")]
    pub skill_id: u32,
    #[serde(rename = "V")]
    pub level: i32,
}

impl SkillBonus {
    pub fn name(&self) -> Option<&'static str> {
        skill_name(self.skill_id)
    }
}

/// Flat and percentage stat bonuses (`Add*`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct StatBonuses {
    pub add_ap: i32,
    pub add_ap_per: f64,
    pub add_as_per: f64,
    pub add_brandish: i32,
    pub add_chakra: i32,
    pub add_dex: i32,
    pub add_dodge: i32,
    pub add_dp: i32,
    pub add_dp_per: f64,
    pub add_esp: i32,
    pub add_hp: i32,
    pub add_hp_per: f64,
    pub add_int: i32,
    pub add_martial: i32,
    pub add_ms: i32,
    pub add_prana: i32,
    pub add_skill: Vec<SkillBonus>,
    pub add_sp: i32,
    pub add_sp_per: f64,
    pub add_spt: i32,
    pub add_st: i32,
    pub add_str: i32,
    pub add_tactic: i32,
    pub add_tactic_per: f64,
}

/// Minimum attributes needed to equip (`Need*`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Requirements {
    pub need_brandish: i32,
    pub need_chakra: i32,
    pub need_class: ClassRequirement,
    pub need_dex: i32,
    pub need_dodge: i32,
    pub need_esp: i32,
    pub need_hero: i32,
    pub need_int: i32,
    pub need_martial: i32,
    pub need_prana: i32,
    pub need_spt: i32,
    pub need_str: i32,
    pub need_tactic: i32,
}

/// Attribute a requirement is checked against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatKind {
    Brandish,
    Chakra,
    Dex,
    Dodge,
    Esp,
    Hero,
    Int,
    Martial,
    Prana,
    Spt,
    Str,
    Tactic,
}

/// A character's attribute block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CharacterStats {
    pub brandish: i32,
    pub chakra: i32,
    pub dex: i32,
    pub dodge: i32,
    pub esp: i32,
    pub hero: i32,
    pub int: i32,
    pub martial: i32,
    pub prana: i32,
    pub spt: i32,
    pub str: i32,
    pub tactic: i32,
}

/// A requirement the character does not meet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnmetRequirement {
    Class(ClassRequirement),
    Stat { stat: StatKind, needed: i32, have: i32 },
}

impl Requirements {
    fn stat_pairs(&self, stats: &CharacterStats) -> [(StatKind, i32, i32); 12] {
        [
            (StatKind::Brandish, self.need_brandish, stats.brandish),
            (StatKind::Chakra, self.need_chakra, stats.chakra),
            (StatKind::Dex, self.need_dex, stats.dex),
            (StatKind::Dodge, self.need_dodge, stats.dodge),
            (StatKind::Esp, self.need_esp, stats.esp),
            (StatKind::Hero, self.need_hero, stats.hero),
            (StatKind::Int, self.need_int, stats.int),
            (StatKind::Martial, self.need_martial, stats.martial),
            (StatKind::Prana, self.need_prana, stats.prana),
            (StatKind::Spt, self.need_spt, stats.spt),
            (StatKind::Str, self.need_str, stats.str),
            (StatKind::Tactic, self.need_tactic, stats.tactic),
        ]
    }

    /// Every requirement `class`/`stats` falls short of
    pub fn unmet(&self, class: CharacterClass, stats: &CharacterStats) -> Vec<UnmetRequirement> {
        let mut unmet = Vec::new();
        if !self.need_class.allows(class) {
            unmet.push(UnmetRequirement::Class(self.need_class));
        }
        for (stat, needed, have) in self.stat_pairs(stats) {
            if have < needed {
                unmet.push(UnmetRequirement::Stat { stat, needed, have });
            }
        }
        unmet
    }
}

/// Equipment-only attribute record (`Equip` on `Type == 3` items)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EquipmentAttributes {
    pub part: EquipSlot,
    #[serde(default)]
    pub ap: i32,
    #[serde(default)]
    pub dp: i32,
    #[serde(default)]
    pub att_spec_flag: bool,
    #[serde(default)]
    pub att_spec_ratio: f64,
    #[serde(default)]
    pub for_char: i32,
    #[serde(flatten)]
    pub bonuses: StatBonuses,
    #[serde(flatten)]
    pub requirements: Requirements,
}

impl EquipmentAttributes {
    pub fn new(part: EquipSlot) -> Self {
        Self {
            part,
            ap: 0,
            dp: 0,
            att_spec_flag: false,
            att_spec_ratio: 0.0,
            for_char: 0,
            bonuses: StatBonuses::default(),
            requirements: Requirements::default(),
        }
    }

    pub fn meets_requirements(&self, class: CharacterClass, stats: &CharacterStats) -> bool {
        self.requirements.unmet(class, stats).is_empty()
    }
}
