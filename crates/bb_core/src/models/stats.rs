use serde::{Deserialize, Serialize};

/// Six-value base stat profile of a roster candidate (each 0-255).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct StatProfile {
    pub hp: u8,
    pub attack: u8,
    pub defense: u8,
    pub special_attack: u8,
    pub special_defense: u8,
    pub speed: u8,
}

impl StatProfile {
    pub fn new(
        hp: u8,
        attack: u8,
        defense: u8,
        special_attack: u8,
        special_defense: u8,
        speed: u8,
    ) -> Self {
        Self { hp, attack, defense, special_attack, special_defense, speed }
    }

    /// Same value in all six stats (test and fixture helper).
    pub fn uniform(value: u8) -> Self {
        Self::new(value, value, value, value, value, value)
    }

    pub fn total(&self) -> u32 {
        self.as_array().iter().map(|&v| v as u32).sum()
    }

    /// Arithmetic mean of the six stats. Used for stat-band filtering.
    pub fn average(&self) -> f32 {
        self.total() as f32 / 6.0
    }

    pub fn as_array(&self) -> [u8; 6] {
        [self.hp, self.attack, self.defense, self.special_attack, self.special_defense, self.speed]
    }
}

/// Creature type. A candidate has one primary and at most one secondary type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementType {
    Normal,
    Fire,
    Water,
    Grass,
    Electric,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
    Fairy,
}

impl ElementType {
    pub const ALL: [ElementType; 18] = [
        ElementType::Normal,
        ElementType::Fire,
        ElementType::Water,
        ElementType::Grass,
        ElementType::Electric,
        ElementType::Ice,
        ElementType::Fighting,
        ElementType::Poison,
        ElementType::Ground,
        ElementType::Flying,
        ElementType::Psychic,
        ElementType::Bug,
        ElementType::Rock,
        ElementType::Ghost,
        ElementType::Dragon,
        ElementType::Dark,
        ElementType::Steel,
        ElementType::Fairy,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            ElementType::Normal => "Normal",
            ElementType::Fire => "Fire",
            ElementType::Water => "Water",
            ElementType::Grass => "Grass",
            ElementType::Electric => "Electric",
            ElementType::Ice => "Ice",
            ElementType::Fighting => "Fighting",
            ElementType::Poison => "Poison",
            ElementType::Ground => "Ground",
            ElementType::Flying => "Flying",
            ElementType::Psychic => "Psychic",
            ElementType::Bug => "Bug",
            ElementType::Rock => "Rock",
            ElementType::Ghost => "Ghost",
            ElementType::Dragon => "Dragon",
            ElementType::Dark => "Dark",
            ElementType::Steel => "Steel",
            ElementType::Fairy => "Fairy",
        }
    }
}
