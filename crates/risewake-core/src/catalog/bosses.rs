//! Weekly boss rotation.
//!
//! One adversary per calendar week, cycling through the catalog. Each boss
//! declares a weakness (a challenge type that deals double damage), an
//! attack power applied to the snooze scoreboard, and defeat loot.

use crate::alarm::ChallengeType;

/// Coin/XP bonus paid when a boss falls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Loot {
    pub coins: u64,
    pub xp: u64,
}

#[derive(Debug, Clone, Copy)]
pub struct Boss {
    pub id: &'static str,
    pub name: &'static str,
    pub title: &'static str,
    pub max_hp: u32,
    /// Scoreboard damage the boss deals per snooze.
    pub attack_power: u32,
    /// Challenge type that deals double damage.
    pub weakness: ChallengeType,
    pub loot: Loot,
}

pub const WEEKLY_BOSSES: [Boss; 6] = [
    Boss {
        id: "draugr",
        name: "Draugr",
        title: "The Restless Sleeper",
        max_hp: 500,
        attack_power: 15,
        weakness: ChallengeType::Shake,
        loot: Loot { coins: 100, xp: 200 },
    },
    Boss {
        id: "frost_giant",
        name: "Hrimthurs",
        title: "Frost Giant of Niflheim",
        max_hp: 750,
        attack_power: 20,
        weakness: ChallengeType::Math,
        loot: Loot { coins: 150, xp: 300 },
    },
    Boss {
        id: "fenrir",
        name: "Fenrir",
        title: "The Devouring Wolf",
        max_hp: 1000,
        attack_power: 25,
        weakness: ChallengeType::Trivia,
        loot: Loot { coins: 200, xp: 400 },
    },
    Boss {
        id: "jormungandr",
        name: "Jormungandr",
        title: "World Serpent",
        max_hp: 1200,
        attack_power: 30,
        weakness: ChallengeType::Memory,
        loot: Loot { coins: 250, xp: 500 },
    },
    Boss {
        id: "nidhogg",
        name: "Nidhogg",
        title: "Dragon of Yggdrasil",
        max_hp: 1500,
        attack_power: 35,
        weakness: ChallengeType::Typing,
        loot: Loot { coins: 300, xp: 600 },
    },
    Boss {
        id: "surtr",
        name: "Surtr",
        title: "Lord of Muspelheim",
        max_hp: 2000,
        attack_power: 40,
        weakness: ChallengeType::Steps,
        loot: Loot {
            coins: 500,
            xp: 1000,
        },
    },
];

/// Boss assigned to a given week index.
pub fn boss_for_week(week: u32) -> &'static Boss {
    &WEEKLY_BOSSES[week as usize % WEEKLY_BOSSES.len()]
}

/// Look up a boss by catalog id.
pub fn boss_by_id(id: &str) -> Option<&'static Boss> {
    WEEKLY_BOSSES.iter().find(|b| b.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_wraps() {
        assert_eq!(boss_for_week(0).id, "draugr");
        assert_eq!(boss_for_week(5).id, "surtr");
        assert_eq!(boss_for_week(6).id, "draugr");
        assert_eq!(boss_for_week(13).id, "frost_giant");
    }

    #[test]
    fn ids_are_unique() {
        for (i, a) in WEEKLY_BOSSES.iter().enumerate() {
            for b in &WEEKLY_BOSSES[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }
}
