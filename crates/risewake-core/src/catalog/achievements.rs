//! Achievement catalog.
//!
//! Each entry carries a threshold-based unlock condition expressed as an
//! explicit sum type so evaluation stays exhaustive and compiler-checked.

use serde::{Deserialize, Serialize};

/// Unlock condition kinds with their numeric thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnlockCondition {
    /// Current streak reaches N days.
    Streak(u32),
    /// Lifetime alarm dismissals reach N.
    Dismissals(u32),
    /// Lifetime bosses defeated reach N.
    BossesDefeated(u32),
    /// Player level reaches N.
    Level(u32),
    /// Lifetime coins earned reach N.
    LifetimeCoins(u64),
    /// Summed per-type challenge completions reach N.
    ChallengesCompleted(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reward {
    pub coins: u64,
    pub xp: u64,
}

#[derive(Debug, Clone, Copy)]
pub struct Achievement {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub condition: UnlockCondition,
    pub reward: Reward,
}

pub const ACHIEVEMENTS: [Achievement; 19] = [
    // Streaks
    Achievement {
        id: "streak_3",
        name: "First Light",
        description: "3-day wake-up streak",
        condition: UnlockCondition::Streak(3),
        reward: Reward { coins: 50, xp: 100 },
    },
    Achievement {
        id: "streak_7",
        name: "Week Warrior",
        description: "7-day wake-up streak",
        condition: UnlockCondition::Streak(7),
        reward: Reward { coins: 150, xp: 300 },
    },
    Achievement {
        id: "streak_14",
        name: "Fortnight's Fury",
        description: "14-day wake-up streak",
        condition: UnlockCondition::Streak(14),
        reward: Reward { coins: 300, xp: 500 },
    },
    Achievement {
        id: "streak_30",
        name: "Moon Cycle Master",
        description: "30-day wake-up streak",
        condition: UnlockCondition::Streak(30),
        reward: Reward {
            coins: 500,
            xp: 1000,
        },
    },
    Achievement {
        id: "streak_100",
        name: "Eternal Vigil",
        description: "100-day wake-up streak",
        condition: UnlockCondition::Streak(100),
        reward: Reward {
            coins: 2000,
            xp: 5000,
        },
    },
    // Dismissals
    Achievement {
        id: "dismiss_10",
        name: "Rising Tide",
        description: "Dismiss 10 alarms",
        condition: UnlockCondition::Dismissals(10),
        reward: Reward { coins: 30, xp: 50 },
    },
    Achievement {
        id: "dismiss_50",
        name: "Dawn Breaker",
        description: "Dismiss 50 alarms",
        condition: UnlockCondition::Dismissals(50),
        reward: Reward { coins: 100, xp: 200 },
    },
    Achievement {
        id: "dismiss_100",
        name: "Sentinel",
        description: "Dismiss 100 alarms",
        condition: UnlockCondition::Dismissals(100),
        reward: Reward { coins: 250, xp: 500 },
    },
    Achievement {
        id: "dismiss_500",
        name: "Immortal Rise",
        description: "Dismiss 500 alarms",
        condition: UnlockCondition::Dismissals(500),
        reward: Reward {
            coins: 1000,
            xp: 2000,
        },
    },
    // Bosses
    Achievement {
        id: "boss_1",
        name: "Giant Slayer",
        description: "Defeat your first boss",
        condition: UnlockCondition::BossesDefeated(1),
        reward: Reward { coins: 100, xp: 200 },
    },
    Achievement {
        id: "boss_5",
        name: "Monster Hunter",
        description: "Defeat 5 bosses",
        condition: UnlockCondition::BossesDefeated(5),
        reward: Reward { coins: 300, xp: 600 },
    },
    Achievement {
        id: "boss_10",
        name: "Ragnarok Survivor",
        description: "Defeat 10 bosses",
        condition: UnlockCondition::BossesDefeated(10),
        reward: Reward {
            coins: 500,
            xp: 1000,
        },
    },
    // Levels
    Achievement {
        id: "level_5",
        name: "Huskarl",
        description: "Reach level 5",
        condition: UnlockCondition::Level(5),
        reward: Reward { coins: 100, xp: 0 },
    },
    Achievement {
        id: "level_10",
        name: "Rune Master",
        description: "Reach level 10",
        condition: UnlockCondition::Level(10),
        reward: Reward { coins: 300, xp: 0 },
    },
    Achievement {
        id: "level_15",
        name: "Asgardian",
        description: "Reach level 15",
        condition: UnlockCondition::Level(15),
        reward: Reward { coins: 500, xp: 0 },
    },
    // Coins
    Achievement {
        id: "coins_500",
        name: "Hoarder",
        description: "Earn 500 total coins",
        condition: UnlockCondition::LifetimeCoins(500),
        reward: Reward { coins: 50, xp: 100 },
    },
    Achievement {
        id: "coins_5000",
        name: "Dragon's Treasure",
        description: "Earn 5,000 total coins",
        condition: UnlockCondition::LifetimeCoins(5000),
        reward: Reward { coins: 200, xp: 500 },
    },
    // Challenges
    Achievement {
        id: "challenge_50",
        name: "Rune Calculator",
        description: "Complete 50 challenges",
        condition: UnlockCondition::ChallengesCompleted(50),
        reward: Reward { coins: 100, xp: 200 },
    },
    Achievement {
        id: "challenge_200",
        name: "Sage of Midgard",
        description: "Complete 200 challenges",
        condition: UnlockCondition::ChallengesCompleted(200),
        reward: Reward { coins: 250, xp: 500 },
    },
];

pub fn achievement_by_id(id: &str) -> Option<&'static Achievement> {
    ACHIEVEMENTS.iter().find(|a| a.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_ids_are_unique() {
        for (i, a) in ACHIEVEMENTS.iter().enumerate() {
            for b in &ACHIEVEMENTS[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn lookup_by_id() {
        assert_eq!(achievement_by_id("streak_7").unwrap().name, "Week Warrior");
        assert!(achievement_by_id("nope").is_none());
    }
}
