//! Level curve and titles.
//!
//! A player's level is the largest index such that `xp >= LEVEL_XP[level]`.
//! Titles are purely cosmetic and derived from the level.

/// XP required to reach each level.
pub const LEVEL_XP: [u64; 20] = [
    0, 100, 250, 500, 800, 1200, 1700, 2400, 3200, 4200, 5500, 7000, 9000, 11500, 14500, 18000,
    22000, 27000, 33000, 40000,
];

pub const LEVEL_TITLES: [&str; 20] = [
    "Thrall",
    "Wanderer",
    "Scout",
    "Raider",
    "Shield-Bearer",
    "Huskarl",
    "Berserker",
    "Jarl",
    "War Chief",
    "Skald",
    "Rune Master",
    "Valkyrie",
    "Einherjar",
    "Dragonslayer",
    "Fenrir-Bane",
    "Asgardian",
    "Allfather's Chosen",
    "Herald of Dawn",
    "Realm Walker",
    "All-Seer",
];

/// Largest level whose threshold the given XP meets.
pub fn level_for_xp(xp: u64) -> u32 {
    for (i, &threshold) in LEVEL_XP.iter().enumerate().rev() {
        if xp >= threshold {
            return i as u32;
        }
    }
    0
}

pub fn title_for_level(level: u32) -> &'static str {
    let idx = (level as usize).min(LEVEL_TITLES.len() - 1);
    LEVEL_TITLES[idx]
}

/// XP threshold of the next level (saturates at the top of the curve).
pub fn xp_for_next_level(level: u32) -> u64 {
    let idx = ((level + 1) as usize).min(LEVEL_XP.len() - 1);
    LEVEL_XP[idx]
}

/// 0.0 .. 1.0 progress from the current level threshold to the next.
pub fn xp_progress(xp: u64, level: u32) -> f64 {
    let current = LEVEL_XP
        .get(level as usize)
        .copied()
        .unwrap_or(LEVEL_XP[LEVEL_XP.len() - 1]);
    let next = xp_for_next_level(level);
    if next == current {
        return 1.0;
    }
    (xp.saturating_sub(current)) as f64 / (next - current) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_thresholds() {
        assert_eq!(level_for_xp(0), 0);
        assert_eq!(level_for_xp(99), 0);
        assert_eq!(level_for_xp(100), 1);
        assert_eq!(level_for_xp(250), 2);
        assert_eq!(level_for_xp(40000), 19);
        assert_eq!(level_for_xp(1_000_000), 19);
    }

    #[test]
    fn titles_follow_levels() {
        assert_eq!(title_for_level(0), "Thrall");
        assert_eq!(title_for_level(5), "Huskarl");
        assert_eq!(title_for_level(99), "All-Seer");
    }

    #[test]
    fn progress_within_level() {
        // Level 1 spans 100..250.
        assert!((xp_progress(100, 1) - 0.0).abs() < 1e-9);
        assert!((xp_progress(175, 1) - 0.5).abs() < 1e-9);
        assert!((xp_progress(40000, 19) - 1.0).abs() < 1e-9);
    }
}
