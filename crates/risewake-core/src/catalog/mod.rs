//! Static game content: level curve, weekly bosses, achievement catalog
//! and the morning-routine task list. All immutable at runtime.

pub mod achievements;
pub mod bosses;
pub mod levels;
pub mod routine;

pub use achievements::{achievement_by_id, Achievement, Reward, UnlockCondition, ACHIEVEMENTS};
pub use bosses::{boss_by_id, boss_for_week, Boss, Loot, WEEKLY_BOSSES};
pub use levels::{level_for_xp, title_for_level, xp_for_next_level, xp_progress, LEVEL_XP};
pub use routine::{routine_task, RoutineTask, ROUTINE_TASKS};
