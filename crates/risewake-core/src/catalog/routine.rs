//! Morning-routine task catalog.

#[derive(Debug, Clone, Copy)]
pub struct RoutineTask {
    pub id: &'static str,
    pub label: &'static str,
    pub duration_min: u32,
}

pub const ROUTINE_TASKS: [RoutineTask; 8] = [
    RoutineTask {
        id: "water",
        label: "Drink water",
        duration_min: 1,
    },
    RoutineTask {
        id: "stretch",
        label: "5-min stretch",
        duration_min: 5,
    },
    RoutineTask {
        id: "journal",
        label: "Journal 1 line",
        duration_min: 2,
    },
    RoutineTask {
        id: "meditate",
        label: "Meditate 3 min",
        duration_min: 3,
    },
    RoutineTask {
        id: "cold_water",
        label: "Splash cold water",
        duration_min: 1,
    },
    RoutineTask {
        id: "no_phone",
        label: "No phone 10 min",
        duration_min: 10,
    },
    RoutineTask {
        id: "sunlight",
        label: "Get sunlight",
        duration_min: 5,
    },
    RoutineTask {
        id: "make_bed",
        label: "Make your bed",
        duration_min: 2,
    },
];

pub fn routine_task(id: &str) -> Option<&'static RoutineTask> {
    ROUTINE_TASKS.iter().find(|t| t.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_task_lookup() {
        assert_eq!(routine_task("water").unwrap().duration_min, 1);
        assert!(routine_task("skydive").is_none());
    }
}
