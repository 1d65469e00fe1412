//! Weekly schedule - static day plans and exercise targets

use chrono::Weekday;

/// Sets assumed when a target-set spec has no number in it
pub const DEFAULT_TARGET_SETS: u32 = 3;

/// Rest assumed when a rest spec has no number in it
pub const DEFAULT_REST_SECS: u32 = 90;

#[derive(Debug, Clone)]
pub struct Exercise {
    pub id: &'static str,
    pub name: &'static str,
    /// Target sets, free-form ("3-4")
    pub sets: &'static str,
    /// Target reps, free-form ("8-12")
    pub reps: &'static str,
    pub rpe: &'static str,
    /// Rest between sets, free-form ("90 s", "2-3 min")
    pub rest: &'static str,
    pub note: Option<&'static str>,
}

impl Exercise {
    pub fn rest_secs(&self) -> u32 {
        parse_rest_secs(self.rest)
    }
}

#[derive(Debug, Clone)]
pub struct DaySchedule {
    pub day: Weekday,
    pub day_name: &'static str,
    pub focus: &'static str,
    pub rest_day: bool,
    /// Rough calories burned by the session, used to pre-fill daily stats
    pub estimated_calories: Option<u32>,
    pub supplements: &'static [&'static str],
    pub exercises: &'static [Exercise],
}

pub const WORKOUT_SCHEDULE: &[DaySchedule] = &[
    DaySchedule {
        day: Weekday::Mon,
        day_name: "Monday",
        focus: "Push",
        rest_day: false,
        estimated_calories: Some(450),
        supplements: &["Creatine 5g", "Whey after training"],
        exercises: &[
            Exercise {
                id: "bench_press",
                name: "Barbell Bench Press",
                sets: "3-4",
                reps: "6-8",
                rpe: "8",
                rest: "2-3 min",
                note: Some("Shoulder blades pinned, bar to lower chest"),
            },
            Exercise {
                id: "incline_db_press",
                name: "Incline Dumbbell Press",
                sets: "3",
                reps: "8-10",
                rpe: "8",
                rest: "90 s",
                note: None,
            },
            Exercise {
                id: "overhead_press",
                name: "Overhead Press",
                sets: "3",
                reps: "6-8",
                rpe: "8",
                rest: "2 min",
                note: Some("Squeeze glutes, no lower back arch"),
            },
            Exercise {
                id: "triceps_pushdown",
                name: "Cable Triceps Pushdown",
                sets: "2-3",
                reps: "10-12",
                rpe: "9",
                rest: "60 s",
                note: None,
            },
        ],
    },
    DaySchedule {
        day: Weekday::Tue,
        day_name: "Tuesday",
        focus: "Pull",
        rest_day: false,
        estimated_calories: Some(420),
        supplements: &["Creatine 5g"],
        exercises: &[
            Exercise {
                id: "deadlift",
                name: "Deadlift",
                sets: "3",
                reps: "4-6",
                rpe: "8",
                rest: "3 min",
                note: Some("Brace before every rep"),
            },
            Exercise {
                id: "pull_up",
                name: "Pull-up",
                sets: "3-4",
                reps: "6-10",
                rpe: "8",
                rest: "2 min",
                note: None,
            },
            Exercise {
                id: "barbell_row",
                name: "Barbell Row",
                sets: "3",
                reps: "8-10",
                rpe: "8",
                rest: "90 s",
                note: None,
            },
            Exercise {
                id: "hammer_curl",
                name: "Hammer Curl",
                sets: "2-3",
                reps: "10-12",
                rpe: "9",
                rest: "60 s",
                note: None,
            },
        ],
    },
    DaySchedule {
        day: Weekday::Wed,
        day_name: "Wednesday",
        focus: "Legs",
        rest_day: false,
        estimated_calories: Some(520),
        supplements: &["Creatine 5g", "Electrolytes during training"],
        exercises: &[
            Exercise {
                id: "back_squat",
                name: "Back Squat",
                sets: "3-4",
                reps: "5-8",
                rpe: "8",
                rest: "3 min",
                note: Some("Hip crease below knee"),
            },
            Exercise {
                id: "romanian_deadlift",
                name: "Romanian Deadlift",
                sets: "3",
                reps: "8-10",
                rpe: "8",
                rest: "2 min",
                note: None,
            },
            Exercise {
                id: "leg_press",
                name: "Leg Press",
                sets: "3",
                reps: "10-12",
                rpe: "9",
                rest: "90 s",
                note: None,
            },
            Exercise {
                id: "calf_raise",
                name: "Standing Calf Raise",
                sets: "4",
                reps: "12-15",
                rpe: "9",
                rest: "45-60 s",
                note: Some("Full stretch at the bottom"),
            },
        ],
    },
    DaySchedule {
        day: Weekday::Thu,
        day_name: "Thursday",
        focus: "Rest",
        rest_day: true,
        estimated_calories: None,
        supplements: &["Magnesium before bed"],
        exercises: &[],
    },
    DaySchedule {
        day: Weekday::Fri,
        day_name: "Friday",
        focus: "Upper Body",
        rest_day: false,
        estimated_calories: Some(400),
        supplements: &["Creatine 5g", "Whey after training"],
        exercises: &[
            Exercise {
                id: "weighted_dip",
                name: "Weighted Dip",
                sets: "3",
                reps: "6-10",
                rpe: "8",
                rest: "2 min",
                note: None,
            },
            Exercise {
                id: "chest_supported_row",
                name: "Chest Supported Row",
                sets: "3",
                reps: "8-12",
                rpe: "8",
                rest: "90 s",
                note: None,
            },
            Exercise {
                id: "lateral_raise",
                name: "Lateral Raise",
                sets: "3-4",
                reps: "12-15",
                rpe: "9",
                rest: "60 s",
                note: Some("Lead with the elbows"),
            },
            Exercise {
                id: "face_pull",
                name: "Face Pull",
                sets: "2-3",
                reps: "15",
                rpe: "8",
                rest: "60 s",
                note: None,
            },
        ],
    },
    DaySchedule {
        day: Weekday::Sat,
        day_name: "Saturday",
        focus: "Lower Body & Core",
        rest_day: false,
        estimated_calories: Some(480),
        supplements: &["Creatine 5g"],
        exercises: &[
            Exercise {
                id: "front_squat",
                name: "Front Squat",
                sets: "3",
                reps: "6-8",
                rpe: "8",
                rest: "2-3 min",
                note: None,
            },
            Exercise {
                id: "hip_thrust",
                name: "Barbell Hip Thrust",
                sets: "3",
                reps: "8-12",
                rpe: "8",
                rest: "90 s",
                note: Some("Pause one second at the top"),
            },
            Exercise {
                id: "hanging_leg_raise",
                name: "Hanging Leg Raise",
                sets: "3",
                reps: "10-15",
                rpe: "9",
                rest: "60 s",
                note: None,
            },
        ],
    },
    DaySchedule {
        day: Weekday::Sun,
        day_name: "Sunday",
        focus: "Rest",
        rest_day: true,
        estimated_calories: None,
        supplements: &[],
        exercises: &[],
    },
];

pub fn find_day(day: Weekday) -> Option<&'static DaySchedule> {
    WORKOUT_SCHEDULE.iter().find(|d| d.day == day)
}

pub fn find_exercise(id: &str) -> Option<&'static Exercise> {
    WORKOUT_SCHEDULE
        .iter()
        .flat_map(|d| d.exercises.iter())
        .find(|e| e.id == id)
}

/// Numbers found in a free-form spec, in order ("1.5-2 min" -> [1.5, 2.0])
fn numbers(spec: &str) -> Vec<f64> {
    let mut found = Vec::new();
    let mut current = String::new();
    for ch in spec.chars().chain(std::iter::once(' ')) {
        if ch.is_ascii_digit() || (ch == '.' && !current.is_empty() && !current.contains('.')) {
            current.push(ch);
        } else if !current.is_empty() {
            if let Ok(n) = current.trim_end_matches('.').parse() {
                found.push(n);
            }
            current.clear();
        }
    }
    found
}

/// Target set count: the upper bound of a range ("3-4" -> 4), a single
/// value as-is. No number falls back to [`DEFAULT_TARGET_SETS`]; never below 1.
pub fn parse_target_sets(spec: &str) -> u32 {
    numbers(spec)
        .into_iter()
        .map(|n| n as u32)
        .max()
        .unwrap_or(DEFAULT_TARGET_SETS)
        .max(1)
}

/// Rest in seconds from the first number of the spec ("2-3 min" -> 120).
/// Minutes when the spec says `min` or `dk`, seconds otherwise. No number
/// falls back to [`DEFAULT_REST_SECS`].
pub fn parse_rest_secs(spec: &str) -> u32 {
    let Some(first) = numbers(spec).first().copied() else {
        return DEFAULT_REST_SECS;
    };
    let lower = spec.to_lowercase();
    let minutes = lower.contains("min") || lower.contains("dk");
    let secs = if minutes { first * 60.0 } else { first };
    secs.round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{WEEK_DAYS, day_id};

    #[test]
    fn test_schedule_covers_every_day() {
        for day in WEEK_DAYS {
            let plan = find_day(day).expect("missing day");
            assert_eq!(plan.day_name, day_id(day));
            assert_eq!(plan.rest_day, plan.exercises.is_empty());
        }
    }

    #[test]
    fn test_exercise_ids_unique() {
        let mut ids: Vec<_> = WORKOUT_SCHEDULE
            .iter()
            .flat_map(|d| d.exercises.iter().map(|e| e.id))
            .collect();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }

    #[test]
    fn test_find_exercise() {
        assert_eq!(find_exercise("bench_press").unwrap().sets, "3-4");
        assert!(find_exercise("unknown").is_none());
    }

    #[test]
    fn test_parse_target_sets() {
        assert_eq!(parse_target_sets("3-4"), 4);
        assert_eq!(parse_target_sets("5"), 5);
        assert_eq!(parse_target_sets("4 - 3"), 4);
        assert_eq!(parse_target_sets("AMRAP"), DEFAULT_TARGET_SETS);
        assert_eq!(parse_target_sets(""), DEFAULT_TARGET_SETS);
        assert_eq!(parse_target_sets("0"), 1);
    }

    #[test]
    fn test_parse_rest_secs() {
        assert_eq!(parse_rest_secs("90 s"), 90);
        assert_eq!(parse_rest_secs("2-3 min"), 120);
        assert_eq!(parse_rest_secs("1.5 min"), 90);
        assert_eq!(parse_rest_secs("2 dk"), 120);
        assert_eq!(parse_rest_secs("45-60 s"), 45);
        assert_eq!(parse_rest_secs("as needed"), DEFAULT_REST_SECS);
    }
}
