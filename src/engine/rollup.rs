// ABOUTME: Day-completion rollup over a day's resolved activities
// ABOUTME: Pure fold; excludes kinds that never carry per-day completion
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Gatofit

//! # Day Completion Rollup
//!
//! A day is complete when every participating activity is complete. Nutrition
//! never participates (a plan is consulted, not finished), and a program
//! evolution checkpoint only participates once a task row exists for it, so a
//! measurement the user never started does not hold the day open forever.

use crate::models::{ActivityKind, ActivityOrigin, ResolvedActivity};

/// Whether the day's participating activities are all complete
///
/// Vacuously true for a day with no participating activities, rest days
/// included.
#[must_use]
pub fn day_complete(activities: &[ResolvedActivity]) -> bool {
    activities
        .iter()
        .filter(|activity| participates(activity))
        .all(|activity| activity.is_completed)
}

/// Whether an activity counts toward day completion
fn participates(activity: &ResolvedActivity) -> bool {
    match activity.kind {
        ActivityKind::Nutrition => false,
        ActivityKind::Evolution => {
            activity.origin != ActivityOrigin::Program || activity.task_id.is_some()
        }
        ActivityKind::Workout
        | ActivityKind::Video
        | ActivityKind::Document
        | ActivityKind::Survey => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::create_program_activity;

    fn activity(
        kind: ActivityKind,
        origin: ActivityOrigin,
        task_id: Option<&str>,
        is_completed: bool,
    ) -> ResolvedActivity {
        let mut activity = create_program_activity(kind, "content-1", "Fixture");
        activity.origin = origin;
        activity.task_id = task_id.map(ToOwned::to_owned);
        activity.is_completed = is_completed;
        activity
    }

    #[test]
    fn test_empty_day_is_complete() {
        assert!(day_complete(&[]));
    }

    #[test]
    fn test_nutrition_never_holds_the_day_open() {
        let activities = vec![activity(
            ActivityKind::Nutrition,
            ActivityOrigin::Program,
            None,
            false,
        )];
        assert!(day_complete(&activities));
    }

    #[test]
    fn test_incomplete_survey_holds_the_day_open() {
        let activities = vec![
            activity(ActivityKind::Video, ActivityOrigin::Program, Some("t1"), true),
            activity(ActivityKind::Survey, ActivityOrigin::Program, None, false),
        ];
        assert!(!day_complete(&activities));
    }

    #[test]
    fn test_program_evolution_without_task_row_is_ignored() {
        let activities = vec![
            activity(ActivityKind::Video, ActivityOrigin::Program, Some("t1"), true),
            activity(ActivityKind::Evolution, ActivityOrigin::Program, None, false),
        ];
        assert!(day_complete(&activities));
    }

    #[test]
    fn test_program_evolution_with_task_row_participates() {
        let activities = vec![activity(
            ActivityKind::Evolution,
            ActivityOrigin::Program,
            Some("t1"),
            false,
        )];
        assert!(!day_complete(&activities));
    }

    #[test]
    fn test_standalone_evolution_participates_without_completion() {
        let activities = vec![activity(
            ActivityKind::Evolution,
            ActivityOrigin::Standalone,
            Some("t1"),
            false,
        )];
        assert!(!day_complete(&activities));
    }

    #[test]
    fn test_all_participants_complete_closes_the_day() {
        let activities = vec![
            activity(ActivityKind::Workout, ActivityOrigin::Program, None, true),
            activity(ActivityKind::Video, ActivityOrigin::Program, Some("t1"), true),
            activity(ActivityKind::Nutrition, ActivityOrigin::Program, None, false),
        ];
        assert!(day_complete(&activities));
    }
}
