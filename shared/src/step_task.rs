use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TaskStep {
    pub title: &'static str,
    pub instruction: &'static str,
}

pub const MORNING_EXERCISE: &[TaskStep] = &[
    TaskStep {
        title: "Preparation",
        instruction: "Find a quiet space with room to move. Make sure you have your exercise mat ready.",
    },
    TaskStep {
        title: "Neck Rotation",
        instruction: "Gently turn your head to the right, hold for 5 seconds, then turn to the left.",
    },
    TaskStep {
        title: "Shoulder Rolls",
        instruction: "Roll your shoulders backward 10 times, then forward 10 times. Move slowly and breathe.",
    },
    TaskStep {
        title: "Arm Raises",
        instruction: "Raise both arms straight up above your head. Hold for 3 seconds, then lower slowly.",
    },
    TaskStep {
        title: "Leg Lifts",
        instruction: "While seated, lift your right leg straight out. Hold for 5 seconds, then switch legs.",
    },
    TaskStep {
        title: "Cool Down",
        instruction: "Take 5 deep breaths, breathing in through your nose and out through your mouth.",
    },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepAdvance {
    Advanced { step: usize },
    Finished,
}

/// Walks the user through a fixed list of steps, one at a time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GuidedTask {
    steps: &'static [TaskStep],
    current: usize,
    completed: BTreeSet<usize>,
}

impl Default for GuidedTask {
    fn default() -> Self {
        Self::new(MORNING_EXERCISE)
    }
}

impl GuidedTask {
    /// `steps` must not be empty.
    #[must_use]
    pub fn new(steps: &'static [TaskStep]) -> Self {
        debug_assert!(!steps.is_empty());
        Self {
            steps,
            current: 0,
            completed: BTreeSet::new(),
        }
    }

    #[must_use]
    pub const fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_step(&self) -> Option<&TaskStep> {
        self.steps.get(self.current)
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.steps.len()
    }

    #[must_use]
    pub fn is_completed(&self, step: usize) -> bool {
        self.completed.contains(&step)
    }

    pub fn completed_steps(&self) -> impl Iterator<Item = usize> + '_ {
        self.completed.iter().copied()
    }

    /// Fraction of the task reached, counting the step on screen.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn progress(&self) -> f64 {
        if self.steps.is_empty() {
            return 0.0;
        }
        (self.current + 1) as f64 / self.steps.len() as f64
    }

    pub fn advance(&mut self) -> StepAdvance {
        self.completed.insert(self.current);
        if self.is_last() {
            StepAdvance::Finished
        } else {
            self.current += 1;
            StepAdvance::Advanced { step: self.current }
        }
    }

    /// Returns `false` on the first step.
    pub fn step_back(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.current -= 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_first_step() {
        let task = GuidedTask::default();
        assert_eq!(task.current_index(), 0);
        assert_eq!(task.current_step().map(|s| s.title), Some("Preparation"));
        assert_eq!(task.len(), 6);
        assert!((task.progress() - 1.0 / 6.0).abs() < f64::EPSILON);
    }

    #[test]
    fn advance_marks_completed_and_moves_on() {
        let mut task = GuidedTask::default();
        assert_eq!(task.advance(), StepAdvance::Advanced { step: 1 });
        assert!(task.is_completed(0));
        assert!(!task.is_completed(1));
    }

    #[test]
    fn step_back_stops_at_first_step() {
        let mut task = GuidedTask::default();
        assert!(!task.step_back());
        let _ = task.advance();
        assert!(task.step_back());
        assert_eq!(task.current_index(), 0);
        // Going back does not undo completion.
        assert!(task.is_completed(0));
    }

    #[test]
    fn last_step_finishes() {
        let mut task = GuidedTask::default();
        for _ in 0..5 {
            let _ = task.advance();
        }
        assert!(task.is_last());
        assert_eq!(task.progress(), 1.0);
        assert_eq!(task.advance(), StepAdvance::Finished);
        assert_eq!(task.completed_steps().count(), 6);
    }

    #[test]
    fn revisiting_a_step_does_not_double_count() {
        let mut task = GuidedTask::default();
        let _ = task.advance();
        let _ = task.step_back();
        let _ = task.advance();
        assert_eq!(task.completed_steps().collect::<Vec<_>>(), vec![0]);
    }
}
