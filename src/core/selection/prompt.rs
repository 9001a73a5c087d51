// Ephemeral selection prompt, modeled as an explicit state machine.
//
//   Shown -> Collected -> Closed
//   Shown -> Expired   -> Closed
//
// One prompt belongs to one initiating user. Selection events from anyone
// else are filtered, not queued. `apply` is the only transition function and
// refuses to fire twice, so a racing selection and deadline can never both
// resolve the same prompt. `Closed` is terminal; the caller renders the
// resolution into the final message with controls disabled.
//
// Time is abstract ticks so the machine is testable without a clock; the
// Discord driver feeds it wall-clock seconds and a real timeout.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptState {
    Shown,
    Collected { value: String },
    Expired,
    Closed,
}

/// Inputs to the transition function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptEvent {
    Selection { user: u64, value: String, at: u64 },
    DeadlineElapsed,
}

/// What a single `apply` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Collected(String),
    Expired,
    /// Non-initiator, late, or already-resolved event. No state change.
    Ignored,
}

/// Outcome extracted when the prompt closes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Selected(String),
    TimedOut,
}

#[derive(Debug)]
pub struct SelectionPrompt {
    initiator: u64,
    deadline: u64,
    state: PromptState,
}

impl SelectionPrompt {
    pub fn new(initiator: u64, deadline: u64) -> Self {
        Self {
            initiator,
            deadline,
            state: PromptState::Shown,
        }
    }

    pub fn initiator(&self) -> u64 {
        self.initiator
    }

    pub fn state(&self) -> &PromptState {
        &self.state
    }

    /// True once the prompt has left `Shown`.
    pub fn is_resolved(&self) -> bool {
        !matches!(self.state, PromptState::Shown)
    }

    /// The transition function. At most one call ever returns something other
    /// than `Ignored` with a resolving transition.
    pub fn apply(&mut self, event: PromptEvent) -> Transition {
        if self.is_resolved() {
            return Transition::Ignored;
        }

        match event {
            PromptEvent::Selection { user, value, at } => {
                if user != self.initiator || at > self.deadline {
                    return Transition::Ignored;
                }
                self.state = PromptState::Collected {
                    value: value.clone(),
                };
                Transition::Collected(value)
            }
            PromptEvent::DeadlineElapsed => {
                self.state = PromptState::Expired;
                Transition::Expired
            }
        }
    }

    /// Move a resolved prompt to `Closed` and hand back the resolution.
    /// Returns `None` if the prompt is still `Shown` or already closed.
    pub fn close(&mut self) -> Option<Resolution> {
        let resolution = match &self.state {
            PromptState::Collected { value } => Resolution::Selected(value.clone()),
            PromptState::Expired => Resolution::TimedOut,
            PromptState::Shown | PromptState::Closed => return None,
        };
        self.state = PromptState::Closed;
        Some(resolution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selection(user: u64, value: &str, at: u64) -> PromptEvent {
        PromptEvent::Selection {
            user,
            value: value.to_string(),
            at,
        }
    }

    #[test]
    fn initiator_selection_before_deadline_collects() {
        // Prompt shown to user A with a 30-tick deadline; user B answers at
        // tick 5 (ignored), user A answers "blue" at tick 10 (collected).
        let mut prompt = SelectionPrompt::new(100, 30);

        assert_eq!(prompt.apply(selection(200, "red", 5)), Transition::Ignored);
        assert_eq!(prompt.state(), &PromptState::Shown);

        assert_eq!(
            prompt.apply(selection(100, "blue", 10)),
            Transition::Collected("blue".to_string())
        );
        assert_eq!(
            prompt.state(),
            &PromptState::Collected {
                value: "blue".to_string()
            }
        );
    }

    #[test]
    fn deadline_without_selection_expires() {
        let mut prompt = SelectionPrompt::new(100, 30);
        assert_eq!(prompt.apply(PromptEvent::DeadlineElapsed), Transition::Expired);
        assert_eq!(prompt.state(), &PromptState::Expired);
    }

    #[test]
    fn late_selection_is_ignored() {
        let mut prompt = SelectionPrompt::new(100, 30);
        assert_eq!(prompt.apply(selection(100, "blue", 31)), Transition::Ignored);
        assert_eq!(prompt.state(), &PromptState::Shown);
    }

    #[test]
    fn resolution_is_mutually_exclusive() {
        // Selection first: the racing deadline must not also fire.
        let mut prompt = SelectionPrompt::new(100, 30);
        assert_eq!(
            prompt.apply(selection(100, "blue", 30)),
            Transition::Collected("blue".to_string())
        );
        assert_eq!(prompt.apply(PromptEvent::DeadlineElapsed), Transition::Ignored);

        // Deadline first: a selection arriving afterwards must not fire.
        let mut prompt = SelectionPrompt::new(100, 30);
        assert_eq!(prompt.apply(PromptEvent::DeadlineElapsed), Transition::Expired);
        assert_eq!(prompt.apply(selection(100, "blue", 12)), Transition::Ignored);
        assert_eq!(prompt.state(), &PromptState::Expired);
    }

    #[test]
    fn close_yields_the_resolution_once() {
        let mut prompt = SelectionPrompt::new(100, 30);
        prompt.apply(selection(100, "blue", 1));

        assert_eq!(
            prompt.close(),
            Some(Resolution::Selected("blue".to_string()))
        );
        assert_eq!(prompt.state(), &PromptState::Closed);
        assert_eq!(prompt.close(), None);

        // Closed is terminal: nothing resumes.
        assert_eq!(prompt.apply(selection(100, "green", 2)), Transition::Ignored);
        assert_eq!(prompt.state(), &PromptState::Closed);
    }

    #[test]
    fn close_before_resolution_does_nothing() {
        let mut prompt = SelectionPrompt::new(100, 30);
        assert_eq!(prompt.close(), None);
        assert_eq!(prompt.state(), &PromptState::Shown);
    }

    #[test]
    fn expired_prompt_closes_to_timeout() {
        let mut prompt = SelectionPrompt::new(100, 30);
        prompt.apply(PromptEvent::DeadlineElapsed);
        assert_eq!(prompt.close(), Some(Resolution::TimedOut));
    }
}
