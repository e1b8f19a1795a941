// ABOUTME: Navigation state machine for the quickslides engine
// ABOUTME: Owns the active slide index and applies clamped, non-wrapping transitions

use log::debug;

/// Whether the slides are being edited or presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Editing,
    Presenting,
}

/// Snapshot of the navigation state.
///
/// `index` stays in `[0, slide_count - 1]`, and is 0 when there are no
/// slides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavState {
    pub index: usize,
    pub slide_count: usize,
    pub mode: Mode,
}

/// Requests the input handlers send to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavCommand {
    Next,
    Previous,
    /// Jump to a slide. Relocates the edit caret and the presentation view.
    GoTo(usize),
    /// Align with the slide under the user's caret. Produces no side effect.
    Follow(usize),
    /// Enter presentation mode at the current slide.
    Present,
    /// Leave presentation mode, handing the current index back.
    Exit,
}

/// What a transition asks the host to do besides updating the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEffect {
    None,
    Changed { from: usize, to: usize },
    Jump { to: usize },
    Entered { index: usize },
    Exited { resume_index: usize },
}

fn clamp_index(index: usize, slide_count: usize) -> usize {
    index.min(slide_count.saturating_sub(1))
}

/// Apply one command to a state.
///
/// Never wraps: `Next` on the last slide and `Previous` on the first are
/// accepted and leave the state unchanged. With zero slides every index
/// transition is a no-op.
pub fn transition(state: NavState, command: NavCommand) -> (NavState, NavEffect) {
    let mut next = state;

    let effect = match command {
        NavCommand::Present => {
            if state.mode == Mode::Editing {
                next.mode = Mode::Presenting;
                NavEffect::Entered { index: state.index }
            } else {
                NavEffect::None
            }
        }
        NavCommand::Exit => {
            if state.mode == Mode::Presenting {
                next.mode = Mode::Editing;
                NavEffect::Exited {
                    resume_index: state.index,
                }
            } else {
                NavEffect::None
            }
        }
        _ if state.slide_count == 0 => NavEffect::None,
        NavCommand::Next => {
            next.index = clamp_index(state.index.saturating_add(1), state.slide_count);
            changed(state.index, next.index)
        }
        NavCommand::Previous => {
            next.index = state.index.saturating_sub(1);
            changed(state.index, next.index)
        }
        NavCommand::GoTo(target) => {
            next.index = clamp_index(target, state.slide_count);
            NavEffect::Jump { to: next.index }
        }
        NavCommand::Follow(target) => {
            next.index = clamp_index(target, state.slide_count);
            NavEffect::None
        }
    };

    debug!(
        "nav: {:?} {}/{} -> {}/{} ({:?})",
        command, state.index, state.slide_count, next.index, next.slide_count, effect
    );

    (next, effect)
}

fn changed(from: usize, to: usize) -> NavEffect {
    if from == to {
        NavEffect::None
    } else {
        NavEffect::Changed { from, to }
    }
}

/// Mutable holder around [`transition`].
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    state: NavState,
}

impl Navigator {
    pub fn new(slide_count: usize) -> Self {
        Self::resume(0, slide_count)
    }

    /// Start at a resume hint, e.g. the index an `Exit` handed back.
    /// Out-of-range hints are clamped.
    pub fn resume(hint: usize, slide_count: usize) -> Self {
        Self {
            state: NavState {
                index: clamp_index(hint, slide_count),
                slide_count,
                mode: Mode::Editing,
            },
        }
    }

    pub fn state(&self) -> NavState {
        self.state
    }

    pub fn index(&self) -> usize {
        self.state.index
    }

    pub fn slide_count(&self) -> usize {
        self.state.slide_count
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    pub fn apply(&mut self, command: NavCommand) -> NavEffect {
        let (state, effect) = transition(self.state, command);
        self.state = state;
        effect
    }

    /// Record a new slide count after the document changed and re-clamp.
    pub fn set_slide_count(&mut self, slide_count: usize) {
        self.state.slide_count = slide_count;
        self.state.index = clamp_index(self.state.index, slide_count);
    }
}

/// Parse a `/slide/N` route into its 1-based slide number.
pub fn parse_slide_route(path: &str) -> Option<usize> {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    let number = path.trim_end_matches('/').strip_prefix("/slide/")?;
    number.parse::<usize>().ok()
}

/// Turn a 1-based slide number into a valid index.
///
/// Zero or a missing number means slide 1, numbers past the end mean the
/// last slide.
pub fn route_to_index(number: Option<usize>, slide_count: usize) -> usize {
    match number {
        Some(n) if n >= 1 => clamp_index(n - 1, slide_count),
        _ => 0,
    }
}
