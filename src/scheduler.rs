//! Frame scheduler
//!
//! Owns the simulation state and runs one tick per display refresh until
//! the page goes away. There is no pause: the only transition is
//! Running -> Terminated.

use crate::feedback::{Presenter, dispatch_cue, dispatch_outcome};
use crate::sim::{InputEvent, SimState, apply_input, tick};

/// Lifecycle of the frame loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Running,
    /// Page hidden/unloading; no further ticks
    Terminated,
}

/// What the host should do after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameRequest {
    /// Request another animation frame
    Next,
    /// Stop requesting frames
    Stop,
}

/// Drives the simulation and routes its feedback to a presenter
#[derive(Debug)]
pub struct FrameScheduler {
    state: SimState,
    phase: SchedulerState,
}

impl FrameScheduler {
    pub fn new(state: SimState) -> Self {
        Self {
            state,
            phase: SchedulerState::Running,
        }
    }

    pub fn state(&self) -> &SimState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut SimState {
        &mut self.state
    }

    pub fn phase(&self) -> SchedulerState {
        self.phase
    }

    /// Apply an input event between frames
    pub fn input<P: Presenter + ?Sized>(&mut self, event: InputEvent, presenter: &mut P) {
        if self.phase == SchedulerState::Terminated {
            return;
        }
        for cue in apply_input(&mut self.state, event) {
            dispatch_cue(cue, presenter);
        }
    }

    /// Run one tick and dispatch its outcomes. The caller renders afterwards
    /// and requests the next frame when told to.
    pub fn frame<P: Presenter + ?Sized>(&mut self, presenter: &mut P) -> FrameRequest {
        if self.phase == SchedulerState::Terminated {
            return FrameRequest::Stop;
        }

        let outcomes = tick(&mut self.state);
        for outcome in &outcomes {
            dispatch_outcome(outcome, &self.state.targets, &mut self.state.rng, presenter);
        }

        FrameRequest::Next
    }

    /// The hosting page is going away
    pub fn terminate(&mut self) {
        if self.phase == SchedulerState::Running {
            log::info!("Frame loop terminated after {} ticks", self.state.time_ticks);
        }
        self.phase = SchedulerState::Terminated;
    }
}
