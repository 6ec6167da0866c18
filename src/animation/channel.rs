use crate::foundation::{
    core::{Millis, lerp},
    error::{FxError, FxResult},
};

/// One motion segment. `start` is relative to program start.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Segment {
    pub start: u64,
    pub target: f64,
    pub duration: u64,
}

impl Segment {
    pub fn end(&self) -> u64 {
        self.start.saturating_add(self.duration)
    }
}

/// Ordered, non-overlapping segments for a single channel.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Program {
    pub segments: Vec<Segment>, // sorted by start
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a segment at an explicit offset.
    pub fn segment(mut self, start: u64, target: f64, duration: u64) -> Self {
        self.segments.push(Segment {
            start,
            target,
            duration,
        });
        self
    }

    /// Append a segment starting where the previous one ends.
    pub fn then(self, target: f64, duration: u64) -> Self {
        let start = self.end();
        self.segment(start, target, duration)
    }

    /// Offset at which the last segment completes.
    pub fn end(&self) -> u64 {
        self.segments.iter().map(Segment::end).max().unwrap_or(0)
    }

    pub fn validate(&self) -> FxResult<()> {
        if self.segments.is_empty() {
            return Err(FxError::animation("program must have at least one segment"));
        }
        if self.segments.iter().any(|s| !s.target.is_finite()) {
            return Err(FxError::animation("segment targets must be finite"));
        }
        if !self.segments.windows(2).all(|w| w[0].end() <= w[1].start) {
            return Err(FxError::animation(
                "segments must be sorted by start and must not overlap",
            ));
        }
        Ok(())
    }

    /// Value at `t` ms after program start, given the value in force before the first segment.
    pub fn sample(&self, initial: f64, t: u64) -> f64 {
        let idx = self.segments.partition_point(|s| s.start <= t);
        if idx == 0 {
            return initial;
        }

        let seg = &self.segments[idx - 1];
        let from = if idx >= 2 {
            self.segments[idx - 2].target
        } else {
            initial
        };

        if t >= seg.end() || seg.duration == 0 {
            return seg.target;
        }
        let progress = (t - seg.start) as f64 / seg.duration as f64;
        lerp(from, seg.target, progress)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Idle,
    Running { started_at: Millis },
}

/// A scalar driven over time by a [`Program`].
///
/// Each channel is started exactly once; the program is frozen from that point on.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimatedChannel {
    initial: f64,
    program: Program,
    state: State,
}

impl AnimatedChannel {
    pub fn new(initial: f64) -> Self {
        Self {
            initial,
            program: Program::new(),
            state: State::Idle,
        }
    }

    pub fn set_program(&mut self, program: Program) -> FxResult<()> {
        if self.is_started() {
            return Err(FxError::animation(
                "cannot replace the program of a started channel",
            ));
        }
        program.validate()?;
        self.program = program;
        Ok(())
    }

    /// Start the program at `at` and return the time it completes.
    pub fn start(&mut self, at: Millis) -> FxResult<Millis> {
        if self.is_started() {
            return Err(FxError::animation("channel was already started"));
        }
        self.program.validate()?;
        self.state = State::Running { started_at: at };
        Ok(at.after(self.program.end()))
    }

    pub fn is_started(&self) -> bool {
        matches!(self.state, State::Running { .. })
    }

    pub fn started_at(&self) -> Option<Millis> {
        match self.state {
            State::Idle => None,
            State::Running { started_at } => Some(started_at),
        }
    }

    pub fn completes_at(&self) -> Option<Millis> {
        self.started_at().map(|at| at.after(self.program.end()))
    }

    pub fn is_complete(&self, now: Millis) -> bool {
        self.completes_at().is_some_and(|end| now >= end)
    }

    pub fn initial(&self) -> f64 {
        self.initial
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    /// Current value. Idle channels report their initial value.
    pub fn sample(&self, now: Millis) -> f64 {
        match self.state {
            State::Idle => self.initial,
            State::Running { started_at } => {
                self.program.sample(self.initial, now.since(started_at))
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/channel.rs"]
mod tests;
