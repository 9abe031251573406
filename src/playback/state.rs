use serde::{Deserialize, Serialize};


/// A user or timer intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Move one step forward, clamped to the last step.
    Next,
    /// Move one step back, clamped to `0`.
    Prev,
    /// Start automatic advancing.
    Play,
    /// Stop automatic advancing.
    Pause,
    /// `Play` if paused, `Pause` otherwise.
    Toggle,
    /// Go to step `0` and pause.
    Reset,
    /// Jump to the given step, clamped to the last step.
    Seek(usize),
    /// One timer tick. Ignored while paused.
    Tick,
}


/// What a tick does at the last step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndBehavior {
    /// Stay at the last step and pause.
    #[default]
    Stop,
    /// Wrap around to step `0` and keep playing.
    Loop,
    /// Wrap around to step `0` and pause.
    Rewind,
}


/// The step state machine of one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Playback {
    step: usize,
    n_steps: usize,
    playing: bool,
    end: EndBehavior,
}


impl Playback {
    /// Construct a paused playback at step `0`
    /// over a sequence of `n_steps` snapshots.
    pub fn new(n_steps: usize) -> Self {
        Self { step: 0, n_steps, playing: false, end: EndBehavior::Stop }
    }


    /// Set the behavior at the last step.
    pub fn end_behavior(mut self, end: EndBehavior) -> Self {
        self.end = end;
        self
    }


    /// The current step.
    pub fn step(&self) -> usize {
        self.step
    }


    /// The number of steps.
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }


    /// Returns `true` while playing.
    pub fn is_playing(&self) -> bool {
        self.playing
    }


    /// Returns `true` at the last step.
    pub fn is_last(&self) -> bool {
        self.step + 1 >= self.n_steps
    }


    fn last(&self) -> usize {
        self.n_steps.saturating_sub(1)
    }


    /// Keep the state valid for a sequence of `n_steps` snapshots.
    /// An empty sequence pauses the playback at step `0`.
    pub fn resize(&mut self, n_steps: usize) {
        self.n_steps = n_steps;
        self.step = self.step.min(self.last());
        if n_steps == 0 {
            self.playing = false;
        }
    }


    /// Apply `intent` and return the new step.
    /// Every intent is a no-op on an empty sequence.
    pub fn apply(&mut self, intent: Intent) -> usize {
        if self.n_steps == 0 {
            return self.step;
        }

        match intent {
            Intent::Next => self.step = (self.step + 1).min(self.last()),
            Intent::Prev => self.step = self.step.saturating_sub(1),
            Intent::Play => self.playing = true,
            Intent::Pause => self.playing = false,
            Intent::Toggle => self.playing = !self.playing,
            Intent::Reset => {
                self.step = 0;
                self.playing = false;
            },
            Intent::Seek(step) => self.step = step.min(self.last()),
            Intent::Tick => self.tick(),
        }
        self.step
    }


    fn tick(&mut self) {
        if !self.playing {
            return;
        }

        match self.end {
            EndBehavior::Stop => {
                self.step = (self.step + 1).min(self.last());
                if self.step >= self.last() {
                    self.playing = false;
                }
            },
            EndBehavior::Loop => {
                self.step = (self.step + 1) % self.n_steps;
            },
            EndBehavior::Rewind => {
                self.step = (self.step + 1) % self.n_steps;
                if self.step == 0 {
                    self.playing = false;
                }
            },
        }
    }
}
