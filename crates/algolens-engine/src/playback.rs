//! Playback cursor with generation-counted tick cancellation.

use tracing::debug;

/// Proof that a queued auto-advance was scheduled against the current
/// playback state. Any manual interaction bumps the generation, so stale
/// tokens are refused instead of moving a cursor the user already moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickToken {
    generation: u64,
}

/// Cursor over a trace of `len` steps.
///
/// The cursor is `None` before the first step and `Some(i)` on step `i`,
/// never past `len - 1`. Auto-play is modeled as schedule/advance pairs: the
/// driver calls [`Playback::schedule`] when it queues a timer tick and hands
/// the token back to [`Playback::advance`] when the tick fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playback {
    len: usize,
    cursor: Option<usize>,
    playing: bool,
    generation: u64,
}

impl Playback {
    /// A paused cursor before the first of `len` steps.
    pub fn new(len: usize) -> Self {
        Self {
            len,
            cursor: None,
            playing: false,
            generation: 0,
        }
    }

    /// Number of steps in the loaded trace.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when no trace is loaded.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current step index, `None` before playback starts.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Whether auto-play is running.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// True when the cursor sits on the final step.
    pub fn at_end(&self) -> bool {
        self.len > 0 && self.cursor == Some(self.len - 1)
    }

    fn interact(&mut self) {
        self.generation += 1;
        self.playing = false;
    }

    /// Starts auto-play. Playing from the final step rewinds first, so the
    /// play button also doubles as replay.
    pub fn play(&mut self) {
        if self.len == 0 {
            return;
        }
        if self.at_end() {
            self.cursor = None;
        }
        self.generation += 1;
        self.playing = true;
        debug!(generation = self.generation, "play");
    }

    /// Pauses auto-play, invalidating outstanding tokens.
    pub fn pause(&mut self) {
        self.interact();
    }

    /// Manual single step forward. Pauses auto-play. Returns false at the
    /// end of the trace.
    pub fn step_forward(&mut self) -> bool {
        self.interact();
        self.move_forward()
    }

    /// Manual single step back. Pauses auto-play. Returns false when
    /// already before the first step.
    pub fn step_back(&mut self) -> bool {
        self.interact();
        match self.cursor {
            None => false,
            Some(0) => {
                self.cursor = None;
                true
            }
            Some(i) => {
                self.cursor = Some(i - 1);
                true
            }
        }
    }

    /// Jumps straight to `index` (clamped), or before the start on `None`.
    /// Pauses auto-play.
    pub fn jump(&mut self, index: Option<usize>) {
        self.interact();
        self.cursor = match index {
            None => None,
            Some(_) if self.len == 0 => None,
            Some(i) => Some(i.min(self.len - 1)),
        };
    }

    /// Rewinds to the pre-playback position and pauses.
    pub fn reset(&mut self) {
        self.interact();
        self.cursor = None;
    }

    /// Replaces the trace length, rewinding the cursor.
    pub fn load(&mut self, len: usize) {
        self.interact();
        self.len = len;
        self.cursor = None;
    }

    /// Token for the next auto-advance, or `None` when not playing or
    /// already at the end.
    pub fn schedule(&self) -> Option<TickToken> {
        (self.playing && !self.at_end()).then_some(TickToken {
            generation: self.generation,
        })
    }

    /// Applies a scheduled advance. Stale tokens (any interaction happened
    /// since [`Playback::schedule`]) are ignored and return false. Reaching
    /// the final step pauses auto-play.
    pub fn advance(&mut self, token: TickToken) -> bool {
        if !self.playing || token.generation != self.generation {
            debug!(
                token = token.generation,
                current = self.generation,
                "stale tick dropped"
            );
            return false;
        }
        let moved = self.move_forward();
        if self.at_end() {
            self.playing = false;
        }
        moved
    }

    fn move_forward(&mut self) -> bool {
        match self.cursor {
            None if self.len > 0 => {
                self.cursor = Some(0);
                true
            }
            Some(i) if i + 1 < self.len => {
                self.cursor = Some(i + 1);
                true
            }
            _ => false,
        }
    }
}
