use serde::{Deserialize, Serialize};

use crate::cues::AudioTimestamps;
use crate::pattern::BreathPhase;

/// How close to the end of the narration (in seconds) the playhead must be
/// before the session is considered complete.
const COMPLETION_WINDOW_SECS: f64 = 0.1;

/// Derived state of an audio-driven session. Recomputed on every sampling
/// pass from the playback position; session commands act on the underlying
/// audio element, never on this record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioDrivenState {
    pub is_active: bool,
    pub is_paused: bool,
    pub current_phase: BreathPhase,

    /// Count currently being spoken, or 0 between counts
    pub current_count: u8,

    /// Fractional progress within the current phase, 0..=1
    pub progress: f64,

    /// Fractional progress over the whole narration, 0..=1
    pub total_progress: f64,
}

impl Default for AudioDrivenState {
    fn default() -> Self {
        Self {
            is_active: false,
            is_paused: false,
            current_phase: BreathPhase::Idle,
            current_count: 0,
            progress: 0.0,
            total_progress: 0.0,
        }
    }
}

/// Outcome of one sampling pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioUpdate {
    Running,

    /// Narration reached its end; reported exactly once
    Completed,
}

/// Audio-driven session controller.
///
/// Phase and progress are derived by sampling the audio playhead against
/// the cue list, so the visual cycle stays honest to what the user hears.
/// The host schedules `update` per animation frame while the audio element
/// is playing and cancels scheduling when it pauses.
#[derive(Debug, Clone)]
pub struct AudioDrivenSession {
    timestamps: AudioTimestamps,
    state: AudioDrivenState,
    completion_signalled: bool,
}

impl AudioDrivenSession {
    pub fn new(timestamps: AudioTimestamps) -> Self {
        Self {
            timestamps,
            state: AudioDrivenState::default(),
            completion_signalled: false,
        }
    }

    pub fn state(&self) -> &AudioDrivenState {
        &self.state
    }

    pub fn timestamps(&self) -> &AudioTimestamps {
        &self.timestamps
    }

    /// Mark the session active. Called when playback begins; state stays
    /// at `Prepare`/zero progress until the first cue passes.
    pub fn start(&mut self) {
        self.state = AudioDrivenState {
            is_active: true,
            current_phase: BreathPhase::Prepare,
            ..AudioDrivenState::default()
        };
        self.completion_signalled = false;
    }

    pub fn pause(&mut self) {
        if self.state.is_active {
            self.state.is_paused = true;
        }
    }

    pub fn resume(&mut self) {
        if self.state.is_active {
            self.state.is_paused = false;
        }
    }

    /// Cancel the session and return to idle, discarding progress.
    pub fn reset(&mut self) {
        self.state = AudioDrivenState::default();
        self.completion_signalled = false;
    }

    /// Natural end of track. Forces the same transition as the
    /// near-duration check in `update`.
    pub fn finish(&mut self) -> AudioUpdate {
        self.complete()
    }

    /// Sample the playback position and recompute phase, count and
    /// progress. `position_secs` is the audio element's current time.
    pub fn update(&mut self, position_secs: f64) -> AudioUpdate {
        if !self.state.is_active || self.state.is_paused {
            return AudioUpdate::Running;
        }

        let duration = self.timestamps.total_duration;

        // A zero-duration artifact can never complete; it also never
        // produces progress, which is the documented failure mode for a
        // malformed artifact.
        if duration > 0.0 && position_secs >= duration - COMPLETION_WINDOW_SECS {
            return self.complete();
        }

        let t = position_secs.max(0.0);

        // Cue lists are tens of entries, so a linear scan is fine.
        let current_idx = self
            .timestamps
            .cues
            .iter()
            .rposition(|cue| cue.time <= t);
        let next = self.timestamps.cues.iter().find(|cue| cue.time > t);

        match current_idx {
            None => {
                self.state.current_phase = BreathPhase::Prepare;
                self.state.current_count = 0;
                self.state.progress = 0.0;
            }
            Some(idx) => {
                let current = &self.timestamps.cues[idx];

                // Count cues carry the running phase, so scanning back for
                // the nearest tagged cue covers counts spoken before any
                // phase keyword.
                self.state.current_phase = self.timestamps.cues[..=idx]
                    .iter()
                    .rev()
                    .find_map(|cue| cue.phase)
                    .unwrap_or(BreathPhase::Prepare);

                self.state.current_count = current.count.unwrap_or(0);

                self.state.progress = match next {
                    Some(next_cue) if next_cue.time > current.time => {
                        ((t - current.time) / (next_cue.time - current.time)).clamp(0.0, 1.0)
                    }
                    _ => 0.0,
                };
            }
        }

        self.state.total_progress = if duration > 0.0 {
            (t / duration).clamp(0.0, 1.0)
        } else {
            0.0
        };

        AudioUpdate::Running
    }

    fn complete(&mut self) -> AudioUpdate {
        self.state.current_phase = BreathPhase::Complete;
        self.state.is_active = false;
        self.state.progress = 1.0;
        self.state.total_progress = 1.0;

        if self.completion_signalled {
            AudioUpdate::Running
        } else {
            self.completion_signalled = true;
            AudioUpdate::Completed
        }
    }
}
