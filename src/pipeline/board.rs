//! Section board — shared state for the four insight sections.
//!
//! Each section slot owns its raw text, the revealed prefix, parsed
//! segments and a stream state, plus a stream generation that retires
//! superseded reveal loops. The board also carries the run identifier
//! used by the orchestrator's stale-response guard, so a late result
//! from an abandoned run can never touch presenter state.

use serde::Serialize;

use super::parser::{parse_segments, Segment};
use super::types::{SectionId, StreamState};

/// Result of one reveal tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealStep {
    /// One more character became visible.
    Applied,
    /// The final character became visible; the section is Complete.
    Finished,
    /// A newer stream owns this section; the caller must stop.
    Superseded,
}

#[derive(Debug)]
struct SectionSlot {
    raw_text: String,
    chars: Vec<char>,
    cursor: usize,
    revealed: String,
    segments: Vec<Segment>,
    state: StreamState,
    stream_gen: u64,
}

impl SectionSlot {
    fn new() -> Self {
        Self {
            raw_text: String::new(),
            chars: Vec::new(),
            cursor: 0,
            revealed: String::new(),
            segments: Vec::new(),
            state: StreamState::Idle,
            stream_gen: 0,
        }
    }

    fn reset(&mut self) {
        self.raw_text.clear();
        self.chars.clear();
        self.cursor = 0;
        self.revealed.clear();
        self.segments.clear();
        self.state = StreamState::Idle;
        // Bumping the generation retires any loop still scheduled.
        self.stream_gen += 1;
    }
}

/// Read-only view of one section for UI consumers.
#[derive(Debug, Clone, Serialize)]
pub struct SectionSnapshot {
    pub section: SectionId,
    pub state: StreamState,
    pub revealed_text: String,
    pub segments: Vec<Segment>,
}

/// Read-only view of the whole board.
#[derive(Debug, Clone, Serialize)]
pub struct BoardSnapshot {
    pub run_id: u64,
    pub settled: bool,
    pub can_save: bool,
    pub sections: Vec<SectionSnapshot>,
}

/// Mutable state behind the presenter/orchestrator pair.
///
/// Owned by exactly one `Mutex`; never held across an await point.
pub struct SectionBoard {
    slots: [SectionSlot; 4],
    run_id: u64,
    settled: bool,
    stale_discards: u64,
}

impl SectionBoard {
    pub fn new() -> Self {
        Self {
            slots: [
                SectionSlot::new(),
                SectionSlot::new(),
                SectionSlot::new(),
                SectionSlot::new(),
            ],
            run_id: 0,
            settled: false,
            stale_discards: 0,
        }
    }

    pub fn run_id(&self) -> u64 {
        self.run_id
    }

    /// How many late results from superseded runs were discarded.
    pub fn stale_discards(&self) -> u64 {
        self.stale_discards
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// Reset every section for a fresh run.
    ///
    /// Run ids only move forward: a reset carrying an id at or below
    /// the current one is discarded (and counted), so a superseded run
    /// can never reclaim the board, however its tasks interleave.
    pub fn reset_for_run(&mut self, run_id: u64) -> bool {
        if run_id <= self.run_id {
            self.stale_discards += 1;
            return false;
        }
        self.run_id = run_id;
        self.settled = false;
        for slot in &mut self.slots {
            slot.reset();
        }
        true
    }

    /// Begin a reveal stream for `section` on behalf of `run_id`.
    ///
    /// Returns the new stream generation, or `None` when the run has
    /// been superseded (counted as a stale discard, nothing mutated).
    pub fn begin_stream(
        &mut self,
        run_id: u64,
        section: SectionId,
        full_text: &str,
    ) -> Option<u64> {
        if run_id != self.run_id {
            self.stale_discards += 1;
            return None;
        }
        let slot = &mut self.slots[section.index()];
        slot.stream_gen += 1;
        slot.raw_text = full_text.to_string();
        slot.chars = full_text.chars().collect();
        slot.cursor = 0;
        slot.revealed.clear();
        slot.segments = parse_segments(full_text);
        slot.state = if slot.chars.is_empty() {
            StreamState::Complete
        } else {
            StreamState::Streaming
        };
        Some(slot.stream_gen)
    }

    /// Record a failed stage: the fixed failure message is shown
    /// immediately, with no reveal loop.
    ///
    /// Returns false (counted as a stale discard) for superseded runs.
    pub fn fail_section(&mut self, run_id: u64, section: SectionId) -> bool {
        if run_id != self.run_id {
            self.stale_discards += 1;
            return false;
        }
        let message = section.failure_message();
        let slot = &mut self.slots[section.index()];
        slot.stream_gen += 1;
        slot.raw_text = message.to_string();
        slot.chars.clear();
        slot.cursor = 0;
        slot.revealed = message.to_string();
        slot.segments = parse_segments(message);
        slot.state = StreamState::Failed;
        true
    }

    /// Advance one reveal tick for the stream identified by `gen`.
    ///
    /// Within one stream, ticks are strictly ordered: character i+1 is
    /// never revealed before i.
    pub fn advance_reveal(&mut self, section: SectionId, gen: u64) -> RevealStep {
        let slot = &mut self.slots[section.index()];
        if slot.stream_gen != gen || slot.state != StreamState::Streaming {
            return RevealStep::Superseded;
        }
        if let Some(&c) = slot.chars.get(slot.cursor) {
            slot.revealed.push(c);
            slot.cursor += 1;
        }
        if slot.cursor >= slot.chars.len() {
            slot.state = StreamState::Complete;
            RevealStep::Finished
        } else {
            RevealStep::Applied
        }
    }

    /// Mark the run's stage traversal finished.
    pub fn mark_settled(&mut self, run_id: u64) {
        if run_id == self.run_id {
            self.settled = true;
        }
    }

    pub fn state(&self, section: SectionId) -> StreamState {
        self.slots[section.index()].state
    }

    /// Full resolved text for a section (what gets persisted).
    pub fn raw_text(&self, section: SectionId) -> &str {
        &self.slots[section.index()].raw_text
    }

    /// Currently visible prefix of a section.
    pub fn revealed_text(&self, section: SectionId) -> &str {
        &self.slots[section.index()].revealed
    }

    /// Whether the section's stage has answered, successfully or with
    /// a failure message.
    pub fn resolved(&self, section: SectionId) -> bool {
        !self.slots[section.index()].raw_text.is_empty()
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            run_id: self.run_id,
            settled: self.settled,
            can_save: super::gate::can_save(self),
            sections: SectionId::ALL
                .iter()
                .map(|&section| {
                    let slot = &self.slots[section.index()];
                    SectionSnapshot {
                        section,
                        state: slot.state,
                        revealed_text: slot.revealed.clone(),
                        segments: slot.segments.clone(),
                    }
                })
                .collect(),
        }
    }
}

impl Default for SectionBoard {
    fn default() -> Self {
        Self::new()
    }
}
