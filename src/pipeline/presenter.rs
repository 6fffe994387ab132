//! Streaming presenter — simulated per-section generation reveal.
//!
//! Stage responses arrive whole; the presenter discloses them one
//! character per fixed tick so the UI reads like live generation.
//! Every stream is an independent tokio task gated by the board's
//! stream generation, so restarts and run resets retire old loops at
//! their next tick instead of racing them.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::board::{RevealStep, SectionBoard};
use super::types::SectionId;

/// Delay between revealed characters.
pub const REVEAL_TICK: Duration = Duration::from_millis(20);

/// Drives the character-by-character reveal of resolved section text.
#[derive(Clone)]
pub struct StreamPresenter {
    board: Arc<Mutex<SectionBoard>>,
}

impl StreamPresenter {
    pub fn new(board: Arc<Mutex<SectionBoard>>) -> Self {
        Self { board }
    }

    /// Begin revealing `full_text` for `section` under `run_id`.
    ///
    /// Returns false when the run has been superseded, in which case
    /// nothing starts. A stream already running for this section is
    /// retired by the generation bump inside `begin_stream`.
    pub fn start_stream(&self, run_id: u64, section: SectionId, full_text: &str) -> bool {
        let gen = {
            let mut board = match self.board.lock() {
                Ok(board) => board,
                Err(_) => return false,
            };
            match board.begin_stream(run_id, section, full_text) {
                Some(gen) => gen,
                None => return false,
            }
        };

        // Zero-length text is Complete already; nothing to schedule.
        if full_text.is_empty() {
            return true;
        }

        let board = Arc::clone(&self.board);
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(REVEAL_TICK).await;
                let step = match board.lock() {
                    Ok(mut board) => board.advance_reveal(section, gen),
                    Err(_) => break,
                };
                match step {
                    RevealStep::Applied => continue,
                    RevealStep::Finished => {
                        tracing::debug!(section = section.as_str(), "reveal stream complete");
                        break;
                    }
                    RevealStep::Superseded => break,
                }
            }
        });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::types::StreamState;

    fn presenter_with_run() -> (StreamPresenter, Arc<Mutex<SectionBoard>>) {
        let board = Arc::new(Mutex::new(SectionBoard::new()));
        board.lock().unwrap().reset_for_run(1);
        (StreamPresenter::new(Arc::clone(&board)), board)
    }

    async fn drain(board: &Arc<Mutex<SectionBoard>>, section: SectionId) {
        for _ in 0..2000 {
            if board.lock().unwrap().state(section).is_terminal() {
                return;
            }
            tokio::time::sleep(REVEAL_TICK).await;
        }
        panic!("stream never completed");
    }

    #[tokio::test(start_paused = true)]
    async fn stream_reveals_full_text_and_completes() {
        let (presenter, board) = presenter_with_run();
        assert!(presenter.start_stream(1, SectionId::Guidance, "hello world"));

        drain(&board, SectionId::Guidance).await;

        let board = board.lock().unwrap();
        assert_eq!(board.revealed_text(SectionId::Guidance), "hello world");
        assert_eq!(board.state(SectionId::Guidance), StreamState::Complete);
    }

    #[tokio::test(start_paused = true)]
    async fn restart_replaces_prior_stream_without_mixing() {
        let (presenter, board) = presenter_with_run();
        presenter.start_stream(1, SectionId::Medicines, "first long response text");

        // Let a few characters through, then restart with new text.
        for _ in 0..3 {
            tokio::time::sleep(REVEAL_TICK).await;
        }
        presenter.start_stream(1, SectionId::Medicines, "second");

        drain(&board, SectionId::Medicines).await;

        let board = board.lock().unwrap();
        assert_eq!(board.revealed_text(SectionId::Medicines), "second");
        assert_eq!(board.raw_text(SectionId::Medicines), "second");
    }

    #[tokio::test(start_paused = true)]
    async fn sections_reveal_concurrently_and_independently() {
        let (presenter, board) = presenter_with_run();
        presenter.start_stream(1, SectionId::Guidance, "abc");
        presenter.start_stream(1, SectionId::Remedies, "xyz");

        drain(&board, SectionId::Guidance).await;
        drain(&board, SectionId::Remedies).await;

        let board = board.lock().unwrap();
        assert_eq!(board.revealed_text(SectionId::Guidance), "abc");
        assert_eq!(board.revealed_text(SectionId::Remedies), "xyz");
    }

    #[tokio::test(start_paused = true)]
    async fn superseded_run_cannot_start_a_stream() {
        let (presenter, board) = presenter_with_run();
        board.lock().unwrap().reset_for_run(2);

        assert!(!presenter.start_stream(1, SectionId::Guidance, "stale"));
        assert_eq!(board.lock().unwrap().stale_discards(), 1);
        assert_eq!(
            board.lock().unwrap().state(SectionId::Guidance),
            StreamState::Idle
        );
    }

    #[tokio::test(start_paused = true)]
    async fn empty_text_is_complete_without_a_task() {
        let (presenter, board) = presenter_with_run();
        assert!(presenter.start_stream(1, SectionId::Facilities, ""));
        assert_eq!(
            board.lock().unwrap().state(SectionId::Facilities),
            StreamState::Complete
        );
    }
}
