//! The replayable move log.
//!
//! Moves are grouped into rounds (white's move plus black's reply); an
//! unfinished round sits in a pending slot until the reply completes it.
//! The cursor tracks how many completed rounds are currently applied to
//! the board, so the log can be rewound for replay navigation; recording
//! a new move first truncates everything beyond the cursor.

use chess_core::{MoveRecord, Round};

/// The ordered log of executed moves.
#[derive(Debug, Clone, Default)]
pub struct History {
    rounds: Vec<Round>,
    pending: Option<MoveRecord>,
    cursor: usize,
}

impl History {
    /// Restores a history from persisted data.
    pub(crate) fn from_log(rounds: Vec<Round>, pending: Option<MoveRecord>) -> Self {
        let cursor = rounds.len();
        History {
            rounds,
            pending,
            cursor,
        }
    }

    /// Records an executed move, completing a round when it is the reply.
    pub(crate) fn expand(&mut self, record: MoveRecord) {
        if self.cursor < self.rounds.len() {
            self.rounds.truncate(self.cursor);
        }
        match self.pending.take() {
            None => self.pending = Some(record),
            Some(white) => {
                self.rounds
                    .push(Round::new(self.cursor as u32, white, record));
                self.cursor += 1;
            }
        }
    }

    /// Moves the cursor so that only the first `round_count` completed
    /// rounds stay applied. Rewinding below the end of the log discards
    /// the pending half-move.
    pub(crate) fn rewind(&mut self, round_count: usize) {
        self.cursor = round_count.min(self.rounds.len());
        if self.cursor < self.rounds.len() {
            self.pending = None;
        }
    }

    /// The records currently applied to the board, in execution order.
    pub(crate) fn applied_records(&self) -> Vec<MoveRecord> {
        let mut records = Vec::with_capacity(self.cursor * 2 + 1);
        for round in &self.rounds[..self.cursor] {
            records.push(round.white.clone());
            records.push(round.black.clone());
        }
        if self.cursor == self.rounds.len() {
            if let Some(pending) = &self.pending {
                records.push(pending.clone());
            }
        }
        records
    }

    /// All completed rounds, including rewound ones.
    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    /// The unfinished round's white move, if a reply is still outstanding.
    pub fn pending(&self) -> Option<&MoveRecord> {
        self.pending.as_ref()
    }

    /// The number of completed rounds currently applied.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The number of completed rounds in the log.
    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    /// True when no move has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty() && self.pending.is_none()
    }

    /// The display label of one round ("3. We4 - Bd5").
    pub fn round_label(&self, index: usize) -> Option<String> {
        self.rounds.get(index).map(Round::label)
    }
}
