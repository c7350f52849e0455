//! Session state around a puzzle game: score, clock, progress and pause.
//! The puzzle engine reports connections and completion; everything the
//! HUD shows is derived from here.

use serde::{Deserialize, Serialize};
use std::rc::Rc;
use yew::Reducible;

use crate::config::Difficulty;

pub const POINTS_PER_PIECE: u64 = 100;
pub const HINT_PENALTY: u64 = 50;
pub const MAX_TIME_BONUS: u64 = 1000;
/// Finishing within this many seconds earns a (linearly shrinking) bonus.
pub const TIME_BONUS_WINDOW_SECS: u64 = 300;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub image_url: String,
    pub pieces: u32,
    pub difficulty: Difficulty,
}

pub fn time_bonus(elapsed_secs: u64) -> u64 {
    if elapsed_secs >= TIME_BONUS_WINDOW_SECS {
        return 0;
    }
    MAX_TIME_BONUS * (TIME_BONUS_WINDOW_SECS - elapsed_secs) / TIME_BONUS_WINDOW_SECS
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub total_pieces: usize,
    pub connected: usize,
    pub score: u64,
    pub elapsed_secs: u64,
    /// A game is on screen and its clock has started.
    pub started: bool,
    pub paused: bool,
    pub completed: bool,
    pub hints_used: u32,
    pub time_bonus: u64,
    /// Bumped on every change so effects can key on it.
    pub version: u64,
}

impl SessionState {
    /// Accepts interaction (hints, pause toggles).
    pub fn is_playing(&self) -> bool {
        self.started && !self.paused && !self.completed
    }
}

#[derive(Clone, Debug)]
pub enum SessionAction {
    Begin { total_pieces: usize },
    TickSecond,
    TogglePause,
    SetPaused(bool),
    PieceConnected { connected: usize },
    HintUsed,
    Completed,
    End,
}

impl Reducible for SessionState {
    type Action = SessionAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use SessionAction::*;
        let mut new = (*self).clone();
        match action {
            Begin { total_pieces } => {
                new = SessionState { total_pieces, started: true, ..Default::default() };
            }
            TickSecond => {
                if !new.is_playing() { return self; }
                new.elapsed_secs = new.elapsed_secs.saturating_add(1);
            }
            TogglePause => {
                if !new.started || new.completed { return self; }
                new.paused = !new.paused;
            }
            SetPaused(p) => {
                if !new.started || new.completed || new.paused == p { return self; }
                new.paused = p;
            }
            PieceConnected { connected } => {
                if !new.started { return self; }
                new.connected = connected.min(new.total_pieces);
                new.score = new.score.saturating_add(POINTS_PER_PIECE);
            }
            HintUsed => {
                if !new.is_playing() { return self; }
                new.score = new.score.saturating_sub(HINT_PENALTY);
                new.hints_used += 1;
            }
            Completed => {
                if !new.started || new.completed { return self; }
                new.completed = true;
                new.paused = false;
                new.time_bonus = time_bonus(new.elapsed_secs);
                new.score = new.score.saturating_add(new.time_bonus);
            }
            End => {
                new = SessionState::default();
            }
        }
        new.version = self.version.wrapping_add(1);
        Rc::new(new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(state: SessionState, actions: Vec<SessionAction>) -> SessionState {
        let mut rc = Rc::new(state);
        for a in actions {
            rc = rc.reduce(a);
        }
        (*rc).clone()
    }

    #[test]
    fn time_bonus_shrinks_linearly() {
        assert_eq!(time_bonus(0), 1000);
        assert_eq!(time_bonus(150), 500);
        assert_eq!(time_bonus(299), 3);
        assert_eq!(time_bonus(300), 0);
        assert_eq!(time_bonus(1000), 0);
    }

    #[test]
    fn clock_runs_only_while_playing() {
        use SessionAction::*;
        let s = run(SessionState::default(), vec![TickSecond]);
        assert_eq!(s.elapsed_secs, 0);
        let s = run(s, vec![Begin { total_pieces: 9 }, TickSecond, TickSecond, TogglePause, TickSecond]);
        assert_eq!(s.elapsed_secs, 2);
        assert!(s.paused);
        let s = run(s, vec![TogglePause, TickSecond]);
        assert_eq!(s.elapsed_secs, 3);
    }

    #[test]
    fn scoring_connections_hints_and_bonus() {
        use SessionAction::*;
        let s = run(
            SessionState::default(),
            vec![
                Begin { total_pieces: 4 },
                HintUsed,
                PieceConnected { connected: 1 },
                HintUsed,
                PieceConnected { connected: 2 },
            ],
        );
        assert_eq!(s.score, 150);
        assert_eq!(s.hints_used, 2);
        assert_eq!(s.connected, 2);

        let mut s = run(s, vec![PieceConnected { connected: 3 }, PieceConnected { connected: 4 }]);
        s.elapsed_secs = 60;
        let s = run(s, vec![Completed, Completed, TickSecond]);
        assert!(s.completed);
        assert_eq!(s.time_bonus, 800);
        assert_eq!(s.score, 350 + 800);
        assert_eq!(s.elapsed_secs, 60);
    }

    #[test]
    fn hints_are_ignored_while_paused_and_never_go_negative() {
        use SessionAction::*;
        let s = run(SessionState::default(), vec![Begin { total_pieces: 9 }, SetPaused(true), HintUsed]);
        assert_eq!(s.hints_used, 0);
        let s = run(s, vec![SetPaused(false), HintUsed]);
        assert_eq!(s.score, 0);
        assert_eq!(s.hints_used, 1);
    }

    #[test]
    fn set_paused_only_pauses_a_running_game() {
        use SessionAction::*;
        let s = run(SessionState::default(), vec![SetPaused(true)]);
        assert!(!s.paused);

        let s = run(s, vec![Begin { total_pieces: 4 }, SetPaused(true), SetPaused(true), TickSecond]);
        assert!(s.paused);
        assert_eq!(s.elapsed_secs, 0);

        let s = run(s, vec![SetPaused(false), Completed, SetPaused(true)]);
        assert!(s.completed);
        assert!(!s.paused);
    }

    #[test]
    fn begin_resets_previous_game() {
        use SessionAction::*;
        let s = run(
            SessionState::default(),
            vec![Begin { total_pieces: 4 }, PieceConnected { connected: 1 }, TickSecond, End],
        );
        assert!(!s.started);
        assert_eq!(s.score, 0);
        let s = run(s, vec![PieceConnected { connected: 2 }]);
        assert_eq!(s.connected, 0);
        let s = run(s, vec![Begin { total_pieces: 16 }]);
        assert_eq!((s.score, s.connected, s.elapsed_secs, s.total_pieces), (0, 0, 0, 16));
        assert!(s.started);
    }
}
