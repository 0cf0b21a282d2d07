//! Input-driven state machine: events in, grid mutations + an action out.
//!
//! The controller never touches the audio sink itself; it tells the main
//! loop when a row needs regeneration and the loop executes the blocking
//! synthesize/play cycle against it.

use rand::rngs::ThreadRng;

use crate::grid::{Column, VoiceGrid};
use crate::shared::InputEvent;

/// What the main loop should do after an event was absorbed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    None,
    /// Regenerate and play this row with its current parameters.
    Play(usize),
    Quit,
}

pub struct EditorController {
    pub grid: VoiceGrid,
    rng: ThreadRng,
}

impl Default for EditorController {
    fn default() -> Self {
        Self {
            grid: VoiceGrid::new(),
            rng: rand::thread_rng(),
        }
    }
}

impl EditorController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&mut self, event: InputEvent) -> Action {
        match event {
            InputEvent::Quit => Action::Quit,

            InputEvent::Up => {
                self.grid.move_row(-1);
                Action::None
            }
            InputEvent::Down => {
                self.grid.move_row(1);
                Action::None
            }
            InputEvent::Left => {
                self.grid.move_col(-1);
                Action::None
            }
            InputEvent::Right => {
                self.grid.move_col(1);
                Action::None
            }

            // Enter replays the row even without a change
            InputEvent::Enter => Action::Play(self.grid.row),

            event => match self.grid.col {
                Column::Name => self.edit_name(event),
                col => self.edit_numeric(col, event),
            },
        }
    }

    fn edit_name(&mut self, event: InputEvent) -> Action {
        let row = self.grid.row;
        match event {
            InputEvent::Char(ch) => self.grid.append_name_char(row, ch),
            InputEvent::Backspace => self.grid.backspace_name(row),
            _ => {}
        }
        // name edits never regenerate
        Action::None
    }

    fn edit_numeric(&mut self, col: Column, event: InputEvent) -> Action {
        let row = self.grid.row;

        if col == Column::Seed {
            match event {
                InputEvent::Char('r') => {
                    self.grid.randomize_seed(row, &mut self.rng);
                    return Action::Play(row);
                }
                InputEvent::Char('z') => {
                    self.grid.swap_seed(row);
                    return Action::Play(row);
                }
                _ => {}
            }
        }

        let delta = match event {
            InputEvent::PageDown | InputEvent::Char('.' | ' ' | ']') => 1,
            InputEvent::PageUp | InputEvent::Backspace | InputEvent::Char(',' | '[') => -1,
            _ => return Action::None,
        };

        match col {
            Column::Seed => self.grid.adjust_seed(row, delta),
            Column::Len => self.grid.adjust_len(row, delta),
            Column::Dtx => self.grid.adjust_dtx(row, delta),
            col => {
                if let Some(slot) = col.tuning_slot() {
                    self.grid.adjust_tuning(row, slot, delta);
                }
            }
        }
        Action::Play(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::NUM_ROWS;

    fn at(col_steps: i32, row_steps: i32) -> EditorController {
        let mut ctl = EditorController::new();
        for _ in 0..col_steps {
            ctl.handle(InputEvent::Right);
        }
        for _ in 0..row_steps {
            ctl.handle(InputEvent::Down);
        }
        ctl
    }

    #[test]
    fn name_edits_do_not_trigger_playback() {
        let mut ctl = EditorController::new();
        assert_eq!(ctl.handle(InputEvent::Char('k')), Action::None);
        assert_eq!(ctl.handle(InputEvent::Char('1')), Action::None);
        assert_eq!(ctl.handle(InputEvent::Backspace), Action::None);
        assert_eq!(ctl.grid.voices[0].name, "k");
    }

    #[test]
    fn numeric_change_marks_row_for_playback() {
        let mut ctl = at(1, 2); // seed column, row 2
        assert_eq!(ctl.handle(InputEvent::Char('.')), Action::Play(2));
        assert_eq!(ctl.grid.voices[2].seed, 1);
        assert_eq!(ctl.handle(InputEvent::PageUp), Action::Play(2));
        assert_eq!(ctl.grid.voices[2].seed, 0);
    }

    #[test]
    fn every_increment_key_means_plus_one() {
        for ev in [
            InputEvent::PageDown,
            InputEvent::Char('.'),
            InputEvent::Char(' '),
            InputEvent::Char(']'),
        ] {
            let mut ctl = at(2, 0); // len column
            assert_eq!(ctl.handle(ev), Action::Play(0));
            assert_eq!(ctl.grid.voices[0].len, 6);
        }
    }

    #[test]
    fn every_decrement_key_means_minus_one() {
        for ev in [
            InputEvent::PageUp,
            InputEvent::Backspace,
            InputEvent::Char(','),
            InputEvent::Char('['),
        ] {
            let mut ctl = at(2, 0);
            assert_eq!(ctl.handle(ev), Action::Play(0));
            assert_eq!(ctl.grid.voices[0].len, 4);
        }
    }

    #[test]
    fn other_keys_are_value_noops() {
        let mut ctl = at(2, 0);
        assert_eq!(ctl.handle(InputEvent::Char('x')), Action::None);
        assert_eq!(ctl.grid.voices[0].len, 5);
    }

    #[test]
    fn enter_plays_from_any_column() {
        let mut ctl = EditorController::new();
        assert_eq!(ctl.handle(InputEvent::Enter), Action::Play(0));
        let mut ctl = at(3, 4);
        assert_eq!(ctl.handle(InputEvent::Enter), Action::Play(4));
    }

    #[test]
    fn randomize_and_swap_only_work_on_the_seed_column() {
        let mut ctl = at(1, 0);
        assert_eq!(ctl.handle(InputEvent::Char('r')), Action::Play(0));
        let randomized = ctl.grid.voices[0].seed;
        assert_eq!(ctl.grid.voices[0].last_seed, 0);
        assert_eq!(ctl.handle(InputEvent::Char('z')), Action::Play(0));
        assert_eq!(ctl.grid.voices[0].seed, 0);
        assert_eq!(ctl.grid.voices[0].last_seed, randomized);

        // on the len column the same keys are noops
        let mut ctl = at(2, 0);
        assert_eq!(ctl.handle(InputEvent::Char('r')), Action::None);
        assert_eq!(ctl.handle(InputEvent::Char('z')), Action::None);
    }

    #[test]
    fn dtx_column_toggles() {
        let mut ctl = at(3, 0);
        assert!(ctl.grid.voices[0].dtx);
        assert_eq!(ctl.handle(InputEvent::Char(' ')), Action::Play(0));
        assert!(!ctl.grid.voices[0].dtx);
    }

    #[test]
    fn cursor_wraps_through_the_whole_grid() {
        let mut ctl = EditorController::new();
        for _ in 0..NUM_ROWS {
            ctl.handle(InputEvent::Down);
        }
        assert_eq!(ctl.grid.row, 0);
        ctl.handle(InputEvent::Up);
        assert_eq!(ctl.grid.row, NUM_ROWS - 1);
    }

    #[test]
    fn quit_passes_through() {
        let mut ctl = EditorController::new();
        assert_eq!(ctl.handle(InputEvent::Quit), Action::Quit);
    }
}
