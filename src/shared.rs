// The input plan:
//
// Cursor:
//   arrows        //  Up / Down / Left / Right, wrapping at the grid edges
//
// Name column (column 0):
//   a-z 0-9       //  append to the voice name (up to MAX_NAME chars)
//   Backspace     //  delete the last name char
//
// Numeric columns (1..8):
//   PgDn . ␣ ]    //  increment the selected field
//   PgUp ⌫ , [    //  decrement the selected field
//   r             //  (seed column only) randomize the seed, old one kept for undo
//   z             //  (seed column only) swap seed and last seed back
//
// Anywhere:
//   Enter         //  regenerate + play the cursor row even without a change
//   Esc / Ctrl-*  //  quit
//
// Any numeric change regenerates the row's audio and plays it; playback is
// blocking and everything typed during it is dropped, not queued.

pub const NUM_ROWS: usize = 10;
pub const MAX_NAME: usize = 8;

/// Seeds live in [0, 2^24): six hex digits on screen.
pub const SEED_SPACE: u32 = 0x100_0000;
/// Block counts live in [1, 16].
pub const LEN_SPACE: u32 = 16;
/// Each of the four tuning values is a single hex digit.
pub const TUNING_SPACE: u32 = 0x10;

pub const SAMPLE_RATE: u32 = 48_000;

// ye olde types
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    Backspace,
    Enter,
    Char(char),
    Quit,
}
