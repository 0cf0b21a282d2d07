//! Voice rows and the cursor over them.
//!
//! Every numeric field wraps modulo its domain on mutation, so there is no
//! out-of-range state to reject and negative deltas need no special casing.

use rand::Rng;

use crate::shared::{LEN_SPACE, MAX_NAME, NUM_ROWS, SEED_SPACE, TUNING_SPACE};

/// One grid row: an independent set of synthesis parameters.
#[derive(Clone, Debug)]
pub struct Voice {
    pub name: String,
    pub seed: u32,
    pub last_seed: u32,
    /// Block count, always in [1, 16].
    pub len: u32,
    /// Discontinuous transmission: conceal instead of re-corrupting after
    /// the first block.
    pub dtx: bool,
    /// Four reserved tuning slots (a, d, s, r). Displayed and edited, not
    /// yet consumed by the pipeline.
    pub tuning: [u32; 4],
}

impl Default for Voice {
    fn default() -> Self {
        Self {
            name: String::new(),
            seed: 0,
            last_seed: 0,
            len: 5,
            dtx: true,
            tuning: [0; 4],
        }
    }
}

/// The eight editable columns, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Column {
    Name,
    Seed,
    Len,
    Dtx,
    TuneA,
    TuneD,
    TuneS,
    TuneR,
}

impl Column {
    pub const COUNT: usize = 8;

    pub fn index(self) -> usize {
        match self {
            Column::Name => 0,
            Column::Seed => 1,
            Column::Len => 2,
            Column::Dtx => 3,
            Column::TuneA => 4,
            Column::TuneD => 5,
            Column::TuneS => 6,
            Column::TuneR => 7,
        }
    }

    fn from_index(i: usize) -> Self {
        match i % Self::COUNT {
            0 => Column::Name,
            1 => Column::Seed,
            2 => Column::Len,
            3 => Column::Dtx,
            4 => Column::TuneA,
            5 => Column::TuneD,
            6 => Column::TuneS,
            _ => Column::TuneR,
        }
    }

    pub fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    pub fn prev(self) -> Self {
        Self::from_index(self.index() + Self::COUNT - 1)
    }

    /// Which of the four tuning slots, if any.
    pub fn tuning_slot(self) -> Option<usize> {
        match self {
            Column::TuneA => Some(0),
            Column::TuneD => Some(1),
            Column::TuneS => Some(2),
            Column::TuneR => Some(3),
            _ => None,
        }
    }
}

pub struct VoiceGrid {
    pub voices: [Voice; NUM_ROWS],
    pub row: usize,
    pub col: Column,
}

impl Default for VoiceGrid {
    fn default() -> Self {
        Self {
            voices: std::array::from_fn(|_| Voice::default()),
            row: 0,
            col: Column::Name,
        }
    }
}

fn wrap(value: u32, delta: i32, domain: u32) -> u32 {
    (value as i64 + delta as i64).rem_euclid(domain as i64) as u32
}

impl VoiceGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_row(&mut self, delta: i32) {
        self.row = wrap(self.row as u32, delta, NUM_ROWS as u32) as usize;
    }

    pub fn move_col(&mut self, delta: i32) {
        self.col = if delta >= 0 { self.col.next() } else { self.col.prev() };
    }

    pub fn append_name_char(&mut self, row: usize, ch: char) {
        let voice = &mut self.voices[row];
        if ch.is_ascii_alphanumeric() && voice.name.len() < MAX_NAME {
            voice.name.push(ch);
        }
    }

    pub fn backspace_name(&mut self, row: usize) {
        self.voices[row].name.pop();
    }

    pub fn adjust_seed(&mut self, row: usize, delta: i32) {
        let voice = &mut self.voices[row];
        voice.seed = wrap(voice.seed, delta, SEED_SPACE);
    }

    pub fn adjust_len(&mut self, row: usize, delta: i32) {
        let voice = &mut self.voices[row];
        // domain size 16, offset by 1: wraps within [1, 16]
        voice.len = wrap(voice.len - 1, delta, LEN_SPACE) + 1;
    }

    pub fn adjust_dtx(&mut self, row: usize, delta: i32) {
        let voice = &mut self.voices[row];
        voice.dtx = wrap(voice.dtx as u32, delta, 2) == 1;
    }

    pub fn adjust_tuning(&mut self, row: usize, slot: usize, delta: i32) {
        let voice = &mut self.voices[row];
        voice.tuning[slot] = wrap(voice.tuning[slot], delta, TUNING_SPACE);
    }

    /// New uniform seed; the old one is kept for [`Self::swap_seed`].
    pub fn randomize_seed(&mut self, row: usize, rng: &mut impl Rng) {
        let voice = &mut self.voices[row];
        voice.last_seed = voice.seed;
        voice.seed = rng.gen_range(0..SEED_SPACE);
    }

    pub fn swap_seed(&mut self, row: usize) {
        let voice = &mut self.voices[row];
        std::mem::swap(&mut voice.seed, &mut voice.last_seed);
    }
}
