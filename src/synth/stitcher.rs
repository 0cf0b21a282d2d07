//! Stitches decoded blocks into one continuous i16 buffer.
//!
//! Raw decoder output from garbage frames swings wildly in level from one
//! block to the next. Each block is scaled against a running reference RMS
//! that ramps linearly toward the louder of (previous, current) across the
//! block, then soft-clipped with tanh before integer conversion. Only the
//! reference level survives between blocks, so any number of blocks can be
//! streamed through.

/// Extra headroom under the tanh so loud blocks keep texture instead of
/// squaring off.
const HEADROOM: f32 = 4.0;

#[derive(Debug, Default)]
pub struct BlockStitcher {
    prev_rms: Option<f32>,
}

impl BlockStitcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert one block and append it to `out`.
    pub fn push(&mut self, block: &[f32], out: &mut Vec<i16>) {
        if block.is_empty() {
            return;
        }
        let rms = rms(block);
        let prev = *self.prev_rms.get_or_insert(rms);
        let peak = prev.max(rms);

        let last = (block.len() - 1).max(1) as f32;
        for (p, &sample) in block.iter().enumerate() {
            // fade the scale from the previous reference toward the louder level
            let t = p as f32 / last;
            // an all-silent block would divide by zero; floor keeps it at 0 output
            let scale = (t * peak + (1.0 - t) * prev).max(f32::MIN_POSITIVE);
            let clipped = (sample / scale / HEADROOM).tanh();
            out.push((clipped * i16::MAX as f32).round() as i16);
        }

        self.prev_rms = Some(peak);
    }
}

fn rms(block: &[f32]) -> f32 {
    if block.is_empty() {
        return 0.0;
    }
    (block.iter().map(|s| s * s).sum::<f32>() / block.len() as f32).sqrt()
}
