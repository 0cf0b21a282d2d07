//! Seam to the external frame decoder.
//!
//! The decoder is an opaque collaborator: it eats one corrupted frame (or a
//! concealment request) and emits one block of float samples. The rest of the
//! pipeline only ever sees this trait, so tests can swap in a deterministic
//! stand-in.

use thiserror::Error;

use crate::shared::SAMPLE_RATE;

use super::corruptor::FRAME_SIZE;

/// Samples per decoded block: three 10ms mono frames at 48kHz.
pub const BLOCK_SIZE: usize = 1440;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("decoder rejected frame: {0}")]
    Codec(#[from] opus::Error),

    #[error("decoder returned {got} samples, expected {expected}")]
    Truncated { got: usize, expected: usize },
}

pub trait FrameDecoder {
    /// Decode one frame into `out`. With `conceal` set the decoder is asked
    /// to continue from its internal state instead of decoding fresh bytes;
    /// the frame is still passed through for it to consult.
    fn decode(
        &mut self,
        frame: &[u8; FRAME_SIZE],
        conceal: bool,
        out: &mut [f32; BLOCK_SIZE],
    ) -> Result<(), DecodeError>;
}

/// Production decoder. Holds mutable codec state, so each synthesis call
/// creates a fresh one and drops it on the way out.
pub struct OpusFrameDecoder {
    inner: opus::Decoder,
}

impl OpusFrameDecoder {
    pub fn new() -> Result<Self, DecodeError> {
        Ok(Self {
            inner: opus::Decoder::new(SAMPLE_RATE, opus::Channels::Mono)?,
        })
    }
}

impl FrameDecoder for OpusFrameDecoder {
    fn decode(
        &mut self,
        frame: &[u8; FRAME_SIZE],
        conceal: bool,
        out: &mut [f32; BLOCK_SIZE],
    ) -> Result<(), DecodeError> {
        let got = self.inner.decode_float(frame, out, conceal)?;
        if got != BLOCK_SIZE {
            return Err(DecodeError::Truncated {
                got,
                expected: BLOCK_SIZE,
            });
        }
        Ok(())
    }
}
