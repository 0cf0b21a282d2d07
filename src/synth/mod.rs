//! The glitch pipeline: seed -> corrupted frame -> decoded blocks -> one
//! continuous i16 buffer.

mod corruptor;
mod decoder;
mod stitcher;

pub use corruptor::{FRAME_SIZE, corrupt_frame};
pub use decoder::{BLOCK_SIZE, DecodeError, FrameDecoder, OpusFrameDecoder};
pub use stitcher::BlockStitcher;

/// Regenerate one voice. The decoder is created here and dropped on return,
/// so repeated calls with the same arguments start from identical codec state
/// and produce identical buffers.
pub fn synthesize(seed: u32, blocks: u32, dtx: bool) -> anyhow::Result<Vec<i16>> {
    let mut decoder = OpusFrameDecoder::new()?;
    Ok(synthesize_with(&mut decoder, seed, blocks, dtx))
}

/// Pipeline body over any decoder. `decoder` must be freshly created for the
/// result to be reproducible.
pub fn synthesize_with<D: FrameDecoder>(
    decoder: &mut D,
    seed: u32,
    blocks: u32,
    dtx: bool,
) -> Vec<i16> {
    let mut frame = corrupt_frame(seed);
    let mut block = [0f32; BLOCK_SIZE];
    let mut stitcher = BlockStitcher::new();
    let mut out = Vec::with_capacity(blocks as usize * BLOCK_SIZE);

    for i in 0..blocks {
        let conceal = dtx && i > 0;
        if i > 0 && !conceal {
            // same seed, byte-identical frame; the decoder state is what
            // makes consecutive blocks differ
            frame = corrupt_frame(seed);
        }
        if let Err(e) = decoder.decode(&frame, conceal, &mut block) {
            // one bad frame must not kill the whole voice
            log::warn!("block {i}: decode failed ({e}), substituting silence");
            block.fill(0.0);
        }
        stitcher.push(&block, &mut out);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Deterministic stand-in decoder: output depends only on the call
    /// sequence, mimicking a stateful codec.
    struct MockDecoder {
        calls: u32,
        fresh_decodes: u32,
        conceal_decodes: u32,
        frames_seen: Vec<[u8; FRAME_SIZE]>,
        fail_on: Option<u32>,
    }

    impl MockDecoder {
        fn new() -> Self {
            Self {
                calls: 0,
                fresh_decodes: 0,
                conceal_decodes: 0,
                frames_seen: Vec::new(),
                fail_on: None,
            }
        }
    }

    impl FrameDecoder for MockDecoder {
        fn decode(
            &mut self,
            frame: &[u8; FRAME_SIZE],
            conceal: bool,
            out: &mut [f32; BLOCK_SIZE],
        ) -> Result<(), DecodeError> {
            let call = self.calls;
            self.calls += 1;
            if self.fail_on == Some(call) {
                return Err(DecodeError::Truncated {
                    got: 0,
                    expected: BLOCK_SIZE,
                });
            }
            if conceal {
                self.conceal_decodes += 1;
            } else {
                self.fresh_decodes += 1;
                self.frames_seen.push(*frame);
            }
            for (i, s) in out.iter_mut().enumerate() {
                let x = (call as f32 + 1.0) * (i as f32 * 0.013 + frame[2] as f32 * 0.001);
                *s = (x.sin()) * 0.4;
            }
            Ok(())
        }
    }

    #[test]
    fn buffer_length_is_blocks_times_block_size() {
        let mut dec = MockDecoder::new();
        let pcm = synthesize_with(&mut dec, 0, 1, false);
        assert_eq!(pcm.len(), BLOCK_SIZE);

        let mut dec = MockDecoder::new();
        let pcm = synthesize_with(&mut dec, 0x1234, 7, true);
        assert_eq!(pcm.len(), 7 * BLOCK_SIZE);
    }

    #[test]
    fn identical_arguments_identical_buffers() {
        let mut a = MockDecoder::new();
        let mut b = MockDecoder::new();
        assert_eq!(
            synthesize_with(&mut a, 0xbeef, 4, false),
            synthesize_with(&mut b, 0xbeef, 4, false),
        );
    }

    #[test]
    fn dtx_corrupts_exactly_one_frame() {
        let mut dec = MockDecoder::new();
        synthesize_with(&mut dec, 0x42, 5, true);
        assert_eq!(dec.fresh_decodes, 1);
        assert_eq!(dec.conceal_decodes, 4);
    }

    #[test]
    fn without_dtx_every_block_decodes_the_same_frame() {
        let mut dec = MockDecoder::new();
        synthesize_with(&mut dec, 0x42, 5, false);
        assert_eq!(dec.fresh_decodes, 5);
        assert_eq!(dec.conceal_decodes, 0);
        for frame in &dec.frames_seen[1..] {
            assert_eq!(frame, &dec.frames_seen[0]);
        }
    }

    #[test]
    fn decode_failure_yields_silence_not_abort() {
        let mut dec = MockDecoder::new();
        dec.fail_on = Some(1);
        let pcm = synthesize_with(&mut dec, 0x42, 3, false);
        assert_eq!(pcm.len(), 3 * BLOCK_SIZE);
        // second block collapsed to silence
        assert!(pcm[BLOCK_SIZE..2 * BLOCK_SIZE].iter().all(|&s| s == 0));
        // third block survived
        assert!(pcm[2 * BLOCK_SIZE..].iter().any(|&s| s != 0));
    }

    #[test]
    fn seed_zero_single_block_is_nonsilent() {
        let mut dec = MockDecoder::new();
        let pcm = synthesize_with(&mut dec, 0, 1, false);
        assert!(pcm.iter().any(|&s| s != 0));
    }
}
