//! Playback sink: one persistent cpal output stream, fed finished buffers
//! over a channel. Playback is deliberately blocking — the caller hands over
//! a buffer and gets control back only once the stream has drained it.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use crossbeam_channel::{Receiver, Sender};
use thiserror::Error;

use crate::shared::SAMPLE_RATE;
use crate::synth::BLOCK_SIZE;

mod engine;

use engine::{AudioCommand, Engine};

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no default output device")]
    NoDevice,

    #[error("no default output config: {0}")]
    NoConfig(#[from] cpal::DefaultStreamConfigError),

    #[error("unsupported sample format {0:?} (only f32 supported for now)")]
    UnsupportedFormat(cpal::SampleFormat),

    #[error("failed to build output stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),

    #[error("failed to start output stream: {0}")]
    StartStream(#[from] cpal::PlayStreamError),
}

pub struct PlaybackHandle {
    tx: Sender<AudioCommand>,
    done_rx: Receiver<()>,
    device_rate: u32,
    _stream: cpal::Stream,
}

impl PlaybackHandle {
    /// Queue one finished voice buffer and block until it has fully drained.
    pub fn play(&self, pcm: &[i16]) -> anyhow::Result<()> {
        let mut mono: Vec<f32> = pcm
            .iter()
            .map(|&s| s as f32 / i16::MAX as f32)
            .collect();
        // trail off with one silent block, otherwise the audio server gets
        // angry when the stream drains exactly at the buffer edge
        mono.extend(std::iter::repeat(0.0).take(BLOCK_SIZE));

        let mono = if self.device_rate == SAMPLE_RATE {
            mono
        } else {
            resample_linear(&mono, SAMPLE_RATE, self.device_rate)
        };

        self.tx
            .send(AudioCommand::Play(mono))
            .map_err(|_| anyhow::anyhow!("playback engine is gone"))?;
        self.done_rx
            .recv()
            .map_err(|_| anyhow::anyhow!("playback engine hung up mid-buffer"))?;
        Ok(())
    }
}

pub fn start_audio() -> Result<PlaybackHandle, AudioError> {
    let host = cpal::default_host();
    let device = host.default_output_device().ok_or(AudioError::NoDevice)?;
    let config = device.default_output_config()?;

    if config.sample_format() != cpal::SampleFormat::F32 {
        return Err(AudioError::UnsupportedFormat(config.sample_format()));
    }

    let device_rate = config.sample_rate();
    let channels = config.channels() as usize;

    let (tx, rx) = crossbeam_channel::bounded::<AudioCommand>(16);
    let (done_tx, done_rx) = crossbeam_channel::bounded::<()>(16);
    let mut engine = Engine::new(done_tx);

    let err_fn = |err| log::error!("audio output stream error: {err}");

    let stream = device.build_output_stream(
        &config.into(),
        move |data: &mut [f32], _info| {
            while let Ok(cmd) = rx.try_recv() {
                engine.handle_cmd(cmd);
            }
            engine.render_block(data, channels);
        },
        err_fn,
        None,
    )?;
    stream.play()?;

    log::info!("playback open: {channels} ch @ {device_rate} Hz");

    Ok(PlaybackHandle {
        tx,
        done_rx,
        device_rate,
        _stream: stream,
    })
}

fn resample_linear(samples: &[f32], source_rate: u32, target_rate: u32) -> Vec<f32> {
    if source_rate == target_rate {
        return samples.to_vec();
    }
    let ratio = target_rate as f64 / source_rate as f64;
    let out_len = (samples.len() as f64 * ratio).ceil() as usize;
    let mut out = Vec::with_capacity(out_len);

    for i in 0..out_len {
        let src_pos = i as f64 / ratio;
        let idx = src_pos.floor() as usize;
        let frac = (src_pos - idx as f64) as f32;
        if idx >= samples.len().saturating_sub(1) {
            out.push(samples.last().copied().unwrap_or(0.0));
        } else {
            out.push(samples[idx] * (1.0 - frac) + samples[idx + 1] * frac);
        }
    }
    out
}
