//! Callback-side playback engine. Owns the queue of pending buffers and
//! reports each one back as it drains; no allocation happens in the render
//! path beyond queue bookkeeping.

use std::collections::VecDeque;

use crossbeam_channel::Sender;

#[derive(Clone, Debug)]
pub enum AudioCommand {
    /// Mono samples at the device rate, played back to back.
    Play(Vec<f32>),
}

pub struct Engine {
    queue: VecDeque<Vec<f32>>,
    current: Option<(Vec<f32>, usize)>,
    done_tx: Sender<()>,
}

impl Engine {
    pub fn new(done_tx: Sender<()>) -> Self {
        Self {
            queue: VecDeque::new(),
            current: None,
            done_tx,
        }
    }

    pub fn handle_cmd(&mut self, cmd: AudioCommand) {
        match cmd {
            AudioCommand::Play(buf) => self.queue.push_back(buf),
        }
    }

    /// Fill one interleaved output block, copying the mono sample across all
    /// device channels. Silence when nothing is queued.
    pub fn render_block(&mut self, data: &mut [f32], channels: usize) {
        for frame in data.chunks_mut(channels) {
            let sample = self.next_sample();
            for ch in frame {
                *ch = sample;
            }
        }
    }

    fn next_sample(&mut self) -> f32 {
        loop {
            match &mut self.current {
                Some((buf, pos)) => {
                    if *pos < buf.len() {
                        let s = buf[*pos];
                        *pos += 1;
                        return s;
                    }
                    self.current = None;
                    let _ = self.done_tx.try_send(());
                }
                None => match self.queue.pop_front() {
                    Some(buf) => self.current = Some((buf, 0)),
                    None => return 0.0,
                },
            }
        }
    }
}
