//! Audio capture for voice symptom input.
//!
//! The recorder owns the capture stream only while recording. The stream is
//! released when recording stops or the recorder is dropped, whichever
//! comes first. Finished clips go to a caller-supplied handler.

use chrono::{DateTime, Utc};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Container tag for finished clips.
pub const CLIP_MIME_TYPE: &str = "audio/wav";

/// Audio error types.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AudioError {
    #[error("could not access microphone: {0}")]
    DeviceUnavailable(String),
    #[error("already recording")]
    AlreadyRecording,
    #[error("not recording")]
    NotRecording,
}

/// A capture device that can be opened into a live stream.
pub trait CaptureDevice {
    type Stream: CaptureStream;

    fn open(&mut self) -> Result<Self::Stream, AudioError>;
}

/// A live capture stream.
pub trait CaptureStream {
    /// Chunks captured since the last call.
    fn take_chunks(&mut self) -> Vec<Vec<u8>>;

    /// Stop all tracks and give the device back.
    fn release(&mut self);
}

/// A finished recording.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioClip {
    pub data: Vec<u8>,
    pub mime_type: &'static str,
    pub duration_secs: u64,
    pub recorded_at: DateTime<Utc>,
}

// Releases the stream exactly once.
struct CaptureGuard<S: CaptureStream> {
    stream: S,
}

impl<S: CaptureStream> Drop for CaptureGuard<S> {
    fn drop(&mut self) {
        self.stream.release();
    }
}

struct ActiveCapture<S: CaptureStream> {
    guard: CaptureGuard<S>,
    chunks: Vec<Vec<u8>>,
    started_at: DateTime<Utc>,
}

impl<S: CaptureStream> ActiveCapture<S> {
    fn collect(&mut self) {
        self.chunks
            .extend(self.guard.stream.take_chunks().into_iter().filter(|c| !c.is_empty()));
    }
}

type ClipHandler = Box<dyn FnMut(&AudioClip) + Send>;

/// Records one clip at a time from a [`CaptureDevice`].
pub struct AudioRecorder<D: CaptureDevice> {
    device: D,
    on_complete: ClipHandler,
    active: Option<ActiveCapture<D::Stream>>,
    elapsed_secs: u64,
    last_clip: Option<AudioClip>,
    playing: bool,
}

impl<D: CaptureDevice> AudioRecorder<D> {
    pub fn new<F>(device: D, on_complete: F) -> Self
    where
        F: FnMut(&AudioClip) + Send + 'static,
    {
        Self {
            device,
            on_complete: Box::new(on_complete),
            active: None,
            elapsed_secs: 0,
            last_clip: None,
            playing: false,
        }
    }

    pub fn is_recording(&self) -> bool {
        self.active.is_some()
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    /// Elapsed recording time as `MM:SS`.
    pub fn elapsed_display(&self) -> String {
        format_elapsed(self.elapsed_secs)
    }

    pub fn last_clip(&self) -> Option<&AudioClip> {
        self.last_clip.as_ref()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Acquire the device and start a new clip.
    pub fn start(&mut self) -> Result<(), AudioError> {
        if self.active.is_some() {
            return Err(AudioError::AlreadyRecording);
        }

        let stream = self.device.open().map_err(|e| {
            tracing::error!("Error starting recording: {}", e);
            e
        })?;

        self.active = Some(ActiveCapture {
            guard: CaptureGuard { stream },
            chunks: Vec::new(),
            started_at: Utc::now(),
        });
        self.elapsed_secs = 0;
        tracing::info!("Recording started");
        Ok(())
    }

    /// Advance the one-second timer and pull pending chunks.
    pub fn tick(&mut self) {
        if let Some(active) = self.active.as_mut() {
            active.collect();
            self.elapsed_secs += 1;
        }
    }

    /// Finish the clip, hand it to the handler and release the device.
    pub fn stop(&mut self) -> Result<&AudioClip, AudioError> {
        let mut active = self.active.take().ok_or(AudioError::NotRecording)?;
        active.collect();

        let clip = AudioClip {
            data: active.chunks.concat(),
            mime_type: CLIP_MIME_TYPE,
            duration_secs: self.elapsed_secs,
            recorded_at: active.started_at,
        };
        drop(active);

        tracing::info!(
            "Recording finished: {} bytes, {}",
            clip.data.len(),
            format_elapsed(clip.duration_secs)
        );
        (self.on_complete)(&clip);
        self.playing = false;
        Ok(&*self.last_clip.insert(clip))
    }

    /// Record until `stop` resolves, advancing the timer once per second.
    pub async fn record_until<F>(&mut self, stop: F) -> Result<&AudioClip, AudioError>
    where
        F: Future<Output = ()>,
    {
        self.start()?;

        let period = Duration::from_secs(1);
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(stop);

        loop {
            tokio::select! {
                _ = &mut stop => break,
                _ = interval.tick() => self.tick(),
            }
        }

        self.stop()
    }

    /// Start playback of the last clip. Returns false if there is none.
    pub fn play(&mut self) -> bool {
        if self.last_clip.is_some() && self.active.is_none() {
            self.playing = true;
        }
        self.playing
    }

    pub fn playback_ended(&mut self) {
        self.playing = false;
    }
}

/// Format seconds as zero-padded `MM:SS`.
pub fn format_elapsed(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
