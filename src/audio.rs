use anyhow::{Context, Result};
use log::{debug, warn};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};

use std::{
    fs,
    io::Cursor,
    path::{Path, PathBuf},
    sync::Arc,
};

/// Sound effects the stopwatch can trigger. Every call is fire and forget, implementations deal
/// with their own failures.
pub trait AudioCues {
    fn play_click(&mut self);
    fn play_timer_start(&mut self);
    fn stop_timer_start(&mut self);
}

pub struct SilentAudio;

impl AudioCues for SilentAudio {
    fn play_click(&mut self) {}
    fn play_timer_start(&mut self) {}
    fn stop_timer_start(&mut self) {}
}

const CLICK_FILE: &str = "click.wav";
const TIMER_START_FILE: &str = "timer_start.wav";

type Clip = Arc<[u8]>;

pub struct RodioAudio {
    // Output stops as soon as the stream is dropped
    _stream: OutputStream,
    handle: OutputStreamHandle,
    click: Option<Clip>,
    timer_start: Option<Clip>,
    timer_start_sink: Option<Sink>,
}

impl RodioAudio {
    pub fn new(sounds_dir: &Path) -> Result<RodioAudio> {
        let (stream, handle) =
            OutputStream::try_default().context("Failed to open audio output device")?;

        Ok(RodioAudio {
            _stream: stream,
            handle,
            click: load_clip(&sounds_dir.join(CLICK_FILE)),
            timer_start: load_clip(&sounds_dir.join(TIMER_START_FILE)),
            timer_start_sink: None,
        })
    }

    fn play(&self, clip: &Clip) -> Result<Sink> {
        let source = Decoder::new(Cursor::new(Arc::clone(clip))).context("Failed to decode clip")?;
        let sink = Sink::try_new(&self.handle).context("Failed to create audio sink")?;
        sink.append(source);
        Ok(sink)
    }
}

impl AudioCues for RodioAudio {
    fn play_click(&mut self) {
        let Some(clip) = &self.click else {
            return;
        };

        match self.play(clip) {
            Ok(sink) => sink.detach(),
            Err(e) => warn!("Failed to play click: {:?}", e),
        }
    }

    fn play_timer_start(&mut self) {
        self.stop_timer_start();

        let Some(clip) = &self.timer_start else {
            return;
        };

        match self.play(clip) {
            Ok(sink) => self.timer_start_sink = Some(sink),
            Err(e) => warn!("Failed to play timer start: {:?}", e),
        }
    }

    fn stop_timer_start(&mut self) {
        if let Some(sink) = self.timer_start_sink.take() {
            if !sink.empty() {
                debug!("Stopping timer start cue");
            }
            sink.stop();
        }
    }
}

fn load_clip(path: &Path) -> Option<Clip> {
    match read_clip(path) {
        Ok(clip) => Some(clip),
        Err(e) => {
            warn!("Sound unavailable, continuing without it: {:?}", e);
            None
        }
    }
}

fn read_clip(path: &Path) -> Result<Clip> {
    let data = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(data.into())
}

pub fn sounds_dir(assets: &Path) -> PathBuf {
    assets.join("sounds")
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_clip_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_clip(&dir.path().join(CLICK_FILE)).is_none());
    }

    #[test]
    fn clip_is_read_into_memory() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join(TIMER_START_FILE);
        fs::File::create(&path)?.write_all(b"RIFF")?;

        let clip = read_clip(&path)?;
        assert_eq!(&clip[..], b"RIFF");
        Ok(())
    }

    #[test]
    fn sounds_live_under_assets() {
        assert_eq!(
            sounds_dir(Path::new("assets")),
            Path::new("assets").join("sounds")
        );
    }
}
