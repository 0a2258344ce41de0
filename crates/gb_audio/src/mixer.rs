use std::fs;
use std::io::Cursor;
use std::path::Path;

use rodio::source::Source;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};

use gb_core::session::ClickSound;

/// Handle to a loaded one-shot clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipId(usize);

pub struct Mixer {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    clips: Vec<Vec<u8>>,
    music: Option<Sink>,
    click: Option<ClipId>,
}

impl Mixer {
    pub fn new() -> Result<Self, String> {
        let (stream, handle) = OutputStream::try_default()
            .map_err(|e| format!("Failed to open audio output: {e}"))?;
        Ok(Self {
            _stream: stream,
            handle,
            clips: Vec::new(),
            music: None,
            click: None,
        })
    }

    /// Load a one-shot clip from disk. Clips are kept as raw file bytes and
    /// re-decoded per play; they are expected to be short.
    pub fn load_clip(&mut self, path: &Path) -> Result<ClipId, String> {
        let bytes = fs::read(path)
            .map_err(|e| format!("Failed to read sound '{}': {e}", path.display()))?;
        // Decode once up front so a corrupt file fails at load, not mid-run.
        Decoder::new(Cursor::new(bytes.clone()))
            .map_err(|e| format!("Failed to decode sound '{}': {e}", path.display()))?;
        let id = ClipId(self.clips.len());
        self.clips.push(bytes);
        Ok(id)
    }

    /// Mark `clip` as the click effect used on state transitions.
    pub fn set_click(&mut self, clip: ClipId) {
        self.click = Some(clip);
    }

    /// Fire-and-forget playback on a detached sink. Runtime failures are
    /// logged and swallowed; a dropped click is not worth a dropped frame.
    pub fn play_clip(&self, clip: ClipId) {
        let Some(bytes) = self.clips.get(clip.0) else {
            return;
        };
        let source = match Decoder::new(Cursor::new(bytes.clone())) {
            Ok(source) => source,
            Err(e) => {
                log::warn!("Clip decode failed: {e}");
                return;
            }
        };
        match Sink::try_new(&self.handle) {
            Ok(sink) => {
                sink.append(source);
                sink.detach();
            }
            Err(e) => log::warn!("Sound playback failed: {e}"),
        }
    }

    /// Start music from disk, replacing any music already playing. The sink
    /// is held so playback stops when the mixer is dropped at shutdown.
    pub fn play_music(&mut self, path: &Path, loop_forever: bool) -> Result<(), String> {
        let bytes = fs::read(path)
            .map_err(|e| format!("Failed to read music '{}': {e}", path.display()))?;
        let source = Decoder::new(Cursor::new(bytes))
            .map_err(|e| format!("Failed to decode music '{}': {e}", path.display()))?;
        let sink = Sink::try_new(&self.handle)
            .map_err(|e| format!("Failed to open music sink: {e}"))?;
        if loop_forever {
            sink.append(source.repeat_infinite());
        } else {
            sink.append(source);
        }
        self.music = Some(sink);
        Ok(())
    }
}

impl ClickSound for Mixer {
    fn play_click(&mut self) {
        if let Some(clip) = self.click {
            self.play_clip(clip);
        }
    }
}
