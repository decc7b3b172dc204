//! Alert sound playback
//!
//! rodio's output stream is not `Send`, so the player lives on its own
//! thread and the UI talks to it over a channel.

use anyhow::{Context, Result};
use minimal_timer_types::AlertSoundConfig;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use std::fs::File;
use std::io::BufReader;
use std::sync::mpsc::{channel, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

/// Sound files tried, in order, when no custom sound is configured
const SYSTEM_ALERT_PATHS: &[&str] = &[
    // freedesktop sounds (Linux)
    "/usr/share/sounds/freedesktop/stereo/alarm-clock-elapsed.oga",
    "/usr/share/sounds/freedesktop/stereo/complete.oga",
    "/usr/share/sounds/freedesktop/stereo/bell.oga",
    // Ubuntu/GNOME sounds
    "/usr/share/sounds/gnome/default/alerts/glass.ogg",
    // macOS
    "/System/Library/Sounds/Glass.aiff",
    // Windows
    "C:\\Windows\\Media\\Alarm01.wav",
];

const FALLBACK_BEEP_HZ: f32 = 440.0;
const FALLBACK_BEEP_LENGTH: Duration = Duration::from_millis(500);

/// Plays, loops and stops sound files on the default output device
pub struct AudioPlayer {
    // Dropping the stream stops all audio
    _stream: OutputStream,
    _stream_handle: OutputStreamHandle,
    sink: Sink,
}

impl AudioPlayer {
    pub fn new() -> Result<Self> {
        let (stream, stream_handle) =
            OutputStream::try_default().context("Failed to open audio output stream")?;
        let sink = Sink::try_new(&stream_handle).context("Failed to create audio sink")?;

        Ok(Self {
            _stream: stream,
            _stream_handle: stream_handle,
            sink,
        })
    }

    /// Play a sound file, optionally repeating it until `stop`
    pub fn play(&self, path: &str, looped: bool) -> Result<()> {
        let file =
            File::open(path).with_context(|| format!("Failed to open sound file: {}", path))?;
        let source = Decoder::new(BufReader::new(file))
            .with_context(|| format!("Failed to decode sound file: {}", path))?;

        if looped {
            self.sink.append(source.repeat_infinite());
        } else {
            self.sink.append(source);
        }
        self.sink.play();
        Ok(())
    }

    /// Play the first system alert sound that exists, or a short beep
    pub fn play_system_alert(&self, looped: bool) -> Result<()> {
        for path in SYSTEM_ALERT_PATHS {
            if std::path::Path::new(path).exists() && self.play(path, looped).is_ok() {
                return Ok(());
            }
        }

        log::debug!("No system alert sound found, falling back to a beep");
        self.play_beep(FALLBACK_BEEP_HZ, FALLBACK_BEEP_LENGTH)
    }

    pub fn play_beep(&self, frequency: f32, duration: Duration) -> Result<()> {
        let source = rodio::source::SineWave::new(frequency)
            .take_duration(duration)
            .amplify(0.3);

        self.sink.append(source);
        self.sink.play();
        Ok(())
    }

    /// Play whatever `config` asks for
    pub fn play_alert(&self, config: &AlertSoundConfig) -> Result<()> {
        self.set_volume(config.volume);
        match config.custom_sound_path {
            Some(ref path) => self.play(path, config.loop_sound),
            None => self.play_system_alert(config.loop_sound),
        }
    }

    pub fn stop(&self) {
        self.sink.stop();
    }

    /// Set the volume (0.0 to 1.0)
    pub fn set_volume(&self, volume: f32) {
        self.sink.set_volume(volume.clamp(0.0, 1.0));
    }

    pub fn is_playing(&self) -> bool {
        !self.sink.empty()
    }
}

enum AudioCommand {
    Play(AlertSoundConfig),
    Stop,
    Shutdown,
}

/// Handle to the audio thread.
///
/// Cheap to call from the UI thread. When no output device is available the
/// thread exits early and every command is silently dropped.
pub struct AlertSound {
    sender: Option<Sender<AudioCommand>>,
    handle: Option<JoinHandle<()>>,
}

impl AlertSound {
    /// Spawn the audio thread
    pub fn spawn() -> Self {
        let (tx, rx) = channel::<AudioCommand>();

        let handle = std::thread::spawn(move || {
            // AudioPlayer is created here because it is not Send
            let player = match AudioPlayer::new() {
                Ok(p) => p,
                Err(e) => {
                    log::warn!("Failed to create audio player: {:#}", e);
                    return;
                }
            };

            while let Ok(command) = rx.recv() {
                match command {
                    AudioCommand::Play(config) => {
                        if let Err(e) = player.play_alert(&config) {
                            log::warn!("Failed to play alert sound: {:#}", e);
                        }
                    }
                    AudioCommand::Stop => player.stop(),
                    AudioCommand::Shutdown => {
                        log::debug!("Audio thread received shutdown signal");
                        break;
                    }
                }
            }
            log::debug!("Audio thread exiting");
        });

        Self {
            sender: Some(tx),
            handle: Some(handle),
        }
    }

    /// Start the alert; a disabled config is a no-op
    pub fn play(&self, config: &AlertSoundConfig) {
        if !config.enabled {
            log::debug!("Alert sound disabled");
            return;
        }
        self.send(AudioCommand::Play(config.clone()));
    }

    pub fn stop(&self) {
        self.send(AudioCommand::Stop);
    }

    fn send(&self, command: AudioCommand) {
        if let Some(ref sender) = self.sender {
            // The thread may already be gone when there is no audio device
            let _ = sender.send(command);
        }
    }

    /// Stop the thread and wait for it
    pub fn shutdown(&mut self) {
        if let Some(sender) = self.sender.take() {
            let _ = sender.send(AudioCommand::Shutdown);
        }
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.join() {
                log::warn!("Audio thread panicked: {:?}", e);
            }
        }
    }
}

impl Drop for AlertSound {
    fn drop(&mut self) {
        self.shutdown();
    }
}
