use rodio::{OutputStream, Sink};
use std::sync::{
    mpsc::{self, Sender},
    Arc, Mutex,
};
use std::thread;

use super::noise::AmbientNoise;
use super::AudioSink;

enum AudioCommand {
    Play,
    Pause,
    SetVolume(f32),
    Stop,
}

/// Built-in ambient player. The output stream and sink are not Send, so
/// a dedicated thread owns them and takes commands over a channel. The
/// noise source is appended once, on the first play.
pub struct AmbientPlayer {
    tx: Arc<Mutex<Option<Sender<AudioCommand>>>>,
}

impl AmbientPlayer {
    pub fn new() -> Self {
        Self {
            tx: Arc::new(Mutex::new(None)),
        }
    }

    fn ensure_thread(&self) -> Result<Sender<AudioCommand>, String> {
        if let Some(tx) = self.tx.lock().map_err(|e| e.to_string())?.as_ref() {
            return Ok(tx.clone());
        }

        let (tx, rx) = mpsc::channel::<AudioCommand>();

        thread::Builder::new()
            .name("mindsync-audio".to_string())
            .spawn(move || {
                let mut _stream: Option<OutputStream> = None;
                let mut sink: Option<Sink> = None;

                fn ensure_sink(
                    stream: &mut Option<OutputStream>,
                    sink: &mut Option<Sink>,
                ) -> Result<(), String> {
                    if sink.is_none() {
                        let (s, handle) = OutputStream::try_default()
                            .map_err(|e| format!("Failed to create audio output stream: {}", e))?;
                        let new_sink = Sink::try_new(&handle)
                            .map_err(|e| format!("Failed to create audio sink: {}", e))?;
                        new_sink.pause();
                        new_sink.append(AmbientNoise::new());
                        *stream = Some(s);
                        *sink = Some(new_sink);
                    }
                    Ok(())
                }

                while let Ok(cmd) = rx.recv() {
                    match cmd {
                        AudioCommand::Play => {
                            if let Err(err) = ensure_sink(&mut _stream, &mut sink) {
                                log::warn!("Ambient playback unavailable: {err}");
                                continue;
                            }
                            if let Some(ref s) = sink {
                                s.play();
                            }
                        }
                        AudioCommand::Pause => {
                            if let Some(ref s) = sink {
                                s.pause();
                            }
                        }
                        AudioCommand::SetVolume(v) => {
                            if let Some(ref s) = sink {
                                s.set_volume(v.clamp(0.0, 1.0));
                            }
                        }
                        AudioCommand::Stop => {
                            if let Some(s_old) = sink.take() {
                                s_old.stop();
                            }
                            _stream = None;
                            break;
                        }
                    }
                }
            })
            .map_err(|e| e.to_string())?;

        let tx_clone = tx.clone();
        *self.tx.lock().map_err(|e| e.to_string())? = Some(tx);
        Ok(tx_clone)
    }

    pub fn stop(&self) {
        if let Ok(mut guard) = self.tx.lock() {
            if let Some(tx) = guard.take() {
                let _ = tx.send(AudioCommand::Stop);
            }
        }
    }
}

impl Default for AmbientPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioSink for AmbientPlayer {
    fn play(&self) -> Result<(), String> {
        let tx = self.ensure_thread()?;
        tx.send(AudioCommand::Play).map_err(|e| e.to_string())
    }

    fn pause(&self) -> Result<(), String> {
        // Nothing to pause until the thread exists.
        let guard = self.tx.lock().map_err(|e| e.to_string())?;
        if let Some(tx) = guard.as_ref() {
            tx.send(AudioCommand::Pause).map_err(|e| e.to_string())?;
        }
        Ok(())
    }

    fn set_volume(&self, volume: f32) -> Result<(), String> {
        let tx = self.ensure_thread()?;
        tx.send(AudioCommand::SetVolume(volume))
            .map_err(|e| e.to_string())
    }
}
