pub mod noise;
pub mod player;

use log::warn;
use serde::{Deserialize, Serialize};

pub use noise::AmbientNoise;
pub use player::AmbientPlayer;

const FLOW_THRESHOLD: u8 = 80;
const LOW_FOCUS_THRESHOLD: u8 = 40;
const AMBIENT_VOLUME: f32 = 0.2;
const NORMAL_VOLUME: f32 = 0.5;

/// Audio collaborator commanded by the controller. All three commands are
/// idempotent; repeating one is a no-op on the player side.
pub trait AudioSink: Send + Sync {
    fn play(&self) -> Result<(), String>;
    fn pause(&self) -> Result<(), String>;
    fn set_volume(&self, volume: f32) -> Result<(), String>;
}

/// Which rule maps the published score to playback. Both rules were in
/// production at different times; the host picks one at construction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum AmbientPolicy {
    /// Play whenever enabled; duck the volume once the score crosses
    /// into flow.
    QuietDuringFlow,
    /// Play only while the score is low enough that the user likely
    /// needs help settling in.
    LowFocusOnly,
}

impl Default for AmbientPolicy {
    fn default() -> Self {
        AmbientPolicy::QuietDuringFlow
    }
}

/// What the sink should be doing right now.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientDirective {
    pub playing: bool,
    pub volume: f32,
}

impl AmbientPolicy {
    pub fn directive(&self, published: u8, enabled: bool) -> AmbientDirective {
        match self {
            AmbientPolicy::QuietDuringFlow => AmbientDirective {
                playing: enabled,
                volume: if published > FLOW_THRESHOLD {
                    AMBIENT_VOLUME
                } else {
                    NORMAL_VOLUME
                },
            },
            AmbientPolicy::LowFocusOnly => AmbientDirective {
                playing: enabled && published < LOW_FOCUS_THRESHOLD,
                volume: NORMAL_VOLUME,
            },
        }
    }
}

/// Drives the audio sink from the published score. Repeated updates with
/// an unchanged directive are swallowed here, so the sink only hears
/// actual transitions. Sink failures (e.g. no output device) are logged
/// and never touch the score pipeline.
pub struct AmbientController {
    policy: AmbientPolicy,
    sink: Box<dyn AudioSink>,
    last: Option<AmbientDirective>,
}

impl AmbientController {
    pub fn new(policy: AmbientPolicy, sink: Box<dyn AudioSink>) -> Self {
        Self {
            policy,
            sink,
            last: None,
        }
    }

    pub fn policy(&self) -> AmbientPolicy {
        self.policy
    }

    pub fn update(&mut self, published: u8, enabled: bool) {
        let directive = self.policy.directive(published, enabled);
        if self.last == Some(directive) {
            return;
        }

        let result = if directive.playing {
            self.sink
                .set_volume(directive.volume)
                .and_then(|_| self.sink.play())
        } else {
            self.sink.pause()
        };

        match result {
            Ok(()) => self.last = Some(directive),
            Err(err) => warn!("Ambient audio command failed: {err}"),
        }
    }
}
