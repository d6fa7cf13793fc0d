//! Event-to-cue mapping and sound playback
//!
//! The mapping from tick outcomes to cues is platform-free; playback
//! goes through audio elements on the web build. Every cue is its own
//! element instance, so overlapping cues play on top of each other.
//! Audio is cosmetic: any playback failure is logged and swallowed.

use crate::controller::{LoopPhase, TickOutcome};
use crate::engine::SpecialEvent;
#[cfg(target_arch = "wasm32")]
use crate::settings::Settings;
#[cfg(target_arch = "wasm32")]
use web_sys::HtmlAudioElement;

/// One-shot sound cues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Ball bounced off a paddle
    PaddleHit,
    /// A life was lost; the round is about to restart
    Die,
    /// Ball bounced off the top or bottom edge
    EdgeHit,
    /// The match is over
    End,
}

/// The edge-hit cue is wired up but intentionally not played.
const EDGE_CUE_ENABLED: bool = false;

/// Map a tick's outcome to the cue to fire, if any.
///
/// A death while either player still has lives is the `Die` cue; the
/// final death is `End` instead.
pub fn cue_for(outcome: &TickOutcome) -> Option<Cue> {
    match outcome.event? {
        SpecialEvent::PaddleCollision => Some(Cue::PaddleHit),
        SpecialEvent::EdgeCollision => EDGE_CUE_ENABLED.then_some(Cue::EdgeHit),
        SpecialEvent::PlayerDie => {
            if outcome.phase == LoopPhase::Finished {
                Some(Cue::End)
            } else {
                Some(Cue::Die)
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl Cue {
    fn src(self) -> &'static str {
        match self {
            Cue::PaddleHit => "./music/paddle-hit.wav",
            Cue::Die => "./music/die.wav",
            Cue::EdgeHit => "./music/edge-hit.wav",
            Cue::End => "./music/end.wav",
        }
    }
}

/// Audio playback for one session: one looping background track plus
/// fire-and-forget cue instances.
#[cfg(target_arch = "wasm32")]
pub struct AudioBank {
    music: Option<HtmlAudioElement>,
    sfx_volume: f64,
}

#[cfg(target_arch = "wasm32")]
impl AudioBank {
    pub fn new(settings: &Settings) -> Self {
        let music = HtmlAudioElement::new_with_src("./music/bg.mp3").ok();
        if let Some(music) = &music {
            music.set_loop(true);
            music.set_volume(settings.effective_music_volume() as f64);
        } else {
            log::warn!("Failed to create background track - music disabled");
        }
        Self {
            music,
            sfx_volume: settings.effective_sfx_volume() as f64,
        }
    }

    /// Start or resume the looping background track.
    pub fn play_music(&self) {
        if let Some(music) = &self.music {
            if let Err(err) = music.play() {
                log::warn!("background music failed to start: {:?}", err);
            }
        }
    }

    /// Pause the background track; `play_music` picks it back up.
    pub fn pause_music(&self) {
        if let Some(music) = &self.music {
            let _ = music.pause();
        }
    }

    /// Fire one cue. A fresh element per call, so cues overlap freely.
    pub fn play(&self, cue: Cue) {
        match HtmlAudioElement::new_with_src(cue.src()) {
            Ok(el) => {
                el.set_volume(self.sfx_volume);
                if let Err(err) = el.play() {
                    log::warn!("cue {:?} failed to play: {:?}", cue, err);
                }
            }
            Err(err) => log::warn!("cue {:?} failed to load: {:?}", cue, err),
        }
    }
}
