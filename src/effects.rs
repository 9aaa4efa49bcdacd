//! Audio/visual feedback for an impact.
//!
//! The simulator does not render anything itself. It hands an
//! [`EffectPlan`] to an [`ImpactEffects`] implementation supplied by the
//! host, which plays the cues however it can:
//! - Explosion and rumble sounds (rumble cut off after a few seconds)
//! - Explosion and falling-rock sprites anchored near the impact point
//! - Screen shake

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::types::LatLng;

/// Sound effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sound {
    Explosion,
    Rumble,
}

/// Sprite effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sprite {
    Explosion,
    Falling,
}

/// One cue in an effect plan.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EffectCue {
    /// Restart `sound` from the beginning; stop after `stop_after` if set.
    Sound {
        sound: Sound,
        stop_after: Option<Duration>,
    },
    /// Show `sprite` at the impact's screen point plus `offset_px` for `duration`.
    Sprite {
        sprite: Sprite,
        offset_px: (f32, f32),
        duration: Duration,
    },
    /// Shake the whole view for `duration`.
    Shake { duration: Duration },
}

/// Ordered list of cues played for one impact.
#[derive(Clone, Debug, PartialEq)]
pub struct EffectPlan {
    pub cues: Vec<EffectCue>,
}

impl EffectPlan {
    /// Cue set played for every impact.
    pub fn standard() -> Self {
        Self {
            cues: vec![
                EffectCue::Sound {
                    sound: Sound::Explosion,
                    stop_after: None,
                },
                EffectCue::Sound {
                    sound: Sound::Rumble,
                    stop_after: Some(Duration::from_millis(4000)),
                },
                EffectCue::Sprite {
                    sprite: Sprite::Explosion,
                    offset_px: (-40.0, -40.0),
                    duration: Duration::from_millis(1500),
                },
                EffectCue::Sprite {
                    sprite: Sprite::Falling,
                    offset_px: (-20.0, -200.0),
                    duration: Duration::from_millis(1000),
                },
                EffectCue::Shake {
                    duration: Duration::from_millis(700),
                },
            ],
        }
    }

    /// Longest-running cue, i.e. when the host can consider effects finished.
    pub fn total_duration(&self) -> Duration {
        self.cues
            .iter()
            .filter_map(|cue| match cue {
                EffectCue::Sound { stop_after, .. } => *stop_after,
                EffectCue::Sprite { duration, .. } | EffectCue::Shake { duration } => {
                    Some(*duration)
                }
            })
            .max()
            .unwrap_or_default()
    }
}

/// Reason a single cue could not be played.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{cue} blocked: {reason}")]
pub struct EffectError {
    pub cue: String,
    pub reason: String,
}

/// Host-side effect player.
pub trait ImpactEffects {
    /// Play one cue for an impact at `at`.
    fn play_cue(&mut self, at: LatLng, cue: &EffectCue) -> Result<(), EffectError>;

    /// Play every cue in `plan`. A failed cue is logged and skipped.
    fn play(&mut self, at: LatLng, plan: &EffectPlan) {
        for cue in &plan.cues {
            if let Err(err) = self.play_cue(at, cue) {
                warn!("Impact effect skipped: {err}");
            }
        }
    }
}

impl<T: ImpactEffects + ?Sized> ImpactEffects for Box<T> {
    fn play_cue(&mut self, at: LatLng, cue: &EffectCue) -> Result<(), EffectError> {
        (**self).play_cue(at, cue)
    }
}

/// Logs each cue instead of playing it.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingEffects;

impl ImpactEffects for TracingEffects {
    fn play_cue(&mut self, at: LatLng, cue: &EffectCue) -> Result<(), EffectError> {
        match cue {
            EffectCue::Sound { sound, stop_after } => {
                info!("Play {:?} sound at {} (stop after {:?})", sound, at.display(), stop_after);
            }
            EffectCue::Sprite {
                sprite,
                offset_px,
                duration,
            } => {
                debug!(
                    "Show {:?} sprite at {} offset {:?} for {:?}",
                    sprite,
                    at.display(),
                    offset_px,
                    duration
                );
            }
            EffectCue::Shake { duration } => debug!("Shake view for {:?}", duration),
        }
        Ok(())
    }
}

/// Ignores all cues.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoEffects;

impl ImpactEffects for NoEffects {
    fn play_cue(&mut self, _at: LatLng, _cue: &EffectCue) -> Result<(), EffectError> {
        Ok(())
    }
}
