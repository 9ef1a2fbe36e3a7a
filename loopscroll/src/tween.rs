use crate::Vec2;

/// Interpolates a normalized scroll position over time.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tween {
    pub from: Vec2,
    pub to: Vec2,
    pub start_ms: u64,
    pub duration_ms: u64,
    pub easing: Easing,
}

impl Tween {
    pub fn new(from: Vec2, to: Vec2, start_ms: u64, duration_ms: u64, easing: Easing) -> Self {
        Self {
            from,
            to,
            start_ms,
            duration_ms: duration_ms.max(1),
            easing,
        }
    }

    pub fn is_done(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.start_ms) >= self.duration_ms
    }

    pub fn sample(&self, now_ms: u64) -> Vec2 {
        let elapsed = now_ms.saturating_sub(self.start_ms);
        let t = (elapsed as f32 / self.duration_ms as f32).clamp(0.0, 1.0);
        self.from.lerp(self.to, self.easing.sample(t))
    }

    pub fn retarget(&mut self, now_ms: u64, new_to: Vec2, duration_ms: u64) {
        let cur = self.sample(now_ms);
        *self = Self::new(cur, new_to, now_ms, duration_ms, self.easing);
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    #[default]
    Linear,
    SmoothStep,
    EaseInOutCubic,
}

impl Easing {
    pub fn sample(self, t: f32) -> f32 {
        match self {
            Self::Linear => t,
            Self::SmoothStep => t * t * (3.0 - 2.0 * t),
            Self::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - (u * u * u) / 2.0
                }
            }
        }
    }
}

/// One advance of a [`SmoothScroll`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Step {
    pub position: Vec2,
    /// `true` when `position` is the exact target and the animation has ended.
    pub finished: bool,
}

/// Tick-driven smooth scroll state.
///
/// The host scheduler calls [`SmoothScroll::step`] once per frame. Cancelling moves straight
/// back to `Idle`; the last assigned position is left as is.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SmoothScroll {
    #[default]
    Idle,
    Animating(Tween),
}

impl SmoothScroll {
    pub fn is_animating(&self) -> bool {
        matches!(self, Self::Animating(_))
    }

    pub fn tween(&self) -> Option<&Tween> {
        match self {
            Self::Idle => None,
            Self::Animating(tween) => Some(tween),
        }
    }

    /// Starts a new animation, replacing any animation in flight.
    pub fn start(&mut self, tween: Tween) {
        *self = Self::Animating(tween);
    }

    pub fn cancel(&mut self) -> bool {
        let was_animating = self.is_animating();
        *self = Self::Idle;
        was_animating
    }

    /// Advances to `now_ms`. Returns `None` when idle.
    ///
    /// Once the duration has elapsed the exact target is returned and the state goes idle.
    pub fn step(&mut self, now_ms: u64) -> Option<Step> {
        let Self::Animating(tween) = *self else {
            return None;
        };
        if tween.is_done(now_ms) {
            *self = Self::Idle;
            return Some(Step {
                position: tween.to,
                finished: true,
            });
        }
        Some(Step {
            position: tween.sample(now_ms),
            finished: false,
        })
    }
}
