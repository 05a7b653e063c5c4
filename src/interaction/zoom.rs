use crate::{
    foundation::error::{TimelineError, TimelineResult},
    foundation::math::zoom_scale,
    interaction::camera::Camera,
};

/// Snapshot of the zoom animation, shared with layout and selection.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ZoomAnimationState {
    /// Progress in `[0, 1]`.
    pub progress: f64,
    /// Fixed point of the zoom transform while zoomed or zooming.
    pub zoom_origin_x: Option<f64>,
    /// Whether progress is still moving toward the target.
    pub is_zooming: bool,
}

/// Result of one [`ZoomAnimator::step`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomStep {
    /// Progress after the step.
    pub progress: f64,
    /// Whether progress changed this frame.
    pub moved: bool,
    /// Whether the animation reached its target this frame.
    pub settled: bool,
}

/// Per-frame integrator that walks zoom progress toward a target.
///
/// The first frame that finds progress away from target while no origin is
/// held captures the camera x as the zoom origin. The origin survives target
/// changes and is only released once progress settles back at 0.
#[derive(Clone, Debug)]
pub struct ZoomAnimator {
    target: f64,
    progress: f64,
    origin_x: Option<f64>,
    multiplier: f64,
    speed: f64,
    epsilon: f64,
}

impl ZoomAnimator {
    /// Speed used when none is configured.
    pub const DEFAULT_SPEED: f64 = 5.0;
    /// Settling threshold used when none is configured.
    pub const DEFAULT_EPSILON: f64 = 0.001;

    /// New animator at rest, fully zoomed out.
    pub fn new(multiplier: f64, speed: f64, epsilon: f64) -> TimelineResult<Self> {
        if !multiplier.is_finite() || multiplier < 1.0 {
            return Err(TimelineError::validation(
                "zoom_multiplier must be finite and >= 1",
            ));
        }
        if !speed.is_finite() || speed <= 0.0 {
            return Err(TimelineError::validation("zoom_speed must be finite and > 0"));
        }
        if !epsilon.is_finite() || epsilon <= 0.0 || epsilon >= 1.0 {
            return Err(TimelineError::validation(
                "zoom_epsilon must be in (0, 1)",
            ));
        }
        Ok(Self {
            target: 0.0,
            progress: 0.0,
            origin_x: None,
            multiplier,
            speed,
            epsilon,
        })
    }

    /// Set the progress to walk toward, clamped to `[0, 1]`.
    ///
    /// Changing the target mid-flight simply redirects the animation.
    pub fn set_target(&mut self, target: f64) {
        self.target = if target.is_finite() {
            target.clamp(0.0, 1.0)
        } else {
            0.0
        };
    }

    /// Current target.
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Current progress.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Held zoom origin.
    pub fn origin_x(&self) -> Option<f64> {
        self.origin_x
    }

    /// Scale reached at progress 1.
    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// Current scale factor, `1 + (multiplier - 1) * progress`.
    pub fn scale(&self) -> f64 {
        zoom_scale(self.multiplier, self.progress)
    }

    /// Whether progress is still away from target.
    pub fn is_zooming(&self) -> bool {
        (self.target - self.progress).abs() > self.epsilon
    }

    /// Shareable snapshot.
    pub fn state(&self) -> ZoomAnimationState {
        ZoomAnimationState {
            progress: self.progress,
            zoom_origin_x: self.origin_x,
            is_zooming: self.is_zooming(),
        }
    }

    /// Advance by `dt` seconds, rescaling the camera about the origin so the
    /// anchored point stays put on screen.
    pub fn step(&mut self, dt: f64, camera: &mut impl Camera) -> ZoomStep {
        let diff = self.target - self.progress;
        if diff.abs() <= self.epsilon {
            let moved = self.progress != self.target;
            if moved {
                if self.origin_x.is_none() && self.target > 0.0 {
                    self.origin_x = Some(camera.x());
                }
                self.rescale_camera(self.scale(), zoom_scale(self.multiplier, self.target), camera);
                self.progress = self.target;
            }
            self.release_origin_at_rest();
            return ZoomStep {
                progress: self.progress,
                moved,
                settled: moved,
            };
        }

        if self.origin_x.is_none() {
            let origin = camera.x();
            tracing::debug!(origin, target = self.target, "zoom animation anchored");
            self.origin_x = Some(origin);
        }

        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        // a step factor above 1 would carry progress past the target
        let factor = (dt * self.speed).min(1.0);

        let old_scale = self.scale();
        let mut next = (self.progress + diff * factor).clamp(0.0, 1.0);
        let settled = (self.target - next).abs() <= self.epsilon;
        if settled {
            next = self.target;
        }
        let new_scale = zoom_scale(self.multiplier, next);

        self.rescale_camera(old_scale, new_scale, camera);
        let moved = next != self.progress;
        self.progress = next;

        if settled {
            tracing::debug!(progress = self.progress, "zoom animation settled");
            self.release_origin_at_rest();
        }

        ZoomStep {
            progress: self.progress,
            moved,
            settled,
        }
    }

    fn rescale_camera(&self, old_scale: f64, new_scale: f64, camera: &mut impl Camera) {
        let Some(origin) = self.origin_x else {
            return;
        };
        debug_assert!(old_scale > 0.0, "zoom scale must stay positive");
        let ratio = new_scale / old_scale.max(f64::EPSILON);
        let x = camera.x();
        camera.set_x(origin + (x - origin) * ratio);
    }

    fn release_origin_at_rest(&mut self) {
        if self.target == 0.0 && self.progress == 0.0 {
            self.origin_x = None;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/zoom.rs"]
mod tests;
