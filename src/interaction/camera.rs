/// The externally owned camera, as seen by the engine.
///
/// Only the horizontal position matters to the layout core.
pub trait Camera {
    /// Current camera x.
    fn x(&self) -> f64;
    /// Move the camera to `x`.
    fn set_x(&mut self, x: f64);
}

/// Minimal camera holding just an x position.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CameraState {
    /// Horizontal position.
    pub x: f64,
}

impl CameraState {
    /// Camera at `x`.
    pub fn at(x: f64) -> Self {
        Self { x }
    }
}

impl Camera for CameraState {
    fn x(&self) -> f64 {
        self.x
    }

    fn set_x(&mut self, x: f64) {
        self.x = x;
    }
}

/// Request for the camera owner to re-center on `target_x`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct CameraRequest {
    /// Destination x.
    pub target_x: f64,
}
