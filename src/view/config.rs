/// Tunables for one [`View`](super::View).
///
/// `width`/`height` only size the ray fan and the vertical span range;
/// no pixel buffer is involved.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewConfig {
    pub width: u32,
    pub height: u32,
    /// map cells per move while walking
    pub walk_speed: f64,
    /// map cells per move while sprinting
    pub sprint_speed: f64,
    /// radians per look step
    pub rot_speed: f64,
    /// camera-plane half-width; 0.66 ≈ 66° horizontal FoV
    pub plane_len: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            walk_speed: 0.1,
            sprint_speed: 0.2,
            rot_speed: 0.075,
            plane_len: 0.66,
        }
    }
}

impl ViewConfig {
    pub fn with_viewport(self, width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..self
        }
    }

    /// First field a viewer cannot move or turn with: negative or
    /// non-finite speeds, or a non-finite plane length.
    pub fn invalid_field(&self) -> Option<&'static str> {
        let speeds = [
            ("walk_speed", self.walk_speed),
            ("sprint_speed", self.sprint_speed),
            ("rot_speed", self.rot_speed),
        ];
        speeds
            .into_iter()
            .find(|&(_, v)| !v.is_finite() || v < 0.0)
            .map(|(name, _)| name)
            .or_else(|| (!self.plane_len.is_finite()).then_some("plane_len"))
    }
}
