//! Animatable visual properties
//!
//! A [`Visual`] is a sparse bag of presentation properties. Tweens
//! interpolate between two of them; the tree merges the result into an
//! element's current state. Unset fields mean "leave as is", which is what
//! lets a tween animate opacity without clobbering an element's translation.

/// Properties that can be animated on an element
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Visual {
    /// Opacity (0.0 to 1.0)
    pub opacity: Option<f32>,
    /// Translation X in pixels
    pub x: Option<f32>,
    /// Translation Y in pixels
    pub y: Option<f32>,
    /// Scale X factor
    pub scale_x: Option<f32>,
    /// Scale Y factor
    pub scale_y: Option<f32>,
    /// Rotation in degrees (Z-axis)
    pub rotation: Option<f32>,
    /// Rotation Y in degrees (3D turn)
    pub rotation_y: Option<f32>,
    /// Width as a percentage of the parent (progress bars)
    pub width_pct: Option<f32>,
    /// Height in pixels (expanding panels)
    pub height: Option<f32>,
    /// Blur radius in pixels
    pub blur: Option<f32>,
    /// Stroke dash offset (progress rings)
    pub dash_offset: Option<f32>,
    /// Clip-path inset [top%, right%, bottom%, left%]
    pub clip_inset: Option<[f32; 4]>,
}

impl Visual {
    /// Create properties with only opacity set
    pub fn opacity(value: f32) -> Self {
        Self {
            opacity: Some(value),
            ..Default::default()
        }
    }

    /// Create properties with uniform scale
    pub fn scale(value: f32) -> Self {
        Self {
            scale_x: Some(value),
            scale_y: Some(value),
            ..Default::default()
        }
    }

    /// Create properties with translation
    pub fn translate(x: f32, y: f32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Default::default()
        }
    }

    /// Create properties with rotation
    pub fn rotation(degrees: f32) -> Self {
        Self {
            rotation: Some(degrees),
            ..Default::default()
        }
    }

    /// Builder: set opacity
    pub fn with_opacity(mut self, value: f32) -> Self {
        self.opacity = Some(value);
        self
    }

    /// Builder: set translation X
    pub fn with_x(mut self, px: f32) -> Self {
        self.x = Some(px);
        self
    }

    /// Builder: set translation Y
    pub fn with_y(mut self, px: f32) -> Self {
        self.y = Some(px);
        self
    }

    /// Builder: set uniform scale
    pub fn with_scale(mut self, value: f32) -> Self {
        self.scale_x = Some(value);
        self.scale_y = Some(value);
        self
    }

    /// Builder: set rotation
    pub fn with_rotation(mut self, degrees: f32) -> Self {
        self.rotation = Some(degrees);
        self
    }

    /// Builder: set Y rotation (3D turn)
    pub fn with_rotation_y(mut self, degrees: f32) -> Self {
        self.rotation_y = Some(degrees);
        self
    }

    /// Builder: set width percentage
    pub fn with_width_pct(mut self, pct: f32) -> Self {
        self.width_pct = Some(pct);
        self
    }

    /// Builder: set height in pixels
    pub fn with_height(mut self, px: f32) -> Self {
        self.height = Some(px);
        self
    }

    /// Builder: set blur radius
    pub fn with_blur(mut self, px: f32) -> Self {
        self.blur = Some(px);
        self
    }

    /// Builder: set stroke dash offset
    pub fn with_dash_offset(mut self, value: f32) -> Self {
        self.dash_offset = Some(value);
        self
    }

    /// Builder: set clip-path inset
    pub fn with_clip_inset(mut self, inset: [f32; 4]) -> Self {
        self.clip_inset = Some(inset);
        self
    }

    /// Interpolate between two property sets
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            opacity: lerp_opt(self.opacity, other.opacity, t),
            x: lerp_opt(self.x, other.x, t),
            y: lerp_opt(self.y, other.y, t),
            scale_x: lerp_opt(self.scale_x, other.scale_x, t),
            scale_y: lerp_opt(self.scale_y, other.scale_y, t),
            rotation: lerp_opt(self.rotation, other.rotation, t),
            rotation_y: lerp_opt(self.rotation_y, other.rotation_y, t),
            width_pct: lerp_opt(self.width_pct, other.width_pct, t),
            height: lerp_opt(self.height, other.height, t),
            blur: lerp_opt(self.blur, other.blur, t),
            dash_offset: lerp_opt(self.dash_offset, other.dash_offset, t),
            clip_inset: lerp_opt_array4(self.clip_inset, other.clip_inset, t),
        }
    }

    /// Overwrite the fields `patch` sets, leaving the rest untouched
    pub fn merge(&mut self, patch: &Self) {
        merge_opt(&mut self.opacity, patch.opacity);
        merge_opt(&mut self.x, patch.x);
        merge_opt(&mut self.y, patch.y);
        merge_opt(&mut self.scale_x, patch.scale_x);
        merge_opt(&mut self.scale_y, patch.scale_y);
        merge_opt(&mut self.rotation, patch.rotation);
        merge_opt(&mut self.rotation_y, patch.rotation_y);
        merge_opt(&mut self.width_pct, patch.width_pct);
        merge_opt(&mut self.height, patch.height);
        merge_opt(&mut self.blur, patch.blur);
        merge_opt(&mut self.dash_offset, patch.dash_offset);
        merge_opt(&mut self.clip_inset, patch.clip_inset);
    }

    /// Resolve concrete start values for the fields `target` animates
    ///
    /// A tween toward `target` interpolates only the fields `target` sets.
    /// For each of those, the start value is this visual's current value, or
    /// the field's resting default when it was never touched. Fields `target`
    /// leaves unset stay unset, so the tween cannot clobber them.
    pub fn baseline(&self, target: &Self) -> Self {
        Self {
            opacity: target.opacity.map(|_| self.resolved_opacity()),
            x: target.x.map(|_| self.x.unwrap_or(0.0)),
            y: target.y.map(|_| self.y.unwrap_or(0.0)),
            scale_x: target.scale_x.map(|_| self.scale_x.unwrap_or(1.0)),
            scale_y: target.scale_y.map(|_| self.scale_y.unwrap_or(1.0)),
            rotation: target.rotation.map(|_| self.resolved_rotation()),
            rotation_y: target.rotation_y.map(|_| self.rotation_y.unwrap_or(0.0)),
            width_pct: target.width_pct.map(|_| self.resolved_width_pct()),
            height: target.height.map(|_| self.resolved_height()),
            blur: target.blur.map(|_| self.blur.unwrap_or(0.0)),
            dash_offset: target.dash_offset.map(|_| self.resolved_dash_offset()),
            clip_inset: target
                .clip_inset
                .map(|_| self.clip_inset.unwrap_or([0.0; 4])),
        }
    }

    /// Get the resolved opacity (defaults to 1.0 if not set)
    pub fn resolved_opacity(&self) -> f32 {
        self.opacity.unwrap_or(1.0)
    }

    /// Get the resolved scale (defaults to 1.0 if not set)
    pub fn resolved_scale(&self) -> (f32, f32) {
        (self.scale_x.unwrap_or(1.0), self.scale_y.unwrap_or(1.0))
    }

    /// Get the resolved translation (defaults to 0.0 if not set)
    pub fn resolved_translate(&self) -> (f32, f32) {
        (self.x.unwrap_or(0.0), self.y.unwrap_or(0.0))
    }

    /// Get the resolved rotation (defaults to 0.0 if not set)
    pub fn resolved_rotation(&self) -> f32 {
        self.rotation.unwrap_or(0.0)
    }

    /// Get the resolved height (defaults to 0.0 if not set)
    pub fn resolved_height(&self) -> f32 {
        self.height.unwrap_or(0.0)
    }

    /// Get the resolved width percentage (defaults to 0.0 if not set)
    pub fn resolved_width_pct(&self) -> f32 {
        self.width_pct.unwrap_or(0.0)
    }

    /// Get the resolved dash offset (defaults to 0.0 if not set)
    pub fn resolved_dash_offset(&self) -> f32 {
        self.dash_offset.unwrap_or(0.0)
    }
}

/// Helper to interpolate optional values
fn lerp_opt(a: Option<f32>, b: Option<f32>, t: f32) -> Option<f32> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a + (b - a) * t),
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(b),
        (None, None) => None,
    }
}

/// Helper to interpolate optional [f32; 4] arrays
fn lerp_opt_array4(a: Option<[f32; 4]>, b: Option<[f32; 4]>, t: f32) -> Option<[f32; 4]> {
    match (a, b) {
        (Some(a), Some(b)) => Some([
            a[0] + (b[0] - a[0]) * t,
            a[1] + (b[1] - a[1]) * t,
            a[2] + (b[2] - a[2]) * t,
            a[3] + (b[3] - a[3]) * t,
        ]),
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(b),
        (None, None) => None,
    }
}

fn merge_opt<T: Copy>(slot: &mut Option<T>, patch: Option<T>) {
    if patch.is_some() {
        *slot = patch;
    }
}
