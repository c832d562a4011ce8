//! Style snapshot — interface between the choreographer and the render target.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Visual properties a segment can animate.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VisualProperty {
    Opacity,
    TranslateX,
    TranslateY,
    /// Rotation around the horizontal axis in degrees (card flips).
    RotateX,
    /// In-plane rotation in degrees.
    Rotate,
    Scale,
    /// Fill fraction of a reveal mask (0 = hidden, 1 = fully revealed).
    Reveal,
}

impl VisualProperty {
    pub const ALL: [Self; 7] = [
        Self::Opacity,
        Self::TranslateX,
        Self::TranslateY,
        Self::RotateX,
        Self::Rotate,
        Self::Scale,
        Self::Reveal,
    ];

    /// Value a property takes when nothing animates it.
    pub fn rest_value(self) -> f32 {
        match self {
            Self::Opacity | Self::Scale | Self::Reveal => 1.0,
            Self::TranslateX | Self::TranslateY | Self::RotateX | Self::Rotate => 0.0,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Opacity => "opacity",
            Self::TranslateX => "translateX",
            Self::TranslateY => "translateY",
            Self::RotateX => "rotateX",
            Self::Rotate => "rotate",
            Self::Scale => "scale",
            Self::Reveal => "reveal",
        }
    }
}

impl fmt::Display for VisualProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Resolved visual state of one element at one progress value.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleSnapshot {
    /// Opacity (0..1).
    pub opacity: f32,
    /// Horizontal offset in pixels.
    pub translate_x: f32,
    /// Vertical offset in pixels.
    pub translate_y: f32,
    /// Rotation around the X axis in degrees.
    pub rotate_x: f32,
    /// In-plane rotation in degrees.
    pub rotate: f32,
    /// Uniform scale (1.0 = original size).
    pub scale: f32,
    /// Reveal mask fill (0..1).
    pub reveal: f32,
}

impl Default for StyleSnapshot {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            translate_x: 0.0,
            translate_y: 0.0,
            rotate_x: 0.0,
            rotate: 0.0,
            scale: 1.0,
            reveal: 1.0,
        }
    }
}

impl StyleSnapshot {
    pub fn get(&self, property: VisualProperty) -> f32 {
        match property {
            VisualProperty::Opacity => self.opacity,
            VisualProperty::TranslateX => self.translate_x,
            VisualProperty::TranslateY => self.translate_y,
            VisualProperty::RotateX => self.rotate_x,
            VisualProperty::Rotate => self.rotate,
            VisualProperty::Scale => self.scale,
            VisualProperty::Reveal => self.reveal,
        }
    }

    pub fn set(&mut self, property: VisualProperty, value: f32) {
        match property {
            VisualProperty::Opacity => self.opacity = value,
            VisualProperty::TranslateX => self.translate_x = value,
            VisualProperty::TranslateY => self.translate_y = value,
            VisualProperty::RotateX => self.rotate_x = value,
            VisualProperty::Rotate => self.rotate = value,
            VisualProperty::Scale => self.scale = value,
            VisualProperty::Reveal => self.reveal = value,
        }
    }

    /// Builder-style variant of [`set`](Self::set).
    pub fn with(mut self, property: VisualProperty, value: f32) -> Self {
        self.set(property, value);
        self
    }

    /// Whether the element would draw anything at all.
    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0 && self.scale != 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_snapshot_matches_rest_values() {
        let s = StyleSnapshot::default();
        for property in VisualProperty::ALL {
            assert_eq!(s.get(property), property.rest_value(), "{property}");
        }
    }

    #[test]
    fn set_and_get_each_property() {
        let mut s = StyleSnapshot::default();
        for (i, property) in VisualProperty::ALL.into_iter().enumerate() {
            s.set(property, i as f32 * 10.0);
        }
        for (i, property) in VisualProperty::ALL.into_iter().enumerate() {
            assert_eq!(s.get(property), i as f32 * 10.0);
        }
    }

    #[test]
    fn transparent_is_not_visible() {
        let s = StyleSnapshot::default().with(VisualProperty::Opacity, 0.0);
        assert!(!s.is_visible());
        assert!(StyleSnapshot::default().is_visible());
    }

    #[test]
    fn property_serializes_camel_case() {
        let json = serde_json::to_string(&VisualProperty::TranslateY).expect("serialize");
        assert_eq!(json, "\"translateY\"");
    }
}
