// SPDX-License-Identifier: MIT OR Apache-2.0
//! Value kinds carried by shader graph node outputs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Data type that can flow out of a shader graph node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    /// Single float
    Scalar,
    /// 2D vector
    Vec2,
    /// 3D vector
    Vec3,
    /// 4D vector
    Vec4,
    /// Color (RGBA). Four components, but matched separately from `Vec4`.
    Color,
    /// Resolution failure marker. Never a rule input.
    Invalid,
}

impl ValueType {
    /// Every type a node can actually produce
    pub const ALL_VALID: [ValueType; 5] = [
        ValueType::Scalar,
        ValueType::Vec2,
        ValueType::Vec3,
        ValueType::Vec4,
        ValueType::Color,
    ];

    /// Whether this is a real, producible type
    pub fn is_valid(self) -> bool {
        !matches!(self, Self::Invalid)
    }

    /// Number of float components
    pub fn component_count(self) -> usize {
        match self {
            Self::Scalar => 1,
            Self::Vec2 => 2,
            Self::Vec3 => 3,
            Self::Vec4 | Self::Color => 4,
            Self::Invalid => 0,
        }
    }

    /// Type name as exchanged with scene files and the shader source generator
    pub fn glsl_name(self) -> &'static str {
        match self {
            Self::Scalar => "float",
            Self::Vec2 => "vec2",
            Self::Vec3 => "vec3",
            Self::Vec4 => "vec4",
            Self::Color => "color",
            Self::Invalid => "invalid",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.glsl_name())
    }
}

impl FromStr for ValueType {
    type Err = ParseValueTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "float" => Ok(Self::Scalar),
            "vec2" => Ok(Self::Vec2),
            "vec3" => Ok(Self::Vec3),
            "vec4" => Ok(Self::Vec4),
            "color" => Ok(Self::Color),
            // Persisted failed resolutions load back as Invalid
            "invalid" => Ok(Self::Invalid),
            other => Err(ParseValueTypeError(other.to_string())),
        }
    }
}

/// Error when parsing a type name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown value type: {0:?}")]
pub struct ParseValueTypeError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_counts() {
        assert_eq!(ValueType::Scalar.component_count(), 1);
        assert_eq!(ValueType::Vec3.component_count(), 3);
        // Color is representationally a vec4
        assert_eq!(ValueType::Color.component_count(), ValueType::Vec4.component_count());
        assert_eq!(ValueType::Invalid.component_count(), 0);
    }

    #[test]
    fn test_glsl_names_parse_back() {
        for ty in ValueType::ALL_VALID {
            assert_eq!(ty.glsl_name().parse::<ValueType>(), Ok(ty));
        }
        assert_eq!("invalid".parse::<ValueType>(), Ok(ValueType::Invalid));
    }

    #[test]
    fn test_unknown_name() {
        let err = "mat4".parse::<ValueType>().unwrap_err();
        assert_eq!(err, ParseValueTypeError("mat4".to_string()));
        assert_eq!(err.to_string(), "Unknown value type: \"mat4\"");
    }

    #[test]
    fn test_invalid_is_not_valid() {
        assert!(!ValueType::Invalid.is_valid());
        assert!(ValueType::ALL_VALID.iter().all(|t| t.is_valid()));
    }
}
