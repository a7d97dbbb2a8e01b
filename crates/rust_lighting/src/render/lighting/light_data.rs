//! GPU-visible light parameter block
//!
//! `LightData` is uploaded verbatim into constant buffers and read by shader
//! code through byte offsets. Field order, sizes and alignment are a binary
//! contract with the shader-side `LightData` struct in [`LIGHT_DATA_GLSL`];
//! changing either side without the other is a breaking change.

use std::mem::{align_of, offset_of, size_of};

use bytemuck::{Pod, Zeroable};

/// Discriminant read by the shader-side light switch
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightType {
    /// Point light, optionally a sphere or tube emitter
    Point = 0,
    /// Directional light (like sunlight)
    Directional = 1,
    /// Point light restricted to a cone
    Spot = 2,
}

/// Discriminant reserved for area lights. Never produced by this crate.
pub const LIGHT_TYPE_AREA_RESERVED: u32 = 3;

impl LightType {
    /// Raw discriminant as stored in [`LightData::light_type`]
    pub const fn as_raw(self) -> u32 {
        self as u32
    }

    /// Decode a raw discriminant, `None` for unknown or reserved values
    pub const fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0 => Some(Self::Point),
            1 => Some(Self::Directional),
            2 => Some(Self::Spot),
            _ => None,
        }
    }

    /// Human readable name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Point => "Point",
            Self::Directional => "Directional",
            Self::Spot => "Spot",
        }
    }
}

/// Light parameters in shader layout (std140 compatible, 80 bytes)
#[repr(C, align(16))]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct LightData {
    /// World-space position (point/spot)
    pub pos_w: [f32; 3],
    /// Raw [`LightType`] discriminant
    pub light_type: u32,
    /// World-space direction (directional/spot)
    pub dir_w: [f32; 3],
    /// Distance at which point/spot attenuation reaches zero
    pub attenuation_radius: f32,
    /// Color premultiplied by intensity
    pub light_color: [f32; 3],
    /// Radius of the emitter, for sphere/tube approximations
    pub source_radius: f32,
    /// World-space up vector, orients tube lights
    pub up_w: [f32; 3],
    /// Length of the emitter, for tube approximations
    pub source_length: f32,
    /// Cosine of the spot inner cone angle
    pub cos_inner_angle: f32,
    /// Cosine of the spot outer cone angle
    pub cos_outer_angle: f32,
    /// `1 / (cos_inner_angle - cos_outer_angle)`, guarded against zero
    pub inv_cone_cos_range: f32,
    /// Padding to a 16-byte multiple
    pub _pad: f32,
}

/// Default attenuation radius for point and spot lights
pub const DEFAULT_ATTENUATION_RADIUS: f32 = 1000.0;

impl LightData {
    /// Size of one light record in bytes
    pub const SIZE: usize = size_of::<Self>();

    /// Byte view for blind uploads
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    /// Decoded light type, `None` if the raw field holds an unknown value
    pub const fn kind(&self) -> Option<LightType> {
        LightType::from_raw(self.light_type)
    }

    pub(crate) fn with_type(light_type: LightType) -> Self {
        Self {
            light_type: light_type.as_raw(),
            ..Self::default()
        }
    }
}

impl Default for LightData {
    fn default() -> Self {
        Self {
            pos_w: [0.0, 0.0, 0.0],
            light_type: LightType::Point.as_raw(),
            dir_w: [0.0, -1.0, 0.0],
            attenuation_radius: DEFAULT_ATTENUATION_RADIUS,
            light_color: [1.0, 1.0, 1.0],
            source_radius: 0.0,
            up_w: [0.0, 1.0, 0.0],
            source_length: 0.0,
            cos_inner_angle: 1.0,
            cos_outer_angle: 1.0,
            inv_cone_cos_range: 0.0,
            _pad: 0.0,
        }
    }
}

/// Byte size of a single light record, identical for every light type
pub const fn shader_struct_size() -> usize {
    LightData::SIZE
}

// Layout pins against the shader-side struct
const _: () = assert!(size_of::<LightData>() == 80);
const _: () = assert!(align_of::<LightData>() == 16);
const _: () = assert!(offset_of!(LightData, pos_w) == 0);
const _: () = assert!(offset_of!(LightData, light_type) == 12);
const _: () = assert!(offset_of!(LightData, dir_w) == 16);
const _: () = assert!(offset_of!(LightData, attenuation_radius) == 28);
const _: () = assert!(offset_of!(LightData, light_color) == 32);
const _: () = assert!(offset_of!(LightData, source_radius) == 44);
const _: () = assert!(offset_of!(LightData, up_w) == 48);
const _: () = assert!(offset_of!(LightData, source_length) == 60);
const _: () = assert!(offset_of!(LightData, cos_inner_angle) == 64);
const _: () = assert!(offset_of!(LightData, cos_outer_angle) == 68);
const _: () = assert!(offset_of!(LightData, inv_cone_cos_range) == 72);

/// Shader-side declaration matching [`LightData`]
pub const LIGHT_DATA_GLSL: &str = r"
#define LIGHT_POINT       0
#define LIGHT_DIRECTIONAL 1
#define LIGHT_SPOT        2

struct LightData {
    vec3  posW;
    uint  type;
    vec3  dirW;
    float attenuationRadius;
    vec3  lightColor;
    float sourceRadius;
    vec3  upW;
    float sourceLength;
    float cosInnerAngle;
    float cosOuterAngle;
    float invConeCosRange;
    float _pad;
};
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_light_data_size_and_alignment() {
        assert_eq!(LightData::SIZE, 80); // 5 * 16 bytes
        assert_eq!(shader_struct_size(), LightData::SIZE);
        assert_eq!(std::mem::align_of::<LightData>(), 16);
    }

    #[test]
    fn test_byte_view_matches_fields() {
        let mut data = LightData::with_type(LightType::Spot);
        data.pos_w = [1.0, 2.0, 3.0];
        data.attenuation_radius = 7.5;

        let bytes = data.as_bytes();
        assert_eq!(bytes.len(), 80);
        assert_eq!(&bytes[0..4], &1.0f32.to_ne_bytes());
        assert_eq!(&bytes[8..12], &3.0f32.to_ne_bytes());
        assert_eq!(&bytes[12..16], &2u32.to_ne_bytes());
        assert_eq!(&bytes[28..32], &7.5f32.to_ne_bytes());
    }

    #[test]
    fn test_light_type_discriminants() {
        for ty in [LightType::Point, LightType::Directional, LightType::Spot] {
            assert_eq!(LightType::from_raw(ty.as_raw()), Some(ty));
        }
        assert_eq!(LightType::from_raw(LIGHT_TYPE_AREA_RESERVED), None);
        assert_eq!(LightType::Spot.name(), "Spot");
        assert_eq!(LightData::default().kind(), Some(LightType::Point));
    }

    #[test]
    fn test_glsl_declaration_names_every_field() {
        for field in [
            "posW", "type", "dirW", "attenuationRadius", "lightColor", "sourceRadius",
            "upW", "sourceLength", "cosInnerAngle", "cosOuterAngle", "invConeCosRange",
        ] {
            assert!(LIGHT_DATA_GLSL.contains(field), "missing {field}");
        }
    }
}
