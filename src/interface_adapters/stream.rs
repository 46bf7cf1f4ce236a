// Field-level NetStream implementations backed by wire DTOs.

use crate::domain::CodecError;
use crate::domain::ports::NetStream;
use crate::interface_adapters::protocol::{FieldDto, WireValue};
use glam::Vec3;

/// Resolution of the world compression profile, in meters.
pub const WORLD_QUANT_STEP: f32 = 1.0 / 128.0;
/// World coordinates are clamped to +/- this many meters before quantizing.
pub const WORLD_EXTENT: f32 = 4096.0;

/// Quantizes one world-space coordinate. Non-finite input encodes as the origin.
pub fn quantize_world(v: f32) -> i32 {
    if !v.is_finite() {
        return 0;
    }
    (v.clamp(-WORLD_EXTENT, WORLD_EXTENT) / WORLD_QUANT_STEP).round() as i32
}

pub fn dequantize_world(q: i32) -> f32 {
    (q as f32 * WORLD_QUANT_STEP).clamp(-WORLD_EXTENT, WORLD_EXTENT)
}

/// Sending side: records every field in call order.
#[derive(Debug, Default)]
pub struct FieldWriter {
    fields: Vec<FieldDto>,
}

impl FieldWriter {
    pub fn fields(&self) -> &[FieldDto] {
        &self.fields
    }

    pub fn into_fields(self) -> Vec<FieldDto> {
        self.fields
    }

    fn push(&mut self, name: &'static str, value: WireValue) {
        self.fields.push(FieldDto {
            name: name.to_string(),
            value,
        });
    }
}

impl NetStream for FieldWriter {
    fn is_reading(&self) -> bool {
        false
    }

    fn world_vec3(&mut self, name: &'static str, value: &mut Vec3) -> Result<(), CodecError> {
        self.push(
            name,
            WireValue::Vec3([
                quantize_world(value.x),
                quantize_world(value.y),
                quantize_world(value.z),
            ]),
        );
        Ok(())
    }

    fn value_f32(&mut self, name: &'static str, value: &mut f32) -> Result<(), CodecError> {
        self.push(name, WireValue::F32(*value));
        Ok(())
    }

    fn value_i8(&mut self, name: &'static str, value: &mut i32) -> Result<(), CodecError> {
        let narrow = i8::try_from(*value).map_err(|_| CodecError::OutOfRange {
            field: name,
            value: i64::from(*value),
        })?;
        self.push(name, WireValue::I8(i64::from(narrow)));
        Ok(())
    }

    fn value_bool(&mut self, name: &'static str, value: &mut bool) -> Result<(), CodecError> {
        self.push(name, WireValue::Bool(*value));
        Ok(())
    }
}

/// Receiving side: consumes fields strictly in the order the writer produced them.
#[derive(Debug)]
pub struct FieldReader {
    fields: std::vec::IntoIter<FieldDto>,
}

impl FieldReader {
    pub fn new(fields: Vec<FieldDto>) -> Self {
        Self {
            fields: fields.into_iter(),
        }
    }

    fn next(&mut self, name: &'static str) -> Result<WireValue, CodecError> {
        let field = self.fields.next().ok_or(CodecError::MissingField(name))?;
        if field.name != name {
            return Err(CodecError::malformed(
                name,
                format!("found field `{}` instead", field.name),
            ));
        }
        Ok(field.value)
    }
}

impl NetStream for FieldReader {
    fn is_reading(&self) -> bool {
        true
    }

    fn world_vec3(&mut self, name: &'static str, value: &mut Vec3) -> Result<(), CodecError> {
        match self.next(name)? {
            WireValue::Vec3([x, y, z]) => {
                *value = Vec3::new(
                    dequantize_world(x),
                    dequantize_world(y),
                    dequantize_world(z),
                );
                Ok(())
            }
            other => Err(CodecError::malformed(name, format!("expected Vec3, got {other:?}"))),
        }
    }

    fn value_f32(&mut self, name: &'static str, value: &mut f32) -> Result<(), CodecError> {
        match self.next(name)? {
            WireValue::F32(v) => {
                *value = v;
                Ok(())
            }
            other => Err(CodecError::malformed(name, format!("expected F32, got {other:?}"))),
        }
    }

    fn value_i8(&mut self, name: &'static str, value: &mut i32) -> Result<(), CodecError> {
        match self.next(name)? {
            WireValue::I8(v) => {
                let narrow = i8::try_from(v)
                    .map_err(|_| CodecError::malformed(name, format!("{v} exceeds i8")))?;
                *value = i32::from(narrow);
                Ok(())
            }
            other => Err(CodecError::malformed(name, format!("expected I8, got {other:?}"))),
        }
    }

    fn value_bool(&mut self, name: &'static str, value: &mut bool) -> Result<(), CodecError> {
        match self.next(name)? {
            WireValue::Bool(v) => {
                *value = v;
                Ok(())
            }
            other => Err(CodecError::malformed(name, format!("expected Bool, got {other:?}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_quantization_snaps_to_the_grid() {
        assert_eq!(quantize_world(1.0), 128);
        assert_eq!(dequantize_world(128), 1.0);
        // Half a step rounds away from zero.
        assert_eq!(quantize_world(WORLD_QUANT_STEP * 0.5), 1);
        assert_eq!(quantize_world(f32::NAN), 0);
    }

    #[test]
    fn world_quantization_clamps_to_the_extent() {
        assert_eq!(dequantize_world(quantize_world(10_000.0)), WORLD_EXTENT);
        assert_eq!(dequantize_world(quantize_world(-10_000.0)), -WORLD_EXTENT);
        assert_eq!(dequantize_world(i32::MAX), WORLD_EXTENT);
    }

    #[test]
    fn writer_rejects_integers_wider_than_i8() {
        let mut writer = FieldWriter::default();
        let err = writer
            .value_i8("nStance", &mut 200)
            .expect_err("200 does not fit i8");
        assert!(matches!(
            err,
            CodecError::OutOfRange {
                field: "nStance",
                value: 200
            }
        ));
        assert!(writer.fields().is_empty());
    }

    #[test]
    fn reader_rejects_wide_integers_as_malformed() {
        let mut reader = FieldReader::new(vec![FieldDto {
            name: "nStance".to_string(),
            value: WireValue::I8(-129),
        }]);
        let mut value = 3;
        let err = reader.value_i8("nStance", &mut value).expect_err("malformed");
        assert!(matches!(err, CodecError::MalformedAspectData { field: "nStance", .. }));
        assert_eq!(value, 3);
    }

    #[test]
    fn reader_enforces_field_order_and_presence() {
        let mut reader = FieldReader::new(vec![FieldDto {
            name: "bTarget".to_string(),
            value: WireValue::Bool(true),
        }]);
        let mut speed = 0.0;
        assert!(matches!(
            reader.value_f32("fdSpeed", &mut speed),
            Err(CodecError::MalformedAspectData { field: "fdSpeed", .. })
        ));
        let mut flag = false;
        assert!(matches!(
            reader.value_bool("bHide", &mut flag),
            Err(CodecError::MissingField("bHide"))
        ));
    }

    #[test]
    fn reader_rejects_mismatched_value_kinds() {
        let mut reader = FieldReader::new(vec![FieldDto {
            name: "fdSpeed".to_string(),
            value: WireValue::Bool(true),
        }]);
        let mut speed = 1.5;
        assert!(reader.value_f32("fdSpeed", &mut speed).is_err());
        assert_eq!(speed, 1.5);
    }
}
