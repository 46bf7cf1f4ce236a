// Wire protocol DTOs for per-aspect actor records.
// One packet carries one aspect of one actor for one tick.

use crate::domain::ports::ActorBase;
use crate::domain::{Aspect, CodecError};
use crate::interface_adapters::stream::{FieldReader, FieldWriter};
use crate::use_cases::Alien;
use serde::{Deserialize, Serialize};

/// A single named field value as it travels on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum WireValue {
    // Quantized world-space point (see `stream::WORLD_QUANT_STEP`).
    Vec3([i32; 3]),
    F32(f32),
    // Kept wide on the wire so out-of-range values reach validation.
    I8(i64),
    Bool(bool),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDto {
    pub name: String,
    pub value: WireValue,
}

/// One aspect record for one actor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectPacketDto {
    pub entity_id: u64,
    pub tick: u64,
    pub aspect: u8,
    #[serde(default)]
    pub fields: Vec<FieldDto>,
}

pub fn encode_packet(packet: &AspectPacketDto) -> Result<String, CodecError> {
    Ok(serde_json::to_string(packet)?)
}

pub fn decode_packet(text: &str) -> Result<AspectPacketDto, CodecError> {
    Ok(serde_json::from_str(text)?)
}

/// Serializes one aspect of `alien` into a packet.
/// Returns `None` when the base actor vetoed the aspect.
pub fn write_aspect(
    alien: &mut Alien,
    base: &mut dyn ActorBase,
    entity_id: u64,
    tick: u64,
    aspect: Aspect,
) -> Result<Option<AspectPacketDto>, CodecError> {
    let mut writer = FieldWriter::default();
    if !alien.net_serialize(base, &mut writer, aspect)? {
        return Ok(None);
    }

    Ok(Some(AspectPacketDto {
        entity_id,
        tick,
        aspect: aspect.tag(),
        fields: writer.into_fields(),
    }))
}

/// Applies a received packet to `alien`.
/// Returns the aspect that was applied, or `None` for unknown tags and vetoed aspects.
pub fn apply_packet(
    alien: &mut Alien,
    base: &mut dyn ActorBase,
    packet: AspectPacketDto,
) -> Result<Option<Aspect>, CodecError> {
    let Some(aspect) = Aspect::from_tag(packet.aspect) else {
        return Ok(None);
    };

    let mut reader = FieldReader::new(packet.fields);
    if alien.net_serialize(base, &mut reader, aspect)? {
        Ok(Some(aspect))
    } else {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packet_json_uses_tagged_field_values() {
        let packet = AspectPacketDto {
            entity_id: 7,
            tick: 12,
            aspect: Aspect::Hide.tag(),
            fields: vec![FieldDto {
                name: "bHide".to_string(),
                value: WireValue::Bool(true),
            }],
        };

        let text = encode_packet(&packet).expect("packet should encode");
        let json: serde_json::Value = serde_json::from_str(&text).expect("valid json");
        assert_eq!(json["aspect"], 2);
        assert_eq!(json["fields"][0]["value"]["type"], "Bool");
        assert_eq!(json["fields"][0]["value"]["data"], true);

        assert_eq!(decode_packet(&text).expect("packet should decode"), packet);
    }

    #[test]
    fn garbage_text_is_a_framing_error() {
        let err = decode_packet("{not json").expect_err("should fail");
        assert!(matches!(err, CodecError::Packet(_)));
    }

    #[test]
    fn missing_field_list_decodes_as_empty() {
        let packet = decode_packet(r#"{"entity_id":1,"tick":2,"aspect":9}"#)
            .expect("packet should decode");
        assert!(packet.fields.is_empty());
    }
}
