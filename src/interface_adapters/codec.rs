// Per-aspect field layout. Each function is shared by the read and write paths.

use crate::domain::ports::NetStream;
use crate::domain::{ActorMovementSnapshot, CodecError, Stance};

/// ALIVE aspect: movement, aim and look targets plus speed, stance and aim flag.
///
/// `fire_target` stays local to each side and is not part of the record. On read the
/// speed must be non-negative and the stance must name a `Stance` member; callers decode into a scratch copy so a rejected
/// record never reaches the live snapshot.
pub fn serialize_alive(
    stream: &mut dyn NetStream,
    snapshot: &mut ActorMovementSnapshot,
) -> Result<(), CodecError> {
    stream.world_vec3("vMoveTarget", &mut snapshot.move_target)?;
    stream.world_vec3("vAimTarget", &mut snapshot.aim_target)?;
    stream.world_vec3("vLookTarget", &mut snapshot.look_target)?;

    stream.value_f32("fdSpeed", &mut snapshot.desired_speed)?;
    let speed = snapshot.desired_speed;
    if stream.is_reading() && (speed.is_nan() || speed < 0.0) {
        return Err(CodecError::malformed(
            "fdSpeed",
            format!("{speed} is not a speed"),
        ));
    }

    stream.value_i8("nStance", &mut snapshot.stance)?;
    if stream.is_reading() && Stance::try_from(snapshot.stance).is_err() {
        return Err(CodecError::malformed(
            "nStance",
            format!("{} is not a stance", snapshot.stance),
        ));
    }

    stream.value_bool("bTarget", &mut snapshot.has_aim_target)?;

    Ok(())
}

/// HIDE aspect: the hidden flag alone.
pub fn serialize_hide(stream: &mut dyn NetStream, hidden: &mut bool) -> Result<(), CodecError> {
    stream.value_bool("bHide", hidden)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interface_adapters::protocol::{FieldDto, WireValue};
    use crate::interface_adapters::stream::{FieldReader, FieldWriter};
    use glam::Vec3;

    fn sample() -> ActorMovementSnapshot {
        ActorMovementSnapshot {
            move_target: Vec3::new(1.0, 0.0, 0.0),
            aim_target: Vec3::new(2.5, -3.0, 1.75),
            look_target: Vec3::new(0.0, 4.0, 1.5),
            fire_target: Vec3::new(9.0, 9.0, 9.0),
            desired_speed: 3.3,
            stance: i32::from(Stance::Crouch),
            has_aim_target: true,
        }
    }

    fn written(snapshot: ActorMovementSnapshot) -> Vec<FieldDto> {
        let mut writer = FieldWriter::default();
        let mut copy = snapshot;
        serialize_alive(&mut writer, &mut copy).expect("alive aspect should encode");
        writer.into_fields()
    }

    #[test]
    fn alive_record_has_the_documented_field_layout() {
        let names: Vec<_> = written(sample()).into_iter().map(|f| f.name).collect();
        assert_eq!(
            names,
            vec!["vMoveTarget", "vAimTarget", "vLookTarget", "fdSpeed", "nStance", "bTarget"]
        );
    }

    #[test]
    fn every_stance_survives_the_alive_record() {
        for stance in Stance::ALL {
            let snapshot = ActorMovementSnapshot {
                stance: i32::from(stance),
                ..sample()
            };
            let mut decoded = ActorMovementSnapshot::default();
            let mut reader = FieldReader::new(written(snapshot));
            serialize_alive(&mut reader, &mut decoded).expect("alive aspect should decode");
            assert_eq!(Stance::try_from(decoded.stance), Ok(stance));
        }
    }

    #[test]
    fn decoded_alive_record_keeps_speed_exact_and_points_quantized() {
        let mut decoded = ActorMovementSnapshot::default();
        let mut reader = FieldReader::new(written(sample()));
        serialize_alive(&mut reader, &mut decoded).expect("alive aspect should decode");

        assert_eq!(decoded.desired_speed, 3.3);
        assert_eq!(decoded.move_target, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(decoded.aim_target, Vec3::new(2.5, -3.0, 1.75));
        assert!(decoded.has_aim_target);
        // Not carried on the wire.
        assert_eq!(decoded.fire_target, Vec3::ZERO);
    }

    #[test]
    fn stance_outside_i8_cannot_be_encoded() {
        let mut writer = FieldWriter::default();
        let mut snapshot = ActorMovementSnapshot {
            stance: 128,
            ..sample()
        };
        assert!(matches!(
            serialize_alive(&mut writer, &mut snapshot),
            Err(CodecError::OutOfRange { field: "nStance", .. })
        ));
    }

    #[test]
    fn stance_outside_the_enumeration_is_malformed() {
        for bad in [10_i64, 127, -2, -128] {
            let mut fields = written(sample());
            fields[4].value = WireValue::I8(bad);
            let mut decoded = ActorMovementSnapshot::default();
            let mut reader = FieldReader::new(fields);
            let err = serialize_alive(&mut reader, &mut decoded).expect_err("bad stance");
            assert!(matches!(
                err,
                CodecError::MalformedAspectData { field: "nStance", .. }
            ));
        }
    }

    #[test]
    fn when_speed_is_negative_or_nan_then_record_is_malformed() {
        for bad in [-7.5_f32, -f32::MIN_POSITIVE, f32::NAN] {
            let mut fields = written(sample());
            fields[3].value = WireValue::F32(bad);
            let mut decoded = ActorMovementSnapshot::default();
            let mut reader = FieldReader::new(fields);
            let err = serialize_alive(&mut reader, &mut decoded).expect_err("bad speed");
            assert!(matches!(
                err,
                CodecError::MalformedAspectData { field: "fdSpeed", .. }
            ));
        }
    }

    #[test]
    fn zero_speed_is_accepted() {
        let mut fields = written(sample());
        fields[3].value = WireValue::F32(0.0);
        let mut decoded = ActorMovementSnapshot::default();
        serialize_alive(&mut FieldReader::new(fields), &mut decoded).expect("zero speed");
        assert_eq!(decoded.desired_speed, 0.0);
    }

    #[test]
    fn hide_record_is_a_single_flag() {
        let mut writer = FieldWriter::default();
        serialize_hide(&mut writer, &mut true).expect("hide aspect should encode");
        let fields = writer.into_fields();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].value, WireValue::Bool(true));

        let mut hidden = false;
        serialize_hide(&mut FieldReader::new(fields), &mut hidden).expect("should decode");
        assert!(hidden);
    }
}
