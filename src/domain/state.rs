// Domain-level replication state for AI-controlled aliens.

use bitflags::bitflags;
use glam::Vec3;
use std::time::Duration;

/// Delay before a freshly unhidden alien may use its weapons again.
pub const WEAPON_REARM_DELAY: Duration = Duration::from_millis(1000);

/// Which side of the simulation this process plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Authoritative, no local player.
    DedicatedServer,
    /// Authoritative with a local player attached.
    ListenServer,
    /// Non-authoritative; only consumes replicated state.
    Client,
}

impl Role {
    pub fn is_authoritative(self) -> bool {
        matches!(self, Role::DedicatedServer | Role::ListenServer)
    }

    pub fn is_dedicated_server(self) -> bool {
        matches!(self, Role::DedicatedServer)
    }

    pub fn label(self) -> &'static str {
        if self.is_authoritative() {
            "IsServer"
        } else {
            "IsClient"
        }
    }
}

/// Per-tick timing and role shared with the injected base actor.
#[derive(Debug, Clone, Copy)]
pub struct TickInfo {
    pub role: Role,
    pub tick: u64,
    /// Seconds since the previous tick.
    pub frame_time: f32,
}

/// Posture used by locomotion and animation. The discriminants are the wire values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(i8)]
pub enum Stance {
    Null = -1,
    #[default]
    Stand = 0,
    Crouch = 1,
    Prone = 2,
    Relaxed = 3,
    Stealth = 4,
    LowCover = 5,
    Alerted = 6,
    HighCover = 7,
    Swim = 8,
    ZeroG = 9,
}

impl Stance {
    pub const ALL: [Stance; 11] = [
        Stance::Null,
        Stance::Stand,
        Stance::Crouch,
        Stance::Prone,
        Stance::Relaxed,
        Stance::Stealth,
        Stance::LowCover,
        Stance::Alerted,
        Stance::HighCover,
        Stance::Swim,
        Stance::ZeroG,
    ];
}

impl From<Stance> for i32 {
    fn from(stance: Stance) -> Self {
        stance as i8 as i32
    }
}

impl TryFrom<i32> for Stance {
    type Error = i32;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Stance::ALL
            .into_iter()
            .find(|s| i32::from(*s) == value)
            .ok_or(value)
    }
}

/// Movement/aim state replicated from the authoritative alien to its proxies.
///
/// `move_target` is an offset from the actor's position at extraction time, not an
/// absolute point; receivers re-anchor it to their own position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ActorMovementSnapshot {
    pub move_target: Vec3,
    pub aim_target: Vec3,
    pub look_target: Vec3,
    pub fire_target: Vec3,
    pub desired_speed: f32,
    pub stance: i32,
    pub has_aim_target: bool,
}

/// Output of the lower-level locomotion system for the current tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MovementState {
    pub movement_direction: Vec3,
    pub eye_position: Vec3,
    pub aim_direction: Vec3,
    pub eye_direction: Vec3,
    pub fire_target: Vec3,
    pub stance: Stance,
    pub is_aiming: bool,
}

/// Movement request handed to the locomotion system. Unset targets are `None`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MovementRequest {
    pub move_target: Option<Vec3>,
    pub look_target: Option<Vec3>,
    pub body_target: Option<Vec3>,
    pub fire_target: Option<Vec3>,
    pub aim_target: Option<Vec3>,
    pub desired_speed: Option<f32>,
    pub stance: Option<Stance>,
}

impl MovementRequest {
    pub fn set_move_target(&mut self, target: Vec3) {
        self.move_target = Some(target);
    }

    pub fn set_look_target(&mut self, target: Vec3) {
        self.look_target = Some(target);
    }

    pub fn set_body_target(&mut self, target: Vec3) {
        self.body_target = Some(target);
    }

    pub fn set_fire_target(&mut self, target: Vec3) {
        self.fire_target = Some(target);
    }

    pub fn clear_aim_target(&mut self) {
        self.aim_target = None;
    }

    pub fn set_desired_speed(&mut self, speed: f32) {
        self.desired_speed = Some(speed);
    }

    pub fn set_stance(&mut self, stance: Stance) {
        self.stance = Some(stance);
    }
}

/// Locally observed stats (debug overlay and animation read these).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ActorStats {
    pub speed: f32,
    pub fire_dir: Vec3,
}

/// Independently replicated partitions of an alien's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Aspect {
    Alive,
    Hide,
}

impl Aspect {
    pub const ALL: [Aspect; 2] = [Aspect::Alive, Aspect::Hide];

    pub const fn tag(self) -> u8 {
        match self {
            Aspect::Alive => 1,
            Aspect::Hide => 2,
        }
    }

    /// Unknown tags map to `None` so newer peers can add aspects.
    pub fn from_tag(tag: u8) -> Option<Self> {
        Aspect::ALL.into_iter().find(|a| a.tag() == tag)
    }
}

bitflags! {
    /// Aspects changed since the replication layer last drained them.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct DirtyAspects: u8 {
        const ALIVE = 1 << 0;
        const HIDE = 1 << 1;
    }
}

impl From<Aspect> for DirtyAspects {
    fn from(aspect: Aspect) -> Self {
        match aspect {
            Aspect::Alive => DirtyAspects::ALIVE,
            Aspect::Hide => DirtyAspects::HIDE,
        }
    }
}

impl DirtyAspects {
    pub fn aspects(self) -> impl Iterator<Item = Aspect> {
        Aspect::ALL
            .into_iter()
            .filter(move |a| self.contains(DirtyAspects::from(*a)))
    }
}

/// Host timers the alien schedules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerId {
    WeaponDelay,
}

/// Host notifications routed to the alien.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityEvent {
    Hide,
    Unhide,
    Timer(TimerId),
}

/// When the host should keep the actor's AI proxy running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AiActivation {
    Never,
    #[default]
    VisibleOrInRange,
    Always,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stance_wire_values_round_trip() {
        for stance in Stance::ALL {
            assert_eq!(Stance::try_from(i32::from(stance)), Ok(stance));
        }
    }

    #[test]
    fn stance_rejects_values_outside_the_enumeration() {
        assert_eq!(Stance::try_from(10), Err(10));
        assert_eq!(Stance::try_from(-2), Err(-2));
        assert_eq!(Stance::try_from(300), Err(300));
    }

    #[test]
    fn unknown_aspect_tags_are_not_recognized() {
        assert_eq!(Aspect::from_tag(1), Some(Aspect::Alive));
        assert_eq!(Aspect::from_tag(2), Some(Aspect::Hide));
        assert_eq!(Aspect::from_tag(0), None);
        assert_eq!(Aspect::from_tag(42), None);
    }

    #[test]
    fn dirty_set_lists_marked_aspects_in_tag_order() {
        let dirty = DirtyAspects::HIDE | DirtyAspects::ALIVE;
        let aspects: Vec<_> = dirty.aspects().collect();
        assert_eq!(aspects, vec![Aspect::Alive, Aspect::Hide]);
        assert_eq!(DirtyAspects::empty().aspects().count(), 0);
    }

    #[test]
    fn only_server_roles_are_authoritative() {
        assert!(Role::DedicatedServer.is_authoritative());
        assert!(Role::ListenServer.is_authoritative());
        assert!(!Role::Client.is_authoritative());
        assert!(!Role::ListenServer.is_dedicated_server());
    }
}
