use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

bitflags! {
    /// permission bitfield for roles. transmitted as a signed 64-bit integer,
    /// same as the server stores it.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct Permissions: u64 {
        const VIEW_CHANNELS         = 1 << 0;
        const MANAGE_CHANNELS       = 1 << 1;
        const MANAGE_ROLES          = 1 << 2;
        const MANAGE_SERVER         = 1 << 3;
        const CREATE_INVITES        = 1 << 4;
        const KICK_MEMBERS          = 1 << 5;
        const BAN_MEMBERS           = 1 << 6;
        const ADMINISTRATOR         = 1 << 7;

        const SEND_MESSAGES         = 1 << 10;
        const EMBED_LINKS           = 1 << 11;
        const ATTACH_FILES          = 1 << 12;
        const ADD_REACTIONS         = 1 << 13;
        const MENTION_EVERYONE      = 1 << 14;
        const MANAGE_MESSAGES       = 1 << 15;
        const READ_MESSAGE_HISTORY  = 1 << 16;

        const CONNECT               = 1 << 20;
        const SPEAK                 = 1 << 21;
        const MUTE_MEMBERS          = 1 << 22;
        const DEAFEN_MEMBERS        = 1 << 23;
        const MOVE_MEMBERS          = 1 << 24;
    }
}

impl Permissions {
    /// whether this bitfield grants `perm`. ADMINISTRATOR short-circuits to
    /// grant everything.
    pub fn allows(self, perm: Permissions) -> bool {
        self.contains(Permissions::ADMINISTRATOR) || self.contains(perm)
    }
}

impl Serialize for Permissions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.bits() as i64)
    }
}

impl<'de> Deserialize<'de> for Permissions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bits = i64::deserialize(deserializer)?;
        // unknown bits are dropped rather than rejected, so newer servers can
        // grow the bitfield without breaking older clients
        Ok(Permissions::from_bits_truncate(bits as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn administrator_grants_everything() {
        let p = Permissions::ADMINISTRATOR;
        assert!(p.allows(Permissions::BAN_MEMBERS));
        assert!(p.allows(Permissions::MANAGE_CHANNELS));
        assert!(!p.contains(Permissions::BAN_MEMBERS));
    }

    #[test]
    fn plain_grant_requires_the_bit() {
        let p = Permissions::SEND_MESSAGES | Permissions::ADD_REACTIONS;
        assert!(p.allows(Permissions::SEND_MESSAGES));
        assert!(!p.allows(Permissions::KICK_MEMBERS));
    }

    #[test]
    fn wire_format_is_i64() {
        let p = Permissions::VIEW_CHANNELS | Permissions::SEND_MESSAGES;
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, "1025");
        let back: Permissions = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn unknown_bits_are_dropped() {
        let back: Permissions = serde_json::from_str("4611686018427387905").unwrap();
        assert_eq!(back, Permissions::VIEW_CHANNELS);
    }
}
