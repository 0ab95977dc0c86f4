use super::{Position, Status, UnitId};

/// The character this engine drives.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    pub id: UnitId,
    pub name: String,
    pub position: Position,
    pub status: Status,
    pub hp: u32,
    pub max_hp: u32,
    pub mp: u32,
    pub max_mp: u32,
    pub tp: u32,
    /// Names of status effects currently active on the player.
    pub buffs: Vec<String>,
}

impl Player {
    /// Health in percent. A zero maximum reads as 0%.
    pub fn hpp(&self) -> u8 {
        percent(self.hp, self.max_hp)
    }

    /// Magic in percent. A zero maximum reads as 0%.
    pub fn mpp(&self) -> u8 {
        percent(self.mp, self.max_mp)
    }

    pub fn is_dead(&self) -> bool {
        self.status == Status::Dead || (self.max_hp > 0 && self.hp == 0)
    }

    pub fn is_engaged(&self) -> bool {
        self.status == Status::Engaged
    }

    pub fn is_resting(&self) -> bool {
        self.status == Status::Resting
    }

    /// Case-insensitive buff lookup.
    pub fn has_buff(&self, name: &str) -> bool {
        self.buffs.iter().any(|buff| buff.eq_ignore_ascii_case(name))
    }
}

/// A member of the player's party as reported by the game.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PartyMember {
    pub id: UnitId,
    pub name: String,
    pub hpp: u8,
    pub mpp: u8,
    pub position: Position,
    /// Slot is occupied by someone in the zone.
    pub is_active: bool,
}

fn percent(current: u32, maximum: u32) -> u8 {
    if maximum == 0 {
        return 0;
    }
    ((u64::from(current.min(maximum)) * 100) / u64::from(maximum)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentages_handle_zero_maximum() {
        let player = Player::default();
        assert_eq!(player.hpp(), 0);
        assert_eq!(player.mpp(), 0);
    }

    #[test]
    fn percentages_round_down() {
        let player = Player {
            hp: 333,
            max_hp: 1000,
            mp: 50,
            max_mp: 50,
            ..Player::default()
        };
        assert_eq!(player.hpp(), 33);
        assert_eq!(player.mpp(), 100);
    }

    #[test]
    fn buff_lookup_ignores_case() {
        let player = Player {
            buffs: vec!["Protect".into()],
            ..Player::default()
        };
        assert!(player.has_buff("protect"));
        assert!(!player.has_buff("Shell"));
    }
}
