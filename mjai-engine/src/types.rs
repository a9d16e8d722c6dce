use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tile::{dump_pais, Pai};

pub const NUM_PLAYERS: usize = 4;

/// Round wind or seat wind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Wind {
    #[default]
    #[serde(rename = "E")]
    East,
    #[serde(rename = "S")]
    South,
    #[serde(rename = "W")]
    West,
    #[serde(rename = "N")]
    North,
}

impl Wind {
    pub fn from_index(idx: usize) -> Wind {
        match idx % 4 {
            0 => Wind::East,
            1 => Wind::South,
            2 => Wind::West,
            _ => Wind::North,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Seat wind of `seat` when `oya` deals.
    pub fn of_seat(seat: usize, oya: usize) -> Wind {
        Wind::from_index(NUM_PLAYERS + seat - oya)
    }

    pub fn letter(self) -> char {
        match self {
            Wind::East => 'E',
            Wind::South => 'S',
            Wind::West => 'W',
            Wind::North => 'N',
        }
    }
}

impl fmt::Display for Wind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuroKind {
    Chi,
    Pon,
    Daiminkan,
    Ankan,
    Kakan,
}

/// An exposed (or concealed-kan) meld.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Furo {
    pub kind: FuroKind,
    /// Tile taken from another seat; `None` for ankan.
    pub taken: Option<Pai>,
    pub consumed: Vec<Pai>,
    /// Seat the tile was taken from.
    pub target: Option<usize>,
}

impl Furo {
    pub fn pais(&self) -> Vec<Pai> {
        let mut pais: Vec<Pai> = self.taken.iter().chain(self.consumed.iter()).copied().collect();
        pais.sort();
        pais
    }

    pub fn is_concealed(&self) -> bool {
        self.kind == FuroKind::Ankan
    }
}

impl fmt::Display for Furo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind, self.taken, self.target) {
            (FuroKind::Ankan, _, _) | (_, None, _) => {
                let inner = self.consumed.get(1..self.consumed.len().saturating_sub(1));
                write!(f, "[# {} #]", dump_pais(inner.unwrap_or(&[])))
            }
            (_, Some(taken), target) => {
                let from = target.map_or_else(|| "?".to_string(), |t| t.to_string());
                write!(f, "[{}({})/{}]", taken, from, dump_pais(&self.consumed))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seat_wind_counts_from_dealer() {
        assert_eq!(Wind::of_seat(2, 2), Wind::East);
        assert_eq!(Wind::of_seat(3, 2), Wind::South);
        assert_eq!(Wind::of_seat(0, 2), Wind::West);
        assert_eq!(Wind::of_seat(1, 2), Wind::North);
    }

    #[test]
    fn furo_display() {
        let pon = Furo {
            kind: FuroKind::Pon,
            taken: Some(Pai::parse("5p")),
            consumed: vec![Pai::parse("5p"), Pai::parse("5pr")],
            target: Some(1),
        };
        assert_eq!(pon.to_string(), "[5p(1)/5p 5pr]");

        let ankan = Furo {
            kind: FuroKind::Ankan,
            taken: None,
            consumed: vec![Pai::parse("E"); 4],
            target: None,
        };
        assert_eq!(ankan.to_string(), "[# E E #]");
        assert_eq!(ankan.pais().len(), 4);
    }
}
