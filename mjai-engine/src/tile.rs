//! Tiles in MJAI notation.
//!
//! `1m`..`9m`, `1p`..`9p`, `1s`..`9s` for suited tiles, a trailing `r` for
//! red fives (`5mr`), `E S W N P F C` for honors and `?` for a tile the
//! viewer is not allowed to see.

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::{RefereeError, RefereeResult};
use crate::rule::GameRule;

/// Distinct tile symbols (red fives fold into their plain five).
pub const NUM_TILE_TYPES: usize = 34;

/// Physical tiles in a four-player set.
pub const NUM_TILES: usize = 136;

pub const NUM_COPIES: usize = 4;

const HONOR_LETTERS: [char; 7] = ['E', 'S', 'W', 'N', 'P', 'F', 'C'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Suit {
    Manzu,
    Pinzu,
    Souzu,
    Jihai,
}

impl Suit {
    pub const SUITED: [Suit; 3] = [Suit::Manzu, Suit::Pinzu, Suit::Souzu];

    pub const fn letter(self) -> char {
        match self {
            Suit::Manzu => 'm',
            Suit::Pinzu => 'p',
            Suit::Souzu => 's',
            Suit::Jihai => 't',
        }
    }

    /// Highest number in the suit.
    pub const fn size(self) -> u8 {
        match self {
            Suit::Jihai => 7,
            _ => 9,
        }
    }

    const fn type_offset(self) -> usize {
        match self {
            Suit::Manzu => 0,
            Suit::Pinzu => 9,
            Suit::Souzu => 18,
            Suit::Jihai => 27,
        }
    }

    fn from_letter(c: char) -> Option<Suit> {
        match c {
            'm' => Some(Suit::Manzu),
            'p' => Some(Suit::Pinzu),
            's' => Some(Suit::Souzu),
            _ => None,
        }
    }
}

/// A single tile, or the placeholder a redacted view substitutes for one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Pai {
    Known { suit: Suit, number: u8, red: bool },
    Unknown,
}

impl Pai {
    pub fn new(suit: Suit, number: u8, red: bool) -> RefereeResult<Pai> {
        if number == 0 || number > suit.size() || (red && (suit == Suit::Jihai || number != 5)) {
            return Err(RefereeError::Parse {
                input: format!("{}{}{}", number, suit.letter(), if red { "r" } else { "" }),
                message: "no such tile".to_string(),
            });
        }
        Ok(Pai::Known { suit, number, red })
    }

    /// Shorthand for tile literals in tests; panics on bad notation. Library
    /// code goes through `str::parse`, which reports [`RefereeError::Parse`].
    #[cfg(any(test, feature = "test-util"))]
    pub fn parse(notation: &str) -> Pai {
        notation
            .parse()
            .unwrap_or_else(|e| panic!("invalid tile literal: {e}"))
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Pai::Unknown)
    }

    pub fn suit(&self) -> Option<Suit> {
        match self {
            Pai::Known { suit, .. } => Some(*suit),
            Pai::Unknown => None,
        }
    }

    pub fn number(&self) -> Option<u8> {
        match self {
            Pai::Known { number, .. } => Some(*number),
            Pai::Unknown => None,
        }
    }

    pub fn is_red(&self) -> bool {
        matches!(self, Pai::Known { red: true, .. })
    }

    pub fn without_red(&self) -> Pai {
        match *self {
            Pai::Known { suit, number, .. } => Pai::Known {
                suit,
                number,
                red: false,
            },
            Pai::Unknown => Pai::Unknown,
        }
    }

    /// Same tile ignoring the red marker.
    pub fn same_symbol(&self, other: &Pai) -> bool {
        !self.is_unknown() && self.without_red() == other.without_red()
    }

    /// Index 0..34 (manzu, pinzu, souzu, then E S W N P F C).
    pub fn tile_type(&self) -> Option<usize> {
        match *self {
            Pai::Known { suit, number, .. } => Some(suit.type_offset() + number as usize - 1),
            Pai::Unknown => None,
        }
    }

    pub fn from_tile_type(tile_type: usize) -> Option<Pai> {
        let (suit, number) = match tile_type {
            0..=8 => (Suit::Manzu, tile_type + 1),
            9..=17 => (Suit::Pinzu, tile_type - 8),
            18..=26 => (Suit::Souzu, tile_type - 17),
            27..=33 => (Suit::Jihai, tile_type - 26),
            _ => return None,
        };
        Some(Pai::Known {
            suit,
            number: number as u8,
            red: false,
        })
    }

    /// The dora indicated when this tile is the indicator.
    pub fn succ(&self) -> Pai {
        match *self {
            Pai::Known {
                suit: Suit::Jihai,
                number,
                ..
            } => {
                let next = if number <= 4 {
                    number % 4 + 1
                } else {
                    (number - 5 + 1) % 3 + 5
                };
                Pai::Known {
                    suit: Suit::Jihai,
                    number: next,
                    red: false,
                }
            }
            Pai::Known { suit, number, .. } => Pai::Known {
                suit,
                number: number % 9 + 1,
                red: false,
            },
            Pai::Unknown => Pai::Unknown,
        }
    }

    /// The full set for one game, sorted. With `red_fives` one copy of each
    /// suited five is red.
    pub fn all_pais(rule: &GameRule) -> Vec<Pai> {
        let mut pais = Vec::with_capacity(NUM_TILES);
        for copy in 0..NUM_COPIES {
            for suit in Suit::SUITED {
                for number in 1..=9 {
                    pais.push(Pai::Known {
                        suit,
                        number,
                        red: rule.red_fives && number == 5 && copy == 0,
                    });
                }
            }
            for number in 1..=7 {
                pais.push(Pai::Known {
                    suit: Suit::Jihai,
                    number,
                    red: false,
                });
            }
        }
        pais.sort();
        pais
    }
}

/// Space-separated MJAI notation.
pub fn dump_pais(pais: &[Pai]) -> String {
    pais.iter()
        .map(Pai::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

impl fmt::Display for Pai {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Pai::Unknown => f.write_str("?"),
            Pai::Known {
                suit: Suit::Jihai,
                number,
                ..
            } => write!(f, "{}", HONOR_LETTERS[number as usize - 1]),
            Pai::Known { suit, number, red } => {
                write!(f, "{}{}{}", number, suit.letter(), if red { "r" } else { "" })
            }
        }
    }
}

impl FromStr for Pai {
    type Err = RefereeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_error = |message: &str| RefereeError::Parse {
            input: s.to_string(),
            message: message.to_string(),
        };
        if s == "?" {
            return Ok(Pai::Unknown);
        }
        let chars: Vec<char> = s.chars().collect();
        if let [c] = chars.as_slice() {
            let idx = HONOR_LETTERS
                .iter()
                .position(|h| h == c)
                .ok_or_else(|| parse_error("unknown honor letter"))?;
            return Pai::new(Suit::Jihai, idx as u8 + 1, false);
        }
        let (digit, suit_char, red) = match chars.as_slice() {
            [d, s] => (*d, *s, false),
            [d, s, 'r'] => (*d, *s, true),
            _ => return Err(parse_error("expected <number><suit>[r]")),
        };
        let number = digit
            .to_digit(10)
            .ok_or_else(|| parse_error("tile number is not a digit"))?;
        let suit = Suit::from_letter(suit_char).ok_or_else(|| parse_error("unknown suit"))?;
        Pai::new(suit, number as u8, red)
    }
}

impl Serialize for Pai {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Pai {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
