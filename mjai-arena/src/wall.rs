//! Deterministic wall building.
//!
//! Given the same `(seed, kyoku, honba)` the shuffle is identical on every
//! platform and thread count. The referee itself never shuffles; walls come
//! from here.
//!
//! Layout of the 136 tiles after the shuffle:
//!
//! | range       | use                                   |
//! |-------------|---------------------------------------|
//! | `0..52`     | starting hands, 13 per seat from oya  |
//! | `52..122`   | live wall                             |
//! | `122..126`  | rinshan tiles                         |
//! | `126..131`  | dora markers                          |
//! | `131..136`  | uradora markers                       |

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sha2::{Digest, Sha256};

use mjai_engine::errors::{RefereeError, RefereeResult};
use mjai_engine::rule::GameRule;
use mjai_engine::state::HAND_SIZE;
use mjai_engine::tile::{Pai, NUM_TILES};
use mjai_engine::types::NUM_PLAYERS;

const LIVE_START: usize = HAND_SIZE * NUM_PLAYERS;
const RINSHAN_START: usize = 122;
const DORA_START: usize = 126;
const URA_START: usize = 131;
const MAX_DORA_MARKERS: usize = 5;

/// Fisher-Yates kept in-tree so the shuffle does not move with `rand`'s
/// `SliceRandom` internals.
pub fn fisher_yates_shuffle<T>(slice: &mut [T], rng: &mut impl Rng) {
    for i in (1..slice.len()).rev() {
        let j = rng.random_range(0..=i);
        slice.swap(i, j);
    }
}

/// 32-byte game seed from a plain integer seed and a game index.
pub fn game_seed(seed: u64, game_index: u64) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(seed.to_le_bytes());
    hasher.update(game_index.to_le_bytes());
    hasher.finalize().into()
}

/// `SHA-256(game_seed || kyoku || honba)`, the seed of one kyoku's shuffle.
pub fn derive_kyoku_seed(game_seed: &[u8; 32], kyoku: u8, honba: u8) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(game_seed);
    hasher.update([kyoku]);
    hasher.update([honba]);
    hasher.finalize().into()
}

#[derive(Debug, Clone)]
pub struct Wall {
    tiles: Vec<Pai>,
    next_live: usize,
    rinshan_drawn: usize,
    doras_revealed: usize,
}

impl Wall {
    /// Shuffle the rule's full tile set for one kyoku.
    pub fn shuffled(rule: &GameRule, game_seed: &[u8; 32], kyoku: u8, honba: u8) -> Wall {
        let mut rng = ChaCha8Rng::from_seed(derive_kyoku_seed(game_seed, kyoku, honba));
        let mut tiles = Pai::all_pais(rule);
        fisher_yates_shuffle(&mut tiles, &mut rng);
        Wall::new(tiles)
    }

    /// A prearranged wall, laid out as described in the module docs.
    pub fn from_tiles(tiles: Vec<Pai>) -> RefereeResult<Wall> {
        if tiles.len() != NUM_TILES {
            return Err(RefereeError::invalid_state(format!(
                "a wall needs {} tiles, got {}",
                NUM_TILES,
                tiles.len()
            )));
        }
        Ok(Wall::new(tiles))
    }

    fn new(tiles: Vec<Pai>) -> Wall {
        Wall {
            tiles,
            next_live: LIVE_START,
            rinshan_drawn: 0,
            doras_revealed: 1,
        }
    }

    pub fn tiles(&self) -> &[Pai] {
        &self.tiles
    }

    /// Starting hands indexed by seat; oya gets the first block.
    pub fn haipai(&self, oya: usize) -> Vec<Vec<Pai>> {
        (0..NUM_PLAYERS)
            .map(|seat| {
                let block = (NUM_PLAYERS + seat - oya) % NUM_PLAYERS;
                self.tiles[block * HAND_SIZE..(block + 1) * HAND_SIZE].to_vec()
            })
            .collect()
    }

    /// Live draws left. Each rinshan draw shortens the live wall by one.
    pub fn remaining(&self) -> usize {
        RINSHAN_START.saturating_sub(self.next_live + self.rinshan_drawn)
    }

    pub fn draw(&mut self) -> Option<Pai> {
        if self.remaining() == 0 {
            return None;
        }
        let pai = self.tiles[self.next_live];
        self.next_live += 1;
        Some(pai)
    }

    pub fn draw_rinshan(&mut self) -> Option<Pai> {
        if self.remaining() == 0 || RINSHAN_START + self.rinshan_drawn >= DORA_START {
            return None;
        }
        let pai = self.tiles[RINSHAN_START + self.rinshan_drawn];
        self.rinshan_drawn += 1;
        Some(pai)
    }

    pub fn dora_markers(&self) -> &[Pai] {
        &self.tiles[DORA_START..DORA_START + self.doras_revealed]
    }

    /// Turn over the next dora marker after a kan.
    pub fn reveal_dora(&mut self) -> Option<Pai> {
        if self.doras_revealed >= MAX_DORA_MARKERS {
            return None;
        }
        self.doras_revealed += 1;
        self.dora_markers().last().copied()
    }

    /// One uradora marker under each revealed dora marker.
    pub fn uradora_markers(&self) -> &[Pai] {
        &self.tiles[URA_START..URA_START + self.doras_revealed]
    }
}
