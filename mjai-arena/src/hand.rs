//! Complete-hand and tenpai checks over 34-type tile counts.
//!
//! Only the shape is checked here. Whether a complete hand carries a yaku is
//! left to the external scorer.

use mjai_engine::tile::{Pai, NUM_TILE_TYPES};

pub type Counts = [u8; NUM_TILE_TYPES];

const KOKUSHI_TYPES: [usize; 13] = [0, 8, 9, 17, 18, 26, 27, 28, 29, 30, 31, 32, 33];

/// Tile counts per type; red fives count as plain fives, unknown tiles are skipped.
pub fn counts_of(pais: &[Pai]) -> Counts {
    let mut counts = [0u8; NUM_TILE_TYPES];
    for tile_type in pais.iter().filter_map(Pai::tile_type) {
        counts[tile_type] += 1;
    }
    counts
}

pub fn is_agari(counts: &Counts) -> bool {
    is_kokushi(counts) || is_chiitoitsu(counts) || is_standard_agari(counts)
}

/// Four melds (fewer after calls) and a pair.
pub fn is_standard_agari(counts: &Counts) -> bool {
    let total: u32 = counts.iter().map(|&c| u32::from(c)).sum();
    if total % 3 != 2 {
        return false;
    }
    let mut work = *counts;
    for head in 0..NUM_TILE_TYPES {
        if work[head] >= 2 {
            work[head] -= 2;
            let complete = decompose(&mut work, 0);
            work[head] += 2;
            if complete {
                return true;
            }
        }
    }
    false
}

fn decompose(counts: &mut Counts, start: usize) -> bool {
    let Some(i) = (start..NUM_TILE_TYPES).find(|&i| counts[i] > 0) else {
        return true;
    };

    if counts[i] >= 3 {
        counts[i] -= 3;
        let complete = decompose(counts, i);
        counts[i] += 3;
        if complete {
            return true;
        }
    }

    // Sequences start at 1..=7 of a suited run.
    if i < 27 && i % 9 <= 6 && counts[i + 1] > 0 && counts[i + 2] > 0 {
        counts[i] -= 1;
        counts[i + 1] -= 1;
        counts[i + 2] -= 1;
        let complete = decompose(counts, i);
        counts[i] += 1;
        counts[i + 1] += 1;
        counts[i + 2] += 1;
        if complete {
            return true;
        }
    }
    false
}

pub fn is_chiitoitsu(counts: &Counts) -> bool {
    counts.iter().all(|&c| c == 0 || c == 2) && counts.iter().filter(|&&c| c == 2).count() == 7
}

pub fn is_kokushi(counts: &Counts) -> bool {
    let mut pair_found = false;
    for &t in &KOKUSHI_TYPES {
        match counts[t] {
            1 => {}
            2 if !pair_found => pair_found = true,
            _ => return false,
        }
    }
    let total: u32 = counts.iter().map(|&c| u32::from(c)).sum();
    pair_found && total == 14
}

/// Tile types that would complete the hand. A type the hand already holds
/// all four of is not a wait.
pub fn waits(counts: &Counts) -> Vec<usize> {
    let mut work = *counts;
    let mut found = Vec::new();
    for t in 0..NUM_TILE_TYPES {
        if work[t] >= 4 {
            continue;
        }
        work[t] += 1;
        if is_agari(&work) {
            found.push(t);
        }
        work[t] -= 1;
    }
    found
}

pub fn is_tenpai(counts: &Counts) -> bool {
    !waits(counts).is_empty()
}
