//! One seat's private picture of the table.
//!
//! Rebuilt solely from the actions the seat is shown, so it never knows more
//! than the referee allows. Everything the referee asks a seat about
//! (`possible_dahais`, `possible_furo_actions`, `can_reach`, `can_hora`) is
//! derived from here.

use mjai_engine::action::Action;
use mjai_engine::rule::GameRule;
use mjai_engine::state::{DEAD_WALL_SIZE, HAND_SIZE};
use mjai_engine::tile::{Pai, Suit, NUM_TILES};
use mjai_engine::types::{Furo, FuroKind, Wind, NUM_PLAYERS};

use crate::hand;

/// Kans allowed on the table before no rinshan tile is left to draw.
pub const MAX_KANS: usize = 4;

const INITIAL_PIPAIS: u32 = (NUM_TILES - HAND_SIZE * NUM_PLAYERS - DEAD_WALL_SIZE) as u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReachState {
    #[default]
    None,
    /// Declared; the declaration tile has not yet survived the other seats.
    Declared,
    Accepted,
}

#[derive(Debug, Clone)]
pub struct SeatState {
    rule: GameRule,
    id: Option<usize>,
    tehais: Vec<Pai>,
    furos: Vec<Furo>,
    ho: Vec<Pai>,
    /// Every tile this seat discarded this kyoku, including called ones.
    sutehais: Vec<Pai>,
    reach_state: ReachState,
    reach_ho_index: Option<usize>,
    scores: [i32; NUM_PLAYERS],
    bakaze: Option<Wind>,
    oya: Option<usize>,
    num_pipais: u32,
    num_kans: usize,
    /// Tile types that may not be discarded right after a chi or pon.
    kuikae: Vec<usize>,
    last_action: Option<Action>,
}

impl SeatState {
    pub fn new(rule: GameRule) -> Self {
        Self {
            rule,
            id: None,
            tehais: Vec::new(),
            furos: Vec::new(),
            ho: Vec::new(),
            sutehais: Vec::new(),
            reach_state: ReachState::None,
            reach_ho_index: None,
            scores: [rule.starting_score; NUM_PLAYERS],
            bakaze: None,
            oya: None,
            num_pipais: 0,
            num_kans: 0,
            kuikae: Vec::new(),
            last_action: None,
        }
    }

    fn is_me(&self, seat: usize) -> bool {
        self.id == Some(seat)
    }

    /// Apply one action as this seat sees it.
    pub fn update(&mut self, action: &Action) {
        match action {
            Action::StartGame { id, .. } => {
                *self = SeatState::new(self.rule);
                self.id = *id;
            }
            Action::StartKyoku {
                bakaze,
                oya,
                scores,
                tehais,
                ..
            } => {
                self.bakaze = Some(*bakaze);
                self.oya = Some(*oya);
                if let Some(scores) = scores {
                    self.scores = *scores;
                }
                self.tehais = self
                    .id
                    .and_then(|id| tehais.get(id))
                    .cloned()
                    .unwrap_or_default();
                self.tehais.sort();
                self.furos.clear();
                self.ho.clear();
                self.sutehais.clear();
                self.reach_state = ReachState::None;
                self.reach_ho_index = None;
                self.num_pipais = INITIAL_PIPAIS;
                self.num_kans = 0;
                self.kuikae.clear();
            }
            Action::Tsumo { actor, pai } => {
                self.num_pipais = self.num_pipais.saturating_sub(1);
                if self.is_me(*actor) {
                    // Kept last until the next discard.
                    self.tehais.push(*pai);
                }
            }
            Action::Dahai { actor, pai, .. } if self.is_me(*actor) => {
                self.remove_tehai(pai);
                self.tehais.sort();
                if self.reach_state == ReachState::Declared && self.reach_ho_index.is_none() {
                    self.reach_ho_index = Some(self.ho.len());
                }
                self.ho.push(*pai);
                self.sutehais.push(*pai);
                self.kuikae.clear();
            }
            Action::Chi {
                actor,
                target,
                pai,
                consumed,
            } => self.on_call(FuroKind::Chi, *actor, *target, *pai, consumed),
            Action::Pon {
                actor,
                target,
                pai,
                consumed,
            } => self.on_call(FuroKind::Pon, *actor, *target, *pai, consumed),
            Action::Daiminkan {
                actor,
                target,
                pai,
                consumed,
            } => self.on_call(FuroKind::Daiminkan, *actor, *target, *pai, consumed),
            Action::Ankan { actor, consumed } => {
                self.num_kans += 1;
                if self.is_me(*actor) {
                    for pai in consumed {
                        self.remove_tehai(pai);
                    }
                    self.furos.push(Furo {
                        kind: FuroKind::Ankan,
                        taken: None,
                        consumed: consumed.clone(),
                        target: None,
                    });
                }
            }
            Action::Kakan { actor, pai, .. } => {
                self.num_kans += 1;
                if self.is_me(*actor) {
                    self.remove_tehai(pai);
                    self.tehais.sort();
                    if let Some(furo) = self.furos.iter_mut().find(|f| {
                        f.kind == FuroKind::Pon && f.taken.is_some_and(|t| t.same_symbol(pai))
                    }) {
                        furo.kind = FuroKind::Kakan;
                        furo.consumed.push(*pai);
                    }
                }
            }
            Action::Reach { actor } if self.is_me(*actor) => {
                self.reach_state = ReachState::Declared;
            }
            Action::ReachAccepted {
                actor,
                deltas,
                scores,
            } => {
                if self.is_me(*actor) {
                    self.reach_state = ReachState::Accepted;
                }
                if !self.apply_scores(deltas, scores) {
                    self.scores[*actor] -= self.rule.reach_cost;
                }
            }
            Action::Hora { deltas, scores, .. } | Action::Ryukyoku { deltas, scores, .. } => {
                self.apply_scores(deltas, scores);
            }
            _ => {}
        }

        if !matches!(action, Action::Log { .. } | Action::Error { .. }) {
            self.last_action = Some(action.clone());
        }
    }

    fn on_call(&mut self, kind: FuroKind, actor: usize, target: usize, pai: Pai, consumed: &[Pai]) {
        if kind == FuroKind::Daiminkan {
            self.num_kans += 1;
        }
        if self.is_me(target) {
            self.ho.pop();
        }
        if !self.is_me(actor) {
            return;
        }
        for c in consumed {
            self.remove_tehai(c);
        }
        self.furos.push(Furo {
            kind,
            taken: Some(pai),
            consumed: consumed.to_vec(),
            target: Some(target),
        });
        if self.rule.kuikae_forbidden {
            self.kuikae = forbidden_after_call(kind, pai, consumed);
        }
    }

    /// Scores from an explicit table, else by deltas. False when neither is given.
    fn apply_scores(
        &mut self,
        deltas: &Option<[i32; NUM_PLAYERS]>,
        scores: &Option<[i32; NUM_PLAYERS]>,
    ) -> bool {
        match (scores, deltas) {
            (Some(scores), _) => self.scores = *scores,
            (None, Some(deltas)) => {
                for (score, delta) in self.scores.iter_mut().zip(deltas) {
                    *score += delta;
                }
            }
            (None, None) => return false,
        }
        true
    }

    fn remove_tehai(&mut self, pai: &Pai) {
        let idx = self
            .tehais
            .iter()
            .position(|t| t == pai)
            .or_else(|| self.tehais.iter().position(|t| t.same_symbol(pai)));
        if let Some(idx) = idx {
            self.tehais.remove(idx);
        }
    }

    pub fn id(&self) -> Option<usize> {
        self.id
    }

    pub fn rule(&self) -> &GameRule {
        &self.rule
    }

    pub fn tehais(&self) -> &[Pai] {
        &self.tehais
    }

    pub fn furos(&self) -> &[Furo] {
        &self.furos
    }

    pub fn ho(&self) -> &[Pai] {
        &self.ho
    }

    pub fn sutehais(&self) -> &[Pai] {
        &self.sutehais
    }

    pub fn reach_state(&self) -> ReachState {
        self.reach_state
    }

    pub fn reach_ho_index(&self) -> Option<usize> {
        self.reach_ho_index
    }

    pub fn scores(&self) -> [i32; NUM_PLAYERS] {
        self.scores
    }

    pub fn score(&self) -> i32 {
        self.id
            .map_or(self.rule.starting_score, |id| self.scores[id])
    }

    pub fn bakaze(&self) -> Option<Wind> {
        self.bakaze
    }

    pub fn jikaze(&self) -> Option<Wind> {
        Some(Wind::of_seat(self.id?, self.oya?))
    }

    pub fn num_pipais(&self) -> u32 {
        self.num_pipais
    }

    pub fn last_action(&self) -> Option<&Action> {
        self.last_action.as_ref()
    }

    /// The tile just drawn, while it is still this seat's turn to act on it.
    pub fn tsumo_pai(&self) -> Option<Pai> {
        match self.last_action {
            Some(Action::Tsumo { actor, .. }) if self.is_me(actor) => self.tehais.last().copied(),
            _ => None,
        }
    }

    pub fn is_menzen(&self) -> bool {
        self.furos.iter().all(Furo::is_concealed)
    }

    pub fn possible_dahais(&self) -> Vec<Pai> {
        let mut pais: Vec<Pai> = match self.reach_state {
            ReachState::Accepted => self.tehais.last().copied().into_iter().collect(),
            ReachState::Declared => self.tenpai_discards(),
            ReachState::None => self
                .tehais
                .iter()
                .filter(|p| p.tile_type().is_some_and(|t| !self.kuikae.contains(&t)))
                .copied()
                .collect(),
        };
        pais.sort();
        pais.dedup();
        pais
    }

    /// Discards after which the hand is still tenpai.
    fn tenpai_discards(&self) -> Vec<Pai> {
        let counts = hand::counts_of(&self.tehais);
        let mut pais: Vec<Pai> = self
            .tehais
            .iter()
            .filter(|p| {
                p.tile_type().is_some_and(|t| {
                    let mut rest = counts;
                    rest[t] -= 1;
                    hand::is_tenpai(&rest)
                })
            })
            .copied()
            .collect();
        pais.sort();
        pais.dedup();
        pais
    }

    pub fn possible_furo_actions(&self) -> Vec<Action> {
        let Some(me) = self.id else {
            return Vec::new();
        };
        if self.num_pipais == 0 {
            return Vec::new();
        }
        match self.last_action {
            Some(Action::Dahai { actor, pai, .. }) if actor != me => self.claims_on(me, actor, pai),
            Some(Action::Tsumo { actor, .. }) if actor == me => self.kans_after_draw(me),
            _ => Vec::new(),
        }
    }

    fn claims_on(&self, me: usize, discarder: usize, pai: Pai) -> Vec<Action> {
        if self.reach_state != ReachState::None {
            return Vec::new();
        }
        let mut actions = Vec::new();

        let same: Vec<Pai> = self
            .tehais
            .iter()
            .filter(|t| t.same_symbol(&pai))
            .copied()
            .collect();
        let mut pon_options: Vec<Vec<Pai>> = Vec::new();
        for i in 0..same.len() {
            for j in i + 1..same.len() {
                let mut consumed = vec![same[i], same[j]];
                consumed.sort();
                if !pon_options.contains(&consumed) {
                    pon_options.push(consumed);
                }
            }
        }
        for consumed in pon_options {
            if self.leaves_discard(&consumed, &forbidden_after_call(FuroKind::Pon, pai, &consumed)) {
                actions.push(Action::Pon {
                    actor: me,
                    target: discarder,
                    pai,
                    consumed,
                });
            }
        }
        if same.len() >= 3 && self.num_kans < MAX_KANS {
            actions.push(Action::Daiminkan {
                actor: me,
                target: discarder,
                pai,
                consumed: same,
            });
        }

        if (discarder + 1) % NUM_PLAYERS == me {
            actions.extend(self.chi_options(me, discarder, pai));
        }
        actions
    }

    fn chi_options(&self, me: usize, discarder: usize, pai: Pai) -> Vec<Action> {
        let (Some(suit), Some(n)) = (pai.suit(), pai.number()) else {
            return Vec::new();
        };
        if suit == Suit::Jihai {
            return Vec::new();
        }
        let n = i16::from(n);
        let variants = |number: i16| -> Vec<Pai> {
            if !(1..=9).contains(&number) {
                return Vec::new();
            }
            let mut found: Vec<Pai> = self
                .tehais
                .iter()
                .filter(|t| t.suit() == Some(suit) && t.number().map(i16::from) == Some(number))
                .copied()
                .collect();
            found.sort();
            found.dedup();
            found
        };

        let mut actions = Vec::new();
        for (a, b) in [(-2, -1), (-1, 1), (1, 2)] {
            for &low in &variants(n + a) {
                for &high in &variants(n + b) {
                    let consumed = vec![low, high];
                    let forbidden = forbidden_after_call(FuroKind::Chi, pai, &consumed);
                    if self.leaves_discard(&consumed, &forbidden) {
                        actions.push(Action::Chi {
                            actor: me,
                            target: discarder,
                            pai,
                            consumed,
                        });
                    }
                }
            }
        }
        actions
    }

    /// Some tile could still be discarded after calling with `consumed`.
    fn leaves_discard(&self, consumed: &[Pai], forbidden: &[usize]) -> bool {
        let mut rest = self.tehais.clone();
        for c in consumed {
            if let Some(idx) = rest.iter().position(|t| t == c) {
                rest.remove(idx);
            }
        }
        rest.iter().any(|t| {
            !self.rule.kuikae_forbidden || t.tile_type().is_some_and(|tt| !forbidden.contains(&tt))
        })
    }

    fn kans_after_draw(&self, me: usize) -> Vec<Action> {
        if self.reach_state != ReachState::None || self.num_kans >= MAX_KANS {
            return Vec::new();
        }
        let mut actions = Vec::new();

        let counts = hand::counts_of(&self.tehais);
        for (tile_type, &count) in counts.iter().enumerate() {
            if count < 4 {
                continue;
            }
            let consumed: Vec<Pai> = self
                .tehais
                .iter()
                .filter(|t| t.tile_type() == Some(tile_type))
                .copied()
                .collect();
            actions.push(Action::Ankan { actor: me, consumed });
        }

        for furo in self.furos.iter().filter(|f| f.kind == FuroKind::Pon) {
            let Some(taken) = furo.taken else { continue };
            if let Some(added) = self.tehais.iter().find(|t| t.same_symbol(&taken)) {
                actions.push(Action::Kakan {
                    actor: me,
                    pai: *added,
                    consumed: furo.pais(),
                });
            }
        }
        actions
    }

    pub fn can_reach(&self) -> bool {
        self.reach_state == ReachState::None
            && self.is_menzen()
            && self.tsumo_pai().is_some()
            && self.score() >= self.rule.reach_cost
            && self.num_pipais >= NUM_PLAYERS as u32
            && !self.tenpai_discards().is_empty()
    }

    /// Complete shape with the drawn or discarded tile. Yaku are not checked.
    pub fn can_hora(&self) -> bool {
        let Some(me) = self.id else {
            return false;
        };
        match self.last_action {
            Some(Action::Tsumo { actor, .. }) if actor == me => {
                hand::is_agari(&hand::counts_of(&self.tehais))
            }
            Some(Action::Dahai { actor, pai, .. }) | Some(Action::Kakan { actor, pai, .. })
                if actor != me =>
            {
                self.can_ron(pai)
            }
            _ => false,
        }
    }

    fn can_ron(&self, pai: Pai) -> bool {
        let Some(tile_type) = pai.tile_type() else {
            return false;
        };
        let waits = hand::waits(&hand::counts_of(&self.tehais));
        waits.contains(&tile_type) && !self.is_furiten(&waits)
    }

    /// A wait is among this seat's own discards.
    pub fn is_furiten(&self, waits: &[usize]) -> bool {
        self.sutehais
            .iter()
            .filter_map(Pai::tile_type)
            .any(|t| waits.contains(&t))
    }
}

/// Tile types the caller may not discard right after the call: the called
/// tile itself, and for a chi taken at one end, the tile across the run.
fn forbidden_after_call(kind: FuroKind, pai: Pai, consumed: &[Pai]) -> Vec<usize> {
    let (Some(t), Some(n)) = (pai.tile_type(), pai.number()) else {
        return Vec::new();
    };
    let mut forbidden = vec![t];
    if kind == FuroKind::Chi {
        let numbers: Vec<u8> = consumed.iter().filter_map(Pai::number).collect();
        if numbers.iter().all(|&c| c > n) && n <= 6 {
            forbidden.push(t + 3);
        } else if numbers.iter().all(|&c| c < n) && n >= 4 {
            forbidden.push(t - 3);
        }
    }
    forbidden
}
