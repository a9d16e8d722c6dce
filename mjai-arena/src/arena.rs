//! A full game at one table: seats, referee, walls and dealer rotation.

use tracing::info;

use mjai_engine::action::Action;
use mjai_engine::errors::RefereeResult;
use mjai_engine::game::{ActionObserver, Game};
use mjai_engine::hora::Scorer;
use mjai_engine::player::Player;
use mjai_engine::rule::GameRule;
use mjai_engine::types::{Wind, NUM_PLAYERS};

use crate::kyoku::{KyokuOutcome, KyokuRunner, KyokuSetup};
use crate::wall::{game_seed, Wall};

/// Upper bound on kyokus in one game, renchan included.
const MAX_KYOKUS: usize = 64;

/// How many winds a game runs through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameLength {
    /// East round only (tonpuusen).
    East,
    /// East and South rounds (hanchan).
    EastSouth,
}

impl GameLength {
    fn rounds(self) -> usize {
        match self {
            GameLength::East => 1,
            GameLength::EastSouth => 2,
        }
    }
}

pub struct Arena {
    game: Game,
    seed: [u8; 32],
    scorer: Option<Box<dyn Scorer + Send>>,
    bakaze: Wind,
    kyoku: u8,
    honba: u8,
    kyotaku: u8,
    oya: usize,
    kyokus_played: usize,
}

impl Arena {
    pub fn new(
        players: [Box<dyn Player>; NUM_PLAYERS],
        rule: GameRule,
        seed: u64,
        observer: Option<ActionObserver>,
    ) -> Self {
        Self {
            game: Game::new(players, rule, observer),
            seed: game_seed(seed, 0),
            scorer: None,
            bakaze: Wind::East,
            kyoku: 1,
            honba: 0,
            kyotaku: 0,
            oya: 0,
            kyokus_played: 0,
        }
    }

    pub fn with_scorer(mut self, scorer: Box<dyn Scorer + Send>) -> Self {
        self.scorer = Some(scorer);
        self
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn kyokus_played(&self) -> usize {
        self.kyokus_played
    }

    /// The next kyoku to be played.
    pub fn next_setup(&self) -> KyokuSetup {
        KyokuSetup {
            bakaze: self.bakaze,
            kyoku: self.kyoku,
            honba: self.honba,
            kyotaku: self.kyotaku,
            oya: self.oya,
        }
    }

    pub fn start_game(&mut self, names: Option<Vec<String>>) -> RefereeResult<()> {
        info!("game start");
        self.game.do_action(Action::StartGame { id: None, names })?;
        Ok(())
    }

    /// Deal a freshly shuffled wall and play the kyoku out.
    pub fn play_kyoku(&mut self) -> RefereeResult<KyokuOutcome> {
        let setup = self.next_setup();
        let kyoku_index = (setup.bakaze.index() * NUM_PLAYERS) as u8 + setup.kyoku - 1;
        let wall = Wall::shuffled(self.game.rule(), &self.seed, kyoku_index, setup.honba);
        self.play_kyoku_with(wall)
    }

    /// Play the next kyoku on a prepared wall.
    pub fn play_kyoku_with(&mut self, wall: Wall) -> RefereeResult<KyokuOutcome> {
        let setup = self.next_setup();
        let mut runner = KyokuRunner::new(&mut self.game, wall, setup);
        if let Some(scorer) = self.scorer.as_deref() {
            runner = runner.with_scorer(scorer);
        }
        let outcome = runner.run()?;
        self.kyotaku = runner.kyotaku();
        self.advance(&outcome);
        self.kyokus_played += 1;
        Ok(outcome)
    }

    fn advance(&mut self, outcome: &KyokuOutcome) {
        let renchan = outcome.is_renchan(self.oya);
        let draw = matches!(outcome, KyokuOutcome::Ryukyoku { .. });
        self.honba = if renchan || draw { self.honba + 1 } else { 0 };
        if !renchan {
            self.oya = (self.oya + 1) % NUM_PLAYERS;
            if usize::from(self.kyoku) == NUM_PLAYERS {
                self.kyoku = 1;
                self.bakaze = Wind::from_index(self.bakaze.index() + 1);
            } else {
                self.kyoku += 1;
            }
        }
    }

    fn is_over(&self, length: GameLength) -> bool {
        let busted = self.game.players().iter().any(|p| p.score() < 0);
        let winds_done = self.bakaze.index() >= length.rounds() && self.kyokus_played > 0;
        busted || winds_done || self.kyokus_played >= MAX_KYOKUS
    }

    /// Play kyokus until the last wind is done or a seat goes below zero.
    pub fn play_game(&mut self, length: GameLength) -> RefereeResult<[usize; NUM_PLAYERS]> {
        self.start_game(None)?;
        while !self.is_over(length) {
            self.play_kyoku()?;
        }
        self.finish()
    }

    /// Send `end_game` and rank the seats.
    pub fn finish(&mut self) -> RefereeResult<[usize; NUM_PLAYERS]> {
        self.game.do_action(Action::EndGame)?;
        let ranking = self.game.ranked_players()?;
        info!(?ranking, kyokus = self.kyokus_played, "game over");
        Ok(ranking)
    }
}
