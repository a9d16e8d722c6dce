//! Plain-text table dump for debugging and spectators.

use std::fmt::Write as _;
use std::io;

use crate::action::Action;
use crate::game::Game;
use crate::tile::dump_pais;

impl Game {
    pub fn render_board(&self) -> String {
        let state = self.state();
        let mut out = String::new();
        if let (Some(bakaze), Some(kyoku), Some(honba)) =
            (state.bakaze, state.kyoku_num, state.honba)
        {
            let _ = write!(out, "{}-{} kyoku {} honba  ", bakaze, kyoku, honba);
        }
        if let Some(pipais) = state.num_pipais {
            let _ = write!(out, "pipai: {}  ", pipais);
        }
        if !state.dora_markers.is_empty() {
            let _ = write!(out, "dora_marker: {}  ", dump_pais(&state.dora_markers));
        }
        out.push('\n');

        for (seat, player) in self.players().iter().enumerate() {
            if player.tehais().is_empty() && player.furos().is_empty() {
                continue;
            }
            let is_oya = state.oya == Some(seat);
            let furos: Vec<String> = player.furos().iter().map(ToString::to_string).collect();
            let _ = writeln!(
                out,
                "{}{}{}{} tehai: {} {}",
                if state.last_actor == Some(seat) { "*" } else { " " },
                if is_oya { "{" } else { "[" },
                seat,
                if is_oya { "}" } else { "]" },
                dump_pais(player.tehais()),
                furos.join(" ")
            );
            let ho = player.ho();
            let ho_str = match player.reach_ho_index() {
                Some(idx) if idx <= ho.len() => {
                    format!("{}={}", dump_pais(&ho[..idx]), dump_pais(&ho[idx..]))
                }
                _ => dump_pais(ho),
            };
            let _ = writeln!(out, "     ho:    {}", ho_str);
        }
        out.push_str(&"-".repeat(80));
        out.push('\n');
        out
    }

    /// Write `action` as a JSON line followed by the board.
    pub fn dump_action<W: io::Write>(&self, action: &Action, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}", action)?;
        out.write_all(self.render_board().as_bytes())
    }
}
