use std::str::FromStr;

use anyhow::{Context, bail};
use sweeper_core::{Coord, Coord2};

pub(crate) const HELP: &str = "\
commands:
  r <row> <col>   reveal a cell, or chord a revealed number
  f <row> <col>   toggle a flag
  p <row> <col>   show which cells a press would hold down
  n               new game
  h               this help
  q               quit";

/// One line of player input, already mapped to a board action.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    Press(Coord2),
    NewGame,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|part| !part.is_empty());
        let Some(verb) = parts.next() else {
            bail!("empty command");
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "r" | "reveal" => Command::Reveal(parse_coords(&mut parts)?),
            "f" | "flag" => Command::Flag(parse_coords(&mut parts)?),
            "p" | "press" => Command::Press(parse_coords(&mut parts)?),
            "n" | "new" => Command::NewGame,
            "h" | "help" | "?" => Command::Help,
            "q" | "quit" | "exit" => Command::Quit,
            other => bail!("unknown command {other:?}"),
        };

        if let Some(extra) = parts.next() {
            bail!("unexpected {extra:?} after command");
        }
        Ok(command)
    }
}

fn parse_coords<'a>(parts: &mut impl Iterator<Item = &'a str>) -> anyhow::Result<Coord2> {
    let row = parse_axis(parts.next(), "row")?;
    let col = parse_axis(parts.next(), "col")?;
    Ok((row, col))
}

fn parse_axis(part: Option<&str>, name: &str) -> anyhow::Result<Coord> {
    let part = part.with_context(|| format!("missing {name}"))?;
    part.parse()
        .with_context(|| format!("{name} must be a number between 0 and {}", Coord::MAX))
}
