use jdice_parser::{dice_roll::DieRollEvaluate, parse_labeled, ParseError};
use rand::Rng;

pub const CLEAR: &str = "clear";

#[derive(Debug, PartialEq, Eq)]
pub enum LineResult {
    Skipped,
    Cleared,
    Rolled(Vec<String>),
}

/// Rolls input lines and keeps everything printed so far.
pub struct Session<R: Rng> {
    rng: R,
    show_notation: bool,
    history: Vec<String>,
}

impl<R: Rng> Session<R> {
    pub fn new(rng: R, show_notation: bool) -> Session<R> {
        Session {
            rng,
            show_notation,
            history: Vec::new(),
        }
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn handle(&mut self, line: &str) -> Result<LineResult, ParseError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(LineResult::Skipped);
        }
        if line.eq_ignore_ascii_case(CLEAR) {
            self.history.clear();
            log::info!("history cleared");
            return Ok(LineResult::Cleared);
        }

        let labeled = parse_labeled(line)?;
        let mut output = Vec::with_capacity(labeled.rolls.len() + 1);
        let indent = match labeled.name {
            Some(name) => {
                output.push(name);
                "  "
            }
            None => "",
        };
        for dice in labeled.rolls.iter() {
            let result = dice.evaluate(&mut self.rng);
            output.push(if self.show_notation {
                format!("{}{}  =>  {}", indent, dice, result)
            } else {
                format!("{}{}", indent, result)
            });
        }
        log::info!("rolled {}", line);
        self.history.extend(output.iter().cloned());
        Ok(LineResult::Rolled(output))
    }
}
