/*
Copyright 2021 Robin Marchart

   Licensed under the Apache License, Version 2.0 (the "License");
   you may not use this file except in compliance with the License.
   You may obtain a copy of the License at

       http://www.apache.org/licenses/LICENSE-2.0

   Unless required by applicable law or agreed to in writing, software
   distributed under the License is distributed on an "AS IS" BASIS,
   WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
   See the License for the specific language governing permissions and
   limitations under the License.
*/

//! Parse dice notation like `4x3d8-5 ; 12d10+5 & 4d6+2` and roll it.
//!
//! ```rust
//! # use jdice_parser::{parse, roll_with};
//! # use rand::SeedableRng;
//! # use rand_xoshiro::Xoshiro256PlusPlus;
//! let rolls = parse("2x d20+3 ; d6").unwrap();
//! assert_eq!(rolls.len(), 3);
//! assert_eq!(rolls[2].to_string(), "1d6");
//!
//! let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
//! for result in roll_with("12d10+5 & 4d6+2", &mut rng).unwrap() {
//!     println!("{}", result);
//! }
//! ```

#[cfg(feature = "parser")]
pub mod cursor;
#[cfg(feature = "roll")]
pub mod dice_roll;
pub mod dice_types;
pub mod limits;
#[cfg(feature = "parser")]
pub mod parser;

pub use dice_types::*;
#[cfg(feature = "parser")]
pub use parser::{parse, parse_labeled, ParseError};

#[cfg(all(feature = "parser", feature = "roll"))]
use dice_roll::SequenceEvaluate;

/// Parses the notation and rolls every entry with the thread local rng.
#[cfg(all(feature = "parser", feature = "roll"))]
pub fn roll(notation: &str) -> Result<Vec<RollResult>, ParseError> {
    roll_with(notation, &mut rand::thread_rng())
}

/// Same as [`roll`] with a caller supplied rng.
#[cfg(all(feature = "parser", feature = "roll"))]
pub fn roll_with<R: rand::Rng>(
    notation: &str,
    rng: &mut R,
) -> Result<Vec<RollResult>, ParseError> {
    Ok(parse(notation)?.evaluate(rng))
}
