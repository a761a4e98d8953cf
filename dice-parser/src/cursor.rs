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

//! Character level scanner used by the grammar in [`crate::parser`].
//!
//! A [`Cursor`] only remembers the text that is still left to read. Every read
//! skips leading whitespace first and leaves the cursor untouched, whitespace
//! included, when it does not match. Callers only need [`Cursor::checkpoint`]
//! when a rule spans several reads.

use nom::{
    bytes::complete::{tag_no_case, take_while},
    character::complete::digit1,
    combinator::map_res,
    IResult,
};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Cursor<'a> {
    text: &'a str,
}

fn whitespace(input: &str) -> IResult<&str, &str> {
    take_while(char::is_whitespace)(input)
}

pub fn parse_u32(input: &str) -> IResult<&str, u32> {
    map_res(digit1, |s: &str| s.parse::<u32>())(input)
}

fn literal<'a>(input: &'a str, expected: &str) -> IResult<&'a str, &'a str> {
    tag_no_case(expected)(input)
}

impl<'a> Cursor<'a> {
    pub fn new(text: &'a str) -> Cursor<'a> {
        Cursor { text }
    }

    /// Text not consumed yet, including any leading whitespace.
    pub fn remaining(&self) -> &'a str {
        self.text
    }

    pub fn skip_whitespace(&mut self) {
        if let Ok((rest, _)) = whitespace(self.text) {
            self.text = rest;
        }
    }

    pub fn is_exhausted(&mut self) -> bool {
        self.skip_whitespace();
        self.text.is_empty()
    }

    fn scan<T, F>(&mut self, scanner: F) -> Option<T>
    where
        F: FnOnce(&'a str) -> IResult<&'a str, T>,
    {
        let start = whitespace(self.text).map_or(self.text, |(rest, _)| rest);
        match scanner(start) {
            Ok((rest, value)) => {
                self.text = rest;
                Some(value)
            }
            Err(_) => None,
        }
    }

    /// Reads a run of decimal digits. A run that does not fit into a `u32` is
    /// handled like a missing one.
    pub fn read_unsigned_int(&mut self) -> Option<u32> {
        self.scan(parse_u32)
    }

    /// Reads an optionally signed integer. Whitespace is allowed between the
    /// sign and the digits. A sign without digits is not consumed.
    pub fn read_signed_int(&mut self) -> Option<i64> {
        let checkpoint = self.checkpoint();
        let sign = if self.consume_literal("+") {
            1
        } else if self.consume_literal("-") {
            -1
        } else {
            return self.read_unsigned_int().map(i64::from);
        };
        match self.read_unsigned_int() {
            Some(value) => Some(sign * i64::from(value)),
            None => {
                self.restore_from(checkpoint);
                None
            }
        }
    }

    /// Consumes `expected` if the remaining text starts with it, ignoring ASCII case.
    pub fn consume_literal(&mut self, expected: &str) -> bool {
        self.scan(|input| literal(input, expected)).is_some()
    }

    pub fn checkpoint(&self) -> Cursor<'a> {
        *self
    }

    pub fn restore_from(&mut self, checkpoint: Cursor<'a>) {
        *self = checkpoint;
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    fn unsigned(input: &str) -> (&str, Option<u32>) {
        let mut cursor = Cursor::new(input);
        let value = cursor.read_unsigned_int();
        (cursor.remaining(), value)
    }

    fn signed(input: &str) -> (&str, Option<i64>) {
        let mut cursor = Cursor::new(input);
        let value = cursor.read_signed_int();
        (cursor.remaining(), value)
    }

    fn literal_of<'a>(input: &'a str, expected: &str) -> (&'a str, bool) {
        let mut cursor = Cursor::new(input);
        let value = cursor.consume_literal(expected);
        (cursor.remaining(), value)
    }

    #[test]
    fn test_parse_u32() {
        assert_eq!(parse_u32("1"), Ok(("", 1)));
        assert_eq!(parse_u32("0"), Ok(("", 0)));
        assert_eq!(parse_u32("6969d"), Ok(("d", 6969)));
        assert_eq!(parse_u32("4294967295"), Ok(("", 4294967295)));
        assert!(parse_u32("4294967296").is_err());
        assert!(parse_u32("-1").is_err());
        assert!(parse_u32("").is_err());
    }

    #[test]
    fn test_skip_whitespace() {
        let mut cursor = Cursor::new(" \t\n d6 ");
        cursor.skip_whitespace();
        assert_eq!(cursor.remaining(), "d6 ");
        cursor.skip_whitespace();
        assert_eq!(cursor.remaining(), "d6 ");
    }

    #[test]
    fn test_is_exhausted() {
        assert!(Cursor::new("").is_exhausted());
        assert!(Cursor::new(" \t \r\n").is_exhausted());
        assert!(!Cursor::new("  ;").is_exhausted());
    }

    #[test]
    fn test_read_unsigned_int() {
        assert_eq!(unsigned("12d6"), ("d6", Some(12)));
        assert_eq!(unsigned("  7 "), (" ", Some(7)));
        assert_eq!(unsigned("0"), ("", Some(0)));
        assert_eq!(unsigned("d6"), ("d6", None));
        assert_eq!(unsigned("  x"), ("  x", None));
        assert_eq!(unsigned("-3"), ("-3", None));
        assert_eq!(unsigned(""), ("", None));
        assert_eq!(unsigned("99999999999"), ("99999999999", None));
    }

    #[test]
    fn test_read_signed_int() {
        assert_eq!(signed("5"), ("", Some(5)));
        assert_eq!(signed("+5"), ("", Some(5)));
        assert_eq!(signed("-5;"), (";", Some(-5)));
        assert_eq!(signed(" - 15"), ("", Some(-15)));
        assert_eq!(signed("+ 3 &"), (" &", Some(3)));
        assert_eq!(signed("-4294967295"), ("", Some(-4294967295)));
        assert_eq!(signed("+ xyzzy"), ("+ xyzzy", None));
        assert_eq!(signed("-"), ("-", None));
        assert_eq!(signed("d4"), ("d4", None));
    }

    #[test]
    fn test_consume_literal() {
        assert_eq!(literal_of("d6", "d"), ("6", true));
        assert_eq!(literal_of("D6", "d"), ("6", true));
        assert_eq!(literal_of("  X3d8", "x"), ("3d8", true));
        assert_eq!(literal_of(" ; d4", ";"), (" d4", true));
        assert_eq!(literal_of("hi", "d"), ("hi", false));
        assert_eq!(literal_of("", "&"), ("", false));
    }

    #[test]
    fn test_checkpoint_restore() {
        let mut cursor = Cursor::new("4x3d8-5");
        let checkpoint = cursor.checkpoint();
        assert_eq!(cursor.read_unsigned_int(), Some(4));
        assert!(cursor.consume_literal("x"));
        assert_eq!(cursor.read_unsigned_int(), Some(3));
        cursor.restore_from(checkpoint);
        assert_eq!(cursor.remaining(), "4x3d8-5");
        assert_eq!(checkpoint.remaining(), "4x3d8-5");
    }

    #[test]
    fn test_failed_reads_consume_nothing() {
        let mut cursor = Cursor::new("  +q");
        assert_eq!(cursor.read_signed_int(), None);
        assert_eq!(cursor.read_unsigned_int(), None);
        assert!(!cursor.consume_literal("d"));
        assert_eq!(cursor.remaining(), "  +q");
    }
}
