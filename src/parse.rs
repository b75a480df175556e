//! A conflict-set file reader, an external collaborator sketched rather
//! than hardened, per §6: the core depends on no particular input format.
//!
//! Mirrors the original project's `ConflictSetsFileParser`: one problem
//! (conflict list) per input line, sets delimited by [`Self::set_separator`],
//! elements by [`Self::element_separator`], optional enclosing brackets
//! stripped, `#`-style line comments, whitespace ignored, empty sets and
//! empty lines dropped.

use std::hash::Hash;
use std::str::FromStr;

use crate::error::Error;
use crate::solution::SolutionSet;

/// Configurable delimiters for [`parse_str`].
#[derive(Debug, Clone)]
pub struct ConflictListParser {
    /// Everything from this character to the end of the line is dropped.
    pub comment_char: char,
    /// Separates conflicts (sets) within one line.
    pub set_separator: char,
    /// Separates elements within one conflict.
    pub element_separator: char,
}

impl Default for ConflictListParser {
    fn default() -> Self {
        Self {
            comment_char: '#',
            set_separator: '|',
            element_separator: ',',
        }
    }
}

impl ConflictListParser {
    /// Parses `input`, one conflict list per non-empty line, using
    /// `parse_element` to turn an element substring into `E`.
    pub fn parse_str<E>(
        &self,
        input: &str,
        parse_element: impl Fn(&str) -> Result<E, Error>,
    ) -> Result<Vec<Vec<SolutionSet<E>>>, Error>
    where
        E: Eq + Hash + Clone,
    {
        input
            .lines()
            .map(|line| self.clean_line(line))
            .filter(|line| !line.is_empty())
            .map(|line| self.line_to_sets(&line, &parse_element))
            .collect()
    }

    fn clean_line(&self, line: &str) -> String {
        let no_whitespace: String = line.chars().filter(|c| !c.is_whitespace()).collect();
        let without_comment = no_whitespace
            .split(self.comment_char)
            .next()
            .unwrap_or("")
            .to_string();
        without_comment
            .chars()
            .filter(|c| !matches!(c, '{' | '}' | '[' | ']' | '(' | ')'))
            .collect()
    }

    fn line_to_sets<E>(
        &self,
        line: &str,
        parse_element: &impl Fn(&str) -> Result<E, Error>,
    ) -> Result<Vec<SolutionSet<E>>, Error>
    where
        E: Eq + Hash + Clone,
    {
        line.trim_matches(self.set_separator)
            .split(self.set_separator)
            .map(|set_as_string| self.string_to_set(set_as_string, parse_element))
            .filter(|set| !matches!(set, Ok(s) if s.is_empty()))
            .collect()
    }

    fn string_to_set<E>(
        &self,
        set_as_string: &str,
        parse_element: &impl Fn(&str) -> Result<E, Error>,
    ) -> Result<SolutionSet<E>, Error>
    where
        E: Eq + Hash + Clone,
    {
        set_as_string
            .trim_matches(self.element_separator)
            .split(self.element_separator)
            .filter(|s| !s.is_empty())
            .map(|s| parse_element(s))
            .collect::<Result<Vec<E>, Error>>()
            .map(SolutionSet::from_iter)
    }
}

/// Parses an element with `FromStr::parse`, wrapping failures as
/// [`Error::Parse`]. A convenience for the common case (`E = i32`, etc.).
pub fn parse_element_via_from_str<E>(token: &str) -> Result<E, Error>
where
    E: FromStr,
{
    token
        .parse()
        .map_err(|_| Error::Parse(format!("invalid element: {token:?}")))
}
