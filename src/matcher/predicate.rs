//! Positional letter predicates
//!
//! Position rule for a word `c[0..len]`:
//! - beginning: the letter is `c[0]`
//! - end: the letter is `c[len - 1]`
//! - middle: the letter is some `c[i]` with `0 < i < len - 1`
//!
//! Predicates are checked independently, so in a one-letter word the same
//! character is both the beginning and the end.

use crate::types::{Letter, MatchMode, Position, PositionFlags};

/// Composable word predicate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Matcher {
    /// Matches no word
    Nothing,
    /// Letter anywhere in the word
    Contains(Letter),
    /// Letter is the first character
    StartsWith(Letter),
    /// Letter at a strictly interior index
    Interior(Letter),
    /// Letter is the last character
    EndsWith(Letter),
    /// Every inner matcher holds
    All(Vec<Matcher>),
    /// At least one inner matcher holds
    Any(Vec<Matcher>),
}

impl Matcher {
    /// Derive the matcher for a query.
    ///
    /// An unselected letter or an empty position set yields [`Matcher::Nothing`]
    /// in both modes.
    pub fn derive(letter: Option<Letter>, positions: PositionFlags, mode: MatchMode) -> Self {
        let Some(letter) = letter else {
            return Matcher::Nothing;
        };

        if mode == MatchMode::Any && positions.is_full() {
            return Matcher::Contains(letter);
        }

        let mut parts: Vec<Matcher> = positions
            .enabled()
            .into_iter()
            .map(|position| Matcher::at(letter, position))
            .collect();

        match parts.len() {
            0 => Matcher::Nothing,
            1 => parts.remove(0),
            _ => match mode {
                MatchMode::Any => Matcher::Any(parts),
                MatchMode::All => Matcher::All(parts),
            },
        }
    }

    /// Predicate for a single position
    pub fn at(letter: Letter, position: Position) -> Self {
        match position {
            Position::Beginning => Matcher::StartsWith(letter),
            Position::Middle => Matcher::Interior(letter),
            Position::End => Matcher::EndsWith(letter),
        }
    }

    /// Evaluate against a word, ignoring case
    pub fn is_match(&self, word: &str) -> bool {
        match self {
            Matcher::Nothing => false,
            Matcher::Contains(letter) => word.chars().any(|c| letter.matches(c)),
            Matcher::StartsWith(letter) => word.chars().next().is_some_and(|c| letter.matches(c)),
            Matcher::EndsWith(letter) => word.chars().next_back().is_some_and(|c| letter.matches(c)),
            Matcher::Interior(letter) => {
                let mut chars = word.chars();
                chars.next();
                chars.next_back();
                chars.any(|c| letter.matches(c))
            }
            // An empty conjunction never comes out of `derive`; treat it as closed
            Matcher::All(parts) => !parts.is_empty() && parts.iter().all(|m| m.is_match(word)),
            Matcher::Any(parts) => parts.iter().any(|m| m.is_match(word)),
        }
    }

    pub fn is_nothing(&self) -> bool {
        matches!(self, Matcher::Nothing)
    }
}

impl std::fmt::Display for Matcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Matcher::Nothing => write!(f, "nothing"),
            Matcher::Contains(l) => write!(f, "contains '{}'", l),
            Matcher::StartsWith(l) => write!(f, "starts with '{}'", l),
            Matcher::Interior(l) => write!(f, "has '{}' in the middle", l),
            Matcher::EndsWith(l) => write!(f, "ends with '{}'", l),
            Matcher::All(parts) => write_joined(f, parts, " and "),
            Matcher::Any(parts) => write_joined(f, parts, " or "),
        }
    }
}

fn write_joined(f: &mut std::fmt::Formatter<'_>, parts: &[Matcher], sep: &str) -> std::fmt::Result {
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            write!(f, "{}", sep)?;
        }
        write!(f, "{}", part)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letter(c: char) -> Letter {
        Letter::from_char(c).unwrap()
    }

    #[test]
    fn test_position_predicates() {
        let e = letter('e');
        assert!(Matcher::StartsWith(e).is_match("egg"));
        assert!(!Matcher::StartsWith(e).is_match("tree"));
        assert!(Matcher::EndsWith(e).is_match("apple"));
        assert!(!Matcher::EndsWith(e).is_match("zebra"));
        assert!(Matcher::Interior(e).is_match("zebra"));
        assert!(Matcher::Interior(e).is_match("tree"));
        assert!(!Matcher::Interior(e).is_match("egg"));
        assert!(!Matcher::Interior(e).is_match("apple"));
    }

    #[test]
    fn test_case_insensitive() {
        let e = letter('E');
        assert!(Matcher::StartsWith(e).is_match("Egg"));
        assert!(Matcher::Contains(e).is_match("TREE"));
    }

    #[test]
    fn test_short_words() {
        let a = letter('a');
        assert!(Matcher::StartsWith(a).is_match("a"));
        assert!(Matcher::EndsWith(a).is_match("a"));
        assert!(!Matcher::Interior(a).is_match("a"));
        assert!(!Matcher::Interior(a).is_match("aa"));
        assert!(Matcher::Interior(a).is_match("bab"));

        for m in [
            Matcher::Contains(a),
            Matcher::StartsWith(a),
            Matcher::Interior(a),
            Matcher::EndsWith(a),
        ] {
            assert!(!m.is_match(""));
        }
    }

    #[test]
    fn test_derive_shapes() {
        let e = letter('e');

        assert_eq!(
            Matcher::derive(Some(e), PositionFlags::default(), MatchMode::Any),
            Matcher::Contains(e)
        );
        assert_eq!(
            Matcher::derive(Some(e), PositionFlags::only(Position::End), MatchMode::All),
            Matcher::EndsWith(e)
        );
        assert_eq!(
            Matcher::derive(Some(e), PositionFlags::new(true, false, true), MatchMode::Any),
            Matcher::Any(vec![Matcher::StartsWith(e), Matcher::EndsWith(e)])
        );
        assert_eq!(
            Matcher::derive(Some(e), PositionFlags::default(), MatchMode::All),
            Matcher::All(vec![
                Matcher::StartsWith(e),
                Matcher::Interior(e),
                Matcher::EndsWith(e)
            ])
        );
    }

    #[test]
    fn test_degenerate_queries_match_nothing() {
        let e = letter('e');
        for mode in [MatchMode::Any, MatchMode::All] {
            assert!(Matcher::derive(Some(e), PositionFlags::none(), mode).is_nothing());
            assert!(Matcher::derive(None, PositionFlags::default(), mode).is_nothing());
        }
        assert!(!Matcher::Nothing.is_match("e"));
        assert!(!Matcher::All(Vec::new()).is_match("e"));
        assert!(!Matcher::Any(Vec::new()).is_match("e"));
    }

    #[test]
    fn test_any_all_positions_is_contains() {
        let words = ["egg", "tree", "apple", "zebra", "sky", "e", "ee", "bee"];
        for c in ['e', 'a', 'y', 'k'] {
            let l = letter(c);
            let any_all = Matcher::Any(vec![
                Matcher::StartsWith(l),
                Matcher::Interior(l),
                Matcher::EndsWith(l),
            ]);
            for word in words {
                assert_eq!(any_all.is_match(word), word.contains(c), "{} / {}", c, word);
                assert_eq!(Matcher::Contains(l).is_match(word), word.contains(c));
            }
        }
    }

    #[test]
    fn test_all_mode_conjunction() {
        let a = letter('a');
        let m = Matcher::derive(Some(a), PositionFlags::new(true, false, true), MatchMode::All);
        assert!(m.is_match("area"));
        assert!(m.is_match("alpaca"));
        assert!(m.is_match("a"));
        assert!(!m.is_match("apple"));
        assert!(!m.is_match("banana"));

        let m = Matcher::derive(Some(a), PositionFlags::default(), MatchMode::All);
        assert!(m.is_match("alpaca"));
        assert!(!m.is_match("area"));
    }

    #[test]
    fn test_display() {
        let e = letter('e');
        let m = Matcher::derive(Some(e), PositionFlags::new(true, false, true), MatchMode::All);
        assert_eq!(m.to_string(), "starts with 'E' and ends with 'E'");
        let m = Matcher::derive(Some(e), PositionFlags::new(false, true, true), MatchMode::Any);
        assert_eq!(m.to_string(), "has 'E' in the middle or ends with 'E'");
    }
}
