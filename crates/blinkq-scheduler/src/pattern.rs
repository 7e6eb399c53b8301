//! Blink bit patterns parsed from `0`/`1` strings

use core::fmt;
use core::str::FromStr;

use heapless::Vec;

/// Maximum number of bits a single pattern can hold.
pub const MAX_PATTERN_BITS: usize = 64;

/// An ordered, non-empty bit sequence making up one repeat unit of a blink.
///
/// Index 0 is driven first. Bit `1` maps to the active pin level, `0` to the
/// inactive level (subject to the worker's polarity).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    bits: Vec<bool, MAX_PATTERN_BITS>,
}

impl Pattern {
    /// Parse a pattern from a string of `0`/`1` symbols.
    pub fn parse(symbols: &str) -> Result<Self, PatternError> {
        if symbols.is_empty() {
            return Err(PatternError::Empty);
        }
        let mut bits = Vec::new();
        for symbol in symbols.chars() {
            let bit = match symbol {
                '0' => false,
                '1' => true,
                other => return Err(PatternError::InvalidSymbol(other)),
            };
            bits.push(bit)
                .map_err(|_| PatternError::TooLong(symbols.len()))?;
        }
        Ok(Self { bits })
    }

    /// Pattern holding a single bit.
    pub(crate) fn single(bit: bool) -> Self {
        let mut bits = Vec::new();
        bits.push(bit).ok();
        Self { bits }
    }

    /// Number of bits in one pass.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Always `false`: patterns are non-empty by construction.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Iterate over the bits in driving order.
    pub fn bits(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().copied()
    }
}

impl FromStr for Pattern {
    type Err = PatternError;

    fn from_str(symbols: &str) -> Result<Self, Self::Err> {
        Self::parse(symbols)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.bits() {
            write!(f, "{}", if bit { '1' } else { '0' })?;
        }
        Ok(())
    }
}

/// Why a pattern string was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternError {
    /// The pattern string was empty.
    Empty,
    /// The pattern string exceeded [`MAX_PATTERN_BITS`] symbols.
    TooLong(usize),
    /// The pattern string contained a symbol other than `0` or `1`.
    InvalidSymbol(char),
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternError::Empty => write!(f, "pattern is empty"),
            PatternError::TooLong(len) => {
                write!(f, "pattern has {} bits, maximum is {}", len, MAX_PATTERN_BITS)
            }
            PatternError::InvalidSymbol(symbol) => {
                write!(f, "invalid pattern symbol {:?}, expected 0 or 1", symbol)
            }
        }
    }
}

impl core::error::Error for PatternError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_symbols_in_order() {
        let pattern = Pattern::parse("10").unwrap();
        assert_eq!(pattern.len(), 2);
        assert!(pattern.bits().eq([true, false]));
    }

    #[test]
    fn parses_through_from_str() {
        let pattern: Pattern = "0110".parse().unwrap();
        assert!(pattern.bits().eq([false, true, true, false]));
        assert_eq!("2".parse::<Pattern>(), Err(PatternError::InvalidSymbol('2')));
    }

    #[test]
    fn rejects_empty_pattern() {
        assert_eq!(Pattern::parse(""), Err(PatternError::Empty));
    }

    #[test]
    fn rejects_non_binary_symbols() {
        assert_eq!(Pattern::parse("10x01"), Err(PatternError::InvalidSymbol('x')));
        assert_eq!(Pattern::parse(" 10"), Err(PatternError::InvalidSymbol(' ')));
    }

    #[test]
    fn rejects_over_long_pattern() {
        let too_long = "1".repeat(MAX_PATTERN_BITS + 1);
        assert_eq!(
            Pattern::parse(&too_long),
            Err(PatternError::TooLong(MAX_PATTERN_BITS + 1))
        );
        let max = "1".repeat(MAX_PATTERN_BITS);
        assert!(Pattern::parse(&max).is_ok());
    }

    #[test]
    fn display_round_trips() {
        let pattern = Pattern::parse("10000000").unwrap();
        assert_eq!(pattern.to_string(), "10000000");
        assert_eq!(Pattern::single(true).to_string(), "1");
        assert_eq!(Pattern::single(false).to_string(), "0");
    }

    #[test]
    fn errors_describe_the_rejection() {
        assert_eq!(PatternError::Empty.to_string(), "pattern is empty");
        assert_eq!(
            PatternError::TooLong(65).to_string(),
            "pattern has 65 bits, maximum is 64"
        );
        assert_eq!(
            PatternError::InvalidSymbol('x').to_string(),
            "invalid pattern symbol 'x', expected 0 or 1"
        );
    }
}
