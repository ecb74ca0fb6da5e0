//! Short code generation and format validation.
//!
//! Codes are fixed-length strings drawn uniformly from an alphanumeric
//! alphabet. The generator makes no uniqueness promise: collisions are
//! detected by the store's unique constraint and retried by the caller
//! (see [`crate::application::services::LinkService::issue`]).

use rand::Rng;
use std::collections::HashSet;

/// Default alphabet: digits, lowercase and uppercase ASCII letters (62 symbols).
pub const DEFAULT_ALPHABET: &str = "1234567890abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Default code length. 62^5 gives roughly 916 million codes.
pub const DEFAULT_CODE_LENGTH: usize = 5;

/// Errors raised when a generator is configured with unusable parameters.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CodeGeneratorError {
    #[error("code alphabet must not be empty")]
    EmptyAlphabet,

    #[error("code alphabet must be ASCII alphanumeric, found {0:?}")]
    InvalidSymbol(char),

    #[error("code alphabet contains duplicate symbol {0:?}")]
    DuplicateSymbol(char),

    #[error("code length must be greater than zero")]
    ZeroLength,
}

/// Random short code generator.
///
/// # Examples
///
/// ```ignore
/// let generator = CodeGenerator::default();
/// let code = generator.generate();
/// assert_eq!(code.len(), 5);
/// assert!(generator.matches_format(&code));
/// ```
#[derive(Debug, Clone)]
pub struct CodeGenerator {
    alphabet: Vec<char>,
    length: usize,
}

impl CodeGenerator {
    /// Creates a generator for the given alphabet and code length.
    ///
    /// # Errors
    ///
    /// Rejects an empty alphabet, non-alphanumeric or duplicate symbols and a
    /// zero length.
    pub fn new(alphabet: &str, length: usize) -> Result<Self, CodeGeneratorError> {
        if length == 0 {
            return Err(CodeGeneratorError::ZeroLength);
        }
        if alphabet.is_empty() {
            return Err(CodeGeneratorError::EmptyAlphabet);
        }

        let mut seen = HashSet::new();
        for c in alphabet.chars() {
            if !c.is_ascii_alphanumeric() {
                return Err(CodeGeneratorError::InvalidSymbol(c));
            }
            if !seen.insert(c) {
                return Err(CodeGeneratorError::DuplicateSymbol(c));
            }
        }

        Ok(Self {
            alphabet: alphabet.chars().collect(),
            length,
        })
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Draws `length` symbols uniformly from the alphabet.
    pub fn generate(&self) -> String {
        let mut rng = rand::rng();
        (0..self.length)
            .map(|_| self.alphabet[rng.random_range(0..self.alphabet.len())])
            .collect()
    }

    /// Returns `true` if `candidate` could have been produced by a generator
    /// of this length: exact length, ASCII alphanumeric only.
    ///
    /// Used to reject redirect parameters before any store lookup.
    pub fn matches_format(&self, candidate: &str) -> bool {
        candidate.len() == self.length && candidate.bytes().all(|b| b.is_ascii_alphanumeric())
    }
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self {
            alphabet: DEFAULT_ALPHABET.chars().collect(),
            length: DEFAULT_CODE_LENGTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_alphabet_has_62_unique_symbols() {
        let unique: HashSet<char> = DEFAULT_ALPHABET.chars().collect();
        assert_eq!(unique.len(), 62);
        assert!(CodeGenerator::new(DEFAULT_ALPHABET, DEFAULT_CODE_LENGTH).is_ok());
    }

    #[test]
    fn test_generate_code_has_configured_length() {
        let generator = CodeGenerator::default();
        assert_eq!(generator.generate().len(), 5);

        let long = CodeGenerator::new(DEFAULT_ALPHABET, 12).unwrap();
        assert_eq!(long.generate().len(), 12);
    }

    #[test]
    fn test_generate_code_uses_only_alphabet_symbols() {
        let generator = CodeGenerator::new("ab", 32).unwrap();
        let code = generator.generate();
        assert!(code.chars().all(|c| c == 'a' || c == 'b'));
    }

    #[test]
    fn test_generate_code_produces_varied_codes() {
        let generator = CodeGenerator::new(DEFAULT_ALPHABET, 8).unwrap();
        let codes: HashSet<String> = (0..1000).map(|_| generator.generate()).collect();

        assert!(codes.len() > 990);
    }

    #[test]
    fn test_generated_codes_match_format() {
        let generator = CodeGenerator::default();
        for _ in 0..100 {
            assert!(generator.matches_format(&generator.generate()));
        }
    }

    #[test]
    fn test_matches_format_rejects_wrong_length() {
        let generator = CodeGenerator::default();
        assert!(!generator.matches_format("abcd"));
        assert!(!generator.matches_format("abcdef"));
        assert!(!generator.matches_format(""));
    }

    #[test]
    fn test_matches_format_rejects_non_alphanumeric() {
        let generator = CodeGenerator::default();
        assert!(!generator.matches_format("ab-cd"));
        assert!(!generator.matches_format("ab_cd"));
        assert!(!generator.matches_format("ab cd"));
        assert!(!generator.matches_format("abçd"));
        assert!(generator.matches_format("aB3dZ"));
    }

    #[test]
    fn test_new_rejects_empty_alphabet() {
        assert_eq!(
            CodeGenerator::new("", 5).unwrap_err(),
            CodeGeneratorError::EmptyAlphabet
        );
    }

    #[test]
    fn test_new_rejects_zero_length() {
        assert_eq!(
            CodeGenerator::new("abc", 0).unwrap_err(),
            CodeGeneratorError::ZeroLength
        );
    }

    #[test]
    fn test_new_rejects_duplicate_symbol() {
        assert_eq!(
            CodeGenerator::new("abca", 5).unwrap_err(),
            CodeGeneratorError::DuplicateSymbol('a')
        );
    }

    #[test]
    fn test_new_rejects_non_alphanumeric_symbol() {
        assert_eq!(
            CodeGenerator::new("ab-", 5).unwrap_err(),
            CodeGeneratorError::InvalidSymbol('-')
        );
    }
}
