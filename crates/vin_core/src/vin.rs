use std::fmt;

pub const VIN_LEN: usize = 17;

/// A 17 character vehicle identification number.
///
/// Only the character set is checked (`A-Z` minus `I`, `O`, `Q`, plus
/// digits); the check digit is not validated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Vin(String);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VinError {
    #[error("expected 17 characters, got {0}")]
    Length(usize),
    #[error("character {ch:?} at position {position} is not allowed in a VIN")]
    Character { ch: char, position: usize },
}

impl Vin {
    pub fn parse(raw: &str) -> Result<Self, VinError> {
        let len = raw.chars().count();
        if len != VIN_LEN {
            return Err(VinError::Length(len));
        }
        if let Some((position, ch)) = raw.chars().enumerate().find(|(_, c)| !is_vin_char(*c)) {
            return Err(VinError::Character { ch, position });
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_vin_char(c: char) -> bool {
    c.is_ascii_digit() || (c.is_ascii_uppercase() && !matches!(c, 'I' | 'O' | 'Q'))
}

impl fmt::Display for Vin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Vin {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for Vin {
    type Error = VinError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Vin::parse(value)
    }
}
