//! Parser configuration: optional grammar features and semantic limits.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SqlError};

bitflags::bitflags! {
    /// Optional grammar constructs, toggled per parser.
    ///
    /// The set is closed; a feature the grammar does not check is simply
    /// never consulted.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Features: u16 {
        /// `ROLLUP`, `CUBE` and `GROUPING SETS` in GROUP BY.
        const GROUPING = 1;
        /// Infix `&`, `|`, `^`, `<<` and `>>`.
        const INFIX_BIT_OPERATORS = 1 << 1;
        /// `&&` as AND and `||` as OR.
        const INFIX_LOGICAL_OPERATORS = 1 << 2;
        /// Infix `%`.
        const INFIX_MOD = 1 << 3;
        /// Infix `DIV` (integer division).
        const DIV_OPERATOR = 1 << 4;
        /// `UNSIGNED` numeric types.
        const UNSIGNED = 1 << 5;
        /// `"..."` is a string literal instead of a quoted identifier.
        const DOUBLE_QUOTED_STRING = 1 << 6;
    }
}

impl Features {
    /// Looks up a single feature by name, ignoring case and accepting `-`
    /// in place of `_`.
    #[must_use]
    pub fn parse_name(name: &str) -> Option<Self> {
        Self::from_name(&name.trim().to_ascii_uppercase().replace('-', "_"))
    }

    /// Returns the names of the enabled features, in declaration order.
    #[must_use]
    pub fn names(self) -> Vec<&'static str> {
        self.iter_names().map(|(name, _)| name).collect()
    }
}

impl Default for Features {
    fn default() -> Self {
        Self::INFIX_MOD | Self::DIV_OPERATOR
    }
}

impl Serialize for Features {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.names())
    }
}

impl<'de> Deserialize<'de> for Features {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let names = Vec::<String>::deserialize(deserializer)?;
        names.iter().try_fold(Self::empty(), |features, name| {
            Self::parse_name(name)
                .map(|feature| features | feature)
                .ok_or_else(|| serde::de::Error::custom(format!("unknown feature: {name}")))
        })
    }
}

/// How unquoted identifiers are cased by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierCase {
    /// Fold to upper case.
    Upper,
    /// Fold to lower case.
    #[default]
    Lower,
    /// Keep the text as written.
    Preserve,
}

impl IdentifierCase {
    /// Applies the policy to an unquoted identifier.
    #[must_use]
    pub fn apply(self, identifier: &str) -> String {
        match self {
            Self::Upper => identifier.to_uppercase(),
            Self::Lower => identifier.to_lowercase(),
            Self::Preserve => identifier.to_owned(),
        }
    }

    /// Parses a policy name, ignoring case.
    #[must_use]
    pub fn parse_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "upper" => Some(Self::Upper),
            "lower" => Some(Self::Lower),
            "preserve" => Some(Self::Preserve),
            _ => None,
        }
    }
}

/// Default ceiling on identifier length, in characters.
pub const DEFAULT_MAX_IDENTIFIER_LENGTH: usize = 128;

/// Default ceiling on string literal length, in characters.
pub const DEFAULT_MAX_STRING_LENGTH: usize = 65_535;

/// Configuration consulted by the lexer, the grammar and node initializers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Enabled optional grammar features.
    pub features: Features,
    /// Longest accepted identifier, in characters.
    pub max_identifier_length: usize,
    /// Longest accepted string literal, in characters.
    pub max_string_length: usize,
    /// Casing applied to unquoted identifiers.
    pub identifier_case: IdentifierCase,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            features: Features::default(),
            max_identifier_length: DEFAULT_MAX_IDENTIFIER_LENGTH,
            max_string_length: DEFAULT_MAX_STRING_LENGTH,
            identifier_case: IdentifierCase::default(),
        }
    }
}

impl ParserConfig {
    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the feature set.
    #[must_use]
    pub const fn with_features(mut self, features: Features) -> Self {
        self.features = features;
        self
    }

    /// Enables additional features.
    #[must_use]
    pub fn enable(mut self, features: Features) -> Self {
        self.features.insert(features);
        self
    }

    /// Disables features.
    #[must_use]
    pub fn disable(mut self, features: Features) -> Self {
        self.features.remove(features);
        self
    }

    /// Sets the identifier length ceiling.
    #[must_use]
    pub const fn with_max_identifier_length(mut self, max: usize) -> Self {
        self.max_identifier_length = max;
        self
    }

    /// Sets the string literal length ceiling.
    #[must_use]
    pub const fn with_max_string_length(mut self, max: usize) -> Self {
        self.max_string_length = max;
        self
    }

    /// Sets the identifier casing policy.
    #[must_use]
    pub const fn with_identifier_case(mut self, case: IdentifierCase) -> Self {
        self.identifier_case = case;
        self
    }

    /// Returns true if every feature in `features` is enabled.
    #[must_use]
    pub const fn has(&self, features: Features) -> bool {
        self.features.contains(features)
    }

    /// Checks the configuration for values no parser can work with.
    pub fn validate(&self) -> Result<()> {
        if self.max_identifier_length == 0 {
            return Err(SqlError::Config(String::from(
                "max_identifier_length must be positive",
            )));
        }
        if self.max_string_length == 0 {
            return Err(SqlError::Config(String::from(
                "max_string_length must be positive",
            )));
        }
        Ok(())
    }

    /// Rejects identifiers longer than the configured ceiling.
    pub fn check_identifier(&self, identifier: &str) -> Result<()> {
        if identifier.chars().count() > self.max_identifier_length {
            return Err(SqlError::IdentifierTooLong {
                identifier: identifier.to_owned(),
                max: self.max_identifier_length,
            });
        }
        Ok(())
    }

    /// Rejects string literals longer than the configured ceiling.
    pub fn check_string(&self, value: &str) -> Result<()> {
        let length = value.chars().count();
        if length > self.max_string_length {
            return Err(SqlError::StringTooLong {
                length,
                max: self.max_string_length,
            });
        }
        Ok(())
    }
}
