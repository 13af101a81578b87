//! Field value conversion.
//!
//! Every scalar leaf arrives as raw text. The [`ConversionEngine`] looks up a
//! conversion by its `(source, target)` type tag pair and applies it. Tags are
//! case-insensitive; they are normalized once, when a [`TypeTag`] is built.
//!
//! Conversion never fails. Unknown pairs and bad values fall back to the raw
//! text (or `Null` for unparseable integers) and are reported through
//! `tracing` warnings.
//!
//! ```
//! use xmlmap::conversion::ConversionEngine;
//! use xmlmap::OutputValue;
//!
//! let engine = ConversionEngine::new();
//! assert_eq!(
//!     engine.convert(Some("string"), Some("integer"), Some("7777")),
//!     OutputValue::Integer(7777)
//! );
//! ```

mod builtin;
mod clock;
mod states;

pub use builtin::{AgeCalculation, GenderAbbrevToFull, Identity, StateFullToAbbrev, StringToInteger};
pub use clock::{Clock, FixedClock, SystemClock};
pub use states::StateAbbreviations;

use crate::value::OutputValue;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;
use tracing::warn;

/// Type tags understood by the built-in conversions.
pub mod tags {
    pub const STRING: &str = "STRING";
    pub const INTEGER: &str = "INTEGER";
    pub const GENDER_ABBREV: &str = "GENDERABBREV";
    pub const GENDER_FULL: &str = "GENDERFULL";
    pub const STATE_FULL: &str = "STATEFULL";
    pub const STATE_ABBREV: &str = "STATEABBREV";
    pub const BIRTHDAY_MM_DD_YYYY: &str = "BIRTHDAYMM/DD/YYYY";
    pub const AGE_CALCULATION: &str = "AGECALCULATION";
}

/// Case-insensitive name of a data type on one side of a conversion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeTag(String);

impl TypeTag {
    pub fn new(tag: impl AsRef<str>) -> Self {
        Self(tag.as_ref().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeTag {
    fn from(s: &str) -> Self {
        TypeTag::new(s)
    }
}

/// A single conversion from raw text to an output value.
pub trait FieldConversion: Send + Sync {
    fn convert(&self, raw: &str) -> OutputValue;
}

impl<F> FieldConversion for F
where
    F: Fn(&str) -> OutputValue + Send + Sync,
{
    fn convert(&self, raw: &str) -> OutputValue {
        self(raw)
    }
}

/// Registry of conversions keyed by `(source, target)` type tags.
#[derive(Clone)]
pub struct ConversionEngine {
    rules: HashMap<(TypeTag, TypeTag), Arc<dyn FieldConversion>>,
    sources: HashSet<TypeTag>,
}

impl ConversionEngine {
    /// Engine with the built-in conversions, the built-in state table and the
    /// system clock.
    pub fn new() -> Self {
        Self::with_defaults(StateAbbreviations::default(), Arc::new(SystemClock))
    }

    /// Engine with no conversions registered at all.
    pub fn empty() -> Self {
        Self {
            rules: HashMap::new(),
            sources: HashSet::new(),
        }
    }

    /// Engine with the built-in conversions backed by the given state table
    /// and clock.
    pub fn with_defaults(states: StateAbbreviations, clock: Arc<dyn Clock>) -> Self {
        let mut engine = Self::empty();
        engine.register(tags::STRING, tags::INTEGER, StringToInteger);
        engine.register(tags::STRING, tags::STRING, Identity);
        engine.register(tags::GENDER_ABBREV, tags::GENDER_FULL, GenderAbbrevToFull);
        engine.register(tags::STATE_FULL, tags::STATE_ABBREV, StateFullToAbbrev::new(states));
        engine.register(
            tags::BIRTHDAY_MM_DD_YYYY,
            tags::AGE_CALCULATION,
            AgeCalculation::new(clock),
        );
        engine
    }

    /// Register a conversion, replacing any existing one for the same pair.
    pub fn register(
        &mut self,
        source: impl Into<TypeTag>,
        target: impl Into<TypeTag>,
        conversion: impl FieldConversion + 'static,
    ) -> &mut Self {
        let source = source.into();
        let target = target.into();
        self.sources.insert(source.clone());
        self.rules.insert((source, target), Arc::new(conversion));
        self
    }

    /// Swap the state abbreviation table used for `STATEFULL -> STATEABBREV`.
    pub fn set_state_table(&mut self, states: StateAbbreviations) -> &mut Self {
        self.register(tags::STATE_FULL, tags::STATE_ABBREV, StateFullToAbbrev::new(states))
    }

    /// Swap the clock used for age calculation.
    pub fn set_clock(&mut self, clock: Arc<dyn Clock>) -> &mut Self {
        self.register(
            tags::BIRTHDAY_MM_DD_YYYY,
            tags::AGE_CALCULATION,
            AgeCalculation::new(clock),
        )
    }

    pub fn supports(&self, source: &str, target: &str) -> bool {
        self.rules
            .contains_key(&(TypeTag::new(source), TypeTag::new(target)))
    }

    /// Registered pairs, sorted.
    pub fn pairs(&self) -> Vec<(&TypeTag, &TypeTag)> {
        let mut pairs: Vec<_> = self.rules.keys().map(|(s, t)| (s, t)).collect();
        pairs.sort();
        pairs
    }

    /// Convert raw text from `source` type to `target` type.
    pub fn convert(
        &self,
        source: Option<&str>,
        target: Option<&str>,
        raw: Option<&str>,
    ) -> OutputValue {
        let (Some(source), Some(target), Some(raw)) = (source, target, raw) else {
            warn!(
                source = ?source,
                target = ?target,
                value = ?raw,
                "One or more conversion arguments missing, value passed through"
            );
            return OutputValue::from(raw);
        };

        let source = TypeTag::new(source);
        let target = TypeTag::new(target);

        if let Some(rule) = self.rules.get(&(source.clone(), target.clone())) {
            return rule.convert(raw);
        }

        if self.sources.contains(&source) {
            warn!(
                %source,
                %target,
                value = raw,
                "Target data type not implemented, original value returned"
            );
        } else {
            warn!(
                %source,
                %target,
                value = raw,
                "Source data type not implemented, original value returned"
            );
        }
        OutputValue::from(raw)
    }
}

impl Default for ConversionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ConversionEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionEngine")
            .field("pairs", &self.pairs())
            .finish()
    }
}
