use super::clock::Clock;
use super::states::StateAbbreviations;
use super::FieldConversion;
use crate::value::OutputValue;
use chrono::{Datelike, NaiveDate};
use std::sync::Arc;
use tracing::warn;

/// Returns the raw text unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl FieldConversion for Identity {
    fn convert(&self, raw: &str) -> OutputValue {
        OutputValue::from(raw)
    }
}

/// Base-10 parse into a 32-bit integer. Unparseable or out-of-range text
/// becomes `Null`, meaning the value was dropped on purpose.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringToInteger;

impl FieldConversion for StringToInteger {
    fn convert(&self, raw: &str) -> OutputValue {
        match raw.parse::<i32>() {
            Ok(i) => OutputValue::Integer(i64::from(i)),
            Err(e) => {
                warn!(value = raw, error = %e, "Failed to parse integer from string");
                OutputValue::Null
            }
        }
    }
}

/// `M`/`F` to `male`/`female`, case-insensitive.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenderAbbrevToFull;

impl FieldConversion for GenderAbbrevToFull {
    fn convert(&self, raw: &str) -> OutputValue {
        if raw.eq_ignore_ascii_case("M") {
            OutputValue::from("male")
        } else if raw.eq_ignore_ascii_case("F") {
            OutputValue::from("female")
        } else {
            warn!(value = raw, "Value for gender not implemented for conversion");
            OutputValue::from(raw)
        }
    }
}

/// Full state name to its abbreviation. Unknown names pass through silently.
#[derive(Debug, Clone, Default)]
pub struct StateFullToAbbrev {
    states: StateAbbreviations,
}

impl StateFullToAbbrev {
    pub fn new(states: StateAbbreviations) -> Self {
        Self { states }
    }

    pub fn states(&self) -> &StateAbbreviations {
        &self.states
    }
}

impl FieldConversion for StateFullToAbbrev {
    fn convert(&self, raw: &str) -> OutputValue {
        match self.states.lookup(raw) {
            Some(abbrev) => OutputValue::from(abbrev),
            None => OutputValue::from(raw),
        }
    }
}

/// `MM/dd/yyyy` birthday to completed years of age as of the clock's today.
#[derive(Clone)]
pub struct AgeCalculation {
    clock: Arc<dyn Clock>,
}

impl AgeCalculation {
    pub const DATE_FORMAT: &'static str = "%m/%d/%Y";

    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }
}

impl std::fmt::Debug for AgeCalculation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgeCalculation")
            .field("today", &self.clock.today())
            .finish()
    }
}

impl FieldConversion for AgeCalculation {
    fn convert(&self, raw: &str) -> OutputValue {
        match NaiveDate::parse_from_str(raw, Self::DATE_FORMAT) {
            Ok(birthday) => OutputValue::Integer(completed_years(birthday, self.clock.today())),
            Err(e) => {
                warn!(value = raw, error = %e, "Failed to parse birthday as MM/dd/yyyy");
                OutputValue::from(raw)
            }
        }
    }
}

/// Whole years elapsed from `from` to `to`; negative when `to` is earlier.
///
/// A Feb 29 start completes its year on Feb 28 of a non-leap year.
fn completed_years(from: NaiveDate, to: NaiveDate) -> i64 {
    if to < from {
        return -completed_years(to, from);
    }
    let mut years = i64::from(to.year() - from.year());
    if to < anniversary(from, to.year()) {
        years -= 1;
    }
    years
}

fn anniversary(date: NaiveDate, year: i32) -> NaiveDate {
    date.with_year(year)
        .or_else(|| NaiveDate::from_ymd_opt(year, 2, 28))
        .unwrap_or(date)
}
