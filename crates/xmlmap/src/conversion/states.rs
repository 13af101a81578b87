use std::collections::HashMap;

const US_STATES: &[(&str, &str)] = &[
    ("ALABAMA", "AL"),
    ("ALASKA", "AK"),
    ("ARIZONA", "AZ"),
    ("ARKANSAS", "AR"),
    ("CALIFORNIA", "CA"),
    ("COLORADO", "CO"),
    ("CONNECTICUT", "CT"),
    ("DELAWARE", "DE"),
    ("DISTRICT OF COLUMBIA", "DC"),
    ("FLORIDA", "FL"),
    ("GEORGIA", "GA"),
    ("HAWAII", "HI"),
    ("IDAHO", "ID"),
    ("ILLINOIS", "IL"),
    ("INDIANA", "IN"),
    ("IOWA", "IA"),
    ("KANSAS", "KS"),
    ("KENTUCKY", "KY"),
    ("LOUISIANA", "LA"),
    ("MAINE", "ME"),
    ("MARYLAND", "MD"),
    ("MASSACHUSETTS", "MA"),
    ("MICHIGAN", "MI"),
    ("MINNESOTA", "MN"),
    ("MISSISSIPPI", "MS"),
    ("MISSOURI", "MO"),
    ("MONTANA", "MT"),
    ("NEBRASKA", "NE"),
    ("NEVADA", "NV"),
    ("NEW HAMPSHIRE", "NH"),
    ("NEW JERSEY", "NJ"),
    ("NEW MEXICO", "NM"),
    ("NEW YORK", "NY"),
    ("NORTH CAROLINA", "NC"),
    ("NORTH DAKOTA", "ND"),
    ("OHIO", "OH"),
    ("OKLAHOMA", "OK"),
    ("OREGON", "OR"),
    ("PENNSYLVANIA", "PA"),
    ("RHODE ISLAND", "RI"),
    ("SOUTH CAROLINA", "SC"),
    ("SOUTH DAKOTA", "SD"),
    ("TENNESSEE", "TN"),
    ("TEXAS", "TX"),
    ("UTAH", "UT"),
    ("VERMONT", "VT"),
    ("VIRGINIA", "VA"),
    ("WASHINGTON", "WA"),
    ("WEST VIRGINIA", "WV"),
    ("WISCONSIN", "WI"),
    ("WYOMING", "WY"),
];

/// Full state name to abbreviation lookup.
///
/// Names match exactly but case-insensitively. The default table holds the US
/// states; configuration can extend or replace it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateAbbreviations {
    table: HashMap<String, String>,
}

impl StateAbbreviations {
    pub fn empty() -> Self {
        Self {
            table: HashMap::new(),
        }
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut states = Self::empty();
        states.extend(pairs);
        states
    }

    pub fn insert(&mut self, full: impl AsRef<str>, abbrev: impl Into<String>) -> Option<String> {
        self.table.insert(full.as_ref().to_uppercase(), abbrev.into())
    }

    pub fn extend<I, K, V>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (full, abbrev) in pairs {
            self.insert(full, abbrev);
        }
    }

    pub fn lookup(&self, full: &str) -> Option<&str> {
        self.table.get(&full.to_uppercase()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl Default for StateAbbreviations {
    fn default() -> Self {
        Self::from_pairs(US_STATES.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let states = StateAbbreviations::default();
        assert_eq!(states.len(), 51);
        assert_eq!(states.lookup("michigan"), Some("MI"));
        assert_eq!(states.lookup("New York"), Some("NY"));
        assert_eq!(states.lookup("NewYork"), None);
    }

    #[test]
    fn test_extend_overrides() {
        let mut states = StateAbbreviations::default();
        states.extend([("Michigan", "Mich."), ("Quebec", "QC")]);
        assert_eq!(states.lookup("MICHIGAN"), Some("Mich."));
        assert_eq!(states.lookup("quebec"), Some("QC"));
    }
}
