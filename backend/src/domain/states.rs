//! Canonical table of U.S. states plus the District of Columbia.
//!
//! Facility addresses must name a state from this table, and the
//! abbreviation and full name must refer to the same entry. Full names are
//! stored upper-cased, matching the historical data set.

/// Abbreviation / full-name pairs, ordered by abbreviation.
pub const US_STATES: [(&str, &str); 51] = [
    ("AK", "ALASKA"),
    ("AL", "ALABAMA"),
    ("AR", "ARKANSAS"),
    ("AZ", "ARIZONA"),
    ("CA", "CALIFORNIA"),
    ("CO", "COLORADO"),
    ("CT", "CONNECTICUT"),
    ("DC", "DISTRICT OF COLUMBIA"),
    ("DE", "DELAWARE"),
    ("FL", "FLORIDA"),
    ("GA", "GEORGIA"),
    ("HI", "HAWAII"),
    ("IA", "IOWA"),
    ("ID", "IDAHO"),
    ("IL", "ILLINOIS"),
    ("IN", "INDIANA"),
    ("KS", "KANSAS"),
    ("KY", "KENTUCKY"),
    ("LA", "LOUISIANA"),
    ("MA", "MASSACHUSETTS"),
    ("MD", "MARYLAND"),
    ("ME", "MAINE"),
    ("MI", "MICHIGAN"),
    ("MN", "MINNESOTA"),
    ("MO", "MISSOURI"),
    ("MS", "MISSISSIPPI"),
    ("MT", "MONTANA"),
    ("NC", "NORTH CAROLINA"),
    ("ND", "NORTH DAKOTA"),
    ("NE", "NEBRASKA"),
    ("NH", "NEW HAMPSHIRE"),
    ("NJ", "NEW JERSEY"),
    ("NM", "NEW MEXICO"),
    ("NV", "NEVADA"),
    ("NY", "NEW YORK"),
    ("OH", "OHIO"),
    ("OK", "OKLAHOMA"),
    ("OR", "OREGON"),
    ("PA", "PENNSYLVANIA"),
    ("RI", "RHODE ISLAND"),
    ("SC", "SOUTH CAROLINA"),
    ("SD", "SOUTH DAKOTA"),
    ("TN", "TENNESSEE"),
    ("TX", "TEXAS"),
    ("UT", "UTAH"),
    ("VA", "VIRGINIA"),
    ("VT", "VERMONT"),
    ("WA", "WASHINGTON"),
    ("WI", "WISCONSIN"),
    ("WV", "WEST VIRGINIA"),
    ("WY", "WYOMING"),
];

/// Full name for an abbreviation, if the abbreviation is canonical.
#[must_use]
pub fn full_name_for(abbr: &str) -> Option<&'static str> {
    US_STATES
        .iter()
        .find(|(a, _)| *a == abbr)
        .map(|(_, name)| *name)
}

/// Abbreviation for a full name, if the name is canonical.
#[must_use]
pub fn abbreviation_for(state: &str) -> Option<&'static str> {
    US_STATES
        .iter()
        .find(|(_, name)| *name == state)
        .map(|(a, _)| *a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn covers_fifty_states_and_dc() {
        assert_eq!(US_STATES.len(), 51);
        assert_eq!(full_name_for("DC"), Some("DISTRICT OF COLUMBIA"));
    }

    #[rstest]
    #[case("CA", "CALIFORNIA")]
    #[case("WY", "WYOMING")]
    fn lookups_are_mutually_consistent(#[case] abbr: &str, #[case] name: &str) {
        assert_eq!(full_name_for(abbr), Some(name));
        assert_eq!(abbreviation_for(name), Some(abbr));
    }

    #[rstest]
    fn unknown_entries_return_none() {
        assert_eq!(full_name_for("ZZ"), None);
        assert_eq!(abbreviation_for("ATLANTIS"), None);
    }
}
