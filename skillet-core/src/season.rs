//! Season derivation from latitude and calendar date.
//!
//! Boundaries are fixed calendar days (Mar 20, Jun 21, Sep 22, Dec 21) for
//! the current year, with no leap-year or timezone correction. The Southern
//! Hemisphere maps the same intervals to the opposite season names.

use chrono::{Datelike, NaiveDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Autumn => "autumn",
            Season::Winter => "winter",
        }
    }
}

fn boundary(year: i32, month: u32, day: u32) -> NaiveDate {
    // Fixed month/day pairs, valid for every year.
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// Determine the season for a signed latitude (positive = Northern
/// Hemisphere) on the given date.
pub fn season_for(latitude: f64, date: NaiveDate) -> Season {
    let year = date.year();
    let spring_start = boundary(year, 3, 20);
    let summer_start = boundary(year, 6, 21);
    let autumn_start = boundary(year, 9, 22);
    let winter_start = boundary(year, 12, 21);

    let northern = latitude >= 0.0;

    if date >= spring_start && date < summer_start {
        if northern {
            Season::Spring
        } else {
            Season::Autumn
        }
    } else if date >= summer_start && date < autumn_start {
        if northern {
            Season::Summer
        } else {
            Season::Winter
        }
    } else if date >= autumn_start && date < winter_start {
        if northern {
            Season::Autumn
        } else {
            Season::Spring
        }
    } else if northern {
        Season::Winter
    } else {
        Season::Summer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn july_is_summer_in_the_north() {
        assert_eq!(season_for(49.5, date(2026, 7, 15)), Season::Summer);
    }

    #[test]
    fn july_is_winter_in_the_south() {
        assert_eq!(season_for(-49.5, date(2026, 7, 15)), Season::Winter);
    }

    #[test]
    fn boundary_days_belong_to_the_starting_season() {
        assert_eq!(season_for(49.5, date(2026, 3, 20)), Season::Spring);
        assert_eq!(season_for(49.5, date(2026, 6, 21)), Season::Summer);
        assert_eq!(season_for(49.5, date(2026, 9, 22)), Season::Autumn);
        assert_eq!(season_for(49.5, date(2026, 12, 21)), Season::Winter);
    }

    #[test]
    fn january_wraps_into_winter() {
        assert_eq!(season_for(49.5, date(2026, 1, 10)), Season::Winter);
        assert_eq!(season_for(-49.5, date(2026, 1, 10)), Season::Summer);
    }

    #[test]
    fn equator_counts_as_northern() {
        assert_eq!(season_for(0.0, date(2026, 7, 15)), Season::Summer);
    }
}
