use super::ScreenParameters;

/// Screen parameter carrying the lower bound of the audited date range.
pub const DATE_FROM_PARAMETER: &str = "OrigamDataAuditLog_DateFrom";

/// Unit of time bucketing derived from the date-range lower bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Granularity {
    /// Whole month selected, rows grouped by day of month.
    Month,
    /// Whole day selected, rows grouped by hour of day.
    Day,
    /// Whole hour selected, rows grouped by minute of hour.
    Hour,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Month => "Month",
            Self::Day => "Day",
            Self::Hour => "Hour",
        }
    }

    /// Inclusive range of bucket keys this granularity produces.
    pub fn key_range(&self) -> std::ops::RangeInclusive<u32> {
        match self {
            Self::Month => 1..=31,
            Self::Day => 0..=23,
            Self::Hour => 0..=59,
        }
    }

    /// Match the range lower bound by suffix. Order matters: a month start
    /// also ends with a day start, which also ends with an hour start.
    pub fn from_date_from(date_from: &str) -> Option<Self> {
        if date_from.ends_with("01T00:00:00") {
            Some(Self::Month)
        } else if date_from.ends_with("00:00:00") {
            Some(Self::Day)
        } else if date_from.ends_with("00:00") {
            Some(Self::Hour)
        } else {
            None
        }
    }
}

impl std::fmt::Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// `None` means no grouping applies and the view shows its empty state.
pub fn select_granularity(parameters: Option<&ScreenParameters>) -> Option<Granularity> {
    let date_from = parameters?.get(DATE_FROM_PARAMETER)?;
    Granularity::from_date_from(date_from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(date_from: &str) -> ScreenParameters {
        let mut params = ScreenParameters::default();
        params.insert(DATE_FROM_PARAMETER, date_from);
        params
    }

    #[test]
    fn suffix_order_picks_most_specific_granularity() {
        assert_eq!(
            select_granularity(Some(&params("2021-04-01T00:00:00"))),
            Some(Granularity::Month)
        );
        assert_eq!(
            select_granularity(Some(&params("2021-04-15T00:00:00"))),
            Some(Granularity::Day)
        );
        assert_eq!(
            select_granularity(Some(&params("2021-04-15T13:00:00"))),
            Some(Granularity::Hour)
        );
        assert_eq!(
            select_granularity(Some(&params("2021-04-01T00:00"))),
            Some(Granularity::Hour)
        );
    }

    #[test]
    fn unrecognized_or_missing_input_selects_nothing() {
        assert_eq!(select_granularity(None), None);
        assert_eq!(select_granularity(Some(&ScreenParameters::default())), None);
        assert_eq!(select_granularity(Some(&params("2021-01-15"))), None);
        assert_eq!(select_granularity(Some(&params("2021-01-15T13:45:10"))), None);
    }

    #[test]
    fn key_ranges_match_time_components() {
        assert_eq!(Granularity::Month.key_range(), 1..=31);
        assert_eq!(Granularity::Day.key_range(), 0..=23);
        assert_eq!(Granularity::Hour.key_range(), 0..=59);
    }
}
