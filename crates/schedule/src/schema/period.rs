//! Named cadences offered by the form designer UI.

use super::IntervalType;

/// Read-only mapping from a cadence name to its (term, interval) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedPeriod {
    Daily,
    Weekly,
    BiWeekly,
    Monthly,
    Quarterly,
    SemiAnnually,
    Annually,
}

impl NamedPeriod {
    pub const ALL: [NamedPeriod; 7] = [
        NamedPeriod::Daily,
        NamedPeriod::Weekly,
        NamedPeriod::BiWeekly,
        NamedPeriod::Monthly,
        NamedPeriod::Quarterly,
        NamedPeriod::SemiAnnually,
        NamedPeriod::Annually,
    ];

    pub fn term(&self) -> i64 {
        match self {
            NamedPeriod::Daily => 1,
            NamedPeriod::Weekly => 7,
            NamedPeriod::BiWeekly => 14,
            NamedPeriod::Monthly => 1,
            NamedPeriod::Quarterly => 3,
            NamedPeriod::SemiAnnually => 6,
            NamedPeriod::Annually => 1,
        }
    }

    pub fn interval(&self) -> IntervalType {
        match self {
            NamedPeriod::Daily | NamedPeriod::Weekly | NamedPeriod::BiWeekly => IntervalType::Days,
            NamedPeriod::Monthly | NamedPeriod::Quarterly | NamedPeriod::SemiAnnually => {
                IntervalType::Months
            }
            NamedPeriod::Annually => IntervalType::Years,
        }
    }

    /// Display label, e.g. `"Bi-weekly"`.
    pub fn label(&self) -> &'static str {
        match self {
            NamedPeriod::Daily => "Daily",
            NamedPeriod::Weekly => "Weekly",
            NamedPeriod::BiWeekly => "Bi-weekly",
            NamedPeriod::Monthly => "Monthly",
            NamedPeriod::Quarterly => "Quarterly",
            NamedPeriod::SemiAnnually => "Semi-Annually",
            NamedPeriod::Annually => "Annually",
        }
    }

    /// Reverse lookup: match a configured cadence to its display name.
    pub fn from_cadence(term: i64, interval: IntervalType) -> Option<NamedPeriod> {
        Self::ALL
            .into_iter()
            .find(|p| p.term() == term && p.interval() == interval)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cadence_table() {
        assert_eq!(NamedPeriod::Weekly.term(), 7);
        assert_eq!(NamedPeriod::Weekly.interval(), IntervalType::Days);
        assert_eq!(NamedPeriod::Quarterly.term(), 3);
        assert_eq!(NamedPeriod::Quarterly.interval(), IntervalType::Months);
        assert_eq!(NamedPeriod::Annually.interval(), IntervalType::Years);
    }

    #[test]
    fn reverse_lookup() {
        assert_eq!(
            NamedPeriod::from_cadence(14, IntervalType::Days),
            Some(NamedPeriod::BiWeekly)
        );
        assert_eq!(
            NamedPeriod::from_cadence(1, IntervalType::Months),
            Some(NamedPeriod::Monthly)
        );
        assert_eq!(NamedPeriod::from_cadence(5, IntervalType::Days), None);
    }
}
