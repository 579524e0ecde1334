use super::domain::{VisaCase, VisaStatus};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// Either no constraint (`"all"`) or an exact match on one value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selection<T> {
    All,
    Only(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Self::All
    }
}

impl<T: PartialEq> Selection<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == value,
        }
    }

    /// An absent value only satisfies `All`.
    pub fn matches_optional(&self, value: Option<&T>) -> bool {
        match (self, value) {
            (Self::All, _) => true,
            (Self::Only(expected), Some(actual)) => expected == actual,
            (Self::Only(_), None) => false,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl<T: FromStr> FromStr for Selection<T> {
    type Err = T::Err;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        trimmed.parse().map(Self::Only)
    }
}

impl<T: fmt::Display> fmt::Display for Selection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(value) => fmt::Display::fmt(value, f),
        }
    }
}

/// Conjunction of optional constraints. The default matches every case.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    pub name_query: String,
    pub department: Selection<String>,
    pub status: Selection<VisaStatus>,
    pub visa_type: Selection<String>,
    pub gender: Selection<String>,
}

impl FilterCriteria {
    pub fn is_unconstrained(&self) -> bool {
        self.name_query.is_empty()
            && self.department.is_all()
            && self.status.is_all()
            && self.visa_type.is_all()
            && self.gender.is_all()
    }

    pub fn matches(&self, case: &VisaCase) -> bool {
        self.matches_name(&case.employee_name)
            && self.department.matches(&case.department)
            && self.status.matches(&case.status)
            && self.visa_type.matches(&case.visa_type)
            && self.gender.matches_optional(case.gender.as_ref())
    }

    fn matches_name(&self, name: &str) -> bool {
        self.name_query.is_empty()
            || name
                .to_lowercase()
                .contains(&self.name_query.to_lowercase())
    }
}

/// Keeps the items satisfying every criterion, in their original order.
pub fn filter_cases<T>(items: &[T], criteria: &FilterCriteria) -> Vec<T>
where
    T: AsRef<VisaCase> + Clone,
{
    items
        .iter()
        .filter(|item| criteria.matches(item.as_ref()))
        .cloned()
        .collect()
}

/// Buckets items by department name, alphabetically, keeping input order inside a bucket.
pub fn group_by_department<T>(items: Vec<T>) -> BTreeMap<String, Vec<T>>
where
    T: AsRef<VisaCase>,
{
    let mut groups: BTreeMap<String, Vec<T>> = BTreeMap::new();
    for item in items {
        let department = item.as_ref().department.clone();
        groups.entry(department).or_default().push(item);
    }
    groups
}

/// Sorted distinct departments, for populating filter pickers.
pub fn department_options<T>(items: &[T]) -> Vec<String>
where
    T: AsRef<VisaCase>,
{
    items
        .iter()
        .map(|item| item.as_ref().department.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_parses_all_sentinel() {
        assert_eq!("all".parse::<Selection<String>>(), Ok(Selection::All));
        assert_eq!("ALL".parse::<Selection<String>>(), Ok(Selection::All));
        assert_eq!("".parse::<Selection<String>>(), Ok(Selection::All));
        assert_eq!(
            "Finance".parse::<Selection<String>>(),
            Ok(Selection::Only("Finance".to_string()))
        );
        assert_eq!(
            "expired".parse::<Selection<VisaStatus>>(),
            Ok(Selection::Only(VisaStatus::Expired))
        );
        assert!("unknown".parse::<Selection<VisaStatus>>().is_err());
    }

    #[test]
    fn gender_constraint_rejects_missing_gender() {
        let selection = Selection::Only("Female".to_string());
        assert!(!selection.matches_optional(None));
        assert!(Selection::<String>::All.matches_optional(None));
    }

    #[test]
    fn default_criteria_are_unconstrained() {
        assert!(FilterCriteria::default().is_unconstrained());
        let criteria = FilterCriteria {
            name_query: "chen".to_string(),
            ..FilterCriteria::default()
        };
        assert!(!criteria.is_unconstrained());
    }
}
