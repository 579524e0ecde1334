use super::super::domain::{CaseId, VisaCase, VisaStatus};
use super::super::repository::RepositoryError;
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};
use std::collections::HashSet;
use std::io::Read;

pub(crate) fn parse_cases<R: Read>(reader: R) -> Result<Vec<VisaCase>, RepositoryError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut seen: HashSet<String> = HashSet::new();
    let mut cases = Vec::new();

    for record in csv_reader.records() {
        let record = record?;
        let line = record.position().map_or(0, |position| position.line());
        let row: CaseRow = record.deserialize(Some(&headers))?;
        let case = row.into_case(line)?;

        if !seen.insert(case.id.0.clone()) {
            return Err(invalid(line, "id", format!("'{}' is duplicated", case.id)));
        }
        cases.push(case);
    }

    Ok(cases)
}

#[derive(Debug, Deserialize)]
struct CaseRow {
    id: String,
    employee_name: String,
    department: String,
    visa_type: String,
    status: String,
    expiration_date: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    visa_start_date: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    gender: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    email: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    phone: Option<String>,
}

impl CaseRow {
    fn into_case(self, line: u64) -> Result<VisaCase, RepositoryError> {
        let id = required(line, "id", self.id)?;
        let employee_name = required(line, "employee_name", self.employee_name)?;
        let department = required(line, "department", self.department)?;
        let visa_type = required(line, "visa_type", self.visa_type)?;
        let status = self
            .status
            .parse::<VisaStatus>()
            .map_err(|err| invalid(line, "status", err.to_string()))?;
        let expiration_date = parse_date(&self.expiration_date)
            .ok_or_else(|| unparsable_date(line, "expiration_date", &self.expiration_date))?;
        let visa_start_date = match self.visa_start_date {
            Some(raw) => Some(
                parse_date(&raw).ok_or_else(|| unparsable_date(line, "visa_start_date", &raw))?,
            ),
            None => None,
        };

        if let Some(start) = visa_start_date {
            if start > expiration_date {
                return Err(invalid(
                    line,
                    "visa_start_date",
                    format!("{start} falls after expiration date {expiration_date}"),
                ));
            }
        }

        Ok(VisaCase {
            id: CaseId(id),
            employee_name,
            department,
            visa_type,
            status,
            expiration_date,
            visa_start_date,
            gender: self.gender,
            email: self.email,
            phone: self.phone,
        })
    }
}

fn required(line: u64, field: &'static str, value: String) -> Result<String, RepositoryError> {
    if value.trim().is_empty() {
        Err(invalid(line, field, "must not be empty".to_string()))
    } else {
        Ok(value)
    }
}

fn invalid(line: u64, field: &'static str, detail: String) -> RepositoryError {
    RepositoryError::InvalidRecord {
        line,
        field,
        detail,
    }
}

fn unparsable_date(line: u64, field: &'static str, raw: &str) -> RepositoryError {
    invalid(
        line,
        field,
        format!("'{raw}' is not a YYYY-MM-DD or RFC 3339 date"),
    )
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// Calendar dates or full timestamps; timestamps keep the date as written in their own offset.
pub(crate) fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }

    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|dt| dt.date_naive())
}
