//! Loan data models and API query/response types.
//!
//! This module defines:
//! - `LoanRow`: One grid row (loan joined with its address and company)
//! - `LoanPage`: Response body for the paginated list endpoint
//! - `LoanListQuery`: Raw query-string parameters and their normalization
//! - `SortField` / `SortDirection`: Allow-listed sort inputs

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Page size used when the client does not send one.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Upper bound on the page size a client may request.
///
/// Keeps a single request from dragging the whole table over the wire.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Represents one row of the loan grid.
///
/// # Database Mapping
///
/// Built from a three-way join: `loan` left-joined with `address` and
/// `company`. The address and company columns are `Option` because the
/// foreign keys are nullable and the join is a left join; a loan with no
/// address on file still shows up in the grid.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanRow {
    /// Unique identifier for this loan
    pub id: i64,

    /// Principal amount in whole dollars
    pub amount: i64,

    /// Term of the loan in months
    pub loan_term: i32,

    /// Annual interest rate as a percentage (e.g. 4.125)
    pub loan_rate: f64,

    /// Street address line from the joined address record
    pub address_1: Option<String>,

    /// City from the joined address record
    pub city: Option<String>,

    /// Two-letter state code from the joined address record
    pub state: Option<String>,

    /// Postal code from the joined address record
    pub zip_code: Option<String>,

    /// Name of the joined company record
    pub company_name: Option<String>,
}

/// Response body for the paginated loan list endpoint.
///
/// # JSON Example
///
/// ```json
/// {
///   "rows": [ { "id": 1, "amount": 250000, ... } ],
///   "totalCount": 137
/// }
/// ```
///
/// `total_count` is the size of the full filtered result set, not the length
/// of `rows`. The grid uses it to draw its pager, so it must hold regardless
/// of which page window was requested.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanPage {
    /// The rows for the requested page window
    pub rows: Vec<LoanRow>,

    /// Total number of rows matching the search filter
    pub total_count: i64,
}

/// Sort direction for the loan list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// The SQL keyword for this direction.
    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl FromStr for SortDirection {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // The grid sends lowercase "asc"/"desc"; accept any casing
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(AppError::InvalidRequest(format!(
                "Sort direction must be 'asc' or 'desc', got '{other}'"
            ))),
        }
    }
}

/// Allow-listed sortable columns.
///
/// The wire names are the grid's camelCase column names. Each variant maps to
/// a fixed SQL expression in [`SortField::as_sql`]; client input selects a
/// variant and nothing else, so no request string ever reaches the ORDER BY
/// clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Id,
    Address1,
    City,
    State,
    ZipCode,
    CompanyName,
    Amount,
    LoanTerm,
    LoanRate,
}

impl SortField {
    /// The qualified column this field sorts by.
    ///
    /// Table aliases match the ones used in the service's join:
    /// `l` = loan, `a` = address, `c` = company.
    pub fn as_sql(self) -> &'static str {
        match self {
            SortField::Id => "l.id",
            SortField::Address1 => "a.address_1",
            SortField::City => "a.city",
            SortField::State => "a.state",
            SortField::ZipCode => "a.zip_code",
            SortField::CompanyName => "c.name",
            SortField::Amount => "l.amount",
            SortField::LoanTerm => "l.loan_term",
            SortField::LoanRate => "l.loan_rate",
        }
    }
}

impl FromStr for SortField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(SortField::Id),
            "address1" => Ok(SortField::Address1),
            "city" => Ok(SortField::City),
            "state" => Ok(SortField::State),
            "zipCode" => Ok(SortField::ZipCode),
            "companyName" => Ok(SortField::CompanyName),
            "amount" => Ok(SortField::Amount),
            "loanTerm" => Ok(SortField::LoanTerm),
            "loanRate" => Ok(SortField::LoanRate),
            other => Err(AppError::UnknownSortField(other.to_string())),
        }
    }
}

/// Raw query-string parameters for `GET /api/v1/loans`.
///
/// All parameters are optional; [`LoanListQuery::normalize`] applies defaults,
/// clamps the page window, and validates the sort inputs against the
/// allow-list.
///
/// # Example
///
/// `/api/v1/loans?page=2&pageSize=25&search=acme&field=companyName&sort=desc`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanListQuery {
    /// Zero-based page index (default 0)
    pub page: Option<i64>,

    /// Rows per page (default 10, clamped to 1..=100)
    pub page_size: Option<i64>,

    /// Free-text filter on company name or street address
    pub search: Option<String>,

    /// Grid column to sort by (default "id")
    pub field: Option<String>,

    /// Sort direction, "asc" or "desc" (default "asc")
    pub sort: Option<String>,
}

/// Normalized, validated parameters ready to run against the database.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRequest {
    /// Rows to skip (page index times page size)
    pub offset: i64,

    /// Rows to return, already clamped
    pub limit: i64,

    /// Search term with surrounding whitespace trimmed; `None` when the
    /// client sent nothing or only whitespace
    pub search: Option<String>,

    pub sort_field: SortField,
    pub sort_direction: SortDirection,
}

impl LoanListQuery {
    /// Validate and normalize the raw parameters.
    ///
    /// # Normalization
    ///
    /// - `page`: negative values clamp to 0
    /// - `page_size`: clamped to `1..=MAX_PAGE_SIZE`
    /// - `search`: trimmed; empty becomes `None` (no filter)
    ///
    /// # Errors
    ///
    /// - `UnknownSortField` if `field` is not in the allow-list
    /// - `InvalidRequest` if `sort` is not `asc` or `desc`
    pub fn normalize(&self) -> Result<PageRequest, AppError> {
        let page = self.page.unwrap_or(0).max(0);
        let limit = self
            .page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);

        let search = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        let sort_field = match self.field.as_deref() {
            Some(raw) => raw.parse()?,
            None => SortField::default(),
        };
        let sort_direction = match self.sort.as_deref() {
            Some(raw) => raw.parse()?,
            None => SortDirection::default(),
        };

        Ok(PageRequest {
            // Saturate so an absurd page index stays a valid (empty) window
            // instead of overflowing into a negative OFFSET
            offset: page.saturating_mul(limit),
            limit,
            search,
            sort_field,
            sort_direction,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_no_parameters_sent() {
        let req = LoanListQuery::default().normalize().unwrap();

        assert_eq!(req.offset, 0);
        assert_eq!(req.limit, DEFAULT_PAGE_SIZE);
        assert_eq!(req.search, None);
        assert_eq!(req.sort_field, SortField::Id);
        assert_eq!(req.sort_direction, SortDirection::Asc);
    }

    #[test]
    fn page_window_is_clamped() {
        let query = LoanListQuery {
            page: Some(-3),
            page_size: Some(-10),
            ..Default::default()
        };
        let req = query.normalize().unwrap();
        assert_eq!(req.offset, 0);
        assert_eq!(req.limit, 1);

        let query = LoanListQuery {
            page: Some(2),
            page_size: Some(1000),
            ..Default::default()
        };
        let req = query.normalize().unwrap();
        assert_eq!(req.limit, MAX_PAGE_SIZE);
        assert_eq!(req.offset, 2 * MAX_PAGE_SIZE);
    }

    #[test]
    fn offset_is_page_times_page_size() {
        let query = LoanListQuery {
            page: Some(3),
            page_size: Some(25),
            ..Default::default()
        };
        let req = query.normalize().unwrap();
        assert_eq!(req.offset, 75);
        assert_eq!(req.limit, 25);
    }

    #[test]
    fn huge_page_index_saturates_instead_of_overflowing() {
        let query = LoanListQuery {
            page: Some(i64::MAX),
            page_size: Some(100),
            ..Default::default()
        };
        let req = query.normalize().unwrap();
        assert_eq!(req.offset, i64::MAX);
        assert_eq!(req.limit, 100);
    }

    #[test]
    fn blank_search_means_no_filter() {
        let query = LoanListQuery {
            search: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(query.normalize().unwrap().search, None);

        let query = LoanListQuery {
            search: Some("  acme ".to_string()),
            ..Default::default()
        };
        assert_eq!(query.normalize().unwrap().search, Some("acme".to_string()));
    }

    #[test]
    fn all_grid_columns_are_sortable() {
        for (name, expected) in [
            ("id", SortField::Id),
            ("address1", SortField::Address1),
            ("city", SortField::City),
            ("state", SortField::State),
            ("zipCode", SortField::ZipCode),
            ("companyName", SortField::CompanyName),
            ("amount", SortField::Amount),
            ("loanTerm", SortField::LoanTerm),
            ("loanRate", SortField::LoanRate),
        ] {
            assert_eq!(name.parse::<SortField>().unwrap(), expected);
        }
    }

    #[test]
    fn unknown_sort_field_is_rejected() {
        // snake_case spellings are not in the allow-list either
        for bad in ["balance", "company_name", "id; drop table loan", ""] {
            assert!(bad.parse::<SortField>().is_err());
        }
    }

    #[test]
    fn sort_direction_parsing() {
        assert_eq!("asc".parse::<SortDirection>().unwrap(), SortDirection::Asc);
        assert_eq!("DESC".parse::<SortDirection>().unwrap(), SortDirection::Desc);
        assert!("upwards".parse::<SortDirection>().is_err());
    }

    #[test]
    fn rows_serialize_with_camel_case_keys() {
        let row = LoanRow {
            id: 7,
            amount: 250_000,
            loan_term: 360,
            loan_rate: 4.125,
            address_1: Some("12 Main St".to_string()),
            city: Some("Austin".to_string()),
            state: Some("TX".to_string()),
            zip_code: Some("78701".to_string()),
            company_name: None,
        };
        let page = LoanPage {
            rows: vec![row],
            total_count: 1,
        };

        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["totalCount"], 1);
        let row = &json["rows"][0];
        assert_eq!(row["address1"], "12 Main St");
        assert_eq!(row["zipCode"], "78701");
        assert_eq!(row["loanTerm"], 360);
        assert!(row["companyName"].is_null());
    }
}
