//! Synchronous client for the expense-tracking backend API.
//!
//! The backend serves `GET {base_url}/expenses` as a JSON array of
//! `{id, tag, amount, date}` records. Every record is validated on receipt
//! (dates become [`chrono::NaiveDate`]), so nothing untyped leaves this module.
//!
//! Typical usage:
//! ```no_run
//! # use expense_chart::acquire::remote::ExpenseClient;
//! # use expense_chart::models::Dataset;
//! let client = ExpenseClient::new("http://localhost:8080/api")?;
//! let expenses = client.fetch_expenses()?;
//! let dataset = Dataset::from_expenses(&expenses)?;
//! # Ok::<(), anyhow::Error>(())
//! ```
use crate::error::{DataError, FetchError};
use crate::models::{Expense, RawExpense};
use log::debug;
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// Pauses between attempts on 5xx / network errors.
const RETRY_BACKOFF_MS: [u64; 3] = [100, 300, 700];

#[derive(Debug, Clone)]
pub struct ExpenseClient {
    pub base_url: String,
    http: HttpClient,
}

impl ExpenseClient {
    /// Client with the default 30s request timeout.
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        Self::with_timeout(base_url, Duration::from_secs(30))
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let http = HttpClient::builder()
            .timeout(timeout) // total request timeout
            .connect_timeout(Duration::from_secs(10))
            .redirect(Policy::limited(5))
            .user_agent(concat!("expense-chart/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// URL of the expense listing.
    pub fn expenses_url(&self) -> String {
        format!("{}/expenses", self.base_url)
    }

    /// Fetch and validate all expense records.
    ///
    /// Transient failures (5xx, network errors) are retried with a short backoff;
    /// other HTTP statuses fail immediately.
    pub fn fetch_expenses(&self) -> Result<Vec<Expense>, FetchError> {
        let url = self.expenses_url();
        let body = self.get_text(&url)?;
        let expenses = parse_expenses(&body).map_err(|e| match e {
            ParseFailure::Json(source) => FetchError::Decode {
                url: url.clone(),
                source,
            },
            ParseFailure::Data(d) => FetchError::Data(d),
        })?;
        debug!("fetched {} expenses from {}", expenses.len(), url);
        Ok(expenses)
    }

    fn get_text(&self, url: &str) -> Result<String, FetchError> {
        let mut attempt = 0;
        loop {
            let err = match self.http.get(url).send() {
                Ok(r) if r.status().is_success() => {
                    return r.text().map_err(|source| FetchError::Network {
                        url: url.to_string(),
                        source,
                    });
                }
                Ok(r) if r.status().is_server_error() => FetchError::Status {
                    url: url.to_string(),
                    status: r.status(),
                },
                Ok(r) => {
                    return Err(FetchError::Status {
                        url: url.to_string(),
                        status: r.status(),
                    });
                }
                Err(source) => FetchError::Network {
                    url: url.to_string(),
                    source,
                },
            };
            let Some(&backoff_ms) = RETRY_BACKOFF_MS.get(attempt) else {
                return Err(err);
            };
            debug!("{}; retrying in {}ms", err, backoff_ms);
            std::thread::sleep(Duration::from_millis(backoff_ms));
            attempt += 1;
        }
    }
}

#[derive(Debug)]
pub enum ParseFailure {
    Json(serde_json::Error),
    Data(DataError),
}

/// Decode a response body into validated expenses.
pub fn parse_expenses(body: &str) -> Result<Vec<Expense>, ParseFailure> {
    let raw: Vec<RawExpense> = serde_json::from_str(body).map_err(ParseFailure::Json)?;
    raw.into_iter()
        .map(Expense::try_from)
        .collect::<Result<Vec<_>, _>>()
        .map_err(ParseFailure::Data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn parses_records_and_dates() {
        let body = r#"[
            {"id": 0, "tag": "Grocery", "amount": 100, "date": "2024-5-17"},
            {"id": 1, "tag": "Rent", "amount": -800.5, "date": "2024-06-01T00:00:00Z"}
        ]"#;
        let ex = parse_expenses(body).unwrap();
        assert_eq!(ex.len(), 2);
        assert_eq!(ex[0].date, NaiveDate::from_ymd_opt(2024, 5, 17).unwrap());
        assert_eq!(ex[1].amount, -800.5);
    }

    #[test]
    fn wrong_shape_is_a_json_failure() {
        let body = r#"{"expenses": []}"#;
        assert!(matches!(parse_expenses(body), Err(ParseFailure::Json(_))));
        let body = r#"[{"id": 0, "tag": "x", "amount": "lots", "date": "2024-1-1"}]"#;
        assert!(matches!(parse_expenses(body), Err(ParseFailure::Json(_))));
    }

    #[test]
    fn bad_date_is_a_data_failure() {
        let body = r#"[{"id": 7, "tag": "x", "amount": 1, "date": "soon"}]"#;
        assert!(matches!(
            parse_expenses(body),
            Err(ParseFailure::Data(DataError::UnparsableValue { row: 7, .. }))
        ));
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let c = ExpenseClient::new("http://example.invalid/api/").unwrap();
        assert_eq!(c.expenses_url(), "http://example.invalid/api/expenses");
    }
}
