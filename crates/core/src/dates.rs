//! Date encodings used by the ledger store.
//!
//! Ledger files are keyed by a fixed-width, locale-independent token
//! (`MMDDYYYY`); user-facing output and the export annotation use the
//! dashed display form (`MM-DD-YYYY`).

use chrono::NaiveDate;

const FILE_TOKEN_FORMAT: &str = "%m%d%Y";
const DISPLAY_FORMAT: &str = "%m-%d-%Y";

/// Encode a date as the ledger file-name token, e.g. `06012025`.
pub fn file_token(date: NaiveDate) -> String {
    date.format(FILE_TOKEN_FORMAT).to_string()
}

/// Recover a date from a file-name token. `None` for anything that is not
/// an eight-digit `MMDDYYYY` calendar date.
pub fn parse_file_token(token: &str) -> Option<NaiveDate> {
    if token.len() != 8 {
        return None;
    }
    NaiveDate::parse_from_str(token, FILE_TOKEN_FORMAT).ok()
}

/// Format a date for display and export annotation, e.g. `06-01-2025`.
pub fn display_date(date: NaiveDate) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn june_first() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    #[test]
    fn file_token_is_fixed_width() {
        assert_eq!(file_token(june_first()), "06012025");
        assert_eq!(file_token(NaiveDate::from_ymd_opt(2025, 11, 23).unwrap()), "11232025");
    }

    #[test]
    fn file_token_round_trips() {
        let date = june_first();
        assert_eq!(parse_file_token(&file_token(date)), Some(date));
    }

    #[test]
    fn parse_rejects_malformed_tokens() {
        assert_eq!(parse_file_token("2025-06-01"), None);
        assert_eq!(parse_file_token("0601202"), None);
        assert_eq!(parse_file_token("13992025"), None);
        assert_eq!(parse_file_token("garbage!"), None);
    }

    #[test]
    fn display_uses_dashed_month_day_year() {
        assert_eq!(display_date(june_first()), "06-01-2025");
    }
}
