//! Common regex patterns for invoice field extraction.

use lazy_static::lazy_static;
use regex::Regex;

/// "Invoice Number:" followed by a run of non-whitespace.
pub const INVOICE_NUMBER_PATTERN: &str = r"Invoice Number:\s*(\S+)";

/// "Date:" followed by an ISO `YYYY-MM-DD` date.
pub const DATE_PATTERN: &str = r"Date:\s*(\d{4}-\d{2}-\d{2})";

/// "Amount:" followed by a dollar sign and digits with separators.
pub const AMOUNT_PATTERN: &str = r"Amount:\s*\$([\d,\.]+)";

lazy_static! {
    pub static ref INVOICE_NUMBER: Regex = Regex::new(INVOICE_NUMBER_PATTERN).unwrap();

    pub static ref DATE: Regex = Regex::new(DATE_PATTERN).unwrap();

    pub static ref AMOUNT: Regex = Regex::new(AMOUNT_PATTERN).unwrap();
}
