//! Parser for the CNB `denni_kurz.txt` format.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::errors::MarketDataError;
use crate::models::{CnbDailyRates, CnbRate};

const FIELD_COUNT: usize = 5;
const CODE_HEADER: &str = "kód";

fn parse_error(line: usize, message: impl Into<String>) -> MarketDataError {
    MarketDataError::Parse {
        line,
        message: message.into(),
    }
}

/// Parses `DD.MM.YYYY #N`.
fn parse_title(line: &str) -> Result<(NaiveDate, Option<u32>), MarketDataError> {
    let mut parts = line.split_whitespace();
    let date_part = parts
        .next()
        .ok_or_else(|| parse_error(1, "missing publication date"))?;
    let published = NaiveDate::parse_from_str(date_part, "%d.%m.%Y")
        .map_err(|e| parse_error(1, format!("invalid date '{}': {}", date_part, e)))?;
    let sequence = parts
        .next()
        .and_then(|p| p.strip_prefix('#'))
        .and_then(|n| n.parse().ok());
    Ok((published, sequence))
}

/// CNB writes decimals with a comma.
fn parse_decimal(raw: &str) -> Option<Decimal> {
    Decimal::from_str(&raw.trim().replace(',', ".")).ok()
}

fn parse_row(line_no: usize, line: &str) -> Result<CnbRate, MarketDataError> {
    let fields: Vec<&str> = line.split('|').map(str::trim).collect();
    if fields.len() != FIELD_COUNT {
        return Err(parse_error(
            line_no,
            format!("expected {} fields, found {}", FIELD_COUNT, fields.len()),
        ));
    }

    let quantity: u32 = fields[2]
        .parse()
        .map_err(|_| parse_error(line_no, format!("invalid quantity '{}'", fields[2])))?;
    if quantity == 0 {
        return Err(MarketDataError::ValidationFailed {
            message: format!("{} is quoted for zero units", fields[3]),
        });
    }

    let rate = parse_decimal(fields[4])
        .ok_or_else(|| parse_error(line_no, format!("invalid rate '{}'", fields[4])))?;
    if rate <= Decimal::ZERO {
        return Err(MarketDataError::ValidationFailed {
            message: format!("{} has non-positive rate {}", fields[3], rate),
        });
    }

    Ok(CnbRate {
        country: fields[0].to_string(),
        currency_name: fields[1].to_string(),
        quantity,
        code: fields[3].to_uppercase(),
        rate,
    })
}

/// Parses one daily publication.
///
/// The first line carries the date, the second is a column header and every
/// following non-blank line is `country|currency|quantity|code|rate`.
/// Rows that fail to parse are logged and left out.
pub fn parse_daily_rates(text: &str) -> Result<CnbDailyRates, MarketDataError> {
    let mut lines = text.lines().enumerate().map(|(i, l)| (i + 1, l));

    let (_, title) = lines
        .next()
        .ok_or_else(|| parse_error(1, "empty document"))?;
    let (published, sequence) = parse_title(title.trim_start_matches('\u{feff}'))?;

    let (header_no, header) = lines
        .next()
        .ok_or_else(|| parse_error(2, "missing column header"))?;
    let header_fields: Vec<&str> = header.split('|').map(str::trim).collect();
    if header_fields.len() != FIELD_COUNT || !header_fields[3].eq_ignore_ascii_case(CODE_HEADER) {
        return Err(parse_error(header_no, format!("unexpected header '{}'", header)));
    }

    // A bad row only loses its own currency.
    let rates: Vec<CnbRate> = lines
        .filter(|(_, l)| !l.trim().is_empty())
        .filter_map(|(no, l)| match parse_row(no, l) {
            Ok(rate) => Some(rate),
            Err(e) => {
                log::warn!("Skipping CNB row {}: {}", no, e);
                None
            }
        })
        .collect();

    if rates.is_empty() {
        return Err(parse_error(header_no, "publication lists no rates"));
    }

    Ok(CnbDailyRates {
        published,
        sequence,
        rates,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const SAMPLE: &str = "16.10.2026 #200\n\
země|měna|množství|kód|kurz\n\
Austrálie|dolar|1|AUD|15,123\n\
Japonsko|jen|100|JPY|15,487\n\
Velká Británie|libra|1|GBP|28,146\n";

    #[test]
    fn parses_header_and_rows() {
        let rates = parse_daily_rates(SAMPLE).unwrap();

        assert_eq!(
            rates.published,
            NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
        );
        assert_eq!(rates.sequence, Some(200));
        assert_eq!(rates.rates.len(), 3);

        let gbp = rates.find("gbp").unwrap();
        assert_eq!(gbp.country, "Velká Británie");
        assert_eq!(gbp.currency_name, "libra");
        assert_eq!(gbp.rate, dec!(28.146));
    }

    #[test]
    fn divides_by_quoted_quantity() {
        let rates = parse_daily_rates(SAMPLE).unwrap();
        assert_eq!(rates.czk_per_unit("JPY").unwrap(), dec!(0.15487));
        assert_eq!(rates.czk_per_unit("GBP").unwrap(), dec!(28.146));
    }

    #[test]
    fn missing_currency_is_reported() {
        let rates = parse_daily_rates(SAMPLE).unwrap();
        assert!(matches!(
            rates.czk_per_unit("CHF"),
            Err(MarketDataError::CurrencyNotFound(code)) if code == "CHF"
        ));
    }

    #[test]
    fn tolerates_blank_lines_and_crlf() {
        let text = "01.02.2024 #23\r\nzemě|měna|množství|kód|kurz\r\n\r\nVelká Británie|libra|1|GBP|29,5\r\n";
        let rates = parse_daily_rates(text).unwrap();
        assert_eq!(rates.czk_per_unit("GBP").unwrap(), dec!(29.5));
    }

    #[test]
    fn rejects_bad_title() {
        let err = parse_daily_rates("not a date\nzemě|měna|množství|kód|kurz\n").unwrap_err();
        assert!(matches!(err, MarketDataError::Parse { line: 1, .. }));
    }

    #[test]
    fn rejects_unexpected_header() {
        let err = parse_daily_rates("16.10.2026 #200\n<html>\n").unwrap_err();
        assert!(matches!(err, MarketDataError::Parse { line: 2, .. }));
    }

    #[test]
    fn skips_malformed_rows_for_other_currencies() {
        let text = "16.10.2026 #200\n\
země|měna|množství|kód|kurz\n\
Austrálie|dolar|1|AUD|abc\n\
Japonsko|jen|0|JPY|15,487\n\
garbage\n\
Švédsko|koruna|1|SEK|-2,1\n\
Velká Británie|libra|1|GBP|28,146\n";
        let rates = parse_daily_rates(text).unwrap();
        assert_eq!(rates.rates.len(), 1);
        assert_eq!(rates.czk_per_unit("GBP").unwrap(), dec!(28.146));
        assert!(matches!(
            rates.czk_per_unit("AUD"),
            Err(MarketDataError::CurrencyNotFound(_))
        ));
    }

    #[test]
    fn rejects_publication_without_valid_rows() {
        let bad_rate = "16.10.2026 #200\nzemě|měna|množství|kód|kurz\nVelká Británie|libra|1|GBP|abc\n";
        assert!(matches!(
            parse_daily_rates(bad_rate).unwrap_err(),
            MarketDataError::Parse { line: 2, .. }
        ));
    }

    #[test]
    fn rejects_empty_publication() {
        let err = parse_daily_rates("16.10.2026 #200\nzemě|měna|množství|kód|kurz\n").unwrap_err();
        assert!(matches!(err, MarketDataError::Parse { .. }));
    }
}
