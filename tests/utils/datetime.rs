use contrib_readme::utils::datetime::*;

#[test]
fn test_parse_year_utc() {
    assert_eq!(parse_year("2015-03-07T18:22:41Z").unwrap(), 2015);
}

#[test]
fn test_parse_year_with_offset() {
    assert_eq!(parse_year("2019-12-31T23:30:00+02:00").unwrap(), 2019);
    // The local year is kept even when UTC has already rolled over
    assert_eq!(parse_year("2019-12-31T23:30:00-05:00").unwrap(), 2019);
}

#[test]
fn test_parse_year_naive() {
    assert_eq!(parse_year("2021-06-15T08:00:00").unwrap(), 2021);
    assert_eq!(parse_year("  2021-06-15T08:00:00Z\n").unwrap(), 2021);
}

#[test]
fn test_parse_year_invalid() {
    assert!(parse_year("").is_err());
    assert!(parse_year("yesterday").is_err());
    assert!(parse_year("2021-13-01T00:00:00Z").is_err());
}

#[test]
fn test_year_window() {
    assert_eq!(
        year_window(2023),
        ("2023-01-01T00:00:00Z".to_string(), "2023-12-31T23:59:59Z".to_string())
    );
}

#[test]
fn test_current_year_is_plausible() {
    assert!(current_year() >= 2024);
}
