use super::*;

#[test]
fn plain_dates_and_datetimes() {
    assert_eq!(year_of("1503-06-01"), Some(1503));
    assert_eq!(year_of("1517-10-31T12:00:00Z"), Some(1517));
    assert_eq!(year_of("1517-10-31T12:00:00+01:00"), Some(1517));
    assert_eq!(year_of("1521-04-17T09:30:00"), Some(1521));
}

#[test]
fn partial_dates() {
    assert_eq!(year_of("1525-06"), Some(1525));
    assert_eq!(year_of("1530"), Some(1530));
    assert_eq!(year_of(" 1530 "), Some(1530));
}

#[test]
fn garbage_is_none() {
    assert_eq!(year_of(""), None);
    assert_eq!(year_of("unknown"), None);
    assert_eq!(year_of("15x0-01-01"), None);
    assert_eq!(year_of("1525-13"), None);
}
