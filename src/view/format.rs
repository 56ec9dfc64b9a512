use chrono::{Datelike, NaiveDate};

pub const NOT_AVAILABLE: &str = "N/A";

/// `dd/mm/yyyy`, or `N/A` without a date.
pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Whole years on `today`; one less while this year's birthday is ahead.
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

pub fn format_age(birth: Option<NaiveDate>, today: NaiveDate) -> String {
    birth
        .map(|b| format!("{} años", age_on(b, today)))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

pub fn initials(first_name: &str, last_name: &str) -> String {
    [first_name, last_name]
        .iter()
        .filter_map(|name| name.trim().chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Completed,
    InProgress,
    Other,
}

impl StatusKind {
    pub fn of(status: Option<&str>) -> Self {
        match status {
            Some("completado") => StatusKind::Completed,
            Some("en juego") => StatusKind::InProgress,
            _ => StatusKind::Other,
        }
    }
}

pub fn status_label(status: Option<&str>) -> &str {
    status.filter(|s| !s.trim().is_empty()).unwrap_or("Pendiente")
}

/// The value itself, or `fallback` when blank or absent.
pub fn or_default<'a>(value: Option<&'a str>, fallback: &'a str) -> &'a str {
    value.filter(|v| !v.trim().is_empty()).unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(Some(date(2024, 3, 5))), "05/03/2024");
        assert_eq!(format_date(None), "N/A");
    }

    #[test]
    fn test_age_counts_only_past_birthdays() {
        let birth = date(1994, 3, 12);
        assert_eq!(age_on(birth, date(2024, 3, 11)), 29);
        assert_eq!(age_on(birth, date(2024, 3, 12)), 30);
        assert_eq!(age_on(birth, date(2024, 12, 1)), 30);
        assert_eq!(format_age(None, date(2024, 1, 1)), "N/A");
    }

    #[test]
    fn test_initials() {
        assert_eq!(initials("ana", "lopez"), "AL");
        assert_eq!(initials("Ana", ""), "A");
    }

    #[test]
    fn test_status_defaults_to_pending() {
        assert_eq!(status_label(None), "Pendiente");
        assert_eq!(status_label(Some("")), "Pendiente");
        assert_eq!(status_label(Some("en juego")), "en juego");
        assert_eq!(StatusKind::of(Some("completado")), StatusKind::Completed);
        assert_eq!(StatusKind::of(Some("en juego")), StatusKind::InProgress);
        assert_eq!(StatusKind::of(Some("suspendido")), StatusKind::Other);
        assert_eq!(StatusKind::of(None), StatusKind::Other);
    }
}
