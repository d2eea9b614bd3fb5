//! Locale-aware display strings.
//!
//! Everything here is a pure function of its inputs; nothing reads the
//! clock or any global language setting.

use std::fmt;

use chrono::{DateTime, Datelike, Duration, Utc};

use crate::model::{ActionKind, HealthStatus};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    #[default]
    En,
    Es,
}

impl Locale {
    /// Parse a language code (`es`, `es-ES`, `EN_us`, ...). Anything that is
    /// not Spanish falls back to English.
    pub fn from_code(code: &str) -> Self {
        let lang = code
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match lang.as_str() {
            "es" => Locale::Es,
            _ => Locale::En,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Es => "es",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// "Today", "Yesterday", "3 days ago", "2 weeks ago", or a numeric date.
///
/// Calendar days are compared in UTC.
pub fn relative_date(then: DateTime<Utc>, now: DateTime<Utc>, locale: Locale) -> String {
    let then_day = then.date_naive();
    let today = now.date_naive();

    if then_day == today {
        return match locale {
            Locale::En => "Today".to_string(),
            Locale::Es => "Hoy".to_string(),
        };
    }
    if then_day == (now - Duration::days(1)).date_naive() {
        return match locale {
            Locale::En => "Yesterday".to_string(),
            Locale::Es => "Ayer".to_string(),
        };
    }

    let millis = (now - then).num_milliseconds().abs();
    let days = (millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY;

    if days < 7 {
        return match locale {
            Locale::En => format!("{days} days ago"),
            Locale::Es => format!("hace {days} días"),
        };
    }
    if days < 30 {
        let weeks = days / 7;
        return match (locale, weeks > 1) {
            (Locale::En, false) => format!("{weeks} week ago"),
            (Locale::En, true) => format!("{weeks} weeks ago"),
            (Locale::Es, false) => format!("hace {weeks} semana"),
            (Locale::Es, true) => format!("hace {weeks} semanas"),
        };
    }

    match locale {
        Locale::En => format!("{}/{}/{}", then_day.month(), then_day.day(), then_day.year()),
        Locale::Es => format!("{}/{}/{}", then_day.day(), then_day.month(), then_day.year()),
    }
}

/// Label for a days-until-watering count.
pub fn watering_label(days: i64, locale: Locale) -> String {
    match (locale, days) {
        (Locale::En, d) if d <= 0 => "Water today".to_string(),
        (Locale::En, 1) => "Water tomorrow".to_string(),
        (Locale::En, d) => format!("Water in {d} days"),
        (Locale::Es, d) if d <= 0 => "Regar hoy".to_string(),
        (Locale::Es, 1) => "Regar mañana".to_string(),
        (Locale::Es, d) => format!("Regar en {d} días"),
    }
}

pub fn health_label(status: HealthStatus, locale: Locale) -> &'static str {
    match (locale, status) {
        (Locale::En, HealthStatus::Healthy) => "Healthy",
        (Locale::En, HealthStatus::NeedsAttention) => "Needs attention",
        (Locale::En, HealthStatus::Critical) => "Critical",
        (Locale::Es, HealthStatus::Healthy) => "Saludable",
        (Locale::Es, HealthStatus::NeedsAttention) => "Necesita atención",
        (Locale::Es, HealthStatus::Critical) => "Crítico",
    }
}

pub fn action_label(kind: ActionKind, locale: Locale) -> &'static str {
    match locale {
        Locale::En => match kind {
            ActionKind::Watering => "Watering",
            ActionKind::Fertilization => "Fertilization",
            ActionKind::Pruning => "Pruning",
            ActionKind::Repotting => "Repotting",
            ActionKind::Treatment => "Treatment",
            ActionKind::Relocation => "Relocation",
            ActionKind::Inspection => "Inspection",
        },
        Locale::Es => match kind {
            ActionKind::Watering => "Riego",
            ActionKind::Fertilization => "Fertilización",
            ActionKind::Pruning => "Poda",
            ActionKind::Repotting => "Trasplante",
            ActionKind::Treatment => "Tratamiento",
            ActionKind::Relocation => "Movimiento",
            ActionKind::Inspection => "Revisión",
        },
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_locale_from_code() {
        assert_eq!(Locale::from_code("es"), Locale::Es);
        assert_eq!(Locale::from_code("es-MX"), Locale::Es);
        assert_eq!(Locale::from_code(" ES_es "), Locale::Es);
        assert_eq!(Locale::from_code("en"), Locale::En);
        assert_eq!(Locale::from_code("fr"), Locale::En);
        assert_eq!(Locale::from_code(""), Locale::En);
    }

    #[test]
    fn test_today_and_yesterday() {
        let early_today = Utc.with_ymd_and_hms(2024, 6, 15, 0, 5, 0).unwrap();
        let late_yesterday = Utc.with_ymd_and_hms(2024, 6, 14, 23, 55, 0).unwrap();

        assert_eq!(relative_date(early_today, now(), Locale::En), "Today");
        assert_eq!(relative_date(early_today, now(), Locale::Es), "Hoy");
        assert_eq!(relative_date(late_yesterday, now(), Locale::En), "Yesterday");
        assert_eq!(relative_date(late_yesterday, now(), Locale::Es), "Ayer");
    }

    #[test]
    fn test_days_ago_rounds_up() {
        // 2 days and 1 hour -> 3 days
        let then = now() - Duration::days(2) - Duration::hours(1);
        assert_eq!(relative_date(then, now(), Locale::En), "3 days ago");
        assert_eq!(relative_date(then, now(), Locale::Es), "hace 3 días");
    }

    #[test]
    fn test_weeks_ago() {
        let one_week = now() - Duration::days(8);
        let three_weeks = now() - Duration::days(22);

        assert_eq!(relative_date(one_week, now(), Locale::En), "1 week ago");
        assert_eq!(relative_date(one_week, now(), Locale::Es), "hace 1 semana");
        assert_eq!(relative_date(three_weeks, now(), Locale::En), "3 weeks ago");
        assert_eq!(relative_date(three_weeks, now(), Locale::Es), "hace 3 semanas");
    }

    #[test]
    fn test_old_dates_use_numeric_format() {
        let then = Utc.with_ymd_and_hms(2024, 3, 4, 10, 0, 0).unwrap();
        assert_eq!(relative_date(then, now(), Locale::En), "3/4/2024");
        assert_eq!(relative_date(then, now(), Locale::Es), "4/3/2024");
    }

    #[test]
    fn test_watering_labels() {
        assert_eq!(watering_label(0, Locale::En), "Water today");
        assert_eq!(watering_label(1, Locale::En), "Water tomorrow");
        assert_eq!(watering_label(5, Locale::En), "Water in 5 days");
        assert_eq!(watering_label(0, Locale::Es), "Regar hoy");
        assert_eq!(watering_label(1, Locale::Es), "Regar mañana");
        assert_eq!(watering_label(3, Locale::Es), "Regar en 3 días");
    }

    #[test]
    fn test_status_and_action_labels() {
        assert_eq!(health_label(HealthStatus::NeedsAttention, Locale::En), "Needs attention");
        assert_eq!(health_label(HealthStatus::Critical, Locale::Es), "Crítico");
        assert_eq!(action_label(ActionKind::Repotting, Locale::En), "Repotting");
        assert_eq!(action_label(ActionKind::Inspection, Locale::Es), "Revisión");
    }
}
