//! Due Date Messages
//!
//! Human readable countdown for a task's due date, relative to a given "now".
//! Due dates are wall-clock times and are compared without a timezone.

use chrono::{Datelike, Duration, NaiveDateTime};

const TITLE_LIMIT: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueSeverity {
    /// No due date
    Unscheduled,
    Expired,
    /// Less than an hour left
    Urgent,
    /// Later today
    Soon,
    /// Tomorrow, or within two days
    Warning,
    Relaxed,
}

impl DueSeverity {
    pub fn css_class(&self) -> &'static str {
        match self {
            DueSeverity::Unscheduled => "due-unscheduled",
            DueSeverity::Expired => "due-expired",
            DueSeverity::Urgent => "due-urgent",
            DueSeverity::Soon => "due-soon",
            DueSeverity::Warning => "due-warning",
            DueSeverity::Relaxed => "due-relaxed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DueMessage {
    pub message: String,
    pub severity: DueSeverity,
    /// `dd/mm/yyyy HH:MM`, absent without a due date
    pub full_date: Option<String>,
}

fn plural(n: i64, one: &str, many: &str) -> String {
    format!("{} {}", n, if n == 1 { one } else { many })
}

fn short_title(title: &str) -> String {
    if title.trim().is_empty() {
        return "A tarefa".to_string();
    }
    if title.chars().count() > TITLE_LIMIT {
        format!("{}...", title.chars().take(TITLE_LIMIT).collect::<String>())
    } else {
        title.to_string()
    }
}

/// Whole calendar months from `earlier` to `later` (0 if not later)
fn whole_months(earlier: NaiveDateTime, later: NaiveDateTime) -> i64 {
    let mut months = i64::from(later.year() - earlier.year()) * 12 + i64::from(later.month())
        - i64::from(earlier.month());
    if months > 0 && (later.day(), later.time()) < (earlier.day(), earlier.time()) {
        months -= 1;
    }
    months.max(0)
}

/// How long ago `due` passed, in the largest fitting unit
pub fn time_since(now: NaiveDateTime, due: NaiveDateTime) -> String {
    let elapsed = now - due;
    let minutes = elapsed.num_minutes();
    if minutes < 60 {
        return plural(minutes, "minuto", "minutos");
    }
    let hours = minutes / 60;
    if hours < 24 {
        return plural(hours, "hora", "horas");
    }
    let days = elapsed.num_days();
    if days < 30 {
        return plural(days, "dia", "dias");
    }
    let months = whole_months(due, now);
    if months < 12 {
        return plural(months, "mês", "meses");
    }
    plural(months / 12, "ano", "anos")
}

pub fn due_message(due: Option<NaiveDateTime>, title: &str, now: NaiveDateTime) -> DueMessage {
    let Some(due) = due else {
        return DueMessage {
            message: "Sem prazo definido".to_string(),
            severity: DueSeverity::Unscheduled,
            full_date: None,
        };
    };

    let subject = short_title(title);
    let build = |message: String, severity: DueSeverity| DueMessage {
        message,
        severity,
        full_date: Some(due.format("%d/%m/%Y %H:%M").to_string()),
    };
    let expired = || build(format!("{} expirou há {}", subject, time_since(now, due)), DueSeverity::Expired);

    let today = due.date() == now.date();
    if due < now && !today {
        return expired();
    }

    if today {
        let minutes = (due - now).num_minutes();
        if minutes < 0 {
            return expired();
        }
        if minutes < 60 {
            return build(
                format!("{} expira em {}", subject, plural(minutes, "minuto", "minutos")),
                DueSeverity::Urgent,
            );
        }
        return build(
            format!("{} expira hoje em {}", subject, plural(minutes / 60, "hora", "horas")),
            DueSeverity::Soon,
        );
    }

    if due.date() == now.date() + Duration::days(1) {
        return build(
            format!("{} expira amanhã às {}", subject, due.format("%H:%M")),
            DueSeverity::Warning,
        );
    }

    let days = (due - now).num_days();
    if days < 7 {
        let severity = if days <= 2 { DueSeverity::Warning } else { DueSeverity::Relaxed };
        return build(format!("{} expira em {}", subject, plural(days, "dia", "dias")), severity);
    }
    if days < 30 {
        return build(format!("{} expira em {} dias", subject, days), DueSeverity::Relaxed);
    }

    let months = whole_months(now, due);
    let span = if months < 12 {
        plural(months, "mês", "meses")
    } else {
        plural(months / 12, "ano", "anos")
    };
    build(format!("{} expira em {}", subject, span), DueSeverity::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, min, 0).unwrap()
    }

    fn now() -> NaiveDateTime {
        at(2024, 3, 10, 12, 0)
    }

    fn check(due: NaiveDateTime, expected: &str, severity: DueSeverity) {
        let msg = due_message(Some(due), "Deploy", now());
        assert_eq!(msg.message, expected);
        assert_eq!(msg.severity, severity);
    }

    #[test]
    fn test_no_due_date() {
        let msg = due_message(None, "Deploy", now());
        assert_eq!(msg.message, "Sem prazo definido");
        assert_eq!(msg.severity, DueSeverity::Unscheduled);
        assert_eq!(msg.full_date, None);
    }

    #[test]
    fn test_expired() {
        check(at(2024, 3, 8, 12, 0), "Deploy expirou há 2 dias", DueSeverity::Expired);
        check(at(2024, 3, 10, 11, 0), "Deploy expirou há 1 hora", DueSeverity::Expired);
        check(at(2024, 3, 9, 23, 30), "Deploy expirou há 12 horas", DueSeverity::Expired);
        check(at(2023, 12, 1, 12, 0), "Deploy expirou há 3 meses", DueSeverity::Expired);
    }

    #[test]
    fn test_due_today() {
        check(at(2024, 3, 10, 12, 1), "Deploy expira em 1 minuto", DueSeverity::Urgent);
        check(at(2024, 3, 10, 12, 30), "Deploy expira em 30 minutos", DueSeverity::Urgent);
        check(at(2024, 3, 10, 15, 0), "Deploy expira hoje em 3 horas", DueSeverity::Soon);
    }

    #[test]
    fn test_due_later() {
        check(at(2024, 3, 11, 9, 5), "Deploy expira amanhã às 09:05", DueSeverity::Warning);
        check(at(2024, 3, 12, 13, 0), "Deploy expira em 2 dias", DueSeverity::Warning);
        check(at(2024, 3, 15, 12, 0), "Deploy expira em 5 dias", DueSeverity::Relaxed);
        check(at(2024, 3, 30, 12, 0), "Deploy expira em 20 dias", DueSeverity::Relaxed);
        check(at(2024, 5, 20, 12, 0), "Deploy expira em 2 meses", DueSeverity::Relaxed);
        check(at(2026, 4, 1, 12, 0), "Deploy expira em 2 anos", DueSeverity::Relaxed);
    }

    #[test]
    fn test_title_prefix() {
        let long = "a".repeat(35);
        let msg = due_message(Some(at(2024, 3, 15, 12, 0)), &long, now());
        assert_eq!(msg.message, format!("{}... expira em 5 dias", "a".repeat(30)));

        let msg = due_message(Some(at(2024, 3, 15, 12, 0)), "   ", now());
        assert!(msg.message.starts_with("A tarefa expira"));
        assert_eq!(msg.full_date.as_deref(), Some("15/03/2024 12:00"));
    }
}
