use chrono::{Datelike, Local, NaiveDate, Weekday};

/// Source of "today" for the dashboards.
///
/// Pages take a clock from context so tests and previews can pin a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppClock {
    #[default]
    System,
    Fixed(NaiveDate),
}

impl AppClock {
    pub fn today(&self) -> NaiveDate {
        match self {
            AppClock::System => Local::now().date_naive(),
            AppClock::Fixed(date) => *date,
        }
    }
}

fn weekday_short(day: Weekday) -> &'static str {
    match day {
        Weekday::Sun => "일",
        Weekday::Mon => "월",
        Weekday::Tue => "화",
        Weekday::Wed => "수",
        Weekday::Thu => "목",
        Weekday::Fri => "금",
        Weekday::Sat => "토",
    }
}

/// Month, day and short weekday in Korean, e.g. `5월 3일 금`.
pub fn format_korean_date(date: NaiveDate) -> String {
    format!(
        "{}월 {}일 {}",
        date.month(),
        date.day(),
        weekday_short(date.weekday())
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn formats_friday_in_may() {
        assert_eq!(format_korean_date(date(2024, 5, 3)), "5월 3일 금");
    }

    #[test]
    fn no_zero_padding() {
        assert_eq!(format_korean_date(date(2024, 1, 7)), "1월 7일 일");
        assert_eq!(format_korean_date(date(2024, 12, 31)), "12월 31일 화");
    }

    #[test]
    fn fixed_clock_returns_its_date() {
        let clock = AppClock::Fixed(date(2024, 5, 3));
        assert_eq!(clock.today(), date(2024, 5, 3));
        assert_eq!(format_korean_date(clock.today()), "5월 3일 금");
    }
}
