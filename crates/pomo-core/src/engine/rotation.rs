//! Rule deciding the category of the next interval.

use crate::{
    error::{PomodoroError, Result},
    models::Category,
    repository::Repository,
};

/// Short breaks taken before a long break is due.
pub const SHORT_BREAKS_PER_LONG_BREAK: usize = 3;

/// Category of the interval that follows the stored history.
///
/// A break is always followed by a pomodoro. A pomodoro is followed by a
/// long break once the last three breaks were all short, and by a short
/// break otherwise, which gives the cadence `P S P S P S P L P S ...`.
pub fn next_category(repo: &dyn Repository) -> Result<Category> {
    let last = match repo.last() {
        Ok(last) => last,
        Err(PomodoroError::NoIntervals) => return Ok(Category::Pomodoro),
        Err(e) => return Err(e),
    };

    if last.category.is_break() {
        return Ok(Category::Pomodoro);
    }

    let breaks = repo.breaks(SHORT_BREAKS_PER_LONG_BREAK)?;
    if breaks.len() < SHORT_BREAKS_PER_LONG_BREAK
        || breaks.iter().any(|i| i.category == Category::LongBreak)
    {
        return Ok(Category::ShortBreak);
    }

    Ok(Category::LongBreak)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use jiff::civil::Date;

    use super::*;
    use crate::{models::Interval, repository::MemoryRepository};

    fn history(categories: &[Category]) -> MemoryRepository {
        let repo = MemoryRepository::new();
        for &category in categories {
            repo.create(&Interval::new(category, Duration::from_secs(60)))
                .unwrap();
        }
        repo
    }

    use Category::{LongBreak as L, Pomodoro as P, ShortBreak as S};

    #[test]
    fn test_empty_history_starts_with_pomodoro() {
        assert_eq!(next_category(&history(&[])).unwrap(), P);
    }

    #[test]
    fn test_break_is_followed_by_pomodoro() {
        assert_eq!(next_category(&history(&[P, S])).unwrap(), P);
        assert_eq!(next_category(&history(&[P, S, P, S, P, S, P, L])).unwrap(), P);
    }

    #[test]
    fn test_pomodoro_with_few_breaks_gets_short_break() {
        assert_eq!(next_category(&history(&[P])).unwrap(), S);
        assert_eq!(next_category(&history(&[P, S, P])).unwrap(), S);
        assert_eq!(next_category(&history(&[P, S, P, S, P])).unwrap(), S);
    }

    #[test]
    fn test_three_short_breaks_earn_a_long_break() {
        assert_eq!(next_category(&history(&[P, S, P, S, P, S, P])).unwrap(), L);
    }

    #[test]
    fn test_recent_long_break_resets_quota() {
        assert_eq!(
            next_category(&history(&[P, S, P, S, P, S, P, L, P])).unwrap(),
            S
        );
        assert_eq!(
            next_category(&history(&[P, S, P, S, P, S, P, L, P, S, P, S, P])).unwrap(),
            S
        );
        assert_eq!(
            next_category(&history(&[P, S, P, S, P, S, P, L, P, S, P, S, P, S, P])).unwrap(),
            L
        );
    }

    #[test]
    fn test_full_cadence() {
        let repo = MemoryRepository::new();
        let mut produced = Vec::new();
        for _ in 0..10 {
            let category = next_category(&repo).unwrap();
            repo.create(&Interval::new(category, Duration::from_secs(1)))
                .unwrap();
            produced.push(category);
        }

        assert_eq!(produced, [P, S, P, S, P, S, P, L, P, S]);
    }

    struct FailingRepository;

    impl Repository for FailingRepository {
        fn create(&self, _: &Interval) -> Result<u64> {
            unreachable!()
        }
        fn update(&self, _: &Interval) -> Result<()> {
            unreachable!()
        }
        fn update_if_unchanged(&self, _: &Interval, _: &Interval) -> Result<bool> {
            unreachable!()
        }
        fn by_id(&self, _: u64) -> Result<Interval> {
            unreachable!()
        }
        fn last(&self) -> Result<Interval> {
            Err(PomodoroError::LockPoisoned { resource: "test" })
        }
        fn breaks(&self, _: usize) -> Result<Vec<Interval>> {
            unreachable!()
        }
        fn category_summary(&self, _: Date, _: &str) -> Result<Duration> {
            unreachable!()
        }
    }

    #[test]
    fn test_storage_errors_propagate() {
        let err = next_category(&FailingRepository).unwrap_err();
        assert!(err.is_storage());
    }
}
