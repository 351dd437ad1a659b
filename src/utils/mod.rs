use chrono::NaiveDate;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

use crate::constants::ALLOWED_EXTENSIONS;

/// Lower-cased extension of `filename` when it is one we accept.
pub fn allowed_extension(filename: &str) -> Option<String> {
    let (_, ext) = filename.rsplit_once('.')?;
    let ext = ext.to_lowercase();
    ALLOWED_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}

// ASCII digits only; `\d` would also accept other scripts.
static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("date pattern must compile")
});

/// `YYYY-MM-DD` by shape only; `2024-13-40` passes.
pub fn is_date_key(value: &str) -> bool {
    DATE_RE.is_match(value)
}

/// `today` followed by the next `days` days.
pub fn generate_dates(today: NaiveDate, days: usize) -> Vec<NaiveDate> {
    today.iter_days().take(days.saturating_add(1)).collect()
}

pub fn stored_name(date: &str, ext: &str) -> String {
    format!("{}.{}", date, ext)
}

/// Name with its final extension stripped, `2024-01-01.png` -> `2024-01-01`.
pub fn date_key(filename: &str) -> &str {
    Path::new(filename).file_stem().and_then(|s| s.to_str()).unwrap_or(filename)
}

/// Whether the listed name looks like one of ours.
pub fn has_allowed_suffix(filename: &str) -> bool {
    let lower = filename.to_lowercase();
    ALLOWED_EXTENSIONS.iter().any(|ext| lower.ends_with(&format!(".{}", ext)))
}

/// A bare file name that cannot climb out of the store or hit a hidden temp file.
pub fn is_plain_filename(filename: &str) -> bool {
    !filename.is_empty()
        && !filename.starts_with('.')
        && !filename.contains(|c: char| c == '/' || c == '\\')
        && !filename.contains("..")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allowed_file(filename: &str) -> bool {
        allowed_extension(filename).is_some()
    }

    #[test]
    fn test_allowed_file() {
        assert!(!allowed_file("photo"));
        assert!(!allowed_file("photo."));
        assert!(!allowed_file("photo.txt"));
        assert!(allowed_file("photo.JPG"));
        assert!(allowed_file("photo.png"));
        assert!(allowed_file("archive.tar.webp"));
        assert!(!allowed_file("photo.png.exe"));
    }

    #[test]
    fn test_allowed_extension_is_lowercased() {
        assert_eq!(allowed_extension("IMG_0001.JPeG").as_deref(), Some("jpeg"));
        assert_eq!(allowed_extension("photo.gif").as_deref(), Some("gif"));
        assert_eq!(allowed_extension("photo.bmp"), None);
    }

    #[test]
    fn test_is_date_key() {
        assert!(is_date_key("2024-01-05"));
        assert!(is_date_key("2024-13-40"));
        assert!(!is_date_key("2024-1-5"));
        assert!(!is_date_key("not-a-date"));
        assert!(!is_date_key(""));
        assert!(!is_date_key("2024-01-05 "));
        assert!(!is_date_key("2024/01/05"));
        assert!(!is_date_key("२०२४-01-05"));
        assert!(!is_date_key("2024-01-05\n"));
        assert!(!is_date_key("x2024-01-05"));
    }

    #[test]
    fn test_generate_dates_sixty_days() {
        let today = NaiveDate::from_ymd_opt(2024, 12, 15).unwrap();
        let dates = generate_dates(today, 60);

        assert_eq!(dates.len(), 61);
        assert_eq!(dates[0], today);
        assert!(dates.windows(2).all(|w| w[1].signed_duration_since(w[0]).num_days() == 1));
        assert_eq!(dates[60], NaiveDate::from_ymd_opt(2025, 2, 13).unwrap());
    }

    #[test]
    fn test_generate_dates_zero_days_is_today_only() {
        let today = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(generate_dates(today, 0), vec![today]);
    }

    #[test]
    fn test_generate_dates_huge_count_does_not_overflow() {
        let near_end = NaiveDate::MAX.pred_opt().unwrap().pred_opt().unwrap();
        let dates = generate_dates(near_end, usize::MAX);
        assert_eq!(dates.first(), Some(&near_end));
        assert!(dates.len() <= 3);
    }

    #[test]
    fn test_date_key() {
        assert_eq!(date_key("2024-01-01.png"), "2024-01-01");
        assert_eq!(date_key("2024-01-01.JPEG"), "2024-01-01");
    }

    #[test]
    fn test_has_allowed_suffix() {
        assert!(has_allowed_suffix("2024-01-01.PNG"));
        assert!(!has_allowed_suffix("notes.txt"));
        assert!(!has_allowed_suffix(".2024-01-01.png.tmp"));
    }

    #[test]
    fn test_is_plain_filename() {
        assert!(is_plain_filename("2024-01-01.png"));
        assert!(!is_plain_filename("../secret"));
        assert!(!is_plain_filename("a/b.png"));
        assert!(!is_plain_filename("a\\b.png"));
        assert!(!is_plain_filename(".2024-01-01.png.tmp"));
        assert!(!is_plain_filename(""));
    }
}
