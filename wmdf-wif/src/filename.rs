//! Output naming.

/// Suggested output filename for one colorway (0-based).
///
/// Everything from the last `.` is replaced; a name without a dot gets the
/// suffix appended.
pub fn wif_filename(filename: &str, colorway: usize) -> String {
    let stem = match filename.rfind('.') {
        Some(dot) => &filename[..dot],
        None => filename,
    };
    format!("{}_colorway{}.wif", stem, colorway + 1)
}

/// The filename without any directory part, used as the WIF title.
pub fn display_title(filename: &str) -> &str {
    match filename.rfind('/') {
        Some(slash) => &filename[slash + 1..],
        None => filename,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wif_filename() {
        assert_eq!(wif_filename("draft.wmdf", 2), "draft_colorway3.wif");
        assert_eq!(wif_filename("name", 0), "name_colorway1.wif");
        assert_eq!(wif_filename("a.b.wmd", 0), "a.b_colorway1.wif");
        assert_eq!(wif_filename("dir/twill.wmdf", 4), "dir/twill_colorway5.wif");
    }

    #[test]
    fn test_display_title() {
        assert_eq!(display_title("dir/sub/twill.wmdf"), "twill.wmdf");
        assert_eq!(display_title("twill.wmdf"), "twill.wmdf");
    }
}
