//! Link target slugs.

/// Derive the URL slug for an internal link target.
///
/// The target is trimmed, lowercased, and every run of whitespace becomes a
/// single hyphen. Other characters are kept as written.
///
/// # Examples
///
/// ```
/// use flipcard_content::slugify;
///
/// assert_eq!(slugify("Paris"), "paris");
/// assert_eq!(slugify("  Linear   Algebra "), "linear-algebra");
/// assert_eq!(slugify("C++ Notes"), "c++-notes");
/// ```
#[must_use]
pub fn slugify(target: &str) -> String {
    target
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}
