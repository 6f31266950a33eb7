//! Display titles derived from image file names.

/// Derive a page title from an image file name.
///
/// Underscores become spaces, everything from the first `.` on is
/// dropped, and the remainder is title-cased.
///
/// # Example
///
/// ```
/// use worksheet::source::derive_title;
///
/// assert_eq!(derive_title("problem_1.jpg"), "Problem 1");
/// assert_eq!(derive_title("unit_3_review.final.png"), "Unit 3 Review");
/// ```
pub fn derive_title(file_name: &str) -> String {
    let spaced = file_name.replace('_', " ");
    let stem = spaced.split('.').next().unwrap_or_default();
    title_case(stem)
}

/// Capitalize every word of `text`.
///
/// A word starts at any cased letter that does not follow another cased
/// letter; the first letter is upper-cased and the rest lower-cased.
/// Digits and punctuation separate words, so `2a` becomes `2A`.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_cased = false;

    for c in text.chars() {
        let cased = c.is_uppercase() || c.is_lowercase();
        if cased && prev_cased {
            out.extend(c.to_lowercase());
        } else if cased {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        prev_cased = cased;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_title_basic() {
        assert_eq!(derive_title("problem_1.jpg"), "Problem 1");
        assert_eq!(derive_title("problem_2.png"), "Problem 2");
        assert_eq!(derive_title("CHAPTER_four.PNG"), "Chapter Four");
    }

    #[test]
    fn test_derive_title_first_dot_wins() {
        assert_eq!(derive_title("quiz.v2.png"), "Quiz");
        assert_eq!(derive_title(".png"), "");
    }

    #[test]
    fn test_title_case_word_boundaries() {
        assert_eq!(title_case("problem 2a"), "Problem 2A");
        assert_eq!(title_case("o'neil's set"), "O'Neil'S Set");
        assert_eq!(title_case("x-ray  lab"), "X-Ray  Lab");
        assert_eq!(title_case("élan vital"), "Élan Vital");
    }

    #[test]
    fn test_derive_title_idempotent() {
        for name in [
            "problem_1.jpg",
            "warm_up_QUESTIONS.jpeg",
            "q3b_extra.png",
            "already Clean.png",
        ] {
            let once = derive_title(name);
            let twice = derive_title(&format!("{}.png", once));
            assert_eq!(once, twice, "title for {} is not stable", name);
        }
    }
}
