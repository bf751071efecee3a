//! JAMB and O'Level subject-combination lookups.
//!
//! Keyword tables checked in order; the first hit wins, so narrower course
//! names (computer science, mass communication) must come before the broad
//! "english" entry.

/// A course-keyword to combination-advice mapping.
pub struct Combination {
    pub keywords: &'static [&'static str],
    pub advice: &'static str,
}

pub const JAMB_COMBINATIONS: &[Combination] = &[
    Combination {
        keywords: &["medicine", "surgery"],
        advice: "For Medicine and Surgery, typical JAMB subjects are English Language, Physics, Chemistry, and Biology.",
    },
    Combination {
        keywords: &["computer science"],
        advice: "For Computer Science, typical JAMB subjects are English Language, Mathematics, Physics, and one of Chemistry/Biology/Economics/Geography.",
    },
    Combination {
        keywords: &["law"],
        advice: "For Law, typical JAMB subjects are English Language, Literature in English, Government/History, and one other Arts/Social Science subject.",
    },
    Combination {
        keywords: &["english"],
        advice: "For English Language and Literature, typical JAMB subjects are English Language, Literature in English, and two other Arts/Social Science subjects.",
    },
];

pub const OLEVEL_COMBINATIONS: &[Combination] = &[
    Combination {
        keywords: &["medicine", "surgery"],
        advice: "For Medicine and Surgery, typical O'Level subjects are English Language, Mathematics, Physics, Chemistry, and Biology (all with at least C6).",
    },
    Combination {
        keywords: &["computer science"],
        advice: "For Computer Science, typical O'Level subjects are English Language, Mathematics, Physics, Chemistry, and one other Science subject (e.g., Biology, Further Mathematics) (all with at least C6).",
    },
    Combination {
        keywords: &["law"],
        advice: "For Law, typical O'Level subjects are English Language, Literature in English, Government, Economics/History, and one other Arts/Social Science subject (all with at least C6).",
    },
    Combination {
        keywords: &["mass communication"],
        advice: "For Mass Communication, typical O'Level subjects are English Language, Mathematics, Literature in English, Government/History/Economics, and one other Arts/Social Science subject (all with at least C6).",
    },
    Combination {
        keywords: &["english"],
        advice: "For English Language and Literature, typical O'Level subjects are English Language, Mathematics, Literature in English, and two other Arts/Social Science subjects (all with at least C6).",
    },
];

const JAMB_FALLBACK: &str = "No specific JAMB combination found for this course in our mock data. Please consult the institution's official brochure.";
const OLEVEL_FALLBACK: &str = "No specific O'Level combination found for this course in our mock data. Please consult the institution's official brochure.";

fn lookup(table: &'static [Combination], course: &str, fallback: &'static str) -> &'static str {
    let course_lower = course.to_lowercase();
    table
        .iter()
        .find(|c| c.keywords.iter().any(|k| course_lower.contains(k)))
        .map(|c| c.advice)
        .unwrap_or(fallback)
}

/// JAMB subject combination advice for a course.
pub fn jamb_combination(course: &str) -> &'static str {
    lookup(JAMB_COMBINATIONS, course, JAMB_FALLBACK)
}

/// O'Level subject combination advice for a course.
pub fn olevel_combination(course: &str) -> &'static str {
    lookup(OLEVEL_COMBINATIONS, course, OLEVEL_FALLBACK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jamb_medicine_lists_sciences() {
        let advice = jamb_combination("Medicine and Surgery");
        assert!(advice.contains("Physics, Chemistry, and Biology"));
    }

    #[test]
    fn jamb_surgery_keyword_alone_matches() {
        assert_eq!(
            jamb_combination("surgery"),
            jamb_combination("Medicine and Surgery")
        );
    }

    #[test]
    fn jamb_unknown_course_falls_back() {
        let advice = jamb_combination("Quantity Surveying");
        assert!(advice.contains("official brochure"));
    }

    #[test]
    fn olevel_mass_communication_is_specific() {
        let advice = olevel_combination("Mass Communication");
        assert!(advice.contains("Mass Communication"));
        assert!(advice.contains("C6"));
    }

    #[test]
    fn olevel_law_mentions_literature() {
        let advice = olevel_combination("LAW");
        assert!(advice.contains("Literature in English"));
    }

    #[test]
    fn computer_science_wins_over_broad_english_match() {
        // "computer science" is checked before "english"; neither contains
        // the other, so order only matters for inputs naming both.
        let advice = jamb_combination("computer science and english");
        assert!(advice.contains("Computer Science"));
    }
}
