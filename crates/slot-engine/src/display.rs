//! Deterministic presentation helpers for engineer and candidate badges.
//!
//! Colors depend only on a person's position in the list being rendered, so the
//! same selection always renders the same way regardless of call history.

use crate::types::Engineer;

pub const ENGINEER_PALETTE: [&str; 8] = [
    "bg-red-500",
    "bg-blue-500",
    "bg-green-500",
    "bg-yellow-500",
    "bg-purple-500",
    "bg-pink-500",
    "bg-indigo-500",
    "bg-orange-500",
];

pub const CANDIDATE_PALETTE: [&str; 6] = [
    "bg-blue-500",
    "bg-blue-600",
    "bg-blue-700",
    "bg-indigo-500",
    "bg-indigo-600",
    "bg-sky-500",
];

/// Color for `engineer_id` by its index within `engineers`; unknown ids get the first.
pub fn engineer_color(engineer_id: &str, engineers: &[Engineer]) -> &'static str {
    let index = engineers
        .iter()
        .position(|e| e.id == engineer_id)
        .unwrap_or(0);
    ENGINEER_PALETTE[index % ENGINEER_PALETTE.len()]
}

pub fn candidate_color(index: usize) -> &'static str {
    CANDIDATE_PALETTE[index % CANDIDATE_PALETTE.len()]
}

/// Up to two uppercase initials, e.g. `"David Wilson"` → `"DW"`.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WeeklyAvailability;

    fn engineer(id: &str) -> Engineer {
        Engineer {
            id: id.to_string(),
            name: format!("Engineer {id}"),
            role: String::new(),
            availability: WeeklyAvailability::new(),
        }
    }

    #[test]
    fn engineer_color_follows_list_position() {
        let engineers: Vec<Engineer> = ["e1", "e2", "e3"].into_iter().map(engineer).collect();
        assert_eq!(engineer_color("e1", &engineers), "bg-red-500");
        assert_eq!(engineer_color("e3", &engineers), "bg-green-500");
        // Same answer no matter how often or in which order it is asked.
        assert_eq!(engineer_color("e3", &engineers), "bg-green-500");
        assert_eq!(engineer_color("missing", &engineers), "bg-red-500");
    }

    #[test]
    fn engineer_color_wraps_palette() {
        let engineers: Vec<Engineer> = (0..10).map(|i| engineer(&format!("e{i}"))).collect();
        assert_eq!(engineer_color("e8", &engineers), ENGINEER_PALETTE[0]);
        assert_eq!(engineer_color("e9", &engineers), ENGINEER_PALETTE[1]);
    }

    #[test]
    fn candidate_color_wraps() {
        assert_eq!(candidate_color(0), "bg-blue-500");
        assert_eq!(candidate_color(6), "bg-blue-500");
        assert_eq!(candidate_color(5), "bg-sky-500");
    }

    #[test]
    fn initials_take_first_two_words() {
        assert_eq!(initials("David Wilson"), "DW");
        assert_eq!(initials("grace lee hopper"), "GL");
        assert_eq!(initials("Cher"), "C");
        assert_eq!(initials(""), "");
    }
}
