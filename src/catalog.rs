use serde::Serialize;

/// A group of vegetables shown together on the add-listing form and usable
/// as a market filter.
#[derive(Serialize, Clone, Copy)]
pub struct Category {
    pub name: &'static str,
    pub vegetables: &'static [&'static str],
}

pub const CATEGORIES: &[Category] = &[
    Category {
        name: "Fruiting Vegetables",
        vegetables: &["Tomato", "Brinjal", "Capsicum", "Chilli"],
    },
    Category {
        name: "Root Vegetables",
        vegetables: &["Potato", "Onion", "Carrot", "Beetroot"],
    },
    Category {
        name: "Leafy Greens",
        vegetables: &["Spinach", "Coriander", "Mint"],
    },
];

pub fn find_category(name: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|category| category.name == name)
}

pub fn contains_vegetable(name: &str) -> bool {
    CATEGORIES
        .iter()
        .any(|category| category.vegetables.contains(&name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_category_resolves_to_its_vegetables() {
        let category = find_category("Root Vegetables").unwrap();
        assert_eq!(
            category.vegetables,
            &["Potato", "Onion", "Carrot", "Beetroot"]
        );
        assert!(find_category("Exotic Vegetables").is_none());
    }

    #[test]
    fn membership_check_is_exact() {
        assert!(contains_vegetable("Tomato"));
        assert!(!contains_vegetable("tomato"));
        assert!(!contains_vegetable("Cabbage"));
    }
}
