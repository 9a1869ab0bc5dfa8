/// Splits raw prompt text into shopping-list items.
///
/// Items are separated by commas and trimmed. Empty tokens produced by
/// consecutive, leading or trailing commas are dropped, so every returned item
/// yields exactly one user echo and one placeholder.
pub fn split_items(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comma_free_input_yields_single_trimmed_item() {
        assert_eq!(split_items("  oat milk \n"), vec!["oat milk".to_string()]);
    }

    #[test]
    fn splitting_is_idempotent_for_single_items() {
        let first = split_items("eggs");
        let second = split_items(&first[0]);
        assert_eq!(first, second);
    }

    #[test]
    fn items_keep_their_typed_order() {
        assert_eq!(
            split_items("apples, bread,cheese"),
            vec!["apples", "bread", "cheese"]
        );
    }

    #[test]
    fn consecutive_and_trailing_commas_do_not_create_items() {
        assert_eq!(split_items("apples,,, bread,"), vec!["apples", "bread"]);
        assert_eq!(split_items(",apples"), vec!["apples"]);
        assert_eq!(split_items(" , ,"), Vec::<String>::new());
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(split_items("").is_empty());
        assert!(split_items("   ").is_empty());
    }
}
