use proptest::prelude::*;
use rest_resource_util::{demodulize, pluralize, underscore};

proptest! {
    #[test]
    fn pluralize_is_idempotent(word in "[a-z]{1,10}") {
        let once = pluralize(&word);
        prop_assert_eq!(pluralize(&once), once.clone());
    }

    #[test]
    fn pluralize_only_touches_the_last_word(prefix in "[a-z]{1,6}") {
        let compound = format!("{prefix}_comment");
        prop_assert_eq!(pluralize(&compound), format!("{prefix}_comments"));
    }

    #[test]
    fn underscore_output_is_lowercase(name in "[A-Za-z][A-Za-z0-9]{0,12}") {
        let snake = underscore(&name);
        prop_assert!(snake.chars().all(|c| !c.is_uppercase()));
        prop_assert_eq!(underscore(&snake), snake.clone());
    }
}

#[test]
fn demodulize_then_underscore_builds_root_elements() {
    assert_eq!(underscore(demodulize("Shop::LineItem")), "line_item");
    assert_eq!(underscore(&pluralize(demodulize("Shop::LineItem"))), "line_items");
}
