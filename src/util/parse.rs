/// Splits a component custom id of the form `name|argument`.
///
/// # Returns
/// - `(name, Some(argument))` - The id carried an argument
/// - `(name, None)` - Plain id without a separator
pub fn split_custom_id(custom_id: &str) -> (&str, Option<&str>) {
    match custom_id.split_once('|') {
        Some((name, argument)) => (name, Some(argument)),
        None => (custom_id, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_custom_ids() {
        assert_eq!(
            split_custom_id("ticketCategorize|crash"),
            ("ticketCategorize", Some("crash"))
        );
        assert_eq!(split_custom_id("confirmModUpdate"), ("confirmModUpdate", None));
    }
}
