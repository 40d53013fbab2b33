use super::*;

#[test]
fn test_autocomplete_typo() {
    let suggesters = Suggesters::default();
    assert_eq!(suggesters.autocomplete("usrname").as_deref(), Some("username"));
    assert_eq!(suggesters.autocomplete("emial").as_deref(), Some("email"));
}

#[test]
fn test_autocomplete_alias_resolves_to_canonical() {
    let suggesters = Suggesters::default();
    assert_eq!(suggesters.autocomplete("firstname").as_deref(), Some("given-name"));
    assert_eq!(suggesters.autocomplete("zipcode").as_deref(), Some("postal-code"));
}

#[test]
fn test_input_type_alias() {
    let suggesters = Suggesters::default();
    assert_eq!(suggesters.input_type("datetime").as_deref(), Some("datetime-local"));
    assert_eq!(suggesters.input_type("emal").as_deref(), Some("email"));
    assert_eq!(suggesters.input_type("chekbox").as_deref(), Some("checkbox"));
}

#[test]
fn test_attribute_suggestion_scoped_to_tag() {
    let suggesters = Suggesters::default();
    assert_eq!(
        suggesters.attribute("input", "autocompete").as_deref(),
        Some("autocomplete")
    );
    assert_eq!(suggesters.attribute("input", "palceholder").as_deref(), Some("placeholder"));
    assert_eq!(suggesters.attribute("label", "clas").as_deref(), Some("class"));
    assert_eq!(suggesters.attribute("div", "palceholder"), None);
}

#[test]
fn test_no_suggestion_below_threshold() {
    let suggesters = Suggesters::default();
    assert_eq!(suggesters.autocomplete("zzzzzzzzzz"), None);
    assert_eq!(suggesters.attribute("input", "foobarbaz"), None);
    assert_eq!(suggesters.input_type(""), None);
}

#[test]
fn test_ties_keep_first_entry() {
    let suggester = Suggester::new(["cat", "bat"], 0.5);
    assert_eq!(suggester.best_match("xat").map(|(e, _)| e), Some("cat"));
    let reversed = Suggester::new(["bat", "cat"], 0.5);
    assert_eq!(reversed.best_match("xat").map(|(e, _)| e), Some("bat"));
}

#[test]
fn test_deterministic() {
    let suggesters = Suggesters::default();
    let first = suggesters.autocomplete("adress-line1");
    for _ in 0..10 {
        assert_eq!(suggesters.autocomplete("adress-line1"), first);
    }
    assert_eq!(first.as_deref(), Some("address-line1"));
}

#[test]
fn test_threshold_is_inclusive() {
    let suggester = Suggester::new(["abcd"], 0.75);
    // one substitution out of four characters scores exactly 0.75
    assert_eq!(suggester.suggest("abce").as_deref(), Some("abcd"));
    assert_eq!(suggester.threshold(), 0.75);
}

#[test]
fn test_lookup_is_exact() {
    let suggester = Suggester::new(["email"], 0.5).with_aliases(&[("mail", "email")]);
    assert_eq!(suggester.lookup("EMAIL").as_deref(), Some("email"));
    assert_eq!(suggester.lookup("mail").as_deref(), Some("email"));
    assert_eq!(suggester.lookup("emai"), None);
}

#[test]
fn test_autocomplete_for_identifier() {
    let suggesters = Suggesters::default();
    assert_eq!(
        suggesters.autocomplete_for_identifier("firstName").as_deref(),
        Some("given-name")
    );
    assert_eq!(
        suggesters.autocomplete_for_identifier("postal_code").as_deref(),
        Some("postal-code")
    );
    assert_eq!(
        suggesters.autocomplete_for_identifier("addressLine1").as_deref(),
        Some("address-line1")
    );
    assert_eq!(suggesters.autocomplete_for_identifier("email").as_deref(), Some("email"));
    assert_eq!(suggesters.autocomplete_for_identifier("q"), None);
    assert_eq!(suggesters.autocomplete_for_identifier("home"), None);
}

#[test]
fn test_kebab_case() {
    assert_eq!(kebab_case("firstName"), "first-name");
    assert_eq!(kebab_case("First Name"), "first-name");
    assert_eq!(kebab_case("cc__number_"), "cc-number");
    assert_eq!(kebab_case("email"), "email");
}
