//! Closed vocabularies used by the audits and the suggestion engine.

/// Attributes allowed on every HTML element.
pub const GLOBAL_ATTRIBUTES: &[&str] = &[
    "accesskey",
    "autocapitalize",
    "autocorrect",
    "autofocus",
    "class",
    "contenteditable",
    "dir",
    "draggable",
    "enterkeyhint",
    "exportparts",
    "hidden",
    "id",
    "inert",
    "inputmode",
    "is",
    "itemid",
    "itemprop",
    "itemref",
    "itemscope",
    "itemtype",
    "lang",
    "nonce",
    "part",
    "popover",
    "role",
    "slot",
    "spellcheck",
    "style",
    "tabindex",
    "title",
    "translate",
];

const FORM_ATTRIBUTES: &[&str] = &[
    "accept-charset",
    "action",
    "autocomplete",
    "enctype",
    "method",
    "name",
    "novalidate",
    "rel",
    "target",
];

const INPUT_ATTRIBUTES: &[&str] = &[
    "accept",
    "alt",
    "autocomplete",
    "capture",
    "checked",
    "dirname",
    "disabled",
    "form",
    "formaction",
    "formenctype",
    "formmethod",
    "formnovalidate",
    "formtarget",
    "height",
    "list",
    "max",
    "maxlength",
    "min",
    "minlength",
    "multiple",
    "name",
    "pattern",
    "placeholder",
    "popovertarget",
    "popovertargetaction",
    "readonly",
    "required",
    "size",
    "src",
    "step",
    "type",
    "value",
    "width",
];

const SELECT_ATTRIBUTES: &[&str] = &[
    "autocomplete",
    "disabled",
    "form",
    "multiple",
    "name",
    "required",
    "size",
];

const TEXTAREA_ATTRIBUTES: &[&str] = &[
    "autocomplete",
    "cols",
    "dirname",
    "disabled",
    "form",
    "maxlength",
    "minlength",
    "name",
    "placeholder",
    "readonly",
    "required",
    "rows",
    "wrap",
];

const BUTTON_ATTRIBUTES: &[&str] = &[
    "disabled",
    "form",
    "formaction",
    "formenctype",
    "formmethod",
    "formnovalidate",
    "formtarget",
    "name",
    "popovertarget",
    "popovertargetaction",
    "type",
    "value",
];

const LABEL_ATTRIBUTES: &[&str] = &["for"];

const OPTION_ATTRIBUTES: &[&str] = &["disabled", "label", "selected", "value"];

/// Elements whose attributes are checked against an allow-list.
pub const FIELD_LIKE_ELEMENTS: &[&str] = &[
    "form", "input", "select", "textarea", "button", "label", "option",
];

/// Element-specific allow-list, for the elements in [`FIELD_LIKE_ELEMENTS`].
pub fn element_attributes(tag: &str) -> Option<&'static [&'static str]> {
    match tag {
        "form" => Some(FORM_ATTRIBUTES),
        "input" => Some(INPUT_ATTRIBUTES),
        "select" => Some(SELECT_ATTRIBUTES),
        "textarea" => Some(TEXTAREA_ATTRIBUTES),
        "button" => Some(BUTTON_ATTRIBUTES),
        "label" => Some(LABEL_ATTRIBUTES),
        "option" => Some(OPTION_ATTRIBUTES),
        _ => None,
    }
}

/// Input types from the HTML living standard.
pub const INPUT_TYPES: &[&str] = &[
    "button",
    "checkbox",
    "color",
    "date",
    "datetime-local",
    "email",
    "file",
    "hidden",
    "image",
    "month",
    "number",
    "password",
    "radio",
    "range",
    "reset",
    "search",
    "submit",
    "tel",
    "text",
    "time",
    "url",
    "week",
];

/// Historical or common misspelled input types and their replacement.
pub const INPUT_TYPE_ALIASES: &[(&str, &str)] = &[
    ("datetime", "datetime-local"),
    ("phone", "tel"),
    ("telephone", "tel"),
    ("mail", "email"),
    ("integer", "number"),
];

/// Autofill field names.
pub const AUTOCOMPLETE_FIELDS: &[&str] = &[
    "name",
    "honorific-prefix",
    "given-name",
    "additional-name",
    "family-name",
    "honorific-suffix",
    "nickname",
    "username",
    "new-password",
    "current-password",
    "one-time-code",
    "organization-title",
    "organization",
    "street-address",
    "address-line1",
    "address-line2",
    "address-line3",
    "address-level4",
    "address-level3",
    "address-level2",
    "address-level1",
    "country",
    "country-name",
    "postal-code",
    "cc-name",
    "cc-given-name",
    "cc-additional-name",
    "cc-family-name",
    "cc-number",
    "cc-exp",
    "cc-exp-month",
    "cc-exp-year",
    "cc-csc",
    "cc-type",
    "transaction-currency",
    "transaction-amount",
    "language",
    "bday",
    "bday-day",
    "bday-month",
    "bday-year",
    "sex",
    "url",
    "photo",
    "tel",
    "tel-country-code",
    "tel-national",
    "tel-area-code",
    "tel-local",
    "tel-local-prefix",
    "tel-local-suffix",
    "tel-extension",
    "email",
    "impp",
];

/// Autofill tokens that qualify a field name rather than name a field.
pub const AUTOCOMPLETE_MODIFIERS: &[&str] = &[
    "shipping", "billing", "home", "work", "mobile", "fax", "pager", "webauthn",
];

/// Prefix of author-defined autofill section tokens.
pub const AUTOCOMPLETE_SECTION_PREFIX: &str = "section-";

/// Common field naming conventions mapped to the matching autofill token.
pub const AUTOCOMPLETE_ALIASES: &[(&str, &str)] = &[
    ("first-name", "given-name"),
    ("firstname", "given-name"),
    ("fname", "given-name"),
    ("forename", "given-name"),
    ("middle-name", "additional-name"),
    ("last-name", "family-name"),
    ("lastname", "family-name"),
    ("lname", "family-name"),
    ("surname", "family-name"),
    ("full-name", "name"),
    ("fullname", "name"),
    ("user-name", "username"),
    ("login", "username"),
    ("password", "current-password"),
    ("e-mail", "email"),
    ("mail", "email"),
    ("email-address", "email"),
    ("phone", "tel"),
    ("telephone", "tel"),
    ("phone-number", "tel"),
    ("mobile-number", "tel"),
    ("zip", "postal-code"),
    ("zipcode", "postal-code"),
    ("zip-code", "postal-code"),
    ("postcode", "postal-code"),
    ("address", "street-address"),
    ("city", "address-level2"),
    ("town", "address-level2"),
    ("state", "address-level1"),
    ("province", "address-level1"),
    ("region", "address-level1"),
    ("company", "organization"),
    ("birthday", "bday"),
    ("dob", "bday"),
    ("card-number", "cc-number"),
    ("cvv", "cc-csc"),
    ("cvc", "cc-csc"),
    ("otp", "one-time-code"),
];

/// Whether `token` is a valid autocomplete token on its own.
///
/// `off` is deliberately excluded: it is audited separately.
pub fn is_valid_autocomplete_token(token: &str) -> bool {
    let token = token.to_ascii_lowercase();
    token == "on"
        || token.starts_with(AUTOCOMPLETE_SECTION_PREFIX)
        || AUTOCOMPLETE_FIELDS.contains(&token.as_str())
        || AUTOCOMPLETE_MODIFIERS.contains(&token.as_str())
}

/// Whether `name` may appear on `tag` without being flagged.
pub fn is_allowed_attribute(tag: &str, name: &str) -> bool {
    let name = name.to_ascii_lowercase();
    name.starts_with("aria-")
        || name.starts_with("data-")
        || name.starts_with("on")
        || GLOBAL_ATTRIBUTES.contains(&name.as_str())
        || element_attributes(tag).is_some_and(|list| list.contains(&name.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_attributes() {
        assert!(is_allowed_attribute("input", "type"));
        assert!(is_allowed_attribute("input", "aria-describedby"));
        assert!(is_allowed_attribute("input", "data-test"));
        assert!(is_allowed_attribute("input", "onchange"));
        assert!(is_allowed_attribute("label", "class"));
        assert!(is_allowed_attribute("label", "FOR"));
        assert!(!is_allowed_attribute("label", "type"));
        assert!(!is_allowed_attribute("input", "autcomplete"));
    }

    #[test]
    fn test_autocomplete_tokens() {
        assert!(is_valid_autocomplete_token("username"));
        assert!(is_valid_autocomplete_token("shipping"));
        assert!(is_valid_autocomplete_token("section-blue"));
        assert!(is_valid_autocomplete_token("Email"));
        assert!(is_valid_autocomplete_token("on"));
        assert!(!is_valid_autocomplete_token("off"));
        assert!(!is_valid_autocomplete_token("usrname"));
    }

    #[test]
    fn test_aliases_point_into_vocabulary() {
        for (_, target) in AUTOCOMPLETE_ALIASES {
            assert!(AUTOCOMPLETE_FIELDS.contains(target), "{target}");
        }
        for (_, target) in INPUT_TYPE_ALIASES {
            assert!(INPUT_TYPES.contains(target), "{target}");
        }
    }
}
