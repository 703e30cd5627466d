//! Lenient urlencoded body parsing for the HTML forms.
//!
//! Bodies are decoded whatever the `Content-Type`; repeated keys keep the last
//! value, unknown keys are skipped and anything undecodable falls back to an
//! empty field.

use url::form_urlencoded;

use crate::store::RegistrationFields;

pub fn registration_fields(body: &[u8]) -> RegistrationFields {
    let mut fields = RegistrationFields::default();

    for (key, value) in form_urlencoded::parse(body) {
        let slot = match key.as_ref() {
            "name" => &mut fields.name,
            "email" => &mut fields.email,
            "phone" => &mut fields.phone,
            "branch" => &mut fields.branch,
            "year" => &mut fields.year,
            "college" => &mut fields.college,
            "note" => &mut fields.note,
            _ => continue,
        };
        *slot = value.into_owned();
    }

    fields
}

pub fn pin(body: &[u8]) -> String {
    form_urlencoded::parse(body)
        .filter(|(key, _)| key == "pin")
        .last()
        .map(|(_, value)| value.into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_known_fields() {
        let fields = registration_fields(b"name=Asha+K&email=a%40x.com&year=2nd&unknown=1");

        assert_eq!(fields.name, "Asha K");
        assert_eq!(fields.email, "a@x.com");
        assert_eq!(fields.year, "2nd");
        assert_eq!(fields.phone, "");
    }

    #[test]
    fn repeated_keys_keep_last_value() {
        assert_eq!(registration_fields(b"name=a&name=b").name, "b");
        assert_eq!(pin(b"pin=1&pin=2"), "2");
    }

    #[test]
    fn garbage_bodies_fall_back_to_defaults() {
        assert_eq!(registration_fields(b""), RegistrationFields::default());
        assert_eq!(registration_fields(b"{\"name\":\"json\"}"), RegistrationFields::default());
        assert_eq!(pin(b"\xff\xfe"), "");
    }

    #[test]
    fn invalid_utf8_is_decoded_lossily() {
        let fields = registration_fields(b"name=%FFAsha");
        assert!(fields.name.ends_with("Asha"));
    }
}
