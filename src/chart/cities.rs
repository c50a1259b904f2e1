//! Static city → country lookup.
//!
//! Lets the bot skip the country-code question for the cities its audience
//! actually types. Keys are stored pre-normalized (see
//! [`crate::dialogue::validate::normalize_location`]); lookups are therefore
//! accent- and case-insensitive as long as the input went through the same
//! normalization.

/// Known cities, pre-normalized, with their ISO 3166-1 alpha-2 country code.
const CITY_COUNTRY: &[(&str, &str)] = &[
    // España
    ("madrid", "ES"),
    ("barcelona", "ES"),
    ("valencia", "ES"),
    ("sevilla", "ES"),
    ("zaragoza", "ES"),
    ("malaga", "ES"),
    ("bilbao", "ES"),
    ("cordoba", "ES"),
    ("granada", "ES"),
    // Uruguay
    ("montevideo", "UY"),
    ("cabo polonio", "UY"),
    ("punta del este", "UY"),
    ("maldonado", "UY"),
    ("salto", "UY"),
    // Argentina
    ("buenos aires", "AR"),
    ("rosario", "AR"),
    ("mendoza", "AR"),
    ("la plata", "AR"),
    ("mar del plata", "AR"),
    // México
    ("ciudad de mexico", "MX"),
    ("guadalajara", "MX"),
    ("monterrey", "MX"),
    ("puebla", "MX"),
    // Colombia
    ("bogota", "CO"),
    ("medellin", "CO"),
    ("cali", "CO"),
    ("cartagena", "CO"),
    // Perú
    ("lima", "PE"),
    ("arequipa", "PE"),
    ("cusco", "PE"),
    // Chile
    ("santiago", "CL"),
    ("valparaiso", "CL"),
    ("concepcion", "CL"),
    // Venezuela
    ("caracas", "VE"),
    ("maracaibo", "VE"),
    // Ecuador
    ("quito", "EC"),
    ("guayaquil", "EC"),
    // Resto
    ("asuncion", "PY"),
    ("la paz", "BO"),
    ("santa cruz", "BO"),
    ("san jose", "CR"),
    ("panama", "PA"),
    ("la habana", "CU"),
    ("santo domingo", "DO"),
    ("san juan", "PR"),
    ("lisboa", "PT"),
    ("oporto", "PT"),
];

/// Look up the country code for a normalized city name.
pub fn country_for(normalized_city: &str) -> Option<&'static str> {
    CITY_COUNTRY
        .iter()
        .find(|(city, _)| *city == normalized_city)
        .map(|(_, code)| *code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogue::validate::normalize_location;

    #[test]
    fn known_cities_resolve() {
        assert_eq!(country_for("madrid"), Some("ES"));
        assert_eq!(country_for("montevideo"), Some("UY"));
        assert_eq!(country_for("cabo polonio"), Some("UY"));
    }

    #[test]
    fn unknown_city_is_none() {
        assert_eq!(country_for("villarriba"), None);
        assert_eq!(country_for(""), None);
    }

    #[test]
    fn accented_and_plain_spellings_agree() {
        let accented = normalize_location("Córdoba");
        let plain = normalize_location("cordoba");
        assert_eq!(accented, plain);
        assert_eq!(country_for(&accented), country_for(&plain));
        assert!(country_for(&accented).is_some());
    }

    #[test]
    fn table_keys_are_already_normalized() {
        for (city, code) in CITY_COUNTRY {
            assert_eq!(
                *city,
                normalize_location(city),
                "table key {city:?} must be pre-normalized"
            );
            assert_eq!(code.len(), 2);
            assert!(code.chars().all(|c| c.is_ascii_uppercase()));
        }
    }
}
