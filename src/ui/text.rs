//! Panel strings per locale. Static phf tables, looked up by key.

use phf::phf_map;

use crate::core::model::Locale;

static EN: phf::Map<&'static str, &'static str> = phf_map! {
    "heading" => "System Architecture",
    "hint" => "Right-drag to rotate • Hover nodes • Click for details",
    "clear" => "Clear",
    "open" => "Open catalog…",
    "diagram" => "Diagram",
    "language" => "Language",
    "tech" => "Tech",
};

static NL: phf::Map<&'static str, &'static str> = phf_map! {
    "heading" => "Systeemarchitectuur",
    "hint" => "Rechts slepen om te roteren • Hover nodes • Klik voor details",
    "clear" => "Wissen",
    "open" => "Catalogus openen…",
    "diagram" => "Diagram",
    "language" => "Taal",
    "tech" => "Technologie",
};

/// Localized string for `key`; unknown keys come back unchanged.
pub fn tr(locale: Locale, key: &'static str) -> &'static str {
    let table = match locale {
        Locale::En => &EN,
        Locale::Nl => &NL,
    };
    table.get(key).copied().unwrap_or(key)
}
