//! Filename, site-name and ordering helpers.

use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;
use url::Url;

/// Placeholder used when no usable site or client name exists.
pub const FALLBACK_SITE_NAME: &str = "website";

const MAX_FILENAME_PART: usize = 50;

/// Strip diacritics from `text` (NFKD, then drop combining marks).
fn fold_diacritics(text: &str) -> String {
    text.nfkd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Reduce a free-form name to `[a-z0-9-]`, at most 50 characters.
///
/// Every run of other characters becomes one hyphen; there are no leading
/// or trailing hyphens.
pub fn sanitize_filename_part(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for c in fold_diacritics(name).chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !out.is_empty() {
                out.push('-');
            }
            pending_hyphen = false;
            out.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    out.truncate(MAX_FILENAME_PART);
    out.trim_end_matches('-').to_string()
}

/// `reporte-<name>-<epoch_ms>.pdf`
pub fn report_filename(name: &str, epoch_ms: i64) -> String {
    let part = match sanitize_filename_part(name) {
        p if p.is_empty() => FALLBACK_SITE_NAME.to_string(),
        p => p,
    };
    format!("reporte-{}-{}.pdf", part, epoch_ms)
}

/// Host of `url` without a leading `www.`, or the placeholder.
pub fn site_name_from_url(url: &str) -> String {
    Url::parse(url.trim())
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .map(|host| host.strip_prefix("www.").map(str::to_string).unwrap_or(host))
        .filter(|host| !host.is_empty())
        .unwrap_or_else(|| FALLBACK_SITE_NAME.to_string())
}

/// Primary sort key approximating locale-aware ordering: accents and case
/// are ignored.
pub fn collation_key(text: &str) -> String {
    fold_diacritics(text).to_lowercase()
}

/// Compare two display strings by collation key, then by raw value.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_clean(part: &str) -> bool {
        part.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
            && !part.starts_with('-')
            && !part.ends_with('-')
            && part.len() <= MAX_FILENAME_PART
    }

    #[test]
    fn sanitizes_accents_and_symbols() {
        assert_eq!(sanitize_filename_part("Café & Panadería Núñez"), "cafe-panaderia-nunez");
        assert_eq!(sanitize_filename_part("  --Hello,   World!-- "), "hello-world");
        assert_eq!(sanitize_filename_part("ACME S.A. de C.V."), "acme-s-a-de-c-v");
        assert_eq!(sanitize_filename_part("!!!"), "");
    }

    #[test]
    fn sanitized_part_is_bounded_and_clean() {
        let long = "Una Empresa Con Un Nombre Extremadamente Largo Para Un Archivo PDF";
        let part = sanitize_filename_part(long);
        assert!(is_clean(&part), "{part}");

        let hyphen_at_cut = format!("{}-{}", "a".repeat(49), "bbbb");
        let part = sanitize_filename_part(&hyphen_at_cut);
        assert_eq!(part, "a".repeat(49));
        assert!(is_clean(&part));
    }

    #[test]
    fn filename_has_prefix_and_timestamp() {
        assert_eq!(
            report_filename("Mi Sitio Web", 1_700_000_000_000),
            "reporte-mi-sitio-web-1700000000000.pdf"
        );
        assert_eq!(report_filename("¿?", 5), "reporte-website-5.pdf");
    }

    #[test]
    fn site_name_strips_www() {
        assert_eq!(site_name_from_url("https://www.example.com/path?q=1"), "example.com");
        assert_eq!(site_name_from_url("http://shop.example.mx"), "shop.example.mx");
        assert_eq!(site_name_from_url("not a url"), FALLBACK_SITE_NAME);
        assert_eq!(site_name_from_url(""), FALLBACK_SITE_NAME);
    }

    #[test]
    fn locale_cmp_ignores_case_and_accents() {
        assert_eq!(locale_cmp("accesibilidad", "Best Practices"), Ordering::Less);
        assert_eq!(locale_cmp("Énfasis", "Ezcurra"), Ordering::Less);
        assert_eq!(locale_cmp("SEO", "Performance"), Ordering::Greater);
        assert_eq!(locale_cmp("Same", "Same"), Ordering::Equal);
    }
}
