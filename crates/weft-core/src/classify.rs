//! Binary vs. text classification
//!
//! Decides the transfer encoding per asset: text assets are sent to the
//! store as a plain `value`, binary assets as a base64 `attachment`.
//! Classification is by extension only; content is never inspected.
//!
//! Unknown extensions classify as binary. Sending an unrecognized format
//! through the text path would corrupt it, while base64 round-trips
//! anything, so binary is the safe default.

/// Extensions that always transfer as base64 attachments.
///
/// This exact set is a compatibility contract with the store API; extend
/// it only with formats the store is known to reject as text.
pub const BINARY_EXTENSIONS: &[&str] = &[
    "png", "gif", "jpg", "jpeg", "eot", "svg", "ttf", "woff", "otf", "swf", "ico", "pdf",
];

/// Extensions of the textual formats this domain actually ships.
const TEXT_EXTENSIONS: &[&str] = &["liquid", "css", "js", "json"];

/// Compound suffixes that are textual even though their final extension
/// is not in [`TEXT_EXTENSIONS`] (`application.js.map` ends in `.map`).
const TEXT_SUFFIXES: &[&str] = &[".js.map"];

/// Classify a path as binary (true) or text (false).
///
/// Total over all strings: a path with no extension, or an extension not
/// recognized as textual, is binary.
pub fn is_binary(path: &str) -> bool {
    let lower = path.to_ascii_lowercase();
    // Only the file name takes part; dots in directory names don't count.
    let name = lower.rsplit('/').next().unwrap_or(&lower);

    let ext = match name.rsplit_once('.') {
        Some((_, ext)) => ext,
        None => return true,
    };

    if BINARY_EXTENSIONS.contains(&ext) {
        return true;
    }
    if TEXT_EXTENSIONS.contains(&ext) {
        return false;
    }
    !TEXT_SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_binary_extensions() {
        for ext in BINARY_EXTENSIONS {
            assert!(is_binary(&format!("hello.{ext}")), "{ext} should be binary");
        }
    }

    #[test]
    fn test_binary_extension_case_insensitive() {
        assert!(is_binary("logo.PNG"));
        assert!(is_binary("Brochure.Pdf"));
    }

    #[test]
    fn test_unknown_extension_is_binary() {
        assert!(is_binary("omg.wut"));
    }

    #[test]
    fn test_no_extension_is_binary() {
        assert!(is_binary("Makefile"));
        assert!(is_binary("assets/LICENSE"));
    }

    #[test]
    fn test_text_extensions() {
        assert!(!is_binary("theme.liquid"));
        assert!(!is_binary("style.css"));
        assert!(!is_binary("application.js"));
        assert!(!is_binary("settings_data.json"));
    }

    #[test]
    fn test_compound_liquid_extension_is_text() {
        // The trailing extension decides: .sass.liquid ends in .liquid.
        assert!(!is_binary("style.sass.liquid"));
    }

    #[test]
    fn test_js_map_is_text() {
        // `map` is in no text list, but the .js.map compound suffix is.
        assert!(!is_binary("application.js.map"));
    }

    #[test]
    fn test_bare_map_extension_is_binary() {
        assert!(is_binary("world.map"));
    }

    #[test]
    fn test_dots_in_directories_are_ignored() {
        assert!(!is_binary("themes/v2.0/layout/theme.liquid"));
        assert!(is_binary("themes/v2.0/readme"));
    }
}
