/// Derive a URL-safe identifier from free text.
///
/// ASCII alphanumerics are lowercased, everything else becomes a hyphen, and
/// leading/trailing hyphens are stripped. An input with nothing usable yields
/// "item". When a disambiguator is given (typically a fresh UUID), its first
/// six characters are appended after a hyphen so identical titles still
/// produce distinct slugs.
pub fn slugify(text: &str, disambiguator: Option<&str>) -> String {
    let mapped: String = text
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect();
    let base = mapped.trim_matches('-');
    let base = if base.is_empty() { "item" } else { base };

    match disambiguator {
        Some(token) => {
            let prefix: String = token.chars().take(6).collect();
            format!("{}-{}", base, prefix)
        }
        None => base.to_string(),
    }
}
