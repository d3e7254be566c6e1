// ==========================================
// Internationalization (i18n)
// ==========================================
// rust-i18n, locales/pt-BR.yml (default) and locales/en.yml
// ==========================================
// Note: rust_i18n::i18n! is initialized in lib.rs
// ==========================================

/// Locales shipped with the crate
pub const AVAILABLE_LOCALES: &[&str] = &["pt-BR", "en"];

/// Map a requested locale onto a shipped one ("en-US" -> "en")
pub fn resolve_locale(requested: &str) -> &'static str {
    let requested = requested.trim();
    if let Some(exact) = AVAILABLE_LOCALES
        .iter()
        .find(|l| l.eq_ignore_ascii_case(requested))
    {
        return exact;
    }
    let language = requested.split(['-', '_']).next().unwrap_or("");
    AVAILABLE_LOCALES
        .iter()
        .find(|l| {
            l.split('-')
                .next()
                .is_some_and(|lang| lang.eq_ignore_ascii_case(language))
        })
        .copied()
        .unwrap_or(AVAILABLE_LOCALES[0])
}

/// Translate a key for an explicit locale, substituting `%{name}` placeholders
///
/// # Example
/// ```no_run
/// use cycle_radar::i18n::t_for;
/// let msg = t_for("en", "alert.waste", &[("pct", "12.0"), ("meals", "24")]);
/// ```
pub fn t_for(locale: &str, key: &str, args: &[(&str, &str)]) -> String {
    let locale = resolve_locale(locale);
    let mut result = rust_i18n::t!(key, locale = locale).to_string();
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}
