// ==========================================
// Internationalization (i18n)
// ==========================================
// rust-i18n, catalogs under locales/
// Supported: en (default), pt-BR
// ==========================================
// Note: the rust_i18n::i18n! macro is initialized in lib.rs
// ==========================================

/// Locales with a catalog under `locales/`
pub const SUPPORTED_LOCALES: [&str; 2] = ["en", "pt-BR"];

pub fn is_supported(locale: &str) -> bool {
    SUPPORTED_LOCALES.contains(&locale)
}

/// Current global locale
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// Set the global locale ("en" or "pt-BR")
pub fn set_locale(locale: &str) {
    rust_i18n::set_locale(locale);
}

/// Translate with the global locale
///
/// # Example
/// ```no_run
/// use prospect_intake::i18n::t;
/// let msg = t("reason.invalid_email");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// Translate with an explicit locale, independent of global state
pub fn t_in(key: &str, locale: &str) -> String {
    rust_i18n::t!(key, locale = locale).to_string()
}

/// Translate with `%{name}` placeholders
///
/// # Example
/// ```no_run
/// use prospect_intake::i18n::t_with_args;
/// let msg = t_with_args("message.file_not_found", &[("path", "/tmp/leads.xlsx")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    t_in_with_args(key, &current_locale(), args)
}

/// `t_with_args` with an explicit locale
pub fn t_in_with_args(key: &str, locale: &str, args: &[(&str, &str)]) -> String {
    let mut result = t_in(key, locale);
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RejectionReason;
    use std::sync::Mutex;

    // locale is global and tests run in parallel
    static LOCALE_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_set_locale() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("pt-BR");
        assert_eq!(current_locale(), "pt-BR");

        set_locale("en");
        assert_eq!(current_locale(), "en");
    }

    #[test]
    fn test_translate_simple() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("pt-BR");
        assert_eq!(t("reason.invalid_email"), "Email inválido");

        set_locale("en");
        assert_eq!(t("reason.invalid_email"), "invalid email");
    }

    #[test]
    fn test_translate_with_args() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("en");
        let msg = t_with_args("message.file_not_found", &[("path", "/tmp/leads.xlsx")]);
        assert!(msg.contains("/tmp/leads.xlsx"));
        assert!(msg.contains("File not found"));

        set_locale("pt-BR");
        let msg = t_with_args("message.file_not_found", &[("path", "/tmp/leads.xlsx")]);
        assert!(msg.contains("/tmp/leads.xlsx"));
        assert!(msg.contains("Arquivo não encontrado"));

        set_locale("en");
    }

    #[test]
    fn test_explicit_locale_ignores_global() {
        assert_eq!(t_in("reason.invalid_tax_id", "en"), "invalid tax ID");
        assert_eq!(t_in("reason.invalid_tax_id", "pt-BR"), "CPF inválido");
    }

    #[test]
    fn test_explicit_locale_with_args() {
        assert_eq!(
            t_in_with_args("message.summary_unaccounted", "pt-BR", &[("count", "0")]),
            "Não contabilizados: 0"
        );
    }

    #[test]
    fn test_every_reason_is_translated() {
        for locale in SUPPORTED_LOCALES {
            for reason in RejectionReason::ALL {
                let text = t_in(reason.i18n_key(), locale);
                assert!(
                    !text.is_empty() && !text.contains("reason."),
                    "{locale}: missing translation for {}",
                    reason.i18n_key()
                );
            }
        }
    }

    #[test]
    fn test_supported_locales() {
        assert!(is_supported("en"));
        assert!(is_supported("pt-BR"));
        assert!(!is_supported("zh-CN"));
    }
}
