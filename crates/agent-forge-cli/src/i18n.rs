// crates/agent-forge-cli/src/i18n.rs
// ============================================================================
// Module: i18n
// Description: Locale selection and message catalog for CLI output.
// Purpose: Resolve every user-facing CLI string through a keyed catalog so
//          output language is a runtime choice rather than a compile-time one.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Message catalog for the command-line interface. Every user-facing string
//! the binary prints goes through [`translate`] (usually via the [`t!`]
//! macro), keyed by a stable message identifier. English is the reference
//! catalog; Catalan is carried as a machine-translated courtesy catalog and
//! falls back to English for any key it lacks.
//!
//! The active locale is process-wide and set once at startup: the first call
//! to [`set_locale`] wins and later calls are ignored, so command handlers
//! can translate without threading a locale value through every signature.
//!
//! ## Index
//! - [`Locale`]: supported output languages.
//! - [`set_locale`] / [`current_locale`]: process-wide locale state.
//! - [`translate`]: catalog lookup with English and key fallback.
//! - [`t!`]: convenience macro wrapping [`translate`].
//!
//! [`t!`]: macro@crate::t

// ==== SECTION: Imports ====

use std::collections::HashMap;
use std::sync::OnceLock;

// ==== SECTION: Locale ====

/// Output languages the CLI can speak.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locale {
    /// English, the reference catalog.
    En,
    /// Catalan, machine-translated from the English catalog.
    Ca,
}

/// Locales accepted by [`Locale::parse`], in presentation order.
pub const SUPPORTED_LOCALES: &[Locale] = &[Locale::En, Locale::Ca];

impl Locale {
    /// Canonical lowercase tag for this locale.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ca => "ca",
        }
    }

    /// Parses a locale tag such as `en`, `ca`, `ca_ES.UTF-8`, or `en-US`.
    ///
    /// Only the primary subtag is considered, so regional variants of a
    /// supported language resolve to that language. Returns `None` for
    /// unsupported or empty tags.
    #[must_use]
    pub fn parse(tag: &str) -> Option<Self> {
        let normalized = tag.trim().to_ascii_lowercase();
        let primary = normalized.split(['-', '_', '.']).next().unwrap_or_default();
        match primary {
            "en" => Some(Self::En),
            "ca" => Some(Self::Ca),
            _ => None,
        }
    }
}

// ==== SECTION: Process-wide state ====

/// Locale chosen at startup. First write wins.
static CURRENT_LOCALE: OnceLock<Locale> = OnceLock::new();

/// Sets the process-wide locale. Calls after the first are ignored.
pub fn set_locale(locale: Locale) {
    let _ = CURRENT_LOCALE.set(locale);
}

/// Returns the active locale, defaulting to English when none was set.
#[must_use]
pub fn current_locale() -> Locale {
    CURRENT_LOCALE.get().copied().unwrap_or(Locale::En)
}

// ==== SECTION: Message argument ====

/// One named substitution for a catalog message.
///
/// The key names a `{placeholder}` in the message template; the value is the
/// already-formatted replacement text.
#[derive(Debug, Clone)]
pub struct MessageArg {
    /// Placeholder name without braces.
    pub key: &'static str,
    /// Replacement text.
    pub value: String,
}

impl MessageArg {
    /// Builds a substitution for the named placeholder.
    #[must_use]
    pub fn new(key: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

// ==== SECTION: Catalogs ====

/// English reference catalog. Every key the binary uses appears here.
const CATALOG_EN: &[(&str, &str)] = &[
    ("main.version", "agent-forge {version}"),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.stream.unknown", "output"),
    ("output.write_failed", "Failed to write to {stream}: {error}"),
    ("output.json_failed", "Failed to render JSON output: {error}"),
    ("params.load_failed", "Failed to load parameters: {error}"),
    ("params.init.format_unknown", "Unsupported parameter file extension for {path}: expected .json or .toml."),
    ("params.init.exists", "Refusing to overwrite existing parameter file at {path}."),
    ("params.init.render_failed", "Failed to render starter parameters: {error}"),
    ("params.init.write_failed", "Failed to write parameter file to {path}: {error}"),
    ("params.init.ok", "Parameter file written to {path}"),
    ("params.validate.ok", "Parameters valid: project_slug={slug}, agent_module={module}"),
    ("render.failed", "Rendering failed: {error}"),
    ("generate.failed", "Generation failed: {error}"),
    ("generate.ok", "Generated {count} files ({bytes} bytes) at {path}"),
    ("generate.dry_run.entry", "{path} ({bytes} bytes)"),
    ("generate.dry_run.summary", "{count} files, {bytes} bytes; dry run, nothing written"),
    ("verify.setup_failed", "Verification setup failed: {error}"),
    ("verify.project_dir", "Project directory: {path}"),
    ("verify.check.plain", "[{status}] {name}"),
    ("verify.check.detailed", "[{status}] {name}: {detail}"),
    ("verify.summary", "Summary: {passed} passed, {warned} warnings, {skipped} skipped, {failed} failed"),
    ("verify.verdict.pass", "Verification passed."),
    ("verify.verdict.fail", "Verification failed."),
    ("template.show.missing", "No rendered file at '{path}' for these parameters."),
    ("i18n.lang.invalid_env", "Invalid value for {env}: '{value}'. Supported languages: en, ca."),
    ("i18n.disclaimer.machine_translated", "Note: non-English output is machine-translated and may be imprecise."),
];

/// Catalan catalog. Missing keys fall back to English.
const CATALOG_CA: &[(&str, &str)] = &[
    ("main.version", "agent-forge {version}"),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.stream.unknown", "sortida"),
    ("output.write_failed", "No s'ha pogut escriure a {stream}: {error}"),
    ("output.json_failed", "No s'ha pogut generar la sortida JSON: {error}"),
    ("params.load_failed", "No s'han pogut carregar els paràmetres: {error}"),
    ("params.init.format_unknown", "L'extensió del fitxer de paràmetres {path} no és compatible: s'esperava .json o .toml."),
    ("params.init.exists", "No se sobreescriurà el fitxer de paràmetres existent a {path}."),
    ("params.init.render_failed", "No s'han pogut generar els paràmetres inicials: {error}"),
    ("params.init.write_failed", "No s'ha pogut escriure el fitxer de paràmetres a {path}: {error}"),
    ("params.init.ok", "Fitxer de paràmetres escrit a {path}"),
    ("params.validate.ok", "Paràmetres vàlids: project_slug={slug}, agent_module={module}"),
    ("render.failed", "La renderització ha fallat: {error}"),
    ("generate.failed", "La generació ha fallat: {error}"),
    ("generate.ok", "S'han generat {count} fitxers ({bytes} bytes) a {path}"),
    ("generate.dry_run.entry", "{path} ({bytes} bytes)"),
    ("generate.dry_run.summary", "{count} fitxers, {bytes} bytes; execució en sec, no s'ha escrit res"),
    ("verify.setup_failed", "La preparació de la verificació ha fallat: {error}"),
    ("verify.project_dir", "Directori del projecte: {path}"),
    ("verify.check.plain", "[{status}] {name}"),
    ("verify.check.detailed", "[{status}] {name}: {detail}"),
    ("verify.summary", "Resum: {passed} correctes, {warned} avisos, {skipped} omesos, {failed} fallits"),
    ("verify.verdict.pass", "Verificació superada."),
    ("verify.verdict.fail", "Verificació fallida."),
    ("template.show.missing", "No hi ha cap fitxer renderitzat a '{path}' per a aquests paràmetres."),
    ("i18n.lang.invalid_env", "El valor de {env} no és vàlid: '{value}'. Llengües compatibles: en, ca."),
    ("i18n.disclaimer.machine_translated", "Nota: la sortida que no és en anglès és traduïda automàticament i pot ser imprecisa."),
];

/// Returns the raw catalog entries for a locale, in declaration order.
#[must_use]
pub const fn catalog_entries_for(locale: Locale) -> &'static [(&'static str, &'static str)] {
    match locale {
        Locale::En => CATALOG_EN,
        Locale::Ca => CATALOG_CA,
    }
}

/// Returns the lazily-built lookup map for a locale.
#[must_use]
pub fn catalog_for(locale: Locale) -> &'static HashMap<&'static str, &'static str> {
    /// Built English lookup over [`CATALOG_EN`].
    static EN: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    /// Built Catalan lookup over [`CATALOG_CA`].
    static CA: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    match locale {
        Locale::En => EN.get_or_init(|| CATALOG_EN.iter().copied().collect()),
        Locale::Ca => CA.get_or_init(|| CATALOG_CA.iter().copied().collect()),
    }
}

// ==== SECTION: Translation ====

/// Resolves a message key in the active locale and substitutes arguments.
///
/// Lookup order is the active locale, then English, then the key itself, so
/// a missing translation degrades to readable English and a missing key
/// degrades to something greppable rather than a panic. Placeholders with no
/// matching argument are left verbatim.
#[must_use]
pub fn translate(key: &str, args: Vec<MessageArg>) -> String {
    let locale = current_locale();
    let template = catalog_for(locale)
        .get(key)
        .or_else(|| catalog_for(Locale::En).get(key))
        .copied()
        .unwrap_or(key);
    let mut message = template.to_owned();
    for arg in args {
        let placeholder = format!("{{{}}}", arg.key);
        message = message.replace(&placeholder, &arg.value);
    }
    message
}

/// Translates a message key with optional named arguments.
///
/// `t!("generate.ok", count = 42, path = dir)` resolves the key in the
/// active locale and substitutes `{count}` and `{path}`. Argument values are
/// formatted with `to_string`, so anything `Display` works.
#[macro_export]
macro_rules! t {
    ($key:literal $(, $name:ident = $value:expr)* $(,)?) => {
        $crate::i18n::translate(
            $key,
            vec![
                $(
                    $crate::i18n::MessageArg::new(stringify!($name), $value.to_string()),
                )*
            ],
        )
    };
}
