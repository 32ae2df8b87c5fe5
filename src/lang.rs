use std::io::{BufRead, Write};
use tracing::debug;

use crate::error::{Result, LingodubError};

/// Supported languages: lowercase name mapped to the code understood by
/// both the translation and the synthesis endpoints.
pub const LANGUAGES: &[(&str, &str)] = &[
    ("afrikaans", "af"),
    ("albanian", "sq"),
    ("arabic", "ar"),
    ("bengali", "bn"),
    ("bosnian", "bs"),
    ("bulgarian", "bg"),
    ("catalan", "ca"),
    ("chinese", "zh-CN"),
    ("croatian", "hr"),
    ("czech", "cs"),
    ("danish", "da"),
    ("dutch", "nl"),
    ("english", "en"),
    ("estonian", "et"),
    ("finnish", "fi"),
    ("french", "fr"),
    ("german", "de"),
    ("greek", "el"),
    ("gujarati", "gu"),
    ("hindi", "hi"),
    ("hungarian", "hu"),
    ("icelandic", "is"),
    ("indonesian", "id"),
    ("italian", "it"),
    ("japanese", "ja"),
    ("kannada", "kn"),
    ("korean", "ko"),
    ("latvian", "lv"),
    ("lithuanian", "lt"),
    ("malay", "ms"),
    ("malayalam", "ml"),
    ("mandarin", "zh-CN"),
    ("marathi", "mr"),
    ("nepali", "ne"),
    ("norwegian", "no"),
    ("polish", "pl"),
    ("portuguese", "pt"),
    ("punjabi", "pa"),
    ("romanian", "ro"),
    ("russian", "ru"),
    ("serbian", "sr"),
    ("sinhala", "si"),
    ("slovak", "sk"),
    ("slovenian", "sl"),
    ("spanish", "es"),
    ("swahili", "sw"),
    ("swedish", "sv"),
    ("tamil", "ta"),
    ("telugu", "te"),
    ("thai", "th"),
    ("turkish", "tr"),
    ("ukrainian", "uk"),
    ("urdu", "ur"),
    ("vietnamese", "vi"),
    ("welsh", "cy"),
];

/// Resolve a language name or code to its canonical code.
///
/// Accepts the full name ("Hindi"), the code itself ("hi"), or an
/// unambiguous name prefix ("hind"). Anything else is an error rather
/// than being passed through to the remote services.
pub fn resolve(input: &str) -> Result<String> {
    let normalized = input.trim().to_lowercase();

    if normalized.is_empty() {
        return Err(LingodubError::Language("empty language selection".to_string()));
    }

    // Exact name match
    if let Some((_, code)) = LANGUAGES.iter().find(|(name, _)| *name == normalized) {
        return Ok(code.to_string());
    }

    // Already a code
    if let Some((_, code)) = LANGUAGES
        .iter()
        .find(|(_, code)| code.to_lowercase() == normalized)
    {
        return Ok(code.to_string());
    }

    // Unambiguous name prefix
    let mut matches: Vec<&str> = LANGUAGES
        .iter()
        .filter(|(name, _)| name.starts_with(&normalized))
        .map(|(_, code)| *code)
        .collect();
    matches.dedup();

    match matches.len() {
        1 => {
            debug!("Resolved '{}' via prefix match to '{}'", input, matches[0]);
            Ok(matches[0].to_string())
        }
        0 => Err(LingodubError::Language(format!(
            "'{}' does not match any supported language (run 'lingodub languages' for the full list)",
            input.trim()
        ))),
        _ => Err(LingodubError::Language(format!(
            "'{}' is ambiguous, matches {} languages",
            input.trim(),
            matches.len()
        ))),
    }
}

/// Render the supported-language table, four entries per row.
pub fn render_table() -> String {
    let mut out = String::from("Supported languages:\n");
    for (i, (name, code)) in LANGUAGES.iter().enumerate() {
        let column = format!("  {:<18}({})", title_case(name), code);
        out.push_str(&column);
        if (i + 1) % 4 == 0 {
            out.push('\n');
        }
    }
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}

/// Interactively prompt for a target language until the input resolves.
/// Returns the canonical language code.
pub fn prompt() -> Result<String> {
    let stdin = std::io::stdin();
    let mut reader = stdin.lock();
    prompt_from(&mut reader)
}

fn prompt_from<R: BufRead>(reader: &mut R) -> Result<String> {
    println!("\n{}", render_table());

    loop {
        print!("Enter target language (name or code): ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        let bytes = reader.read_line(&mut line)?;
        if bytes == 0 {
            return Err(LingodubError::Language(
                "no language selected (end of input)".to_string(),
            ));
        }

        match resolve(&line) {
            Ok(code) => return Ok(code),
            Err(e) => println!("  {}", e),
        }
    }
}

fn title_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_by_name() {
        assert_eq!(resolve("Hindi").unwrap(), "hi");
        assert_eq!(resolve("spanish").unwrap(), "es");
        assert_eq!(resolve("  French  ").unwrap(), "fr");
    }

    #[test]
    fn test_resolve_by_code() {
        assert_eq!(resolve("fr").unwrap(), "fr");
        assert_eq!(resolve("HI").unwrap(), "hi");
        assert_eq!(resolve("zh-cn").unwrap(), "zh-CN");
    }

    #[test]
    fn test_resolve_aliases() {
        assert_eq!(resolve("mandarin").unwrap(), "zh-CN");
        assert_eq!(resolve("chinese").unwrap(), "zh-CN");
    }

    #[test]
    fn test_resolve_unique_prefix() {
        assert_eq!(resolve("hind").unwrap(), "hi");
        assert_eq!(resolve("portug").unwrap(), "pt");
    }

    #[test]
    fn test_resolve_ambiguous_prefix() {
        // "ma" matches malay, malayalam, mandarin and marathi
        assert!(matches!(resolve("ma"), Err(LingodubError::Language(_))));
    }

    #[test]
    fn test_resolve_unknown() {
        assert!(matches!(resolve("klingon"), Err(LingodubError::Language(_))));
        assert!(matches!(resolve(""), Err(LingodubError::Language(_))));
        assert!(matches!(resolve("   "), Err(LingodubError::Language(_))));
    }

    #[test]
    fn test_resolve_idempotent() {
        for (name, _) in LANGUAGES {
            let code = resolve(name).unwrap();
            assert_eq!(resolve(&code).unwrap(), code);
        }
    }

    #[test]
    fn test_render_table_lists_all_languages() {
        let table = render_table();
        assert!(table.contains("Hindi"));
        assert!(table.contains("(zh-CN)"));
        assert!(table.contains("Welsh"));
    }

    #[test]
    fn test_prompt_retries_until_valid() {
        let mut input = std::io::Cursor::new(b"klingon\nHindi\n".to_vec());
        assert_eq!(prompt_from(&mut input).unwrap(), "hi");
    }

    #[test]
    fn test_prompt_eof_is_error() {
        let mut input = std::io::Cursor::new(Vec::new());
        assert!(prompt_from(&mut input).is_err());
    }
}
