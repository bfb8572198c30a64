//! External method names: `SetHealth` is called as `set_health` from scripts.

#[derive(Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Lower,
    Upper,
    Digit,
    Other,
}

impl CharClass {
    fn of(c: char) -> Self {
        if c.is_lowercase() {
            CharClass::Lower
        } else if c.is_uppercase() {
            CharClass::Upper
        } else if c.is_numeric() {
            CharClass::Digit
        } else {
            CharClass::Other
        }
    }
}

/// Split an identifier into words at character-class boundaries.
///
/// A run of upper-case letters followed by lower-case letters gives its last
/// letter to the next word, so `PDFLoader` splits into `PDF` and `Loader`.
pub fn split_camel_case(name: &str) -> Vec<String> {
    let mut runs: Vec<Vec<char>> = Vec::new();
    let mut last = None;
    for c in name.chars() {
        let class = CharClass::of(c);
        match runs.last_mut() {
            Some(run) if last == Some(class) => run.push(c),
            _ => runs.push(vec![c]),
        }
        last = Some(class);
    }

    for i in 0..runs.len().saturating_sub(1) {
        let upper_then_lower = CharClass::of(runs[i][0]) == CharClass::Upper
            && CharClass::of(runs[i + 1][0]) == CharClass::Lower;
        if upper_then_lower {
            if let Some(c) = runs[i].pop() {
                runs[i + 1].insert(0, c);
            }
        }
    }

    runs.into_iter()
        .filter(|run| !run.is_empty())
        .map(|run| run.into_iter().collect())
        .collect()
}

/// Name a method is registered under in the VM.
pub fn external_name(method: &str) -> String {
    split_camel_case(method).join("_").to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split() {
        assert_eq!(split_camel_case("SetHealth"), ["Set", "Health"]);
        assert_eq!(split_camel_case("PDFLoader"), ["PDF", "Loader"]);
        assert_eq!(split_camel_case("GL11Version"), ["GL", "11", "Version"]);
        assert_eq!(split_camel_case("lowercase"), ["lowercase"]);
        assert_eq!(split_camel_case("BadUTF8"), ["Bad", "UTF", "8"]);
        assert!(split_camel_case("").is_empty());
    }

    #[test]
    fn test_external_names() {
        assert_eq!(external_name("SetHealth"), "set_health");
        assert_eq!(external_name("HP"), "hp");
        assert_eq!(external_name("Attack"), "attack");
        assert_eq!(external_name("PDFLoader"), "pdf_loader");
        assert_eq!(external_name("Version2"), "version_2");
        assert_eq!(external_name("New"), "new");
    }

    #[test]
    fn test_other_characters_form_their_own_word() {
        assert_eq!(split_camel_case("Set_Health"), ["Set", "_", "Health"]);
        assert_eq!(external_name("Set_Health"), "set___health");
    }
}
