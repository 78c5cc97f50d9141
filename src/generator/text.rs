//! Small text helpers shared by the emitters

use std::path::{Component, Path, PathBuf};

/// `EVMTransaction` → `evm-transaction`, `AddressValidity` → `address-validity`.
///
/// A run of capitals stays together unless its last capital starts a
/// lower-case word.
pub fn to_kebab_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len() + 4);
    let mut i = 0;
    while i < chars.len() {
        if !chars[i].is_ascii_uppercase() {
            out.push(chars[i]);
            i += 1;
            continue;
        }
        let mut run_end = i;
        while run_end < chars.len() && chars[run_end].is_ascii_uppercase() {
            run_end += 1;
        }
        let before_word = run_end < chars.len() && chars[run_end].is_ascii_lowercase();
        let group_end = if before_word && run_end - i > 1 {
            run_end - 1
        } else if before_word {
            i + 1
        } else {
            run_end
        };
        if i > 0 {
            out.push('-');
        }
        out.extend(chars[i..group_end].iter().map(char::to_ascii_lowercase));
        i = group_end;
    }
    out
}

/// Prefix `./` unless the path already starts with `.`.
pub fn prefix_dot_slash(relative: &str) -> String {
    if relative.starts_with('.') {
        relative.to_string()
    } else {
        format!("./{relative}")
    }
}

/// `/** ... */` block with one `* ` line per line of `text`.
pub fn jsdoc_comment_text(text: &str) -> String {
    let body = text
        .trim()
        .lines()
        .map(|line| format!("* {line}"))
        .collect::<Vec<_>>()
        .join("\n");
    format!("/**\n{body}\n*/")
}

/// Every line of `text` behind `prefix` (`//` when used as line comments).
pub fn comment_text(text: &str, prefix: &str) -> String {
    let prefix = if prefix.is_empty() {
        String::new()
    } else {
        format!("{prefix} ")
    };
    text.trim()
        .lines()
        .map(|line| format!("{prefix}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Lexically normalized absolute form of `path` (no filesystem access).
fn normalize(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut out = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

/// `/`-separated path of `to` relative to the directory `from`.
///
/// `relative_path("src/controller/btc", "src/service")` is `../../service`.
pub fn relative_path(from: &Path, to: &Path) -> String {
    let from = normalize(from);
    let to = normalize(to);
    let from_parts: Vec<_> = from.components().collect();
    let to_parts: Vec<_> = to.components().collect();
    let common = from_parts
        .iter()
        .zip(&to_parts)
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<String> = vec!["..".to_string(); from_parts.len() - common];
    parts.extend(
        to_parts[common..]
            .iter()
            .map(|c| c.as_os_str().to_string_lossy().into_owned()),
    );
    if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    }
}

/// [`relative_path`] with a leading `./` for import specifiers.
pub fn import_path(from: &Path, to: &Path) -> String {
    prefix_dot_slash(&relative_path(from, to))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_kebab_case() {
        assert_eq!(to_kebab_case("Payment"), "payment");
        assert_eq!(to_kebab_case("EVMTransaction"), "evm-transaction");
        assert_eq!(to_kebab_case("AddressValidity"), "address-validity");
        assert_eq!(
            to_kebab_case("BalanceDecreasingTransaction"),
            "balance-decreasing-transaction"
        );
        assert_eq!(to_kebab_case("BTC"), "btc");
        assert_eq!(to_kebab_case("aB"), "a-b");
    }

    #[test]
    fn test_prefix_dot_slash() {
        assert_eq!(prefix_dot_slash("controller"), "./controller");
        assert_eq!(prefix_dot_slash("../controller"), "../controller");
        assert_eq!(prefix_dot_slash("./x"), "./x");
    }

    #[test]
    fn test_comments() {
        assert_eq!(jsdoc_comment_text(" a\nb \n"), "/**\n* a\n* b\n*/");
        assert_eq!(comment_text("x\ny", "//"), "// x\n// y");
        assert_eq!(comment_text("x", ""), "x");
    }

    #[test]
    fn test_relative_path() {
        assert_eq!(
            relative_path(Path::new("src/controller/btc"), Path::new("src/service")),
            "../../service"
        );
        assert_eq!(
            relative_path(Path::new("src"), Path::new("src/controller")),
            "controller"
        );
        assert_eq!(relative_path(Path::new("a/./b"), Path::new("a/b")), ".");
        assert_eq!(
            import_path(
                Path::new("contracts/generated/temporary"),
                Path::new("contracts/interfaces/types/IPayment.sol")
            ),
            "../../interfaces/types/IPayment.sol"
        );
    }
}
