/// Strip the common indentation of a snippet, as written inside markup.
///
/// Leading and trailing blank lines are dropped; the smallest indentation of
/// the remaining non-blank lines is removed from every line.
pub fn dedent(text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let first = lines.iter().position(|l| !l.trim().is_empty());
    let last = lines.iter().rposition(|l| !l.trim().is_empty());
    let (first, last) = match (first, last) {
        (Some(first), Some(last)) => (first, last),
        _ => return String::new(),
    };
    let lines = &lines[first..=last];

    let margin = lines
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| indentation(l))
        .min()
        .unwrap_or(0);

    lines
        .iter()
        .map(|line| {
            if line.trim().is_empty() {
                ""
            } else {
                &line[margin..]
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Byte length of the leading spaces and tabs.
fn indentation(line: &str) -> usize {
    line.len() - line.trim_start_matches([' ', '\t']).len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_removes_common_indentation() {
        let input = "      function test() {\n        return 1;\n      }";
        assert_eq!(dedent(input), "function test() {\n  return 1;\n}");
    }

    #[test]
    fn test_drops_surrounding_blank_lines() {
        let input = "\n    const x = 1;\n    const y = 2;\n";
        assert_eq!(dedent(input), "const x = 1;\nconst y = 2;");
    }

    #[test]
    fn test_keeps_inner_blank_lines() {
        let input = "  a;\n\n  b;";
        assert_eq!(dedent(input), "a;\n\nb;");
    }

    #[test]
    fn test_whitespace_only() {
        assert_eq!(dedent("   \n  \n"), "");
        assert_eq!(dedent(""), "");
    }

    #[test]
    fn test_unindented_text_unchanged() {
        assert_eq!(dedent("x;\n  y;"), "x;\n  y;");
    }
}
