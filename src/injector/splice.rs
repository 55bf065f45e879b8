use regex::Regex;

/// Split `content` into lines that keep their terminators, so joining them
/// back reproduces the input byte for byte.
pub fn split_lines(content: &str) -> Vec<&str> {
    content.split_inclusive('\n').collect()
}

/// Index right after the last line recognised as an import, or `None` when
/// the file has no import lines. Every line is scanned because imports are
/// not guaranteed to be contiguous.
pub fn import_end_index(lines: &[&str], matcher: &Regex) -> Option<usize> {
    lines
        .iter()
        .rposition(|line| matcher.is_match(line.trim_end_matches(['\r', '\n'])))
        .map(|i| i + 1)
}

/// Rebuild the file with `new_line` inserted at `index`.
///
/// The inserted line reuses the terminator of the line before it. When that
/// line is the last one and has no terminator, a `\n` is added first.
pub fn splice_import(lines: &[&str], index: usize, new_line: &str) -> String {
    let (head, tail) = lines.split_at(index);
    let eol = match head.last() {
        Some(prev) if prev.ends_with("\r\n") => "\r\n",
        _ => "\n",
    };

    let capacity = lines.iter().map(|l| l.len()).sum::<usize>() + new_line.len() + 2 * eol.len();
    let mut out = String::with_capacity(capacity);
    for line in head {
        out.push_str(line);
    }
    if !out.is_empty() && !out.ends_with('\n') {
        out.push_str(eol);
    }
    out.push_str(new_line);
    out.push_str(eol);
    for line in tail {
        out.push_str(line);
    }
    out
}

pub fn render_import(keyword: &str, prefix: &str, target: &str) -> String {
    format!("{}'{}{}';", keyword, prefix, target)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> Regex {
        Regex::new("^import ").unwrap()
    }

    #[test]
    fn split_lines_keeps_terminators() {
        let content = "a\nb\r\nc";
        let lines = split_lines(content);
        assert_eq!(lines, vec!["a\n", "b\r\n", "c"]);
        assert_eq!(lines.concat(), content);
    }

    #[test]
    fn end_index_follows_last_import() {
        let lines = split_lines("import 'a.dart';\nimport 'b.dart';\n\nclass A {}\n");
        assert_eq!(import_end_index(&lines, &matcher()), Some(2));
    }

    #[test]
    fn end_index_with_non_contiguous_imports() {
        let content = "library foo;\nimport 'a.dart';\n\n// comment\nimport 'b.dart';\nclass A {}\n";
        let lines = split_lines(content);
        assert_eq!(import_end_index(&lines, &matcher()), Some(5));
    }

    #[test]
    fn end_index_none_without_imports() {
        let lines = split_lines("class A {}\n  import 'indented.dart';\n");
        assert_eq!(import_end_index(&lines, &matcher()), None);
        assert_eq!(import_end_index(&[], &matcher()), None);
    }

    #[test]
    fn anchored_pattern_sees_line_without_terminator() {
        let re = Regex::new(r"^import '.*';$").unwrap();
        let lines = split_lines("import 'a.dart';\r\nvoid main() {}\n");
        assert_eq!(import_end_index(&lines, &re), Some(1));
    }

    #[test]
    fn splice_inserts_after_index() {
        let lines = split_lines("import 'a.dart';\nimport 'b.dart';\nclass A {}\n");
        let out = splice_import(&lines, 2, "import 'c.dart';");
        assert_eq!(
            out,
            "import 'a.dart';\nimport 'b.dart';\nimport 'c.dart';\nclass A {}\n"
        );
    }

    #[test]
    fn splice_preserves_crlf() {
        let lines = split_lines("import 'a.dart';\r\nclass A {}\r\n");
        let out = splice_import(&lines, 1, "import 'c.dart';");
        assert_eq!(out, "import 'a.dart';\r\nimport 'c.dart';\r\nclass A {}\r\n");
    }

    #[test]
    fn splice_after_unterminated_last_line() {
        let lines = split_lines("import 'a.dart';");
        let out = splice_import(&lines, 1, "import 'c.dart';");
        assert_eq!(out, "import 'a.dart';\nimport 'c.dart';\n");
    }

    #[test]
    fn render_import_with_and_without_prefix() {
        assert_eq!(
            render_import("import ", "../../", "shared/util/app_theme_helpers.dart"),
            "import '../../shared/util/app_theme_helpers.dart';"
        );
        assert_eq!(
            render_import("import ", "", "shared/x.dart"),
            "import 'shared/x.dart';"
        );
    }
}
