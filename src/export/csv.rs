//! CSV export.

use crate::types::Hit;

const HEADER: &str = "Domain,Plugin,Check,URL,Severity,Remediation";

/// Render hits as CSV, one row per hit.
pub fn generate(hits: &[Hit]) -> String {
    let mut csv = String::from(HEADER);
    csv.push('\n');

    for hit in hits {
        let row = [
            csv_escape(&hit.domain),
            csv_escape(&hit.plugin),
            csv_escape(&hit.check),
            csv_escape(&hit.url),
            hit.severity.to_string(),
            csv_escape(&hit.remediation),
        ];
        csv.push_str(&row.join(","));
        csv.push('\n');
    }

    csv
}

/// Quote a field when it holds a separator, quote or line break.
fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Severity;

    #[test]
    fn test_csv_escape() {
        assert_eq!(csv_escape("simple"), "simple");
        assert_eq!(csv_escape("a,b"), "\"a,b\"");
        assert_eq!(csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_escape("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn test_generate() {
        let hits = vec![Hit {
            domain: "https://example.com".to_string(),
            plugin: "Env".to_string(),
            check: "Dotenv".to_string(),
            url: "https://example.com/.env".to_string(),
            endpoint: "/.env".to_string(),
            severity: Severity::High,
            description: String::new(),
            remediation: "Remove the file, rotate secrets".to_string(),
        }];

        let csv = generate(&hits);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], HEADER);
        assert_eq!(
            lines[1],
            "https://example.com,Env,Dotenv,https://example.com/.env,High,\"Remove the file, rotate secrets\""
        );
    }

    #[test]
    fn test_generate_empty() {
        assert_eq!(generate(&[]), format!("{}\n", HEADER));
    }
}
