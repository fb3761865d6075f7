use common::models::{SqlFinding, StatementKind};
use regex::Regex;
use sqlparser::dialect::GenericDialect;
use sqlparser::parser::Parser;
use sqlparser::tokenizer::{Token, Tokenizer};
use std::sync::LazyLock;

/// Matches one candidate statement: a leading DML keyword through to the next
/// semicolon, case insensitive, spanning newlines. Statements without a
/// terminating semicolon are deliberately not picked up.
static STATEMENT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)(?:SELECT|INSERT|UPDATE|DELETE).*?;").unwrap());

/// Scans extracted submission text for SQL statements and runs each through
/// the parser. Statements are independent: one failing to tokenize or parse
/// never aborts the scan, it just yields an invalid finding.
pub fn analyze_sql_statements(text: &str) -> Vec<SqlFinding> {
    STATEMENT_PATTERN
        .find_iter(text)
        .map(|m| analyze_statement(m.as_str().trim()))
        .collect()
}

fn analyze_statement(query: &str) -> SqlFinding {
    let dialect = GenericDialect {};

    let tokens = match Tokenizer::new(&dialect, query).tokenize() {
        Ok(tokens) => tokens,
        Err(e) => {
            log::debug!("failed to tokenize statement: {e}");
            return SqlFinding {
                query: query.to_string(),
                valid: false,
                tokens: vec![],
                kind: StatementKind::Unknown,
            };
        }
    };

    let kind = tokens
        .iter()
        .find_map(|t| match t {
            Token::Word(w) => Some(StatementKind::from_keyword(&w.value)),
            _ => None,
        })
        .unwrap_or(StatementKind::Unknown);

    let tokens = tokens
        .iter()
        .filter(|t| !matches!(t, Token::Whitespace(_)))
        .map(|t| t.to_string())
        .collect();

    SqlFinding {
        query: query.to_string(),
        valid: Parser::parse_sql(&dialect, query).is_ok(),
        tokens,
        kind,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_without_sql_yields_nothing() {
        assert!(analyze_sql_statements("The answer is forty-two.").is_empty());
        assert!(analyze_sql_statements("").is_empty());
    }

    #[test]
    fn well_formed_select_is_valid() {
        let findings = analyze_sql_statements("SELECT c.nom FROM clients c;");
        assert_eq!(findings.len(), 1);
        let finding = &findings[0];
        assert!(finding.valid);
        assert_eq!(finding.kind, StatementKind::Select);
        assert_eq!(finding.query, "SELECT c.nom FROM clients c;");
        assert_eq!(finding.tokens[0], "SELECT");
        assert!(!finding.tokens.iter().any(|t| t.trim().is_empty()));
    }

    #[test]
    fn statement_without_terminator_is_skipped() {
        assert!(analyze_sql_statements("SELECT * FROM clients").is_empty());
    }

    #[test]
    fn keyword_matching_is_case_insensitive_and_spans_newlines() {
        let text = "intro text\nselect nom\nfrom clients\nwhere id = 1;\noutro";
        let findings = analyze_sql_statements(text);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].kind, StatementKind::Select);
        assert!(findings[0].valid);
    }

    #[test]
    fn broken_statement_does_not_abort_the_scan() {
        let text = "SELECT FROM WHERE;\nINSERT INTO t (a) VALUES (1);";
        let findings = analyze_sql_statements(text);
        assert_eq!(findings.len(), 2);
        assert!(!findings[0].valid);
        assert_eq!(findings[0].kind, StatementKind::Select);
        assert!(findings[1].valid);
        assert_eq!(findings[1].kind, StatementKind::Insert);
    }

    #[test]
    fn update_and_delete_are_recognised() {
        let text = "UPDATE t SET a = 1 WHERE id = 2; DELETE FROM t WHERE id = 3;";
        let kinds: Vec<_> = analyze_sql_statements(text)
            .into_iter()
            .map(|f| f.kind)
            .collect();
        assert_eq!(kinds, vec![StatementKind::Update, StatementKind::Delete]);
    }
}
