//! Keyword check that keeps generated statements read-only.
//!
//! Quoted literals and backticked identifiers are skipped, so a name such
//! as `'Set Piece'` does not trip the check. Dotted names (`n.name`,
//! `db.labels`) are kept whole. Nothing here parses the statement beyond
//! splitting it into words.

const WRITE_KEYWORDS: &[&str] = &["CREATE", "MERGE", "DELETE", "DETACH", "SET", "REMOVE", "DROP"];

/// Procedures that only read; any other `CALL ns.proc` is rejected.
const READ_PROCEDURES: &[&str] = &[
    "DB.LABELS",
    "DB.RELATIONSHIPTYPES",
    "DB.PROPERTYKEYS",
    "DB.INDEXES",
    "DB.CONSTRAINTS",
    "DB.INFO",
    "DB.PING",
    "DB.SCHEMA.VISUALIZATION",
    "DB.SCHEMA.NODETYPEPROPERTIES",
    "DB.SCHEMA.RELTYPEPROPERTIES",
];

/// The first write or admin clause found in `statement`, if any.
pub fn find_write_clause(statement: &str) -> Option<String> {
    let words = keywords(statement);

    for (i, word) in words.iter().enumerate() {
        if WRITE_KEYWORDS.contains(&word.as_str()) {
            return Some(word.clone());
        }
        let next = words.get(i + 1).map(String::as_str);
        match (word.as_str(), next) {
            ("LOAD", Some("CSV")) => return Some("LOAD CSV".to_string()),
            // `CALL { ... }` subqueries have no dotted name; their body is
            // checked word by word like the rest of the statement.
            ("CALL", Some(proc)) if proc.contains('.') && !READ_PROCEDURES.contains(&proc) => {
                return Some(format!("CALL {}", proc.to_lowercase()));
            }
            _ => {}
        }
    }
    None
}

/// Whether `statement` only reads from the graph.
pub fn is_read_only(statement: &str) -> bool {
    find_write_clause(statement).is_none()
}

/// Uppercased words outside quotes and backticks.
fn keywords(statement: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for c in statement.chars() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }

        if matches!(c, '\'' | '"' | '`') {
            quote = Some(c);
            flush(&mut current, &mut words);
        } else if c.is_alphanumeric() || c == '_' || (c == '.' && !current.is_empty()) {
            current.extend(c.to_uppercase());
        } else {
            flush(&mut current, &mut words);
        }
    }
    flush(&mut current, &mut words);
    words
}

fn flush(current: &mut String, words: &mut Vec<String>) {
    if !current.is_empty() {
        words.push(std::mem::take(current));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_is_read_only() {
        assert!(is_read_only(
            "MATCH (p:entity)-[:relationship]->(e:entity) WHERE p.name = 'Peter Quill' RETURN e.name;"
        ));
    }

    #[test]
    fn test_write_clauses_are_found() {
        assert_eq!(find_write_clause("MATCH (n) DETACH DELETE n").as_deref(), Some("DETACH"));
        assert_eq!(find_write_clause("create (n:entity {name: 'x'})").as_deref(), Some("CREATE"));
        assert_eq!(find_write_clause("MATCH (n) SET n.name = 'y'").as_deref(), Some("SET"));
        assert_eq!(find_write_clause("MERGE (n:entity {name: 'x'})").as_deref(), Some("MERGE"));
        assert_eq!(find_write_clause("DROP INDEX foo").as_deref(), Some("DROP"));
    }

    #[test]
    fn test_load_csv_and_admin_calls() {
        assert_eq!(
            find_write_clause("LOAD CSV FROM 'file:///x.csv' AS row RETURN row").as_deref(),
            Some("LOAD CSV")
        );
        assert_eq!(
            find_write_clause("CALL dbms.security.listUsers()").as_deref(),
            Some("CALL dbms.security.listusers")
        );
        assert_eq!(
            find_write_clause("CALL apoc.periodic.iterate('a', 'b', {})").as_deref(),
            Some("CALL apoc.periodic.iterate")
        );
        assert!(is_read_only("CALL db.labels()"));
        assert!(is_read_only(
            "CALL db.relationshipTypes() YIELD relationshipType RETURN relationshipType"
        ));
    }

    #[test]
    fn test_schema_writing_procedures_are_found() {
        assert_eq!(
            find_write_clause("CALL db.createLabel('Pwned')").as_deref(),
            Some("CALL db.createlabel")
        );
        assert_eq!(
            find_write_clause("CALL db.createRelationshipType('X')").as_deref(),
            Some("CALL db.createrelationshiptype")
        );
        assert!(!is_read_only("call DB.CreateProperty('x')"));
        assert!(!is_read_only("CALL db.clearQueryCaches()"));
    }

    #[test]
    fn test_subquery_body_is_checked() {
        assert!(is_read_only("CALL { MATCH (n:entity) RETURN n } RETURN n.name"));
        assert_eq!(
            find_write_clause("CALL { MATCH (n) DELETE n } RETURN 1").as_deref(),
            Some("DELETE")
        );
    }

    #[test]
    fn test_property_named_like_keyword_is_read_only() {
        assert!(is_read_only("MATCH (n:entity) RETURN n.set, n.remove"));
    }

    #[test]
    fn test_keywords_inside_literals_are_ignored() {
        assert!(is_read_only("MATCH (n:entity) WHERE n.name = 'Set Piece' RETURN n"));
        assert!(is_read_only("MATCH (n:entity) WHERE n.name = \"DELETE me\" RETURN n"));
        assert!(is_read_only("MATCH (n:`create`) RETURN n"));
        assert!(is_read_only("MATCH (n) WHERE n.name = 'it\\'s set' RETURN n"));
    }

    #[test]
    fn test_keywords_inside_identifiers_are_ignored() {
        assert!(is_read_only("MATCH (n) RETURN n.created_at, n.dataset"));
    }
}
