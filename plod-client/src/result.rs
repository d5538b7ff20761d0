use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// SPARQL 1.1 Query Results JSON document, as returned for a SELECT query.
#[derive(Debug, Clone, Deserialize)]
pub struct SparqlResponse {
    pub head: SparqlHead,
    #[serde(default)]
    pub results: SparqlBindings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SparqlHead {
    #[serde(default)]
    pub vars: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SparqlBindings {
    #[serde(default)]
    pub bindings: Vec<HashMap<String, RdfTerm>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RdfTerm {
    #[serde(rename = "type")]
    pub kind: TermKind,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datatype: Option<String>,
    #[serde(rename = "xml:lang", skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TermKind {
    Uri,
    Literal,
    TypedLiteral,
    Bnode,
}

/// A result table: one column per projected variable, one row per solution.
/// Unbound cells are `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResults {
    pub vars: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl QueryResults {
    pub fn new(vars: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        Self { vars, rows }
    }

    pub fn from_response(response: SparqlResponse) -> Self {
        let vars = response.head.vars;
        let rows = response
            .results
            .bindings
            .into_iter()
            .map(|mut binding| {
                vars.iter()
                    .map(|var| binding.remove(var).map(|term| term.value))
                    .collect()
            })
            .collect();

        Self { vars, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a variable in the projection
    pub fn column(&self, name: &str) -> Option<usize> {
        self.vars.iter().position(|v| v == name)
    }

    /// Bound values of one column, in row order
    pub fn column_values(&self, name: &str) -> Vec<&str> {
        match self.column(name) {
            Some(idx) => self
                .rows
                .iter()
                .filter_map(|row| row.get(idx).and_then(|cell| cell.as_deref()))
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn first_value(&self, name: &str) -> Option<&str> {
        self.column_values(name).into_iter().next()
    }

    /// Rows where `key_column` equals `key`, projected onto `value_column`
    pub fn lookup(&self, key_column: &str, key: &str, value_column: &str) -> Vec<&str> {
        let (Some(k), Some(v)) = (self.column(key_column), self.column(value_column)) else {
            return Vec::new();
        };

        self.rows
            .iter()
            .filter(|row| row.get(k).and_then(|c| c.as_deref()) == Some(key))
            .filter_map(|row| row.get(v).and_then(|c| c.as_deref()))
            .collect()
    }

    /// The list-of-lists shape: `[["a", null], ...]`
    pub fn to_rows(&self) -> Value {
        Value::Array(
            self.rows
                .iter()
                .map(|row| {
                    Value::Array(
                        row.iter()
                            .map(|cell| match cell {
                                Some(s) => Value::String(s.clone()),
                                None => Value::Null,
                            })
                            .collect(),
                    )
                })
                .collect(),
        )
    }

    /// One JSON object per row keyed by variable name
    pub fn to_records(&self) -> Value {
        Value::Array(
            self.rows
                .iter()
                .map(|row| {
                    let mut record = Map::new();
                    for (var, cell) in self.vars.iter().zip(row) {
                        let value = match cell {
                            Some(s) => Value::String(s.clone()),
                            None => Value::Null,
                        };
                        record.insert(var.clone(), value);
                    }
                    Value::Object(record)
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
      "head": { "vars": ["p", "o"] },
      "results": { "bindings": [
        { "p": { "type": "uri", "value": "http://www.w3.org/2000/01/rdf-schema#label" },
          "o": { "type": "literal", "value": "Pompeii", "xml:lang": "en" } },
        { "p": { "type": "uri", "value": "http://www.w3.org/1999/02/22-rdf-syntax-ns#type" },
          "o": { "type": "uri", "value": "urn:p-lod:id:city" } },
        { "p": { "type": "uri", "value": "urn:p-lod:id:wikidata-url" } }
      ] }
    }"#;

    fn sample() -> QueryResults {
        let response: SparqlResponse = serde_json::from_str(SAMPLE).unwrap();
        QueryResults::from_response(response)
    }

    #[test]
    fn test_from_response_keeps_var_order() {
        let results = sample();
        assert_eq!(results.vars, vec!["p", "o"]);
        assert_eq!(results.len(), 3);
        assert_eq!(
            results.rows[1],
            vec![
                Some("http://www.w3.org/1999/02/22-rdf-syntax-ns#type".to_string()),
                Some("urn:p-lod:id:city".to_string())
            ]
        );
    }

    #[test]
    fn test_unbound_cell_is_none() {
        let results = sample();
        assert_eq!(results.rows[2][1], None);
        assert_eq!(results.column_values("o").len(), 2);
    }

    #[test]
    fn test_lookup_by_predicate() {
        let results = sample();
        assert_eq!(
            results.lookup("p", "http://www.w3.org/2000/01/rdf-schema#label", "o"),
            vec!["Pompeii"]
        );
        assert!(results.lookup("p", "urn:p-lod:id:nothing", "o").is_empty());
        assert!(results.lookup("missing", "x", "o").is_empty());
    }

    #[test]
    fn test_to_records_and_rows() {
        let results = sample();
        let records = results.to_records();
        assert_eq!(records[0]["o"], "Pompeii");
        assert_eq!(records[2]["o"], Value::Null);

        let rows = results.to_rows();
        assert_eq!(rows[1][1], "urn:p-lod:id:city");
        assert_eq!(rows[2][1], Value::Null);
    }

    #[test]
    fn test_empty_results_section_defaults() {
        let response: SparqlResponse =
            serde_json::from_str(r#"{ "head": { "vars": ["x"] } }"#).unwrap();
        let results = QueryResults::from_response(response);
        assert!(results.is_empty());
        assert_eq!(results.first_value("x"), None);
    }

    #[test]
    fn test_term_kinds_deserialize() {
        let term: RdfTerm = serde_json::from_str(
            r#"{ "type": "typed-literal", "value": "3", "datatype": "http://www.w3.org/2001/XMLSchema#integer" }"#,
        )
        .unwrap();
        assert_eq!(term.kind, TermKind::TypedLiteral);
        assert!(term.datatype.is_some());
    }
}
