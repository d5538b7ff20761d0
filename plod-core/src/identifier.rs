//! P-LOD identifiers and the vocabulary the accessors read.

use crate::error::{PlodError, Result};
use std::fmt;

pub const PLOD_NAMESPACE: &str = "urn:p-lod:id:";

pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
pub const RDFS_LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
pub const PLOD_LABEL: &str = "urn:p-lod:id:label";
pub const PLOD_P_IN_P_URL: &str = "urn:p-lod:id:p-in-p-url";
pub const PLOD_WIKIDATA_URL: &str = "urn:p-lod:id:wikidata-url";
pub const PLOD_GEOJSON: &str = "urn:p-lod:id:geojson";

/// Local name of a node in the `urn:p-lod:id:` namespace, e.g. `r1-i9-p1`.
///
/// Identifiers are spliced into query text as `p-lod:<name>`, so only
/// characters valid in an unescaped prefixed name are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(String);

impl Identifier {
    /// Accepts either the bare local name or the full `urn:p-lod:id:` form
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        let local = trimmed.strip_prefix(PLOD_NAMESPACE).unwrap_or(trimmed);

        if local.is_empty() {
            return Err(PlodError::InvalidIdentifier("identifier is empty".to_string()));
        }

        if local.starts_with('.') || local.ends_with('.') {
            return Err(PlodError::InvalidIdentifier(format!(
                "'{}' may not start or end with '.'",
                local
            )));
        }

        if local.starts_with('-') {
            return Err(PlodError::InvalidIdentifier(format!(
                "'{}' may not start with '-'",
                local
            )));
        }

        if let Some(bad) = local
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')))
        {
            return Err(PlodError::InvalidIdentifier(format!(
                "'{}' contains '{}'",
                local, bad
            )));
        }

        Ok(Self(local.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn urn(&self) -> String {
        format!("{}{}", PLOD_NAMESPACE, self.0)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Strip the P-LOD namespace from a URN, leaving other IRIs untouched
pub fn local_name(iri: &str) -> &str {
    iri.strip_prefix(PLOD_NAMESPACE).unwrap_or(iri)
}

/// A predicate is written into the query as `<iri>`
pub fn validate_predicate(iri: &str) -> Result<()> {
    let Some((scheme, rest)) = iri.split_once(':') else {
        return Err(PlodError::InvalidPredicate(format!(
            "'{}' is not an absolute IRI",
            iri
        )));
    };

    if scheme.is_empty()
        || rest.is_empty()
        || !scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    {
        return Err(PlodError::InvalidPredicate(format!(
            "'{}' is not an absolute IRI",
            iri
        )));
    }

    if let Some(bad) = iri
        .chars()
        .find(|c| c.is_whitespace() || matches!(c, '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' | '\\'))
    {
        return Err(PlodError::InvalidPredicate(format!(
            "'{}' contains '{}'",
            iri, bad
        )));
    }

    Ok(())
}
