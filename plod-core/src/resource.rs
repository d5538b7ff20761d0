use crate::error::{PlodError, Result};
use crate::geojson::{collection_from_depictions, tag_feature};
use crate::identifier::{
    Identifier, PLOD_GEOJSON, PLOD_LABEL, PLOD_P_IN_P_URL, PLOD_WIKIDATA_URL, RDF_TYPE,
    RDFS_LABEL, local_name, validate_predicate,
};
use crate::query::PlodQuery;
use crate::report::html_table;
use plod_client::{QueryResults, SparqlClient};
use serde_json::Value;
use std::fmt;
use tracing::{debug, info, warn};

pub const DEFAULT_LEVEL_OF_DETAIL: &str = "space";

/// A node of the P-LOD graph, with the attributes read from its own triples.
pub struct PlodResource<'a> {
    client: &'a SparqlClient,
    pub identifier: Identifier,
    /// The identifier exactly as the caller passed it
    pub identifier_parameter: String,
    pub rdf_type: Option<String>,
    pub label: Option<String>,
    pub p_in_p_url: Option<String>,
    pub wikidata_url: Option<String>,
    /// `?p ?o` table of the subject
    pub triples: QueryResults,
}

impl<'a> PlodResource<'a> {
    /// Fetch the subject's triples. Fails with `NotFound` when it has none.
    pub async fn load(client: &'a SparqlClient, raw_identifier: &str) -> Result<Self> {
        let identifier = Identifier::parse(raw_identifier)?;
        let triples = client
            .select(&PlodQuery::Describe(identifier.clone()).render())
            .await?;

        if triples.is_empty() {
            info!("No triples for {}", identifier);
            return Err(PlodError::NotFound(identifier.to_string()));
        }

        debug!("Loaded {} triples for {}", triples.len(), identifier);

        let first = |predicate: &str| triples.lookup("p", predicate, "o").first().map(|s| s.to_string());
        let rdf_type = first(RDF_TYPE).map(|t| local_name(&t).to_string());
        let label = first(RDFS_LABEL);
        let p_in_p_url = first(PLOD_P_IN_P_URL);
        let wikidata_url = first(PLOD_WIKIDATA_URL);

        Ok(Self {
            client,
            identifier,
            identifier_parameter: raw_identifier.to_string(),
            rdf_type,
            label,
            p_in_p_url,
            wikidata_url,
            triples,
        })
    }

    /// All objects recorded for a predicate among the loaded triples
    pub fn values_of(&self, predicate: &str) -> Vec<&str> {
        self.triples.lookup("p", predicate, "o")
    }

    pub fn first_value(&self, predicate: &str) -> Option<&str> {
        self.values_of(predicate).into_iter().next()
    }

    /// Every `rdf:type` of the subject, namespace stripped
    pub fn rdf_types(&self) -> Vec<&str> {
        self.values_of(RDF_TYPE).into_iter().map(local_name).collect()
    }

    async fn run(&self, query: PlodQuery) -> Result<QueryResults> {
        debug!("Running {} for {}", query.name(), self.identifier);
        Ok(self.client.select(&query.render()).await?)
    }

    /// Objects of `predicate` for this subject; `None` means `urn:p-lod:id:label`
    pub async fn get_predicate_values(&self, predicate: Option<&str>) -> Result<QueryResults> {
        let predicate = predicate.unwrap_or(PLOD_LABEL);
        validate_predicate(predicate)?;
        self.run(PlodQuery::PredicateValues {
            id: self.identifier.clone(),
            predicate: predicate.to_string(),
        })
        .await
    }

    pub async fn depicts_concepts(&self) -> Result<QueryResults> {
        self.run(PlodQuery::DepictsConcepts(self.identifier.clone())).await
    }

    /// Where this concept is depicted; `None` means the `space` level
    pub async fn depicted_where(&self, level_of_detail: Option<&Identifier>) -> Result<QueryResults> {
        let level_of_detail = match level_of_detail {
            Some(level) => level.clone(),
            None => Identifier::parse(DEFAULT_LEVEL_OF_DETAIL)?,
        };
        self.run(PlodQuery::DepictedWhere {
            id: self.identifier.clone(),
            level_of_detail,
        })
        .await
    }

    pub async fn spatial_hierarchy_up(&self) -> Result<QueryResults> {
        self.run(PlodQuery::SpatialHierarchyUp(self.identifier.clone())).await
    }

    pub async fn spatial_children(&self) -> Result<QueryResults> {
        self.run(PlodQuery::SpatialChildren(self.identifier.clone())).await
    }

    pub async fn in_region(&self) -> Result<QueryResults> {
        self.run(PlodQuery::InRegion(self.identifier.clone())).await
    }

    pub async fn instances_of(&self) -> Result<QueryResults> {
        self.run(PlodQuery::InstancesOf(self.identifier.clone())).await
    }

    pub async fn used_as_predicate_by(&self) -> Result<QueryResults> {
        self.run(PlodQuery::UsedAsPredicateBy(self.identifier.clone())).await
    }

    pub async fn images_luna_labels(&self) -> Result<QueryResults> {
        self.run(PlodQuery::ImagesLunaLabels(self.identifier.clone())).await
    }

    /// The subject's own geometry, or a collection of the spaces where it is
    /// depicted, or `None` when neither exists.
    pub async fn geojson(&self) -> Result<Option<Value>> {
        if let Some(raw) = self.first_value(PLOD_GEOJSON) {
            match serde_json::from_str::<Value>(raw) {
                Ok(value) if value.get("type").is_some_and(Value::is_string) => {
                    return Ok(Some(tag_feature(value, self.identifier.as_str())));
                }
                Ok(_) => warn!("Ignoring geojson on {} without a type", self.identifier),
                Err(e) => warn!("Ignoring malformed geojson on {}: {}", self.identifier, e),
            }
        }

        let depictions = self.depicted_where(None).await?;
        Ok(collection_from_depictions(&depictions))
    }

    pub fn triples_html_table(&self) -> String {
        html_table(&self.triples)
    }
}

impl fmt::Display for PlodResource<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => f.write_str(label),
            None => write!(f, "{}", self.identifier),
        }
    }
}

impl fmt::Debug for PlodResource<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlodResource")
            .field("endpoint", &self.client.endpoint())
            .field("identifier", &self.identifier)
            .field("rdf_type", &self.rdf_type)
            .field("label", &self.label)
            .field("triples", &self.triples.len())
            .finish()
    }
}
