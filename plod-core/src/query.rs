//! Query templates for the P-LOD graph

use crate::identifier::Identifier;

const PREFIX: &str = "PREFIX p-lod: <urn:p-lod:id:>\nPREFIX rdfs: <http://www.w3.org/2000/01/rdf-schema#>\n";

/// Every query the library sends. Graph traversal is done by the server
/// through the property paths in these templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlodQuery {
    /// All predicate/object pairs of a subject
    Describe(Identifier),
    PredicateValues {
        id: Identifier,
        predicate: String,
    },
    /// Concepts depicted by artwork components inside a space
    DepictsConcepts(Identifier),
    /// Spaces containing depictions of a concept, at a given spatial resolution
    DepictedWhere {
        id: Identifier,
        level_of_detail: Identifier,
    },
    SpatialHierarchyUp(Identifier),
    SpatialChildren(Identifier),
    InRegion(Identifier),
    InstancesOf(Identifier),
    UsedAsPredicateBy(Identifier),
    ImagesLunaLabels(Identifier),
}

impl PlodQuery {
    pub fn name(&self) -> &'static str {
        match self {
            PlodQuery::Describe(_) => "describe",
            PlodQuery::PredicateValues { .. } => "get_predicate_values",
            PlodQuery::DepictsConcepts(_) => "depicts_concepts",
            PlodQuery::DepictedWhere { .. } => "depicted_where",
            PlodQuery::SpatialHierarchyUp(_) => "spatial_hierarchy_up",
            PlodQuery::SpatialChildren(_) => "spatial_children",
            PlodQuery::InRegion(_) => "in_region",
            PlodQuery::InstancesOf(_) => "instances_of",
            PlodQuery::UsedAsPredicateBy(_) => "used_as_predicate_by",
            PlodQuery::ImagesLunaLabels(_) => "images_luna_labels",
        }
    }

    pub fn render(&self) -> String {
        let body = match self {
            PlodQuery::Describe(id) => format!(
                "SELECT ?p ?o WHERE {{ p-lod:{} ?p ?o . }}",
                id
            ),
            PlodQuery::PredicateValues { id, predicate } => format!(
                "SELECT ?o WHERE {{ p-lod:{} <{}> ?o . }}",
                id, predicate
            ),
            PlodQuery::DepictsConcepts(id) => format!(
                r#"SELECT DISTINCT ?concept ?label WHERE {{
    p-lod:{} ^p-lod:spatially-within*/^p-lod:created-on-surface-of*/^p-lod:is-part-of* ?component .
    ?component a p-lod:artwork-component .
    ?component p-lod:depicts ?concept .
    OPTIONAL {{ ?concept rdfs:label ?label }}
}} ORDER BY ?concept"#,
                id
            ),
            PlodQuery::DepictedWhere { id, level_of_detail } => format!(
                r#"SELECT DISTINCT ?within ?type ?label ?geojson ?action ?color WHERE {{
    BIND ( p-lod:{} AS ?resource )
    ?component p-lod:depicts ?resource .
    ?component p-lod:is-part-of+/p-lod:created-on-surface-of/p-lod:spatially-within* ?within .
    ?within a p-lod:{} .
    OPTIONAL {{ ?within a ?type }}
    OPTIONAL {{ ?within p-lod:geojson ?geojson }}
    OPTIONAL {{ ?within rdfs:label ?label }}
    OPTIONAL {{ ?component p-lod:has-action ?action . }}
    OPTIONAL {{ ?component p-lod:has-color ?color . }}
}} ORDER BY ?within"#,
                id, level_of_detail
            ),
            PlodQuery::SpatialHierarchyUp(id) => format!(
                "SELECT DISTINCT ?spatial_id ?type ?label ?geojson WHERE {{\n{}\n}}",
                spatial_ancestors(id)
            ),
            PlodQuery::SpatialChildren(id) => format!(
                "SELECT DISTINCT ?spatial_id WHERE {{ ?spatial_id p-lod:spatially-within p-lod:{} }}",
                id
            ),
            PlodQuery::InRegion(id) => format!(
                "SELECT DISTINCT ?spatial_id ?type ?label ?geojson WHERE {{\n{}\n  FILTER EXISTS {{ ?type a p-lod:region }}\n}}",
                spatial_ancestors(id)
            ),
            PlodQuery::InstancesOf(id) => format!(
                r#"SELECT DISTINCT ?instance ?type ?label ?geojson WHERE {{
    ?instance a p-lod:{} .
    OPTIONAL {{ ?instance a ?type }}
    OPTIONAL {{ ?instance rdfs:label ?label }}
    OPTIONAL {{ ?instance p-lod:geojson ?geojson }}
}}"#,
                id
            ),
            PlodQuery::UsedAsPredicateBy(id) => format!(
                "SELECT DISTINCT ?subject ?object WHERE {{ ?subject p-lod:{} ?object }}",
                id
            ),
            PlodQuery::ImagesLunaLabels(id) => format!(
                r#"SELECT DISTINCT ?label WHERE {{
    ?subject p-lod:depicts p-lod:{} .
    ?subject a p-lod:luna-image .
    ?subject rdfs:label ?label
}}"#,
                id
            ),
        };

        format!("{}{}", PREFIX, body)
    }
}

// Features the subject is part of (or painted on), plus every space containing it
fn spatial_ancestors(id: &Identifier) -> String {
    format!(
        r#"  {{ p-lod:{id} p-lod:is-part-of*/p-lod:created-on-surface-of* ?feature .
    ?feature p-lod:spatially-within* ?spatial_id .
    ?feature a p-lod:feature .
    OPTIONAL {{ ?spatial_id a ?type }}
    OPTIONAL {{ ?spatial_id p-lod:geojson ?geojson }}
    OPTIONAL {{ ?spatial_id rdfs:label ?label }}
  }}
  UNION
  {{ p-lod:{id} p-lod:spatially-within+ ?spatial_id .
    OPTIONAL {{ ?spatial_id a ?type }}
    OPTIONAL {{ ?spatial_id p-lod:geojson ?geojson }}
    OPTIONAL {{ ?spatial_id rdfs:label ?label }}
  }}"#
    )
}
