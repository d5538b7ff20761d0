use crate::error::{PlodError, Result};
use crate::identifier::Identifier;
use crate::resource::PlodResource;
use plod_client::QueryResults;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Accessors callable by name from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Label,
    Identifier,
    Type,
    PInPUrl,
    WikidataUrl,
    Geojson,
    Triples,
    GetPredicateValues,
    DepictsConcepts,
    DepictedWhere,
    SpatialHierarchyUp,
    SpatialChildren,
    InRegion,
    InstancesOf,
    UsedAsPredicateBy,
    ImagesLunaLabels,
}

/// Extra parameters a few accessors take
#[derive(Debug, Clone, Default)]
pub struct MethodArgs {
    pub predicate: Option<String>,
    pub level_of_detail: Option<Identifier>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MethodOutput {
    Text(Option<String>),
    Table(QueryResults),
    Json(Option<Value>),
}

impl Method {
    pub const ALL: [Method; 16] = [
        Method::Label,
        Method::Identifier,
        Method::Type,
        Method::PInPUrl,
        Method::WikidataUrl,
        Method::Geojson,
        Method::Triples,
        Method::GetPredicateValues,
        Method::DepictsConcepts,
        Method::DepictedWhere,
        Method::SpatialHierarchyUp,
        Method::SpatialChildren,
        Method::InRegion,
        Method::InstancesOf,
        Method::UsedAsPredicateBy,
        Method::ImagesLunaLabels,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Label => "label",
            Method::Identifier => "identifier",
            Method::Type => "type",
            Method::PInPUrl => "p_in_p_url",
            Method::WikidataUrl => "wikidata_url",
            Method::Geojson => "geojson",
            Method::Triples => "triples",
            Method::GetPredicateValues => "get_predicate_values",
            Method::DepictsConcepts => "depicts_concepts",
            Method::DepictedWhere => "depicted_where",
            Method::SpatialHierarchyUp => "spatial_hierarchy_up",
            Method::SpatialChildren => "spatial_children",
            Method::InRegion => "in_region",
            Method::InstancesOf => "instances_of",
            Method::UsedAsPredicateBy => "used_as_predicate_by",
            Method::ImagesLunaLabels => "images_luna_labels",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Method::Label => "rdfs:label of the resource",
            Method::Identifier => "identifier as resolved in the graph",
            Method::Type => "rdf:type of the resource",
            Method::PInPUrl => "Pompeii in Pictures URL",
            Method::WikidataUrl => "Wikidata URL",
            Method::Geojson => "own geometry, or where the resource is depicted",
            Method::Triples => "all predicate/object pairs",
            Method::GetPredicateValues => "objects of --predicate",
            Method::DepictsConcepts => "concepts depicted within this space",
            Method::DepictedWhere => "spaces (at --level) depicting this concept",
            Method::SpatialHierarchyUp => "containing spaces, up to Pompeii",
            Method::SpatialChildren => "spaces directly within this one",
            Method::InRegion => "containing regions",
            Method::InstancesOf => "resources of this type",
            Method::UsedAsPredicateBy => "subject/object pairs using this predicate",
            Method::ImagesLunaLabels => "labels of LUNA images depicting this",
        }
    }

    pub async fn invoke(&self, resource: &PlodResource<'_>, args: &MethodArgs) -> Result<MethodOutput> {
        let output = match self {
            Method::Label => MethodOutput::Text(resource.label.clone()),
            Method::Identifier => MethodOutput::Text(Some(resource.identifier.to_string())),
            Method::Type => MethodOutput::Text(resource.rdf_type.clone()),
            Method::PInPUrl => MethodOutput::Text(resource.p_in_p_url.clone()),
            Method::WikidataUrl => MethodOutput::Text(resource.wikidata_url.clone()),
            Method::Geojson => MethodOutput::Json(resource.geojson().await?),
            Method::Triples => MethodOutput::Table(resource.triples.clone()),
            Method::GetPredicateValues => MethodOutput::Table(
                resource
                    .get_predicate_values(args.predicate.as_deref())
                    .await?,
            ),
            Method::DepictsConcepts => MethodOutput::Table(resource.depicts_concepts().await?),
            Method::DepictedWhere => MethodOutput::Table(
                resource
                    .depicted_where(args.level_of_detail.as_ref())
                    .await?,
            ),
            Method::SpatialHierarchyUp => MethodOutput::Table(resource.spatial_hierarchy_up().await?),
            Method::SpatialChildren => MethodOutput::Table(resource.spatial_children().await?),
            Method::InRegion => MethodOutput::Table(resource.in_region().await?),
            Method::InstancesOf => MethodOutput::Table(resource.instances_of().await?),
            Method::UsedAsPredicateBy => MethodOutput::Table(resource.used_as_predicate_by().await?),
            Method::ImagesLunaLabels => MethodOutput::Table(resource.images_luna_labels().await?),
        };

        Ok(output)
    }
}

impl FromStr for Method {
    type Err = PlodError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().replace('-', "_").to_lowercase();
        let wanted = match wanted.as_str() {
            "rdf_type" => "type",
            other => other,
        };

        Method::ALL
            .iter()
            .copied()
            .find(|m| m.as_str() == wanted)
            .ok_or_else(|| PlodError::UnknownMethod(s.to_string()))
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
