use geo::{LineString, MultiPolygon, Polygon, Relate};
use geojson::feature::Id;
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, JsonObject, JsonValue, Value};
use thiserror::Error;

// Identifiers given to the two halves produced by a split. They are
// reassigned on every split, so a collection that has seen more than
// one split can hold retired values of these ids in its history; code
// looking fragments up by id must account for that.
pub const UPPER_HALF_ID: &str = "upper";
pub const LOWER_HALF_ID: &str = "lower";

const PROVENANCE_KEY: &str = "provenance";
const DERIVED_SPLIT_TAG: &str = "derived-split";
const ORIGIN_TAG: &str = "origin";

// whether a feature was loaded with the region or produced by a split
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
  Origin,
  DerivedSplit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryGeometry {
  Polygon(Polygon<f64>),
  MultiPolygon(MultiPolygon<f64>),
}

impl BoundaryGeometry {
  // member polygons, regardless of variant
  pub fn polygons(&self) -> &[Polygon<f64>] {
    match self {
      BoundaryGeometry::Polygon(p) => std::slice::from_ref(p),
      BoundaryGeometry::MultiPolygon(mp) => &mp.0,
    }
  }

  pub fn contains(&self, other: &BoundaryGeometry) -> bool {
    match (self, other) {
      (BoundaryGeometry::Polygon(a), BoundaryGeometry::Polygon(b)) => a.relate(b).is_contains(),
      (BoundaryGeometry::Polygon(a), BoundaryGeometry::MultiPolygon(b)) => {
        a.relate(b).is_contains()
      }
      (BoundaryGeometry::MultiPolygon(a), BoundaryGeometry::Polygon(b)) => {
        a.relate(b).is_contains()
      }
      (BoundaryGeometry::MultiPolygon(a), BoundaryGeometry::MultiPolygon(b)) => {
        a.relate(b).is_contains()
      }
    }
  }
}

// one administrative boundary feature and its property bag
#[derive(Debug, Clone, PartialEq)]
pub struct Boundary {
  pub id: String,
  pub name: Option<String>,
  pub district: Option<String>,
  pub provenance: Provenance,
  pub geometry: BoundaryGeometry,
}

impl Boundary {
  // a split half: inherits name and district from the polygon it was cut from
  pub fn derived(id: &str, source: &Boundary, geometry: BoundaryGeometry) -> Boundary {
    Boundary {
      id: id.to_string(),
      name: source.name.clone(),
      district: source.district.clone(),
      provenance: Provenance::DerivedSplit,
      geometry,
    }
  }

  pub fn from_feature(feature: &Feature) -> Result<Boundary, DecodeError> {
    let geometry = match &feature.geometry {
      Some(g) => g,
      None => return Err(DecodeError::MissingGeometry),
    };
    let geometry = match &geometry.value {
      Value::Polygon(_) => {
        BoundaryGeometry::Polygon(Polygon::<f64>::try_from(geometry.value.clone())?)
      }
      Value::MultiPolygon(_) => {
        BoundaryGeometry::MultiPolygon(MultiPolygon::<f64>::try_from(geometry.value.clone())?)
      }
      _ => return Err(DecodeError::UnsupportedGeometry),
    };

    let id = property_string(feature, "id")
      .or_else(|| match &feature.id {
        Some(Id::String(s)) => Some(s.clone()),
        Some(Id::Number(n)) => Some(n.to_string()),
        None => None,
      })
      .ok_or(DecodeError::MissingId)?;

    let provenance = match property_string(feature, PROVENANCE_KEY) {
      Some(tag) if tag == DERIVED_SPLIT_TAG => Provenance::DerivedSplit,
      _ => Provenance::Origin,
    };

    Ok(Boundary {
      id,
      name: property_string(feature, "name"),
      district: property_string(feature, "district"),
      provenance,
      geometry,
    })
  }

  pub fn to_feature(&self) -> Feature {
    let value = match &self.geometry {
      BoundaryGeometry::Polygon(p) => Value::from(p),
      BoundaryGeometry::MultiPolygon(mp) => Value::from(mp),
    };

    let mut properties = JsonObject::new();
    properties.insert("id".to_string(), JsonValue::from(self.id.clone()));
    if let Some(name) = &self.name {
      properties.insert("name".to_string(), JsonValue::from(name.clone()));
    }
    if let Some(district) = &self.district {
      properties.insert("district".to_string(), JsonValue::from(district.clone()));
    }
    let tag = match self.provenance {
      Provenance::Origin => ORIGIN_TAG,
      Provenance::DerivedSplit => DERIVED_SPLIT_TAG,
    };
    properties.insert(PROVENANCE_KEY.to_string(), JsonValue::from(tag));

    Feature {
      bbox: None,
      geometry: Some(Geometry::new(value)),
      id: Some(Id::String(self.id.clone())),
      properties: Some(properties),
      foreign_members: None,
    }
  }
}

fn property_string(feature: &Feature, key: &str) -> Option<String> {
  match feature.properties.as_ref()?.get(key)? {
    JsonValue::String(s) => Some(s.clone()),
    JsonValue::Number(n) => Some(n.to_string()),
    _ => None,
  }
}

// the current working set of boundary features
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundaryCollection {
  pub features: Vec<Boundary>,
}

impl BoundaryCollection {
  pub fn new(features: Vec<Boundary>) -> BoundaryCollection {
    BoundaryCollection { features }
  }

  pub fn from_feature_collection(fc: &FeatureCollection) -> Result<BoundaryCollection, DecodeError> {
    let features = fc
      .features
      .iter()
      .map(Boundary::from_feature)
      .collect::<Result<Vec<Boundary>, DecodeError>>()?;
    Ok(BoundaryCollection { features })
  }

  pub fn from_geojson_str(s: &str) -> Result<BoundaryCollection, DecodeError> {
    match s.parse::<GeoJson>()? {
      GeoJson::FeatureCollection(fc) => BoundaryCollection::from_feature_collection(&fc),
      _ => Err(DecodeError::NotAFeatureCollection),
    }
  }

  pub fn to_feature_collection(&self) -> FeatureCollection {
    FeatureCollection {
      bbox: None,
      features: self.features.iter().map(Boundary::to_feature).collect(),
      foreign_members: None,
    }
  }
}

// the first LineString found in a GeoJSON document; the drawn cut line
// arrives this way from the host
pub fn line_from_geojson_str(s: &str) -> Result<LineString<f64>, DecodeError> {
  let geojson = s.parse::<GeoJson>()?;
  let values: Vec<Value> = match geojson {
    GeoJson::Geometry(g) => vec![g.value],
    GeoJson::Feature(f) => f.geometry.into_iter().map(|g| g.value).collect(),
    GeoJson::FeatureCollection(fc) => fc
      .features
      .into_iter()
      .filter_map(|f| f.geometry)
      .map(|g| g.value)
      .collect(),
  };
  for value in values {
    if let Value::LineString(_) = value {
      return Ok(LineString::<f64>::try_from(value)?);
    }
  }
  Err(DecodeError::MissingLine)
}

#[derive(Debug, Error)]
pub enum DecodeError {
  #[error("feature has no geometry")]
  MissingGeometry,
  #[error("feature has no usable id")]
  MissingId,
  #[error("expected a Polygon or MultiPolygon geometry")]
  UnsupportedGeometry,
  #[error("expected a GeoJSON FeatureCollection")]
  NotAFeatureCollection,
  #[error("no LineString geometry found")]
  MissingLine,
  #[error(transparent)]
  GeoJson(#[from] geojson::Error),
}
