use geo::{Geometry, MultiPolygon};
use geojson::{Feature, FeatureCollection};

use super::CatalogError;

/// Areal geometry of a feature, other geometry types are rejected
pub(crate) fn feature_area(
    feature: &Feature,
    context: &str,
) -> Result<MultiPolygon<f64>, CatalogError> {
    let invalid = |message: String| CatalogError::InvalidGeometry {
        context: context.to_string(),
        message,
    };

    let geometry = feature
        .geometry
        .as_ref()
        .ok_or_else(|| invalid("feature without geometry".into()))?;

    match Geometry::<f64>::try_from(geometry.value.clone()).map_err(|e| invalid(e.to_string()))? {
        Geometry::Polygon(polygon) => Ok(MultiPolygon::new(vec![polygon])),
        Geometry::MultiPolygon(multi) => Ok(multi),
        other => Err(invalid(format!(
            "unsupported geometry type {}",
            geometry_name(&other)
        ))),
    }
}

/// One multipolygon per feature of the collection
pub(crate) fn collection_areas(
    collection: &FeatureCollection,
    context: &str,
) -> Result<Vec<MultiPolygon<f64>>, CatalogError> {
    collection
        .features
        .iter()
        .map(|feature| feature_area(feature, context))
        .collect()
}

fn geometry_name(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}
