//! Surface patch sub-grammar

use super::geometry_reader::{Expect, GmlGeometryReader};
use crate::error::Result;
use crate::geometry::patch::{RECTANGLE_RING_POINTS, TRIANGLE_RING_POINTS};
use crate::geometry::{
    Geometry, GriddedPatch, LinearRing, PolygonPatch, Rectangle, SurfacePatch, Triangle,
};
use crate::types::Crs;
use std::io::BufRead;

impl<'a, R: BufRead> GmlGeometryReader<'a, R> {
    /// Read one surface patch element
    pub fn read_surface_patch(&mut self, crs: Option<&Crs>) -> Result<SurfacePatch> {
        if !self.cursor.is_start() || self.cursor.namespace() != self.ns {
            return Err(self.unexpected("a surface patch"));
        }
        let name = self.cursor.local_name().to_string();
        log::trace!("Reading surface patch gml:{}", name);
        match name.as_str() {
            "PolygonPatch" => Ok(SurfacePatch::Polygon(self.read_polygon_patch(crs)?)),
            "Triangle" => Ok(SurfacePatch::Triangle(self.read_triangle(crs)?)),
            "Rectangle" => Ok(SurfacePatch::Rectangle(self.read_rectangle(crs)?)),
            "Cone" => Ok(SurfacePatch::Cone(self.read_gridded_patch("Cone", crs)?)),
            "Cylinder" => Ok(SurfacePatch::Cylinder(self.read_gridded_patch("Cylinder", crs)?)),
            "Sphere" => Ok(SurfacePatch::Sphere(self.read_gridded_patch("Sphere", crs)?)),
            _ => Err(self.unexpected("a surface patch")),
        }
    }

    pub(crate) fn read_polygon_patch(&mut self, crs: Option<&Crs>) -> Result<PolygonPatch> {
        self.cursor.require_start(self.ns, "PolygonPatch")?;
        self.cursor.next_tag()?;
        let (exterior, interiors) = self.read_boundaries(crs, Expect::Ring)?;
        self.cursor.require_end(self.ns, "PolygonPatch")?;
        Ok(PolygonPatch::new(exterior, interiors))
    }

    pub(crate) fn read_triangle(&mut self, crs: Option<&Crs>) -> Result<Triangle> {
        self.cursor.require_start(self.ns, "Triangle")?;
        let ring = self.read_patch_exterior("Triangle", TRIANGLE_RING_POINTS, crs)?;
        Triangle::new(ring)
    }

    fn read_rectangle(&mut self, crs: Option<&Crs>) -> Result<Rectangle> {
        let ring = self.read_patch_exterior("Rectangle", RECTANGLE_RING_POINTS, crs)?;
        Rectangle::new(ring)
    }

    /// Read the single `exterior` LinearRing of a Triangle or Rectangle
    fn read_patch_exterior(
        &mut self,
        name: &str,
        points: usize,
        crs: Option<&Crs>,
    ) -> Result<LinearRing> {
        self.cursor.next_tag()?;
        if !self.cursor.is_start_of(self.ns, "exterior") {
            return Err(self.unexpected("'exterior'"));
        }
        let ring = match self.read_property(Expect::LinearRing, crs)? {
            Geometry::LinearRing(ring) => ring,
            _ => {
                return Err(self.cursor.error(format!(
                    "The exterior of a {} must be an inline LinearRing",
                    name
                )))
            }
        };
        self.check_exact_points(name, ring.points().len(), points)?;
        self.cursor.next_tag()?;
        self.cursor.require_end(self.ns, name)?;
        Ok(ring)
    }

    fn read_gridded_patch(&mut self, name: &str, crs: Option<&Crs>) -> Result<GriddedPatch> {
        self.cursor.next_tag()?;
        let mut grid = Vec::new();
        while self.cursor.is_start_of(self.ns, "row") {
            self.cursor.next_tag()?;
            let row = self.read_control_points(crs, false)?;
            self.cursor.require_end(self.ns, "row")?;
            grid.push(row);
            self.cursor.next_tag()?;
        }
        self.cursor.require_start(self.ns, "rows")?;
        let rows = self.cursor.element_text_as_u32()?;
        self.cursor.next_tag()?;
        self.cursor.require_start(self.ns, "columns")?;
        let columns = self.cursor.element_text_as_u32()?;
        self.cursor.next_tag()?;
        self.cursor.require_end(self.ns, name)?;

        let mut patch = GriddedPatch::new(grid);
        patch.rows = rows;
        patch.columns = columns;
        if !patch.is_consistent() {
            log::warn!(
                "gml:{} declares {} rows and {} columns but the grid has a different shape",
                name,
                rows,
                columns
            );
        }
        Ok(patch)
    }
}
