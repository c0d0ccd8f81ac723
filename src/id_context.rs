//! Document-scoped identifier table
//!
//! Every identified geometry read from one document is registered here
//! exactly once, keyed by its `gml:id`. Placeholders created for
//! `xlink:href` properties are collected alongside so a later pass can
//! check or bind them without chasing pointers during the recursive parse.
//!
//! Readers reserve identifiers while descending and hand over each finished
//! top-level geometry with [`IdentifierContext::add_root`]. Only that one
//! copy is stored; nested geometries are found again by their child
//! position inside it.

use crate::error::{GmlError, Result};
use crate::geometry::{
    ControlPoint, CurveSegment, Geometry, GeometryReference, LinearRing, SurfacePatch,
};
use indexmap::IndexMap;

/// Where a registered geometry is kept
#[derive(Debug, Clone, PartialEq)]
enum Entry {
    /// Reserved while its top-level geometry is still being read
    Pending,
    /// Inside `roots[root]`, reached by child indices
    Nested { root: usize, path: Vec<usize> },
    /// Stored on its own
    Owned(Geometry),
}

/// Identifier → geometry table plus the references seen so far
#[derive(Debug, Clone, Default)]
pub struct IdentifierContext {
    roots: Vec<Geometry>,
    objects: IndexMap<String, Entry>,
    references: Vec<GeometryReference>,
}

impl IdentifierContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an identified geometry.
    ///
    /// Fails if a geometry with the same identifier is already registered.
    pub fn add_object(&mut self, id: &str, geometry: Geometry) -> Result<()> {
        self.insert(id, Entry::Owned(geometry))
    }

    /// Claim an identifier for a geometry that is still being read.
    ///
    /// The geometry becomes visible once the top-level geometry holding it
    /// is passed to [`add_root`](Self::add_root).
    pub(crate) fn reserve(&mut self, id: &str) -> Result<()> {
        self.insert(id, Entry::Pending)
    }

    fn insert(&mut self, id: &str, entry: Entry) -> Result<()> {
        if self.objects.contains_key(id) {
            return Err(GmlError::Identifier(format!(
                "Duplicate geometry identifier '{}'",
                id
            )));
        }
        self.objects.insert(id.to_string(), entry);
        Ok(())
    }

    /// Store a finished top-level geometry and bind the reserved
    /// identifiers found inside it
    pub fn add_root(&mut self, root: &Geometry) {
        if !self.objects.values().any(|e| *e == Entry::Pending) {
            return;
        }
        let index = self.roots.len();
        let mut found = Vec::new();
        self.locate(index, root, &mut Vec::new(), &mut found);
        log::trace!("Bound {} identifiers inside top-level geometry {}", found.len(), index);
        self.roots.push(root.clone());
        for (id, entry) in found {
            if let Some(slot) = self.objects.get_mut(&id) {
                *slot = entry;
            }
        }
    }

    fn is_pending(&self, id: &str) -> bool {
        self.objects.get(id) == Some(&Entry::Pending)
    }

    fn locate(
        &self,
        root: usize,
        node: &Geometry,
        path: &mut Vec<usize>,
        found: &mut Vec<(String, Entry)>,
    ) {
        if let Some(id) = node.common().and_then(|c| c.id.as_deref()) {
            if self.is_pending(id) {
                found.push((id.to_string(), Entry::Nested { root, path: path.clone() }));
            }
        }
        for ring in embedded_rings(node) {
            if let Some(id) = ring.common.id.as_deref() {
                if self.is_pending(id) {
                    found.push((id.to_string(), Entry::Owned(ring.clone().into())));
                }
            }
            self.locate_points(ring.points(), found);
        }
        self.locate_points(embedded_points(node), found);
        for (i, child) in child_geometries(node).into_iter().enumerate() {
            path.push(i);
            self.locate(root, child, path, found);
            path.pop();
        }
    }

    fn locate_points<'a, I>(&self, points: I, found: &mut Vec<(String, Entry)>)
    where
        I: IntoIterator<Item = &'a ControlPoint>,
    {
        for point in points {
            if let ControlPoint::Point(p) = point {
                if let Some(id) = p.common.id.as_deref() {
                    if self.is_pending(id) {
                        found.push((id.to_string(), Entry::Owned(p.clone().into())));
                    }
                }
            }
        }
    }

    /// Register a pending reference
    pub fn add_reference(&mut self, reference: GeometryReference) {
        self.references.push(reference);
    }

    /// Look up a registered geometry
    pub fn get_object(&self, id: &str) -> Option<&Geometry> {
        match self.objects.get(id)? {
            Entry::Pending => None,
            Entry::Owned(geometry) => Some(geometry),
            Entry::Nested { root, path } => path
                .iter()
                .try_fold(self.roots.get(*root)?, |node, &i| {
                    child_geometries(node).into_iter().nth(i)
                }),
        }
    }

    /// Check whether an identifier is registered
    pub fn contains(&self, id: &str) -> bool {
        self.objects.contains_key(id)
    }

    /// Number of registered geometries
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Number of top-level geometries kept for lookups
    pub fn root_count(&self) -> usize {
        self.roots.len()
    }

    /// Registered identifiers in registration order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.objects.keys().map(|k| k.as_str())
    }

    /// All references seen so far
    pub fn references(&self) -> &[GeometryReference] {
        &self.references
    }

    /// Resolve a reference against this context.
    ///
    /// Only same-document references (`#id`) can be resolved here.
    pub fn resolve(&self, reference: &GeometryReference) -> Option<&Geometry> {
        reference.local_id().and_then(|id| self.get_object(id))
    }

    /// References that cannot be resolved against this context
    pub fn unresolved_references(&self) -> Vec<&GeometryReference> {
        self.references
            .iter()
            .filter(|r| self.resolve(r).is_none())
            .collect()
    }

    /// Check every collected reference.
    ///
    /// Returns the references that are still unresolved; local references
    /// that point at an unknown identifier make this an error.
    pub fn resolve_references(&self) -> Result<Vec<GeometryReference>> {
        let mut remote = Vec::new();
        for reference in &self.references {
            if self.resolve(reference).is_some() {
                continue;
            }
            if let Some(id) = reference.local_id() {
                return Err(GmlError::Identifier(format!(
                    "Reference to unknown local geometry '{}'",
                    id
                )));
            }
            remote.push(reference.clone());
        }
        log::debug!(
            "Checked {} references against {} identified geometries, {} remote",
            self.references.len(),
            self.objects.len(),
            remote.len()
        );
        Ok(remote)
    }

    /// Remove all objects and references
    pub fn clear(&mut self) {
        self.roots.clear();
        self.objects.clear();
        self.references.clear();
    }
}

/// Geometry-valued children in a fixed order
fn child_geometries(node: &Geometry) -> Vec<&Geometry> {
    fn boundary<'a>(
        exterior: &'a Option<Box<Geometry>>,
        interiors: &'a [Geometry],
    ) -> Vec<&'a Geometry> {
        exterior.as_deref().into_iter().chain(interiors).collect()
    }
    match node {
        Geometry::Curve(c) => c
            .segments
            .iter()
            .filter_map(|s| match s {
                CurveSegment::OffsetCurve { base, .. } => Some(&**base),
                _ => None,
            })
            .collect(),
        Geometry::OrientableCurve(c) => vec![&*c.base],
        Geometry::OrientableSurface(s) => vec![&*s.base],
        Geometry::CompositeCurve(c) => c.members.iter().collect(),
        Geometry::Ring(r) => r.members.iter().collect(),
        Geometry::CompositeSurface(s) => s.members.iter().collect(),
        Geometry::CompositeSolid(s) => s.members.iter().collect(),
        Geometry::GeometricComplex(c) => c.members.iter().collect(),
        Geometry::Multi(m) => m.members.iter().collect(),
        Geometry::Polygon(p) => boundary(&p.exterior, &p.interiors),
        Geometry::Solid(s) => boundary(&s.exterior, &s.interiors),
        Geometry::Surface(s) => s
            .patches
            .iter()
            .flat_map(|p| match p {
                SurfacePatch::Polygon(p) => boundary(&p.exterior, &p.interiors),
                _ => Vec::new(),
            })
            .collect(),
        Geometry::PolyhedralSurface(s) => s
            .patches
            .iter()
            .flat_map(|p| boundary(&p.exterior, &p.interiors))
            .collect(),
        _ => Vec::new(),
    }
}

/// Rings held by triangle and rectangle patches
fn embedded_rings(node: &Geometry) -> Vec<&LinearRing> {
    match node {
        Geometry::Surface(s) => s
            .patches
            .iter()
            .filter_map(|p| match p {
                SurfacePatch::Triangle(t) => Some(t.exterior()),
                SurfacePatch::Rectangle(r) => Some(r.exterior()),
                _ => None,
            })
            .collect(),
        Geometry::TriangulatedSurface(s) => s.patches.iter().map(|t| t.exterior()).collect(),
        _ => Vec::new(),
    }
}

/// Control points held directly, outside any child geometry
fn embedded_points(node: &Geometry) -> Vec<&ControlPoint> {
    match node {
        Geometry::LineString(l) => l.points().iter().collect(),
        Geometry::LinearRing(r) => r.points().iter().collect(),
        Geometry::Curve(c) => c.segments.iter().flat_map(|s| s.control_points()).collect(),
        Geometry::Surface(s) => s
            .patches
            .iter()
            .flat_map(|p| match p {
                SurfacePatch::Cone(g) | SurfacePatch::Cylinder(g) | SurfacePatch::Sphere(g) => {
                    g.grid.iter().flatten().collect::<Vec<_>>()
                }
                _ => Vec::new(),
            })
            .collect(),
        Geometry::Tin(t) => t
            .control_points
            .iter()
            .chain(
                t.stop_lines
                    .iter()
                    .chain(&t.break_lines)
                    .flatten()
                    .flat_map(|s| s.points()),
            )
            .collect(),
        _ => Vec::new(),
    }
}
