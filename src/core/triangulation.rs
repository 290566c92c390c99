//! Dimension-generic Delaunay triangulation driver.
//!
//! A [`Triangulation`] owns one vertex store and one live simplex set for the
//! duration of a single construction:
//!
//! 1. The input is validated (dimension, count, finiteness, duplicates, affine
//!    rank) and sorted lexicographically (x, then y, then z).
//! 2. Sentinel vertices and seed simplices are created around the input by
//!    [`BoundingVolume`].
//! 3. Every input vertex is inserted in sorted order by an
//!    [`InsertionAlgorithm`], by default [`IncrementalBowyerWatson`].
//!
//! The result is the *complete* complex, sentinels included.
//! [`extract_mesh`](Triangulation::extract_mesh) drops every simplex touching a
//! sentinel and returns the Delaunay mesh of the input.
//!
//! Any error aborts construction; no partial triangulation is ever returned.

use thiserror::Error;

use crate::core::algorithms::bounding_volume::BoundingVolume;
use crate::core::algorithms::bowyer_watson::{
    CavityError, IncrementalBowyerWatson, InsertionError, InsertionStatistics,
};
use crate::core::collections::{SimplexKey, SimplexVertexBuffer, StorageMap, VertexIndex};
use crate::core::config::TriangulationConfig;
use crate::core::mesh::Mesh;
use crate::core::simplex::Simplex;
use crate::core::traits::insertion_algorithm::InsertionAlgorithm;
use crate::core::util::{DelaunayValidationError, validate_delaunay};
use crate::geometry::point::Point;
use crate::geometry::traits::coordinate::CoordinateScalar;
use crate::geometry::util::{GeometryError, affine_span};

/// Errors returned when building a triangulation.
///
/// Vertex indices refer to positions in the caller's input slice.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TriangulationError {
    /// Only 2D triangulation and 3D tetrahedralization are supported.
    #[error("Unsupported dimension {dimension}: only 2 and 3 are supported")]
    UnsupportedDimension {
        /// The requested dimension.
        dimension: usize,
    },

    /// Fewer than `D + 1` points were supplied.
    #[error("Insufficient points: {actual} given, at least {required} required for dimension {dimension}")]
    InsufficientPoints {
        /// Number of points supplied.
        actual: usize,
        /// Minimum number of points (`D + 1`).
        required: usize,
        /// Dimension of the triangulation.
        dimension: usize,
    },

    /// An input coordinate is NaN or infinite.
    #[error("Point {index} has a non-finite coordinate on axis {axis}")]
    NonFiniteCoordinate {
        /// Index of the point in the input.
        index: usize,
        /// Offending axis.
        axis: usize,
    },

    /// A simplex over the listed points would be degenerate.
    ///
    /// During insertion this is typically caused by cospherical or otherwise
    /// symmetric input, such as the corners of a cube or a regular grid.
    #[error("Degenerate simplex over points {vertices:?} (+{sentinels} sentinels): {source}")]
    DegenerateSimplex {
        /// Input indices of the points involved.
        vertices: Vec<usize>,
        /// Number of sentinel vertices in the simplex, not listed in `vertices`.
        sentinels: usize,
        /// Underlying geometry error.
        source: GeometryError,
    },

    /// The cavity of a point could not be re-triangulated.
    #[error("Invalid cavity while inserting point {vertex}: {source}")]
    InvalidCavity {
        /// Input index of the point being inserted.
        vertex: usize,
        /// What was wrong with the cavity.
        source: CavityError,
    },

    /// An inserter was asked for a vertex outside the vertex store.
    #[error("Vertex {vertex} is not in the vertex store ({vertex_count} vertices)")]
    UnknownVertex {
        /// Requested store index.
        vertex: VertexIndex,
        /// Size of the vertex store.
        vertex_count: usize,
    },
}

impl From<InsertionError> for TriangulationError {
    fn from(err: InsertionError) -> Self {
        match err {
            InsertionError::UnknownVertex {
                vertex,
                vertex_count,
            } => Self::UnknownVertex {
                vertex,
                vertex_count,
            },
            InsertionError::InvalidCavity { vertex, source } => {
                Self::InvalidCavity { vertex, source }
            }
            InsertionError::DegenerateSimplex { vertices, source } => Self::DegenerateSimplex {
                vertices,
                sentinels: 0,
                source,
            },
        }
    }
}

/// A complete Delaunay complex over sentinels plus input points.
///
/// # Type Parameters
///
/// - `T`: coordinate scalar
/// - `D`: dimension, 2 or 3
/// - `A`: insertion algorithm
///
/// # Examples
///
/// ```rust
/// use bowyer_watson::core::triangulation::Triangulation;
/// use bowyer_watson::geometry::point::Point;
///
/// let points = [
///     Point::new([0.0, 0.0]),
///     Point::new([1.0, 0.0]),
///     Point::new([1.0, 1.0]),
///     Point::new([0.0, 1.0]),
/// ];
/// let tri = Triangulation::new(&points).unwrap();
/// assert_eq!(tri.sentinel_count(), 4);
/// assert_eq!(tri.number_of_vertices(), 4);
/// assert!(tri.validate_delaunay().is_ok());
///
/// let mesh = tri.extract_mesh();
/// assert_eq!(mesh.number_of_simplices(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct Triangulation<T, const D: usize, A = IncrementalBowyerWatson>
where
    T: CoordinateScalar,
    A: InsertionAlgorithm<T, D>,
{
    config: TriangulationConfig<T>,
    /// Sentinels at `0..sentinel_count`, then input points in sorted order.
    vertices: Vec<Point<T, D>>,
    /// Caller index of the input point at store index `sentinel_count + i`.
    input_indices: Vec<usize>,
    simplices: StorageMap<SimplexKey, Simplex<T, D>>,
    sentinel_count: usize,
    inserter: A,
}

impl<T, const D: usize> Triangulation<T, D>
where
    T: CoordinateScalar,
{
    /// Triangulates `points` with the default configuration.
    ///
    /// # Errors
    ///
    /// See [`with_inserter`](Self::with_inserter).
    pub fn new(points: &[Point<T, D>]) -> Result<Self, TriangulationError> {
        Self::with_config(points, TriangulationConfig::default())
    }

    /// Triangulates `points` with `config`.
    ///
    /// # Errors
    ///
    /// See [`with_inserter`](Self::with_inserter).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bowyer_watson::core::config::config_presets;
    /// use bowyer_watson::core::triangulation::Triangulation;
    /// use bowyer_watson::geometry::point::Point;
    ///
    /// let points = [
    ///     Point::new([0.0, 0.0, 0.0]),
    ///     Point::new([1.0, 0.0, 0.0]),
    ///     Point::new([0.0, 1.0, 0.0]),
    ///     Point::new([0.0, 0.0, 1.0]),
    /// ];
    /// let tri = Triangulation::with_config(&points, config_presets::tight_hull()).unwrap();
    /// assert_eq!(tri.extract_mesh().tetrahedra(), vec![[0, 1, 3, 2]]);
    /// ```
    pub fn with_config(
        points: &[Point<T, D>],
        config: TriangulationConfig<T>,
    ) -> Result<Self, TriangulationError> {
        Self::with_inserter(points, config, IncrementalBowyerWatson::new())
    }
}

impl<T, const D: usize, A> Triangulation<T, D, A>
where
    T: CoordinateScalar,
    A: InsertionAlgorithm<T, D>,
{
    /// Triangulates `points` with `config`, inserting through `inserter`.
    ///
    /// # Errors
    ///
    /// Checked in this order:
    ///
    /// - [`TriangulationError::UnsupportedDimension`] unless `D` is 2 or 3.
    /// - [`TriangulationError::InsufficientPoints`] for fewer than `D + 1` points.
    /// - [`TriangulationError::NonFiniteCoordinate`] for NaN or infinite input.
    /// - [`TriangulationError::DegenerateSimplex`] with
    ///   [`GeometryError::CoincidentPoints`] for duplicate points, or with
    ///   [`GeometryError::AffinelyDependent`] when all points are collinear (2D)
    ///   or coplanar (3D).
    /// - Any error raised while inserting a point.
    pub fn with_inserter(
        points: &[Point<T, D>],
        config: TriangulationConfig<T>,
        inserter: A,
    ) -> Result<Self, TriangulationError> {
        let order = validate_input(points, config.degeneracy_tolerance)?;
        let sorted: Vec<Point<T, D>> = order.iter().map(|&i| points[i]).collect();

        let volume = BoundingVolume::around(&sorted, config.sentinel_margin_factor).map_err(
            |source| match source {
                GeometryError::UnsupportedDimension { dimension } => {
                    TriangulationError::UnsupportedDimension { dimension }
                }
                source => TriangulationError::DegenerateSimplex {
                    vertices: Vec::new(),
                    sentinels: D + 1,
                    source,
                },
            },
        )?;
        let (mut vertices, seeds) = volume.into_parts();
        let sentinel_count = vertices.len();
        vertices.extend(sorted);

        let mut simplices = StorageMap::with_key();
        for seed in seeds {
            simplices.insert(seed);
        }

        let mut tri = Self {
            config,
            vertices,
            input_indices: order,
            simplices,
            sentinel_count,
            inserter,
        };

        for vertex in sentinel_count..tri.vertices.len() {
            if let Err(err) = tri
                .inserter
                .insert_vertex(&tri.vertices, &mut tri.simplices, vertex)
            {
                return Err(tri.to_caller_error(err));
            }
        }

        let stats = tri.inserter.statistics();
        tracing::debug!(
            dimension = D,
            vertices = points.len(),
            simplices = tri.simplices.len(),
            created = stats.simplices_created,
            removed = stats.simplices_removed,
            largest_cavity = stats.largest_cavity,
            "triangulation complete"
        );
        Ok(tri)
    }

    /// Input index of the point at store index `vertex`, or `None` for a sentinel.
    fn caller_index(&self, vertex: VertexIndex) -> Option<usize> {
        vertex
            .checked_sub(self.sentinel_count)
            .and_then(|i| self.input_indices.get(i).copied())
    }

    fn to_caller_error(&self, err: InsertionError) -> TriangulationError {
        match TriangulationError::from(err) {
            TriangulationError::DegenerateSimplex {
                vertices, source, ..
            } => {
                let total = vertices.len();
                let vertices: Vec<usize> = vertices
                    .into_iter()
                    .filter_map(|v| self.caller_index(v))
                    .collect();
                TriangulationError::DegenerateSimplex {
                    sentinels: total - vertices.len(),
                    vertices,
                    source,
                }
            }
            TriangulationError::InvalidCavity { vertex, source } => {
                TriangulationError::InvalidCavity {
                    vertex: self.caller_index(vertex).unwrap_or(vertex),
                    source,
                }
            }
            other => other,
        }
    }

    /// Drops every simplex touching a sentinel and returns the mesh of the input.
    ///
    /// Output vertex `i` is the `i`-th input point in sorted order;
    /// [`Mesh::input_indices`] maps it back to the caller's index. Calling this
    /// repeatedly yields identical meshes.
    #[must_use]
    pub fn extract_mesh(&self) -> Mesh<T, D> {
        let k = self.sentinel_count;
        let simplices = self
            .simplices
            .values()
            .filter(|simplex| !simplex.is_bounding(k))
            .map(|simplex| {
                simplex
                    .vertices()
                    .iter()
                    .map(|&v| v - k)
                    .collect::<SimplexVertexBuffer>()
            });
        let mesh = Mesh::from_parts(
            self.vertices[k..].to_vec(),
            self.input_indices.clone(),
            simplices,
        );
        tracing::debug!(
            vertices = mesh.number_of_vertices(),
            simplices = mesh.number_of_simplices(),
            dropped = self.simplices.len() - mesh.number_of_simplices(),
            "extracted mesh"
        );
        mesh
    }

    /// Checks the empty-circumsphere property over the whole complex, sentinels
    /// included, using the configured validation tolerance.
    ///
    /// Indices in the error are store indices.
    ///
    /// # Errors
    ///
    /// Returns a [`DelaunayValidationError`] describing the first violation.
    pub fn validate_delaunay(&self) -> Result<(), DelaunayValidationError> {
        let simplices: Vec<&[VertexIndex]> =
            self.simplices.values().map(Simplex::vertices).collect();
        validate_delaunay(&self.vertices, &simplices, self.config.validation_tolerance)
    }

    /// Configuration used for this triangulation.
    #[must_use]
    pub const fn config(&self) -> &TriangulationConfig<T> {
        &self.config
    }

    /// Vertex store: sentinels first, then input points in sorted order.
    #[must_use]
    pub fn vertices(&self) -> &[Point<T, D>] {
        &self.vertices
    }

    /// Caller index of each input point, in store order.
    #[must_use]
    pub fn input_indices(&self) -> &[usize] {
        &self.input_indices
    }

    /// Number of sentinel vertices (`2^D`).
    #[must_use]
    pub const fn sentinel_count(&self) -> usize {
        self.sentinel_count
    }

    /// Number of input points.
    #[must_use]
    pub fn number_of_vertices(&self) -> usize {
        self.vertices.len() - self.sentinel_count
    }

    /// Number of live simplices, bounding ones included.
    #[must_use]
    pub fn number_of_simplices(&self) -> usize {
        self.simplices.len()
    }

    /// Live simplices, bounding ones included, over store indices.
    pub fn simplices(&self) -> impl Iterator<Item = &Simplex<T, D>> {
        self.simplices.values()
    }

    /// Insertion statistics accumulated during construction.
    #[must_use]
    pub fn statistics(&self) -> &InsertionStatistics {
        self.inserter.statistics()
    }

    /// The dimension `D`.
    #[must_use]
    pub const fn dim(&self) -> usize {
        D
    }
}

/// Validates the input and returns the lexicographic insertion order.
fn validate_input<T, const D: usize>(
    points: &[Point<T, D>],
    degeneracy_tolerance: T,
) -> Result<Vec<usize>, TriangulationError>
where
    T: CoordinateScalar,
{
    if !(2..=3).contains(&D) {
        return Err(TriangulationError::UnsupportedDimension { dimension: D });
    }
    if points.len() < D + 1 {
        return Err(TriangulationError::InsufficientPoints {
            actual: points.len(),
            required: D + 1,
            dimension: D,
        });
    }
    for (index, point) in points.iter().enumerate() {
        if let Some(axis) = point.first_non_finite_axis() {
            return Err(TriangulationError::NonFiniteCoordinate { index, axis });
        }
    }

    let mut order: Vec<usize> = (0..points.len()).collect();
    order.sort_by(|&a, &b| points[a].lexicographic_cmp(&points[b]));

    if let Some(pair) = order
        .windows(2)
        .find(|pair| points[pair[0]] == points[pair[1]])
    {
        return Err(TriangulationError::DegenerateSimplex {
            vertices: pair.to_vec(),
            sentinels: 0,
            source: GeometryError::CoincidentPoints,
        });
    }

    let span = affine_span(points, degeneracy_tolerance).map_err(|source| {
        TriangulationError::DegenerateSimplex {
            vertices: Vec::new(),
            sentinels: 0,
            source,
        }
    })?;
    if span.rank < D {
        tracing::warn!(rank = span.rank, dimension = D, "input is affinely dependent");
        return Err(TriangulationError::DegenerateSimplex {
            vertices: span.basis.to_vec(),
            sentinels: 0,
            source: GeometryError::AffinelyDependent {
                rank: span.rank,
                dimension: D,
            },
        });
    }
    Ok(order)
}
