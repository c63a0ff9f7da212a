//! Fan triangulation of an instruction stream with a quadratic coverage
//! correction.
//!
//! Every edge after the first one of a contour is fanned against the contour
//! start (`Solid` triangles).  Accumulated with signed, additive blending
//! these fans sum to the area enclosed by the polygon of on-curve points,
//! whatever its convexity.  Each quadratic segment additionally emits the
//! triangle (start, control, end); the fragment stage keeps only the part of
//! it inside the curve, which adds or removes the sliver between the chord
//! and the curve.
//!
//! Self-intersecting contours double count or cancel area; that is a known
//! limitation of the technique.

use ferrous_font::Instruction;
use glam::Vec2;

use crate::error::RenderError;
use crate::geometry::GlyphVertex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriangleKind {
    /// Always fully covered.
    Solid,
    /// Covered where `u² ≤ v`.
    QuadraticCurve,
}

impl TriangleKind {
    /// Per-vertex `(u, v)` in vertex order.
    pub const fn coverage(self) -> [[f32; 2]; 3] {
        match self {
            TriangleKind::Solid => [[0.0, 1.0], [0.0, 1.0], [0.0, 1.0]],
            TriangleKind::QuadraticCurve => [[0.0, 0.0], [0.5, 0.0], [1.0, 1.0]],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub kind: TriangleKind,
    pub positions: [Vec2; 3],
}

impl Triangle {
    pub fn solid(a: Vec2, b: Vec2, c: Vec2) -> Self {
        Self {
            kind: TriangleKind::Solid,
            positions: [a, b, c],
        }
    }

    /// `from`, `ctrl`, `to` must stay in this order: the coverage coordinates
    /// are assigned positionally.
    pub fn curve(from: Vec2, ctrl: Vec2, to: Vec2) -> Self {
        Self {
            kind: TriangleKind::QuadraticCurve,
            positions: [from, ctrl, to],
        }
    }

    pub fn vertices(&self) -> [GlyphVertex; 3] {
        let coverage = self.kind.coverage();
        std::array::from_fn(|i| GlyphVertex {
            position: self.positions[i].to_array(),
            coverage: coverage[i],
        })
    }
}

/// Per-contour state.  `edge_count` is reset by `MoveTo` and `Close`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContourState {
    pub start: Vec2,
    pub current: Vec2,
    pub edge_count: u32,
}

impl ContourState {
    pub fn begin(at: Vec2) -> Self {
        Self {
            start: at,
            current: at,
            edge_count: 0,
        }
    }

    /// Counts one edge ending at `to` and returns its fan triangle, unless it
    /// is the first edge of the contour.  Does not move the current point.
    fn fan_to(&mut self, to: Vec2) -> Option<Triangle> {
        self.edge_count += 1;
        (self.edge_count >= 2).then(|| Triangle::solid(self.start, self.current, to))
    }

    fn close(&mut self) {
        self.current = self.start;
        self.edge_count = 0;
    }
}

/// Incremental triangulator.  Feed instructions with [`Triangulator::push`],
/// collect the output with [`Triangulator::finish`].
#[derive(Debug, Default)]
pub struct Triangulator {
    contour: Option<ContourState>,
    contours: usize,
    instructions: usize,
    triangles: Vec<Triangle>,
}

impl Triangulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, instruction: &Instruction) -> Result<(), RenderError> {
        let index = self.instructions;
        self.instructions += 1;

        match (*instruction, &mut self.contour) {
            // A MoveTo on an open contour closes it implicitly.
            (Instruction::MoveTo(at), contour) => {
                *contour = Some(ContourState::begin(at));
                self.contours += 1;
            }
            (_, None) => {
                return Err(RenderError::MalformedStream {
                    index,
                    instruction: instruction.name(),
                });
            }
            (Instruction::LineTo(to), Some(contour)) => {
                self.triangles.extend(contour.fan_to(to));
                contour.current = to;
            }
            (Instruction::QuadTo { ctrl, to }, Some(contour)) => {
                self.triangles.extend(contour.fan_to(to));
                self.triangles.push(Triangle::curve(contour.current, ctrl, to));
                contour.current = to;
            }
            (Instruction::Close, Some(contour)) => contour.close(),
        }
        Ok(())
    }

    /// Number of contours started so far.
    pub fn contours(&self) -> usize {
        self.contours
    }

    pub fn finish(self) -> Vec<Triangle> {
        self.triangles
    }
}

/// Triangulates a whole stream.  Fails on the first instruction that has no
/// contour to extend.
pub fn triangulate(stream: &[Instruction]) -> Result<Vec<Triangle>, RenderError> {
    let mut triangulator = Triangulator::new();
    for instruction in stream {
        triangulator.push(instruction)?;
    }
    log::trace!(
        "triangulated {} instructions, {} contours -> {} triangles",
        stream.len(),
        triangulator.contours(),
        triangulator.triangles.len()
    );
    Ok(triangulator.finish())
}

/// Flattens triangles into the vertex buffer layout, 3 vertices each.
pub fn pack_vertices(triangles: &[Triangle]) -> Vec<GlyphVertex> {
    triangles.iter().flat_map(Triangle::vertices).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferrous_font::{Glyph, GlyphCommand, OutlineCompiler};

    fn v(x: f32, y: f32) -> Vec2 {
        Vec2::new(x, y)
    }

    fn quad(ctrl: Vec2, to: Vec2) -> Instruction {
        Instruction::QuadTo { ctrl, to }
    }

    fn count(triangles: &[Triangle], kind: TriangleKind) -> usize {
        triangles.iter().filter(|t| t.kind == kind).count()
    }

    #[test]
    fn single_triangle_contour() {
        let stream = [
            Instruction::MoveTo(v(0.0, 0.0)),
            Instruction::LineTo(v(1.0, 0.0)),
            Instruction::LineTo(v(0.0, 1.0)),
            Instruction::Close,
        ];
        let triangles = triangulate(&stream).unwrap();
        assert_eq!(
            triangles,
            vec![Triangle::solid(v(0.0, 0.0), v(1.0, 0.0), v(0.0, 1.0))]
        );
    }

    #[test]
    fn polygon_fans_from_contour_start() {
        // Pentagon: 5 line edges -> 4 solid triangles.
        let points = [v(0.0, 0.0), v(2.0, 0.0), v(3.0, 1.0), v(1.0, 2.0), v(-1.0, 1.0)];
        let mut stream = vec![Instruction::MoveTo(points[0])];
        stream.extend(points[1..].iter().map(|p| Instruction::LineTo(*p)));
        stream.push(Instruction::LineTo(points[0]));

        let triangles = triangulate(&stream).unwrap();
        let edges = points.len();
        assert_eq!(triangles.len(), edges - 1);
        assert!(triangles.iter().all(|t| t.kind == TriangleKind::Solid));
        assert!(triangles.iter().all(|t| t.positions[0] == points[0]));
        // Consecutive fans share an edge.
        for pair in triangles.windows(2) {
            assert_eq!(pair[0].positions[2], pair[1].positions[1]);
        }
    }

    #[test]
    fn first_curve_emits_only_the_curve_triangle() {
        let stream = [
            Instruction::MoveTo(v(0.0, 0.0)),
            quad(v(0.5, 1.0), v(1.0, 0.0)),
        ];
        let triangles = triangulate(&stream).unwrap();
        assert_eq!(count(&triangles, TriangleKind::Solid), 0);
        assert_eq!(
            triangles,
            vec![Triangle::curve(v(0.0, 0.0), v(0.5, 1.0), v(1.0, 0.0))]
        );
    }

    #[test]
    fn later_curve_emits_fan_then_curve() {
        let stream = [
            Instruction::MoveTo(v(0.0, 0.0)),
            Instruction::LineTo(v(1.0, 0.0)),
            quad(v(1.0, 1.0), v(0.0, 1.0)),
            Instruction::Close,
        ];
        let triangles = triangulate(&stream).unwrap();
        assert_eq!(
            triangles,
            vec![
                Triangle::solid(v(0.0, 0.0), v(1.0, 0.0), v(0.0, 1.0)),
                Triangle::curve(v(1.0, 0.0), v(1.0, 1.0), v(0.0, 1.0)),
            ]
        );
    }

    #[test]
    fn curve_coverage_is_position_independent() {
        let stream = [
            Instruction::MoveTo(v(10.0, -3.0)),
            quad(v(-7.0, 2.5), v(4.0, 4.0)),
            quad(v(100.0, 0.0), v(10.0, -3.0)),
        ];
        let vertices = pack_vertices(&triangulate(&stream).unwrap());
        let curves: Vec<_> = vertices
            .chunks(3)
            .filter(|tri| tri[0].coverage != [0.0, 1.0])
            .collect();
        assert_eq!(curves.len(), 2);
        for tri in curves {
            let coverage: Vec<_> = tri.iter().map(|v| v.coverage).collect();
            assert_eq!(coverage, [[0.0, 0.0], [0.5, 0.0], [1.0, 1.0]]);
        }
    }

    #[test]
    fn close_emits_no_geometry() {
        let open = [
            Instruction::MoveTo(v(0.0, 0.0)),
            Instruction::LineTo(v(1.0, 0.0)),
            Instruction::LineTo(v(1.0, 1.0)),
            Instruction::LineTo(v(0.0, 1.0)),
        ];
        let mut closed = open.to_vec();
        closed.push(Instruction::Close);

        assert_eq!(triangulate(&open).unwrap(), triangulate(&closed).unwrap());
    }

    #[test]
    fn close_resets_edge_count() {
        // After Close the current point is the start again and the next edge
        // counts as the first one.
        let stream = [
            Instruction::MoveTo(v(0.0, 0.0)),
            Instruction::LineTo(v(1.0, 0.0)),
            Instruction::LineTo(v(1.0, 1.0)),
            Instruction::Close,
            Instruction::LineTo(v(-1.0, 0.0)),
            Instruction::LineTo(v(-1.0, -1.0)),
        ];
        let triangles = triangulate(&stream).unwrap();
        assert_eq!(
            triangles,
            vec![
                Triangle::solid(v(0.0, 0.0), v(1.0, 0.0), v(1.0, 1.0)),
                Triangle::solid(v(0.0, 0.0), v(-1.0, 0.0), v(-1.0, -1.0)),
            ]
        );
    }

    #[test]
    fn second_move_without_close_starts_fresh_contour() {
        let stream = [
            Instruction::MoveTo(v(0.0, 0.0)),
            Instruction::LineTo(v(1.0, 0.0)),
            Instruction::LineTo(v(1.0, 1.0)),
            Instruction::MoveTo(v(5.0, 5.0)),
            Instruction::LineTo(v(6.0, 5.0)),
            Instruction::LineTo(v(6.0, 6.0)),
        ];
        let mut triangulator = Triangulator::new();
        for i in &stream {
            triangulator.push(i).unwrap();
        }
        assert_eq!(triangulator.contours(), 2);
        assert_eq!(
            triangulator.finish(),
            vec![
                Triangle::solid(v(0.0, 0.0), v(1.0, 0.0), v(1.0, 1.0)),
                Triangle::solid(v(5.0, 5.0), v(6.0, 5.0), v(6.0, 6.0)),
            ]
        );
    }

    #[test]
    fn edge_before_move_is_malformed() {
        for (instruction, name) in [
            (Instruction::LineTo(v(1.0, 0.0)), "line"),
            (quad(v(0.0, 1.0), v(1.0, 0.0)), "quad"),
            (Instruction::Close, "close"),
        ] {
            let err = triangulate(&[instruction]).unwrap_err();
            assert!(matches!(
                err,
                RenderError::MalformedStream { index: 0, instruction } if instruction == name
            ));
        }
    }

    #[test]
    fn rejected_edge_leaves_triangulator_usable() {
        let mut triangulator = Triangulator::new();
        let err = triangulator.push(&Instruction::LineTo(v(1.0, 0.0))).unwrap_err();
        assert!(matches!(err, RenderError::MalformedStream { index: 0, .. }));
        assert_eq!(triangulator.contours(), 0);

        for instruction in [
            Instruction::MoveTo(v(0.0, 0.0)),
            Instruction::LineTo(v(1.0, 0.0)),
            Instruction::LineTo(v(0.0, 1.0)),
            Instruction::Close,
        ] {
            triangulator.push(&instruction).unwrap();
        }
        assert_eq!(triangulator.contours(), 1);
        assert_eq!(triangulator.finish().len(), 1);
    }

    #[test]
    fn empty_stream_yields_nothing() {
        assert!(triangulate(&[]).unwrap().is_empty());
    }

    #[test]
    fn solid_vertices_are_fully_covered() {
        let vertices = Triangle::solid(v(0.0, 0.0), v(1.0, 0.0), v(0.0, 1.0)).vertices();
        assert!(vertices.iter().all(|v| v.coverage == [0.0, 1.0]));
        assert_eq!(vertices[1].position, [1.0, 0.0]);
    }

    #[test]
    fn compiled_glyphs_triangulate_with_advance() {
        let square = |ch| {
            Glyph::new(
                ch,
                vec![
                    GlyphCommand::MoveTo(0.0, 0.0),
                    GlyphCommand::LineTo(0.25, 0.0),
                    GlyphCommand::LineTo(0.25, 0.25),
                    GlyphCommand::LineTo(0.0, 0.25),
                    GlyphCommand::Close,
                ],
                500.0,
            )
        };
        let stream = OutlineCompiler::new(1000.0)
            .unwrap()
            .compile(&[square('a'), square('b')])
            .unwrap();
        let triangles = triangulate(&stream).unwrap();
        assert_eq!(triangles.len(), 4);
        assert_eq!(triangles[2].positions[0], v(0.5, 0.0));
        assert_eq!(triangles[2].positions[1], v(0.75, 0.0));
    }
}
