//! Slope-based crossing test used by the mutation operator.
//!
//! This is a narrow heuristic, not a general segment-intersection routine.
//! It extends the edge `from → to` to an infinite line and reports whether
//! two sample points lie strictly on opposite sides of it.
//!
//! Blind spots:
//!
//! - Edges whose x coordinate does not strictly increase (vertical edges and
//!   edges pointing left) never report a crossing.
//! - Points lying exactly on the line never report a crossing.
//! - The sample points are compared against the whole line, so two points on
//!   opposite sides far beyond the edge's endpoints still count.

use crate::models::City;

/// Returns `true` if `a` and `b` lie strictly on opposite sides of the line
/// through `from` and `to`.
///
/// Always `false` when `to.x() <= from.x()`.
///
/// # Examples
///
/// ```
/// use u_tsp_ga::geometry::straddles_edge_line;
/// use u_tsp_ga::models::City;
///
/// let from = City::new(0.0, 0.0);
/// let to = City::new(10.0, 0.0);
/// assert!(straddles_edge_line(&from, &to, &City::new(5.0, 5.0), &City::new(5.0, -5.0)));
/// assert!(!straddles_edge_line(&from, &to, &City::new(5.0, 5.0), &City::new(1.0, 2.0)));
///
/// // Reversed edge: never a crossing.
/// assert!(!straddles_edge_line(&to, &from, &City::new(5.0, 5.0), &City::new(5.0, -5.0)));
/// ```
pub fn straddles_edge_line(from: &City, to: &City, a: &City, b: &City) -> bool {
    let dx = to.x() - from.x();
    if dx <= 0.0 {
        return false;
    }
    let slope = (to.y() - from.y()) / dx;
    let intercept = to.y() - slope * to.x();

    let line_at_a = slope * a.x() + intercept;
    let line_at_b = slope * b.x() + intercept;

    (line_at_a < a.y() && line_at_b > b.y()) || (line_at_a > a.y() && line_at_b < b.y())
}
