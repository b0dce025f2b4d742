//! Triangle strip to triangle list conversion.

use super::types::PolygonalFace;

/// Convert a triangle strip of 1-based vertex references into faces.
///
/// Every window of three consecutive references is a candidate triangle.
/// Candidates with a repeated reference are degenerate and dropped; the rest
/// alternate winding so that odd positions swap their first two references.
/// Overlapping triangles are all kept.
pub fn strip_to_faces(strip: &[u32]) -> Vec<PolygonalFace> {
    strip
        .windows(3)
        .enumerate()
        .filter_map(|(k, w)| {
            let (a, b, c) = (w[0], w[1], w[2]);
            if a == b || b == c || a == c {
                return None;
            }
            Some(if k % 2 == 0 {
                PolygonalFace::new(a, b, c)
            } else {
                PolygonalFace::new(b, a, c)
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn face(i1: u32, i2: u32, i3: u32) -> PolygonalFace {
        PolygonalFace::new(i1, i2, i3)
    }

    #[test]
    fn test_simple_strip() {
        assert_eq!(strip_to_faces(&[1, 2, 3, 4]), vec![face(1, 2, 3), face(3, 2, 4)]);
    }

    #[test]
    fn test_winding_alternates() {
        let faces = strip_to_faces(&[1, 2, 3, 4, 5, 6]);
        assert_eq!(
            faces,
            vec![face(1, 2, 3), face(3, 2, 4), face(3, 4, 5), face(5, 4, 6)]
        );
    }

    #[test]
    fn test_length_minus_two() {
        let strip: Vec<u32> = (1..=50).collect();
        assert_eq!(strip_to_faces(&strip).len(), 48);
    }

    #[test]
    fn test_degenerate_skipped() {
        assert_eq!(strip_to_faces(&[1, 1, 2, 3]), vec![face(2, 1, 3)]);
    }

    #[test]
    fn test_repeat_drops_only_touching_windows() {
        let faces = strip_to_faces(&[1, 2, 3, 3, 4, 5, 6]);
        assert_eq!(faces, vec![face(1, 2, 3), face(4, 3, 5), face(4, 5, 6)]);
    }

    #[test]
    fn test_first_last_equal_is_degenerate() {
        assert!(strip_to_faces(&[7, 8, 7]).is_empty());
    }

    #[test]
    fn test_short_strips() {
        assert!(strip_to_faces(&[]).is_empty());
        assert!(strip_to_faces(&[1, 2]).is_empty());
    }
}
