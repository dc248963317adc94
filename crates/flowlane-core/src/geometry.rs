//! Geometric primitives and geometry-annotation codecs.
//!
//! Positions and bounding boxes in a diagram are plain f32 values. Entities
//! in the process graph persist their placement as compact decimal strings
//! ("geometry annotations"); the codecs for those annotations live here:
//!
//! - [`Rect::to_geometry`] / [`Rect::from_geometry`] for rectangular bounds
//! - [`encode_path`] / [`decode_path`] for connector point lists

/// A point in diagram coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point.
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point.
    pub fn y(self) -> f32 {
        self.y
    }

    /// Returns this point shifted by the given deltas.
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Calculates the midpoint between this point and another point.
    pub fn midpoint(self, other: Point) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }
}

/// The dimensions of an element.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size.
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size.
    pub fn height(self) -> f32 {
        self.height
    }
}

/// An axis-aligned rectangle given by its top-left corner and size.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

impl Rect {
    /// Creates a new rectangle from its top-left corner and dimensions.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle centered on `center`.
    pub fn from_center(center: Point, size: Size) -> Self {
        Self {
            x: center.x() - size.width() / 2.0,
            y: center.y() - size.height() / 2.0,
            width: size.width(),
            height: size.height(),
        }
    }

    /// Returns the x-coordinate of the left edge.
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the top edge.
    pub fn y(self) -> f32 {
        self.y
    }

    /// Returns the width of the rectangle.
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height of the rectangle.
    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns the top-left corner as a point.
    pub fn origin(self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Returns the size of the rectangle.
    pub fn size(self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Returns the center of the rectangle.
    pub fn center(self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Checks whether the given point lies within this rectangle.
    ///
    /// Edges count as inside, so zero-extent rectangles (divider lines)
    /// still respond to hits exactly on the line.
    pub fn contains(self, point: Point) -> bool {
        point.x() >= self.x
            && point.x() <= self.x + self.width
            && point.y() >= self.y
            && point.y() <= self.y + self.height
    }

    /// Returns the smallest rectangle containing both rectangles.
    pub fn union(self, other: Rect) -> Self {
        let min_x = self.x.min(other.x);
        let min_y = self.y.min(other.y);
        let max_x = (self.x + self.width).max(other.x + other.width);
        let max_y = (self.y + self.height).max(other.y + other.height);
        Self {
            x: min_x,
            y: min_y,
            width: max_x - min_x,
            height: max_y - min_y,
        }
    }

    /// Returns this rectangle shifted by the given deltas.
    pub fn translate(self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    /// Encodes this rectangle as a geometry annotation: `"x,y,width,height"`.
    pub fn to_geometry(self) -> String {
        format!("{},{},{},{}", self.x, self.y, self.width, self.height)
    }

    /// Parses a geometry annotation produced by [`Rect::to_geometry`].
    pub fn from_geometry(geometry: &str) -> Result<Self, String> {
        let fields: Vec<&str> = geometry.split(',').collect();
        if fields.len() != 4 {
            return Err(format!(
                "invalid bounds geometry `{geometry}`, expected x,y,width,height"
            ));
        }
        let mut values = [0.0f32; 4];
        for (value, field) in values.iter_mut().zip(&fields) {
            *value = field
                .trim()
                .parse()
                .map_err(|_| format!("invalid coordinate `{field}` in geometry `{geometry}`"))?;
        }
        Ok(Self::new(values[0], values[1], values[2], values[3]))
    }
}

/// Encodes a connector path as a geometry annotation: `"x,y;x,y;…"`.
pub fn encode_path(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", p.x(), p.y()))
        .collect::<Vec<_>>()
        .join(";")
}

/// Parses a connector path annotation produced by [`encode_path`].
pub fn decode_path(geometry: &str) -> Result<Vec<Point>, String> {
    if geometry.is_empty() {
        return Ok(Vec::new());
    }
    geometry
        .split(';')
        .map(|pair| {
            let (x, y) = pair
                .split_once(',')
                .ok_or_else(|| format!("invalid path point `{pair}`"))?;
            let x = x
                .trim()
                .parse()
                .map_err(|_| format!("invalid path coordinate `{x}`"))?;
            let y = y
                .trim()
                .parse()
                .map_err(|_| format!("invalid path coordinate `{y}`"))?;
            Ok(Point::new(x, y))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_point_offset() {
        let point = Point::new(3.0, 4.0).offset(2.0, -1.0);
        assert_approx_eq!(f32, point.x(), 5.0);
        assert_approx_eq!(f32, point.y(), 3.0);
    }

    #[test]
    fn test_point_midpoint() {
        let mid = Point::new(0.0, 0.0).midpoint(Point::new(4.0, 6.0));
        assert_approx_eq!(f32, mid.x(), 2.0);
        assert_approx_eq!(f32, mid.y(), 3.0);
    }

    #[test]
    fn test_rect_center() {
        let rect = Rect::new(10.0, 20.0, 40.0, 20.0);
        let center = rect.center();
        assert_approx_eq!(f32, center.x(), 30.0);
        assert_approx_eq!(f32, center.y(), 30.0);
    }

    #[test]
    fn test_rect_from_center() {
        let rect = Rect::from_center(Point::new(50.0, 50.0), Size::new(20.0, 10.0));
        assert_approx_eq!(f32, rect.x(), 40.0);
        assert_approx_eq!(f32, rect.y(), 45.0);
        assert_approx_eq!(f32, rect.width(), 20.0);
        assert_approx_eq!(f32, rect.height(), 10.0);
    }

    #[test]
    fn test_rect_contains() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains(Point::new(5.0, 5.0)));
        assert!(rect.contains(Point::new(0.0, 0.0)));
        assert!(rect.contains(Point::new(10.0, 10.0)));
        assert!(!rect.contains(Point::new(10.1, 5.0)));
        assert!(!rect.contains(Point::new(-0.1, 5.0)));
    }

    #[test]
    fn test_rect_contains_zero_extent() {
        // A vertical divider has no width but must still respond to hits.
        let line = Rect::new(30.0, 0.0, 0.0, 100.0);
        assert!(line.contains(Point::new(30.0, 50.0)));
        assert!(!line.contains(Point::new(31.0, 50.0)));
    }

    #[test]
    fn test_rect_union() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, -5.0, 10.0, 10.0);
        let merged = a.union(b);
        assert_approx_eq!(f32, merged.x(), 0.0);
        assert_approx_eq!(f32, merged.y(), -5.0);
        assert_approx_eq!(f32, merged.width(), 15.0);
        assert_approx_eq!(f32, merged.height(), 15.0);
    }

    #[test]
    fn test_rect_translate() {
        let rect = Rect::new(1.0, 2.0, 3.0, 4.0).translate(10.0, -2.0);
        assert_approx_eq!(f32, rect.x(), 11.0);
        assert_approx_eq!(f32, rect.y(), 0.0);
        assert_approx_eq!(f32, rect.width(), 3.0);
        assert_approx_eq!(f32, rect.height(), 4.0);
    }

    #[test]
    fn test_rect_geometry_round_trip() {
        let rect = Rect::new(12.5, -3.0, 120.0, 60.0);
        let decoded = Rect::from_geometry(&rect.to_geometry()).unwrap();
        assert_eq!(rect, decoded);
    }

    #[test]
    fn test_rect_geometry_rejects_malformed() {
        assert!(Rect::from_geometry("1,2,3").is_err());
        assert!(Rect::from_geometry("1,2,3,oops").is_err());
        assert!(Rect::from_geometry("").is_err());
    }

    #[test]
    fn test_path_round_trip() {
        let path = vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 5.5),
            Point::new(20.0, 5.5),
        ];
        let decoded = decode_path(&encode_path(&path)).unwrap();
        assert_eq!(path, decoded);
    }

    #[test]
    fn test_path_empty() {
        assert_eq!(encode_path(&[]), "");
        assert_eq!(decode_path("").unwrap(), Vec::new());
    }

    #[test]
    fn test_path_rejects_malformed() {
        assert!(decode_path("1,2;3").is_err());
        assert!(decode_path("1,two").is_err());
    }
}
