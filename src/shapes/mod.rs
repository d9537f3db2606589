pub mod circle;
pub mod line_segment;

pub use circle::Circle;
pub use line_segment::LineSegment;
