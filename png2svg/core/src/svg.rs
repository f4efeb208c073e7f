use std::fmt::Write as FmtWrite;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Rect,
    Pixel,
}

/// One emitted SVG element.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub kind: ShapeKind,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub fill: String,
    /// Set only for partially transparent colors.
    pub opacity: Option<f32>,
}

impl Shape {
    pub fn contains(&self, x: u32, y: u32) -> bool {
        (self.x..self.x + self.width).contains(&x) && (self.y..self.y + self.height).contains(&y)
    }

    fn write_to(&self, out: &mut String) {
        write!(
            out,
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\"",
            self.x, self.y, self.width, self.height, self.fill
        )
        .ok();
        if let Some(opacity) = self.opacity {
            write!(out, " fill-opacity=\"{opacity:.3}\"").ok();
        }
        out.push_str(" />");
    }
}

/// Opacity attribute value for an alpha channel, `None` when fully opaque.
pub fn opacity_from_alpha(alpha: u8) -> Option<f32> {
    (alpha < u8::MAX).then(|| alpha as f32 / 255.0)
}

/// Growing SVG document with one root `<svg>` element.
#[derive(Debug, Clone, Default)]
pub struct SvgDocument {
    width: u32,
    height: u32,
    shapes: Vec<Shape>,
}

impl SvgDocument {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            shapes: Vec::new(),
        }
    }

    pub fn add_rect(&mut self, x: u32, y: u32, width: u32, height: u32, fill: String, opacity: Option<f32>) {
        self.shapes.push(Shape {
            kind: ShapeKind::Rect,
            x,
            y,
            width,
            height,
            fill,
            opacity,
        });
    }

    pub fn add_pixel(&mut self, x: u32, y: u32, fill: String, opacity: Option<f32>) {
        self.shapes.push(Shape {
            kind: ShapeKind::Pixel,
            x,
            y,
            width: 1,
            height: 1,
            fill,
            opacity,
        });
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Renders the document, one element per line.
    pub fn render(&self) -> String {
        let mut svg = String::with_capacity(128 + self.shapes.len() * 64);
        svg.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
        writeln!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" viewBox=\"0 0 {w} {h}\" width=\"{w}\" height=\"{h}\" shape-rendering=\"crispEdges\">",
            w = self.width,
            h = self.height
        )
        .ok();
        for shape in &self.shapes {
            svg.push_str("  ");
            shape.write_to(&mut svg);
            svg.push('\n');
        }
        svg.push_str("</svg>\n");
        svg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_root_and_rects() {
        let mut doc = SvgDocument::new(4, 3);
        doc.add_rect(1, 2, 3, 1, "#0a141e".into(), None);
        doc.add_pixel(0, 0, "#fff".into(), Some(0.5));

        let svg = doc.render();
        assert!(svg.contains("viewBox=\"0 0 4 3\""));
        assert!(svg.contains("<rect x=\"1\" y=\"2\" width=\"3\" height=\"1\" fill=\"#0a141e\" />"));
        assert!(svg.contains(
            "<rect x=\"0\" y=\"0\" width=\"1\" height=\"1\" fill=\"#fff\" fill-opacity=\"0.500\" />"
        ));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn opacity_only_for_partial_alpha() {
        assert_eq!(opacity_from_alpha(255), None);
        assert_eq!(opacity_from_alpha(51), Some(0.2));
    }

    #[test]
    fn shape_extent() {
        let mut doc = SvgDocument::new(4, 4);
        doc.add_rect(1, 1, 2, 2, "#000".into(), None);
        let shape = &doc.shapes()[0];

        assert!(shape.contains(2, 2));
        assert!(!shape.contains(3, 1));
        assert_eq!(shape.kind, ShapeKind::Rect);
    }
}
