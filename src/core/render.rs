//! The rendering collaborator seam.
//!
//! Rendering resolved text into a displayable form is an external concern;
//! the core only requires this narrow interface. Implementations dispatch on
//! the path (extension) and must degrade to returning the raw text rather
//! than failing: a rendering problem may never take down the page.

/// Turns resolved file text into a displayable representation.
pub trait ContentRenderer {
    fn render(&self, path: &str, content: &str) -> String;
}

/// Terminal renderer: passes text through unchanged. Serves as the
/// always-safe degradation target for richer renderers.
#[derive(Debug, Default)]
pub struct PlainTextRenderer;

impl ContentRenderer for PlainTextRenderer {
    fn render(&self, _path: &str, content: &str) -> String {
        content.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_renderer_passes_through() {
        let renderer = PlainTextRenderer;
        assert_eq!(renderer.render("a.rs", "fn main() {}"), "fn main() {}");
    }
}
