//! Page layout: four isolated regions under an outer boundary.

use super::node::{Element, Node};
use super::region::{Boundary, Isolated, Region, RenderError};
use super::regions::{Canvas, Chat, Console, Sidebar};

/// Document title.
const PAGE_TITLE: &str = "Canvas Agent";

/// Shared layout holding each region behind its own boundary.
pub struct Layout {
    sidebar: Boundary<Box<dyn Region>>,
    canvas: Boundary<Box<dyn Region>>,
    console: Boundary<Box<dyn Region>>,
    chat: Boundary<Box<dyn Region>>,
}

impl Layout {
    /// Render every region independently.
    ///
    /// Order is sidebar, canvas, console, chat.
    #[must_use]
    pub fn render_regions(&self) -> [Isolated; 4] {
        [
            self.sidebar.isolate(),
            self.canvas.isolate(),
            self.console.isolate(),
            self.chat.isolate(),
        ]
    }
}

impl Region for Layout {
    fn name(&self) -> &'static str {
        "layout"
    }

    fn render(&self) -> Result<Node, RenderError> {
        let [sidebar, canvas, console, chat] = self.render_regions();

        Ok(Element::new("div")
            .class("layout")
            .child(sidebar.node)
            .child(
                Element::new("main")
                    .class("workspace")
                    .child(canvas.node)
                    .child(console.node),
            )
            .child(chat.node)
            .into())
    }
}

/// The application page.
pub struct Page {
    root: Boundary<Layout>,
}

impl Default for Page {
    fn default() -> Self {
        Self::new(
            Box::new(Sidebar::default()),
            Box::new(Canvas),
            Box::new(Console),
            Box::new(Chat),
        )
    }
}

impl Page {
    /// Compose a page from four regions.
    #[must_use]
    pub fn new(
        sidebar: Box<dyn Region>,
        canvas: Box<dyn Region>,
        console: Box<dyn Region>,
        chat: Box<dyn Region>,
    ) -> Self {
        let layout = Layout {
            sidebar: Boundary::new(sidebar),
            canvas: Boundary::new(canvas),
            console: Boundary::new(console),
            chat: Boundary::new(chat),
        };
        Self {
            root: Boundary::new(layout),
        }
    }

    /// Render the page body. Never fails.
    #[must_use]
    pub fn render(&self) -> Isolated {
        self.root.isolate()
    }

    /// Render each region on its own and report how each one ended.
    #[must_use]
    pub fn render_regions(&self) -> [Isolated; 4] {
        self.root.inner().render_regions()
    }

    /// Render the full HTML document.
    #[must_use]
    pub fn render_document(&self) -> String {
        let body = self.render().node.to_html();
        format!(
            "<!DOCTYPE html>\n<html lang=\"en\"><head><meta charset=\"utf-8\"><title>{PAGE_TITLE}</title></head><body>{body}</body></html>"
        )
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    struct Broken(&'static str);
    struct Exploding(&'static str);

    impl Region for Broken {
        fn name(&self) -> &'static str {
            self.0
        }

        fn render(&self) -> Result<Node, RenderError> {
            Err(RenderError::failed(self.0, "component threw"))
        }
    }

    impl Region for Exploding {
        fn name(&self) -> &'static str {
            self.0
        }

        fn render(&self) -> Result<Node, RenderError> {
            panic!("{} exploded", self.0)
        }
    }

    #[test]
    fn test_default_page_renders_all_regions() {
        let page = Page::default();
        let rendered = page.render();
        assert!(rendered.is_rendered());

        let html = rendered.node.to_html();
        for region in ["sidebar", "canvas", "console", "chat"] {
            assert!(html.contains(&format!(r#"data-region="{region}""#)), "{region}");
        }
        assert!(!html.contains("data-fallback"));
    }

    #[test]
    fn test_failing_chat_does_not_affect_siblings() {
        let page = Page::new(
            Box::new(Sidebar::default()),
            Box::new(Canvas),
            Box::new(Console),
            Box::new(Exploding("chat")),
        );

        let html = page.render().node.to_html();
        assert!(html.contains(r#"data-region="sidebar""#));
        assert!(html.contains(r#"data-region="canvas""#));
        assert!(html.contains(r#"data-region="console""#));
        assert!(!html.contains(r#"data-region="chat""#));
        assert!(html.contains(r#"data-fallback="chat""#));
    }

    #[test]
    fn test_each_region_is_isolated() {
        let page = Page::new(
            Box::new(Broken("sidebar")),
            Box::new(Canvas),
            Box::new(Exploding("console")),
            Box::new(Chat),
        );

        let outcomes: Vec<(&str, bool)> = page
            .render_regions()
            .iter()
            .map(|r| (r.region, r.is_rendered()))
            .collect();

        assert_eq!(
            outcomes,
            vec![
                ("sidebar", false),
                ("canvas", true),
                ("console", false),
                ("chat", true),
            ]
        );
    }

    #[test]
    fn test_document_wraps_body() {
        let doc = Page::default().render_document();
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains("<title>Canvas Agent</title>"));
        assert!(doc.contains(r#"<div class="layout">"#));
        assert!(doc.ends_with("</body></html>"));
    }
}
