//! Built-in page regions.
//!
//! Each region renders a self-contained shell; client-side widgets attach to
//! the `data-*` hooks.

use super::node::{Element, Node};
use super::region::{Region, RenderError};

/// Conversation list and the "new conversation" action.
#[derive(Debug, Clone)]
pub struct Sidebar {
    endpoint: String,
}

impl Default for Sidebar {
    fn default() -> Self {
        Self::new("/conversations")
    }
}

impl Sidebar {
    /// Create a sidebar backed by the given conversations endpoint.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

impl Region for Sidebar {
    fn name(&self) -> &'static str {
        "sidebar"
    }

    fn render(&self) -> Result<Node, RenderError> {
        Ok(Element::new("aside")
            .class("region sidebar")
            .attr("data-region", self.name())
            .child(Element::new("h2").text("Conversations"))
            .child(
                Element::new("button")
                    .attr("type", "button")
                    .attr("data-action", "create-conversation")
                    .attr("data-endpoint", self.endpoint.as_str())
                    .text("New Conversation"),
            )
            .child(
                Element::new("ul")
                    .class("conversation-list")
                    .attr("data-source", self.endpoint.as_str()),
            )
            .into())
    }
}

/// Main drawing surface.
#[derive(Debug, Clone, Copy, Default)]
pub struct Canvas;

impl Region for Canvas {
    fn name(&self) -> &'static str {
        "canvas"
    }

    fn render(&self) -> Result<Node, RenderError> {
        Ok(Element::new("section")
            .class("region canvas")
            .attr("data-region", self.name())
            .child(Element::new("div").class("canvas-surface").attr("tabindex", "0"))
            .into())
    }
}

/// Output log.
#[derive(Debug, Clone, Copy, Default)]
pub struct Console;

impl Region for Console {
    fn name(&self) -> &'static str {
        "console"
    }

    fn render(&self) -> Result<Node, RenderError> {
        Ok(Element::new("section")
            .class("region console")
            .attr("data-region", self.name())
            .child(
                Element::new("pre")
                    .class("console-output")
                    .attr("aria-live", "polite"),
            )
            .into())
    }
}

/// Message thread and composer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Chat;

impl Region for Chat {
    fn name(&self) -> &'static str {
        "chat"
    }

    fn render(&self) -> Result<Node, RenderError> {
        Ok(Element::new("section")
            .class("region chat")
            .attr("data-region", self.name())
            .child(Element::new("ol").class("chat-messages"))
            .child(
                Element::new("form")
                    .class("chat-composer")
                    .child(
                        Element::new("textarea")
                            .attr("name", "message")
                            .attr("placeholder", "Send a message"),
                    )
                    .child(Element::new("button").attr("type", "submit").text("Send")),
            )
            .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region_attr(node: &Node) -> Option<&str> {
        match node {
            Node::Element(el) => el.get_attr("data-region"),
            Node::Text(_) => None,
        }
    }

    #[test]
    fn test_regions_tag_themselves() {
        let regions: [&dyn Region; 4] = [&Sidebar::default(), &Canvas, &Console, &Chat];
        for region in regions {
            let node = region.render().unwrap();
            assert_eq!(region_attr(&node), Some(region.name()));
        }
    }

    #[test]
    fn test_sidebar_points_at_endpoint() {
        let html = Sidebar::new("/api/conversations").render().unwrap().to_html();
        assert!(html.contains(r#"data-endpoint="/api/conversations""#));
        assert!(html.contains("New Conversation"));
    }
}
