//! The `Region` capability and its failure boundary.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use thiserror::Error;

use super::node::{Element, Node};

/// Errors a region may report while rendering.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// The region returned an error.
    #[error("region {region} failed to render: {reason}")]
    Failed {
        /// Region name.
        region: &'static str,
        /// Failure description.
        reason: String,
    },
    /// The region panicked while rendering.
    #[error("region {region} panicked: {message}")]
    Panicked {
        /// Region name.
        region: &'static str,
        /// Panic payload, if it was a string.
        message: String,
    },
}

impl RenderError {
    /// Build a `Failed` error for `region`.
    #[must_use]
    pub fn failed(region: &'static str, reason: impl Into<String>) -> Self {
        Self::Failed {
            region,
            reason: reason.into(),
        }
    }
}

/// Anything that renders to a UI tree and may fail.
pub trait Region: Send + Sync {
    /// Stable region name, used in markup and logs.
    fn name(&self) -> &'static str;

    /// Render the region.
    ///
    /// # Errors
    /// Returns `RenderError` if the region cannot produce its tree.
    fn render(&self) -> Result<Node, RenderError>;
}

impl Region for Box<dyn Region> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn render(&self) -> Result<Node, RenderError> {
        (**self).render()
    }
}

/// How an isolated render ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The region produced its own tree.
    Rendered,
    /// The region failed and the fallback was used.
    Fallback {
        /// Why the region failed.
        reason: String,
    },
}

/// Result of rendering a region behind a [`Boundary`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Isolated {
    /// Region name.
    pub region: &'static str,
    /// Rendered tree (the fallback on failure).
    pub node: Node,
    /// How the render ended.
    pub outcome: Outcome,
}

impl Isolated {
    /// Whether the region rendered its own tree.
    #[must_use]
    pub const fn is_rendered(&self) -> bool {
        matches!(self.outcome, Outcome::Rendered)
    }
}

/// Failure boundary around a single region.
///
/// Errors and panics raised by the inner region are contained here and
/// replaced with a fallback node.
pub struct Boundary<R> {
    inner: R,
}

impl<R: Region> Boundary<R> {
    /// Wrap a region.
    #[must_use]
    pub const fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Borrow the wrapped region.
    #[must_use]
    pub const fn inner(&self) -> &R {
        &self.inner
    }

    /// Render the inner region, never propagating its failure.
    #[must_use]
    pub fn isolate(&self) -> Isolated {
        let region = self.inner.name();
        let result = panic::catch_unwind(AssertUnwindSafe(|| self.inner.render()))
            .unwrap_or_else(|payload| {
                Err(RenderError::Panicked {
                    region,
                    message: panic_message(payload.as_ref()),
                })
            });

        match result {
            Ok(node) => Isolated {
                region,
                node,
                outcome: Outcome::Rendered,
            },
            Err(err) => {
                tracing::error!(region, error = %err, "region failed, rendering fallback");
                Isolated {
                    region,
                    node: fallback(region),
                    outcome: Outcome::Fallback {
                        reason: err.to_string(),
                    },
                }
            }
        }
    }
}

impl<R: Region> Region for Boundary<R> {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn render(&self) -> Result<Node, RenderError> {
        Ok(self.isolate().node)
    }
}

/// Placeholder shown in place of a failed region.
#[must_use]
pub fn fallback(region: &'static str) -> Node {
    Element::new("section")
        .class("region region-fallback")
        .attr("data-fallback", region)
        .attr("role", "alert")
        .child(Element::new("p").text("This panel failed to load."))
        .into()
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
