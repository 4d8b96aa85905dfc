//! # page-focus
//!
//! A Rust library that finds the visually salient focal chain of a rendered
//! web page and annotates it in place, via Chrome DevTools Protocol (CDP).
//!
//! ## How it works
//!
//! The page is captured once into an immutable snapshot (geometry, computed
//! colors, margins, viewport). The selector then scans the whole subtree of
//! the current container, scores every fully-visible element by occupied
//! area and color contrast against its resolved background, outlines the
//! winner with a sequential index badge, and recurses into it under a
//! shrinking area budget until nothing inside qualifies. The dead-end
//! container is marked distinctly.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use page_focus::{BrowserSession, LaunchOptions, ScoreWeights};
//!
//! # fn main() -> page_focus::Result<()> {
//! let session = BrowserSession::launch(LaunchOptions::default())?;
//! session.navigate("https://example.com")?;
//! session.wait_for_navigation()?;
//!
//! let chain = session.annotate(ScoreWeights::default())?;
//! for annotation in chain.annotations() {
//!     println!("#{} {} (score {:.1})", annotation.index, annotation.element, annotation.score);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Running the selector without a browser
//!
//! The selection algorithm is pure and runs over any [`dom::PageSnapshot`],
//! so it can be driven from hand-built trees:
//!
//! ```rust
//! use page_focus::dom::{ElementNode, ComputedStyle, PageSnapshot, Viewport};
//! use page_focus::salience::Annotator;
//!
//! let mut root = ElementNode::new("body").with_rect(0.0, 0.0, 1000.0, 1000.0);
//! root.add_child(
//!     ElementNode::new("div")
//!         .with_rect(0.0, 0.0, 400.0, 300.0)
//!         .with_style(ComputedStyle::new().with_background("rgb(200, 30, 30)")),
//! );
//!
//! let snapshot = PageSnapshot::new(root, Viewport::new(1000.0, 1000.0));
//! let chain = Annotator::default().annotate(&snapshot);
//! assert_eq!(chain.len(), 1);
//! ```
//!
//! ## Using the tool system
//!
//! ```rust,no_run
//! use page_focus::{BrowserSession, LaunchOptions};
//! use page_focus::tools::{ToolRegistry, ToolContext};
//! use serde_json::json;
//!
//! # fn main() -> page_focus::Result<()> {
//! let session = BrowserSession::launch(LaunchOptions::default())?;
//! let registry = ToolRegistry::with_defaults();
//! let mut context = ToolContext::new(&session);
//!
//! registry.execute("navigate", json!({"url": "https://example.com"}), &mut context)?;
//! registry.execute("annotate", json!({"size_weight": 200.0}), &mut context)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - [`salience`]: the selection algorithm — color model, background
//!   resolution, geometry, scoring, recursive selector
//! - [`dom`]: page snapshot model (element tree, flattened arena, viewport)
//! - [`browser`]: browser session management and annotation application
//! - [`tools`]: named tools (navigate, annotate, clear_annotations, screenshot)
//! - [`error`]: error types and result alias

pub mod browser;
pub mod dom;
pub mod error;
pub mod salience;
pub mod tools;

pub use browser::{BrowserSession, ConnectionOptions, LaunchOptions};
pub use dom::{BoundingBox, ComputedStyle, ElementNode, PageSnapshot, Viewport};
pub use error::{FocusError, Result};
pub use salience::{Annotation, Annotator, FocusChain, Rgba, ScoreWeights, TerminalMark};
pub use tools::{Tool, ToolContext, ToolRegistry, ToolResult};
