//! # Folio Core
//!
//! A single-page portfolio described as data: a tree of presentational nodes, each
//! optionally bound to a named animation variant, revealed in staggered cascades as the
//! viewer scrolls.
//!
//! ## Layers
//! - **Motion vocabulary**: `animation`, `variants`, `stagger`.
//! - **Triggers**: `visibility` (viewport observer and fire-once latches), `scroll`.
//! - **Content**: `content`, `text`, `sections`, `form`.
//! - **Composition**: `node`, `layout`, `page`, `motion`, `render`.
//!
//! ```no_run
//! use folio_core::{Page, SiteConfig};
//! use std::time::Duration;
//!
//! let config = SiteConfig::default();
//! let page = Page::compose(&config);
//! let mut mounted = page.mount(config.viewport.into())?;
//! mounted.on_scroll(900.0)?;
//! let frame = mounted.tick(Duration::from_millis(16))?;
//! println!("progress {:.2}", frame.progress);
//! # Ok::<(), folio_core::FolioError>(())
//! ```

pub mod animation;
pub mod config;
pub mod content;
pub mod errors;
pub mod form;
pub mod layout;
pub mod motion;
pub mod node;
pub mod page;
pub mod render;
pub mod scroll;
pub mod sections;
pub mod stagger;
pub mod text;
pub mod variants;
pub mod visibility;

pub use config::SiteConfig;
pub use errors::{FolioError, FormError, Result, VariantError};
pub use form::{Acknowledgment, ContactForm, Field};
pub use node::{NodeId, ViewNode};
pub use page::{Frame, GroupEvent, MountedPage, Page};
pub use stagger::{RevealGroup, RevealSchedule, StaggerPolicy};
pub use variants::{StateName, VariantRegistry};
pub use visibility::{Trigger, Viewport};
