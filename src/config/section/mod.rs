//! Configuration section definitions.
//!
//! Each module corresponds to a section in `docugen.toml`:
//!
//! | Module       | TOML Section     | Purpose                              |
//! |--------------|------------------|--------------------------------------|
//! | `build`      | `[build]`        | Output directory                     |
//! | `generation` | `[generation]`   | Structure generation service         |
//! | `ingest`     | `[ingest]`       | Accepted extensions, size limit      |
//! | `render`     | `[render]`       | Markdown extensions, initial theme   |
//! | `serve`      | `[serve]`        | Local viewer server                  |
//! | `site`       | `[site]`         | Title/description overrides          |

mod build;
mod generation;
mod ingest;
mod render;
mod serve;
mod site;

pub use build::BuildSectionConfig;
pub use generation::GenerationConfig;
pub use ingest::IngestConfig;
pub use render::{RenderConfig, ThemePreference};
pub use serve::ServeConfig;
pub use site::SiteSectionConfig;
