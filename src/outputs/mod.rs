//! Writers for finished articles.
//!
//! # Submodules
//!
//! - [`markdown`]: one Markdown document per article
//! - [`indexes`]: `index.md` linking every article, newest first
//! - [`json`]: every article serialized into a single JSON file
//!
//! # Output Structure
//!
//! ```text
//! markdown_output_dir/
//! ├── index.md
//! ├── 3f1c…e9.md
//! └── 8a07…21.md
//!
//! json_output_dir/
//! └── articles.json
//! ```

pub mod indexes;
pub mod json;
pub mod markdown;
