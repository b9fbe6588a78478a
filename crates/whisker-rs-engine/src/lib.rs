//! Logic-less text templating.
//!
//! Templates interleave literal text with `{{…}}` tags: variables (HTML
//! escaped by default, raw via `{{{…}}}` or `{{&…}}`), sections and
//! inverted sections, comments, partials, lambdas, and runtime delimiter
//! changes via `{{=… …=}}`.
//!
//! Data is supplied as a [`Data`] tree of objects, lists, strings, booleans
//! and callables; [`Template`] compiles once and renders any number of
//! times.
//!
//! ```
//! use whisker_rs_engine::{Data, Template};
//!
//! let mut data = Data::object();
//! data.set("name", "world").unwrap();
//! let template = Template::new("Hello {{name}}!");
//! assert_eq!(template.render(&data).unwrap(), "Hello world!");
//! ```

pub mod data;
pub mod engine;
pub mod parser;
pub mod renderer;

pub use data::Data;
pub use engine::Template;
pub use whisker_rs_core::error::{WhiskerError, WhiskerResult};
