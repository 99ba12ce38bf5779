mod ignore;
mod manifest;
mod render;
mod select;
mod walk;

pub use ignore::IgnoreRules;
pub use manifest::write_manifest;
pub use render::write_checklist;
pub use select::{SelectionSet, descendant_dirs, graft, toggle};
pub use walk::{WalkOptions, relative_path, walk_dir};
