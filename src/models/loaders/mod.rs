pub mod toml_loader;

pub use toml_loader::{load_all_spec_groups, load_spec_group};
