pub mod gallery;
pub mod util;
