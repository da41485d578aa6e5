pub mod pause;
pub mod project;
pub mod record;

pub use pause::Pause;
pub use project::Project;
pub use record::Record;
