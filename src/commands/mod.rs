pub mod browse;
pub mod cache;
pub mod config;
pub mod copy;
pub mod list;
pub mod more;
pub mod show;

pub use browse::*;
pub use cache::*;
pub use config::*;
pub use copy::*;
pub use list::*;
pub use more::*;
pub use show::*;
