mod init;
mod location;
mod lookup;
mod purge;
mod serve;

pub use init::cmd_init;
pub use location::cmd_location;
pub use lookup::{cmd_lookup, parse_domains};
pub use purge::cmd_purge;
pub use serve::cmd_serve;
