pub mod caching;
pub mod exchangerate_host;
pub mod util;
