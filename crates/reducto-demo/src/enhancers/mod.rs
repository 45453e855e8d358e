//! Store enhancers used by the demo
//!
//! Both wrap the reducer handed to the store factory; chain them with
//! `reducto::compose`.

pub mod logging;
pub mod timing;

pub use logging::logging_enhancer;
pub use timing::timing_enhancer;
