//! Small companions of the `squirrel-pie` element.

pub mod breadcrumb;
pub mod chain;

pub use breadcrumb::{Breadcrumb, BreadcrumbError, Crumb, Navigate};
pub use chain::{ChainCollector, Segment};
