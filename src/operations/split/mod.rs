mod contact;
mod crossing;
mod self_intersect;
mod twin;

pub use crossing::ContourCrossingSplit;
pub use self_intersect::{find_crossings, SelfCrossing, SelfIntersectionSplit};
pub use twin::{Position, TwinMap};
