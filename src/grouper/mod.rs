mod group;


pub use group::{ClusterGroup, group_points};
