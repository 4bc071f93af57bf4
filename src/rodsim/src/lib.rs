pub mod affine;
pub mod config;
pub mod constraint;
pub mod damping;
pub mod extrude;
pub mod face;
pub mod node;
pub mod particle;
pub mod pos_box;
pub mod rod;
pub mod spline;
pub mod square_matrix;
pub mod swarm;
pub mod time_manager;
pub mod world;

pub type V3 = nalgebra::Vector3<f32>;
pub type Quat = nalgebra::UnitQuaternion<f32>;
